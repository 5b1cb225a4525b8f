//! Request and response envelopes for the backend's JSON API.

use reader_core::types::{
    Book, BookSummary, HistoryEntry, Preferences, ReadingProgress, ReadingStats, User,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub full_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileUpdateRequest<'a> {
    pub full_name: &'a str,
    pub reading_preferences: &'a Preferences,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookEnvelope {
    pub book: Book,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBookRequest<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub genre: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBookResponse {
    pub book_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressEnvelope {
    #[serde(default)]
    pub progress: Option<ReadingProgress>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProgressUpdateRequest {
    pub current_page: usize,
    pub total_pages: usize,
}

/// The update route acknowledges with a message and may or may not echo
/// the updated record back.
#[derive(Debug, Deserialize)]
pub(crate) struct ProgressUpdateResponse {
    #[serde(default)]
    pub progress: Option<ReadingProgress>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatsEnvelope {
    pub stats: ReadingStats,
}

/// One page of catalog results.
#[derive(Debug, Clone, Deserialize)]
pub struct BookPage {
    pub books: Vec<BookSummary>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

/// One page of reading history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPage {
    pub history: Vec<HistoryEntry>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}
