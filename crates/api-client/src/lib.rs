//! Blocking REST/JSON client for the book-library backend.
//!
//! One request per user action, no retries, no explicit timeouts beyond
//! the HTTP client default. All consistency guarantees belong to the
//! server; a slow update racing a later one is acceptable (last response
//! wins).

pub mod error;
mod wire;

pub use error::ApiError;
pub use wire::{BookPage, HistoryPage};

use reader_core::types::{Book, Preferences, ReadingProgress, ReadingStats, User};
use serde::de::DeserializeOwned;

/// Catalog sort keys understood by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    UpdatedAt,
    Title,
    Author,
    CreatedAt,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::UpdatedAt => "updated_at",
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::CreatedAt => "created_at",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::UpdatedAt => "Recently updated",
            SortKey::Title => "Title",
            SortKey::Author => "Author",
            SortKey::CreatedAt => "Newest",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::UpdatedAt => SortKey::Title,
            SortKey::Title => SortKey::Author,
            SortKey::Author => SortKey::CreatedAt,
            SortKey::CreatedAt => SortKey::UpdatedAt,
        }
    }
}

/// Query parameters for the catalog listing.
#[derive(Debug, Clone)]
pub struct BookQuery {
    /// 1-based page of results.
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub author: String,
    pub sort: SortKey,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            author: String::new(),
            sort: SortKey::default(),
        }
    }
}

impl BookQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if !self.author.is_empty() {
            params.push(("author", self.author.clone()));
        }
        params
    }
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> Result<T, ApiError> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send()?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp.json()?)
        } else {
            let message = resp
                .json::<wire::ErrorBody>()
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Authenticate; returns the bearer token and the user record.
    pub fn login(&self, email: &str, password: &str) -> Result<(String, User), ApiError> {
        tracing::debug!(email, "login");
        let body = wire::LoginRequest { email, password };
        let resp: wire::LoginResponse =
            self.send(self.http.post(self.url("/api/auth/login")).json(&body))?;
        Ok((resp.access_token, resp.user))
    }

    /// Create an account; returns the bearer token. The user record comes
    /// from a follow-up `profile` call.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<String, ApiError> {
        tracing::debug!(username, email, "register");
        let body = wire::RegisterRequest {
            username,
            email,
            password,
            full_name,
        };
        let resp: wire::RegisterResponse =
            self.send(self.http.post(self.url("/api/auth/register")).json(&body))?;
        Ok(resp.access_token)
    }

    pub fn profile(&self) -> Result<User, ApiError> {
        let resp: wire::UserEnvelope = self.send(self.http.get(self.url("/api/auth/profile")))?;
        Ok(resp.user)
    }

    pub fn update_profile(
        &self,
        full_name: &str,
        preferences: &Preferences,
    ) -> Result<User, ApiError> {
        let body = wire::ProfileUpdateRequest {
            full_name,
            reading_preferences: preferences,
        };
        let resp: wire::UserEnvelope =
            self.send(self.http.put(self.url("/api/auth/profile")).json(&body))?;
        Ok(resp.user)
    }

    pub fn list_books(&self, query: &BookQuery) -> Result<BookPage, ApiError> {
        self.send(
            self.http
                .get(self.url("/api/books"))
                .query(&query.params()),
        )
    }

    pub fn get_book(&self, book_id: &str) -> Result<Book, ApiError> {
        let resp: wire::BookEnvelope =
            self.send(self.http.get(self.url(&format!("/api/books/{book_id}"))))?;
        Ok(resp.book)
    }

    /// Returns the new book's id.
    pub fn create_book(
        &self,
        title: &str,
        author: &str,
        description: &str,
        genre: &str,
        content: &str,
    ) -> Result<String, ApiError> {
        let body = wire::CreateBookRequest {
            title,
            author,
            description,
            genre,
            content,
        };
        let resp: wire::CreateBookResponse =
            self.send(self.http.post(self.url("/api/books")).json(&body))?;
        Ok(resp.book_id)
    }

    /// Stored progress for a book, or `None` when reading never started.
    /// A missing record is not an error.
    pub fn get_progress(&self, book_id: &str) -> Result<Option<ReadingProgress>, ApiError> {
        let result: Result<wire::ProgressEnvelope, ApiError> = self.send(
            self.http
                .get(self.url(&format!("/api/books/{book_id}/progress"))),
        );
        match result {
            Ok(envelope) => Ok(envelope.progress),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Persist the current page; returns the updated record when the
    /// server echoes one back.
    pub fn update_progress(
        &self,
        book_id: &str,
        current_page: usize,
        total_pages: usize,
    ) -> Result<Option<ReadingProgress>, ApiError> {
        tracing::debug!(book_id, current_page, total_pages, "update progress");
        let body = wire::ProgressUpdateRequest {
            current_page,
            total_pages,
        };
        let resp: wire::ProgressUpdateResponse = self.send(
            self.http
                .post(self.url(&format!("/api/books/{book_id}/progress")))
                .json(&body),
        )?;
        Ok(resp.progress)
    }

    pub fn history(&self, page: u32, limit: u32) -> Result<HistoryPage, ApiError> {
        self.send(self.http.get(self.url("/api/history")).query(&[
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ]))
    }

    pub fn stats(&self) -> Result<ReadingStats, ApiError> {
        let resp: wire::StatsEnvelope = self.send(self.http.get(self.url("/api/stats")))?;
        Ok(resp.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_omit_empty_filters() {
        let query = BookQuery::default();
        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
                ("sort", "updated_at".to_string()),
            ]
        );

        let query = BookQuery {
            search: "dune".into(),
            author: "herbert".into(),
            sort: SortKey::Title,
            ..BookQuery::default()
        };
        let params = query.params();
        assert!(params.contains(&("search", "dune".to_string())));
        assert!(params.contains(&("author", "herbert".to_string())));
        assert!(params.contains(&("sort", "title".to_string())));
    }

    #[test]
    fn sort_keys_cycle_through_all_variants() {
        let mut sort = SortKey::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(sort.as_str());
            sort = sort.next();
        }
        assert_eq!(sort, SortKey::UpdatedAt);
        assert_eq!(seen, ["updated_at", "title", "author", "created_at"]);
    }

    #[test]
    fn progress_envelope_tolerates_missing_record() {
        let env: wire::ProgressEnvelope =
            serde_json::from_str(r#"{"progress": null}"#).unwrap();
        assert!(env.progress.is_none());
        let env: wire::ProgressEnvelope =
            serde_json::from_str(r#"{"message": "Reading progress updated successfully"}"#)
                .unwrap();
        assert!(env.progress.is_none());
    }

    #[test]
    fn book_page_parses_catalog_response() {
        let page: BookPage = serde_json::from_str(
            r#"{
                "books": [
                    {"_id": "b1", "title": "Dune", "author": "Frank Herbert", "genre": "sf"}
                ],
                "total": 23,
                "page": 2,
                "pages": 3
            }"#,
        )
        .unwrap();
        assert_eq!(page.books.len(), 1);
        assert_eq!(page.books[0].id, "b1");
        assert_eq!(page.total, 23);
        assert_eq!(page.pages, 3);
    }
}
