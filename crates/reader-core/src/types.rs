use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry with the full text to be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub content: String,
}

/// Listing entry for the catalog view; the content body is not needed there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub description: String,
}

/// Per-user, per-book record of how far reading has advanced. Owned by the
/// backend; the reading view holds a cached copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub book_id: String,
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(default)]
    pub progress_percentage: f64,
    #[serde(default)]
    pub started_reading: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_read: Option<DateTime<Utc>>,
}

impl ReadingProgress {
    /// Completion is derived, not a stored transition.
    pub fn completed(&self) -> bool {
        self.total_pages > 0 && self.current_page >= self.total_pages
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub reading_preferences: Preferences,
}

/// Recognized reading preferences. Ephemeral in the reading view; persisted
/// only through an explicit profile save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub theme: ReadingTheme,
    #[serde(default)]
    pub reading_speed: ReadingSpeed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl FontSize {
    pub fn next(self) -> Self {
        match self {
            FontSize::Small => FontSize::Medium,
            FontSize::Medium => FontSize::Large,
            FontSize::Large => FontSize::ExtraLarge,
            FontSize::ExtraLarge => FontSize::Small,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
            FontSize::ExtraLarge => "Extra Large",
        }
    }
}

/// Named color/contrast preset for the reading surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingTheme {
    #[default]
    Light,
    Dark,
    Sepia,
}

impl ReadingTheme {
    pub fn next(self) -> Self {
        match self {
            ReadingTheme::Light => ReadingTheme::Dark,
            ReadingTheme::Dark => ReadingTheme::Sepia,
            ReadingTheme::Sepia => ReadingTheme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadingTheme::Light => "Light",
            ReadingTheme::Dark => "Dark",
            ReadingTheme::Sepia => "Sepia",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl ReadingSpeed {
    pub fn next(self) -> Self {
        match self {
            ReadingSpeed::Slow => ReadingSpeed::Normal,
            ReadingSpeed::Normal => ReadingSpeed::Fast,
            ReadingSpeed::Fast => ReadingSpeed::Slow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadingSpeed::Slow => "Slow",
            ReadingSpeed::Normal => "Normal",
            ReadingSpeed::Fast => "Fast",
        }
    }
}

/// Reading-history entry joined with its book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub book_id: String,
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(default)]
    pub progress_percentage: f64,
    #[serde(default)]
    pub last_read: Option<DateTime<Utc>>,
    pub book: BookSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingStats {
    #[serde(default)]
    pub total_books_started: u64,
    #[serde(default)]
    pub books_completed: u64,
    #[serde(default)]
    pub books_in_progress: u64,
    #[serde(default)]
    pub total_pages_read: u64,
    #[serde(default)]
    pub avg_progress: f64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub recent_books: Vec<RecentBook>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentBook {
    pub book_id: String,
    pub title: String,
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub last_read: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_round_trip_uses_wire_names() {
        let prefs = Preferences {
            font_size: FontSize::ExtraLarge,
            theme: ReadingTheme::Sepia,
            reading_speed: ReadingSpeed::Fast,
        };
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["font_size"], "extra-large");
        assert_eq!(json["theme"], "sepia");
        assert_eq!(json["reading_speed"], "fast");
        let back: Preferences = serde_json::from_value(json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn preferences_default_when_fields_missing() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","username":"ana","email":"ana@example.com"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.reading_preferences, Preferences::default());
    }

    #[test]
    fn progress_completed_is_derived() {
        let mut progress = ReadingProgress {
            book_id: "b1".into(),
            current_page: 2,
            total_pages: 3,
            progress_percentage: 66.7,
            started_reading: None,
            last_read: None,
        };
        assert!(!progress.completed());
        progress.current_page = 3;
        assert!(progress.completed());
    }
}
