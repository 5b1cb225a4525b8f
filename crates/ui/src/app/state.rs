use api_client::ApiClient;
use chrono::Utc;
use reader_core::{
    session::{self, Session},
    types::Preferences,
    validate,
};

use crate::{
    add_book_view::AddBookView,
    auth_view::{LoginView, RegisterView},
    books_view::LibraryView,
    history_view::HistoryView,
    profile_view::ProfileView,
    reader_view::ReaderSession,
};

use super::types::Mode;

/// Application state: the session context, the API client, and one view
/// per mode. All network calls are explicit steps in the handlers below;
/// views never talk to the API themselves.
pub struct App {
    pub api: ApiClient,
    pub session: Option<Session>,
    pub mode: Mode,
    pub library: LibraryView,
    pub reader: Option<ReaderSession>,
    pub login: Option<LoginView>,
    pub register: Option<RegisterView>,
    pub history: Option<HistoryView>,
    pub profile: Option<ProfileView>,
    pub add_book: Option<AddBookView>,
    pub status: Option<String>,
}

impl App {
    pub fn new(api: ApiClient, session: Option<Session>) -> Self {
        Self {
            api,
            session,
            mode: Mode::Library,
            library: LibraryView::new(),
            reader: None,
            login: None,
            register: None,
            history: None,
            profile: None,
            add_book: None,
            status: None,
        }
    }

    pub(super) fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user.username.as_str())
    }

    fn preferences(&self) -> Preferences {
        self.session
            .as_ref()
            .map(|s| s.user.reading_preferences)
            .unwrap_or_default()
    }

    pub(super) fn load_books(&mut self) {
        match self.api.list_books(&self.library.query()) {
            Ok(page) => self.library.set_page(page),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load books");
                self.status = Some("Failed to load books".to_string());
            }
        }
    }

    /// Fetch the book and any stored progress, paginate, restore the last
    /// page, and persist the restored position. A missing or failing
    /// progress fetch means "never started".
    pub(super) fn open_book(&mut self, book_id: &str, viewport_cols: u16) {
        let book = match self.api.get_book(book_id) {
            Ok(book) => book,
            Err(err) => {
                tracing::warn!(error = %err, book_id, "failed to load book");
                self.status = Some("Failed to load book".to_string());
                return;
            }
        };
        let stored = if self.session.is_some() {
            self.api.get_progress(book_id).unwrap_or_else(|err| {
                tracing::debug!(error = %err, book_id, "no stored progress");
                None
            })
        } else {
            None
        };
        self.reader = Some(ReaderSession::open(
            book,
            stored,
            viewport_cols,
            self.preferences(),
        ));
        self.mode = Mode::Reader;
        self.status = None;
        // The restored page counts as a page change.
        self.persist_progress();
    }

    pub(super) fn close_reader(&mut self) {
        self.reader = None;
        self.mode = Mode::Library;
    }

    /// Persist the current page for signed-in readers. Failures are
    /// logged and never block navigation.
    pub(super) fn persist_progress(&mut self) {
        let Some(reader) = self.reader.as_mut() else {
            return;
        };
        let (current, total) = (reader.cursor.current(), reader.cursor.total());
        if total == 0 || self.session.is_none() {
            return;
        }
        match self.api.update_progress(&reader.book.id, current, total) {
            Ok(Some(record)) => reader.tracker.store(record),
            Ok(None) => reader
                .tracker
                .advance_local(&reader.book.id, current, total, Utc::now()),
            Err(err) => {
                tracing::warn!(error = %err, book = %reader.book.id, "failed to update reading progress");
            }
        }
        if reader.tracker.take_completion(current, total) {
            tracing::info!(book = %reader.book.id, title = %reader.book.title, "book completed");
            self.status = Some(format!("Finished \"{}\"!", reader.book.title));
        }
    }

    pub(super) fn submit_login(&mut self) {
        let Some(view) = self.login.as_mut() else {
            return;
        };
        view.error = None;
        if let Err(err) = validate::validate_login(view.email(), view.password()) {
            view.error = Some(err.to_string());
            return;
        }
        match self.api.login(view.email(), view.password()) {
            Ok((token, user)) => {
                self.api.set_token(Some(token.clone()));
                let session = Session { token, user };
                if let Err(err) = session::save_session(&session) {
                    tracing::warn!(error = %err, "failed to save session");
                }
                self.status = Some(format!("Signed in as {}", session.user.username));
                self.session = Some(session);
                self.login = None;
                self.mode = Mode::Library;
            }
            Err(err) => view.error = Some(err.to_string()),
        }
    }

    pub(super) fn submit_register(&mut self) {
        let Some(view) = self.register.as_mut() else {
            return;
        };
        view.error = None;
        if let Err(err) = validate::validate_registration(
            view.username(),
            view.email(),
            view.password(),
            view.confirm(),
        ) {
            view.error = Some(err.to_string());
            return;
        }
        let token = match self.api.register(
            view.username(),
            view.email(),
            view.password(),
            view.full_name(),
        ) {
            Ok(token) => token,
            Err(err) => {
                view.error = Some(err.to_string());
                return;
            }
        };
        self.api.set_token(Some(token.clone()));
        match self.api.profile() {
            Ok(user) => {
                let session = Session { token, user };
                if let Err(err) = session::save_session(&session) {
                    tracing::warn!(error = %err, "failed to save session");
                }
                self.status = Some(format!("Welcome, {}!", session.user.username));
                self.session = Some(session);
                self.register = None;
                self.mode = Mode::Library;
            }
            Err(err) => {
                self.api.set_token(None);
                view.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn logout(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        self.api.set_token(None);
        if let Err(err) = session::clear_session() {
            tracing::warn!(error = %err, "failed to clear session");
        }
        self.status = Some("Signed out".to_string());
    }

    pub(super) fn open_history(&mut self, page: u32) {
        if self.session.is_none() {
            self.status = Some("Sign in to see your reading history".to_string());
            return;
        }
        let history = match self.api.history(page, 10) {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load reading history");
                self.status = Some("Failed to load reading history".to_string());
                return;
            }
        };
        let stats = self.api.stats().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load reading stats");
            Default::default()
        });
        self.history = Some(HistoryView::new(stats, history));
        self.mode = Mode::History;
        self.status = None;
    }

    pub(super) fn open_profile(&mut self) {
        let Some(session) = &self.session else {
            self.status = Some("Sign in to edit your profile".to_string());
            return;
        };
        self.profile = Some(ProfileView::new(&session.user));
        self.mode = Mode::Profile;
        self.status = None;
    }

    pub(super) fn submit_profile(&mut self) {
        let Some(view) = self.profile.as_mut() else {
            return;
        };
        view.error = None;
        view.notice = None;
        match self
            .api
            .update_profile(view.full_name.value.trim(), &view.prefs)
        {
            Ok(user) => {
                if let Some(session) = self.session.as_mut() {
                    session.user = user;
                    if let Err(err) = session::save_session(session) {
                        tracing::warn!(error = %err, "failed to save session");
                    }
                }
                view.notice = Some("Profile updated".to_string());
            }
            Err(err) => view.error = Some(err.to_string()),
        }
    }

    pub(super) fn submit_add_book(&mut self) {
        let Some(view) = self.add_book.as_mut() else {
            return;
        };
        view.error = None;
        if let Err(err) =
            validate::validate_new_book(view.title(), view.author(), view.content())
        {
            view.error = Some(err.to_string());
            return;
        }
        match self.api.create_book(
            view.title(),
            view.author(),
            view.description(),
            view.genre(),
            view.content(),
        ) {
            Ok(book_id) => {
                tracing::info!(book_id, "book added");
                self.status = Some(format!("Added \"{}\"", view.title()));
                self.add_book = None;
                self.mode = Mode::Library;
                self.load_books();
            }
            Err(err) => view.error = Some(err.to_string()),
        }
    }

    pub(super) fn submit_search(&mut self) {
        if let Some(prompt) = self.library.prompt.take() {
            let value = prompt.value.trim().to_string();
            match prompt.label {
                "Author" => self.library.author = value,
                _ => self.library.search = value,
            }
            self.library.page = 1;
            self.load_books();
        }
    }
}
