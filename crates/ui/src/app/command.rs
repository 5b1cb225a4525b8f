use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    add_book_view::AddBookView,
    auth_view::{LoginView, RegisterView},
    form::TextField,
};

use super::state::App;
use super::types::{Command, CommandOutcome, Mode};

impl Command {
    /// Translate a key press into a command for the active mode. Keys
    /// that mean nothing in the current mode produce no command.
    pub(super) fn from_key(app: &App, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Exit);
        }
        match app.mode {
            Mode::Library => library_command(app, key),
            Mode::Reader => reader_command(app, key),
            Mode::Login | Mode::Register | Mode::AddBook => form_command(key),
            Mode::Profile => profile_command(app, key),
            Mode::History => history_command(key),
        }
    }
}

fn library_command(app: &App, key: KeyEvent) -> Option<Command> {
    if app.library.prompt.is_some() {
        return match key.code {
            KeyCode::Esc => Some(Command::Cancel),
            KeyCode::Enter => Some(Command::Submit),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Char(c) => Some(Command::Insert(c)),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') => Some(Command::Exit),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Enter => Some(Command::OpenSelected),
        KeyCode::Char('/') => Some(Command::StartSearch),
        KeyCode::Char('f') => Some(Command::StartAuthorFilter),
        KeyCode::Char('s') => Some(Command::CycleSort),
        KeyCode::Char('n') | KeyCode::Right => Some(Command::NextListPage),
        KeyCode::Char('p') | KeyCode::Left => Some(Command::PrevListPage),
        KeyCode::Char('a') => Some(Command::OpenAddBook),
        KeyCode::Char('h') => Some(Command::OpenHistory),
        KeyCode::Char('m') => Some(Command::OpenProfile),
        KeyCode::Char('l') => Some(Command::OpenLogin),
        KeyCode::Char('r') => Some(Command::OpenRegister),
        KeyCode::Char('x') => Some(Command::Logout),
        _ => None,
    }
}

fn reader_command(app: &App, key: KeyEvent) -> Option<Command> {
    let jumping = app.reader.as_ref().is_some_and(|r| r.jump.is_some());
    if jumping {
        return match key.code {
            KeyCode::Esc => Some(Command::Cancel),
            KeyCode::Enter => Some(Command::Submit),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Command::Insert(c)),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => Some(Command::PageForward),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::PageBackward),
        KeyCode::Char('g') => Some(Command::StartJump),
        KeyCode::Char('t') => Some(Command::CycleTheme),
        KeyCode::Char('f') => Some(Command::CycleFontSize),
        _ => None,
    }
}

fn form_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::BackTab => Some(Command::FocusPrev),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Char(c) => Some(Command::Insert(c)),
        _ => None,
    }
}

fn profile_command(app: &App, key: KeyEvent) -> Option<Command> {
    let editing_name = app.profile.as_ref().is_some_and(|v| v.editing_name());
    match key.code {
        KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Tab | KeyCode::Down => Some(Command::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Command::FocusPrev),
        KeyCode::Left | KeyCode::Right => Some(Command::CycleOption),
        KeyCode::Char(' ') if !editing_name => Some(Command::CycleOption),
        KeyCode::Backspace if editing_name => Some(Command::Backspace),
        KeyCode::Char(c) if editing_name => Some(Command::Insert(c)),
        _ => None,
    }
}

fn history_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Cancel),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Char('n') | KeyCode::Right => Some(Command::NextListPage),
        KeyCode::Char('p') | KeyCode::Left => Some(Command::PrevListPage),
        _ => None,
    }
}

impl App {
    pub(super) fn apply_command(
        &mut self,
        command: Command,
        viewport_cols: u16,
    ) -> CommandOutcome {
        match command {
            Command::Exit => return CommandOutcome::Exit,
            Command::Cancel => self.cancel(),
            Command::Submit => self.submit(viewport_cols),
            Command::FocusNext => self.focus_next(),
            Command::FocusPrev => self.focus_prev(),
            Command::Insert(c) => self.insert_char(c),
            Command::Backspace => self.backspace(),
            Command::MoveUp => self.move_selection(-1),
            Command::MoveDown => self.move_selection(1),
            Command::NextListPage => self.turn_list_page(1),
            Command::PrevListPage => self.turn_list_page(-1),
            Command::StartSearch => {
                self.library.prompt = Some(TextField::with_value("Search", &self.library.search));
            }
            Command::StartAuthorFilter => {
                self.library.prompt = Some(TextField::with_value("Author", &self.library.author));
            }
            Command::CycleSort => {
                self.library.sort = self.library.sort.next();
                self.library.page = 1;
                self.load_books();
            }
            Command::OpenSelected => {
                if let Some(id) = self.library.selected_id().map(str::to_string) {
                    self.open_book(&id, viewport_cols);
                }
            }
            Command::OpenLogin => {
                self.login = Some(LoginView::new());
                self.mode = Mode::Login;
            }
            Command::OpenRegister => {
                self.register = Some(RegisterView::new());
                self.mode = Mode::Register;
            }
            Command::OpenHistory => self.open_history(1),
            Command::OpenProfile => self.open_profile(),
            Command::OpenAddBook => {
                self.add_book = Some(AddBookView::new());
                self.mode = Mode::AddBook;
            }
            Command::Logout => self.logout(),
            Command::PageForward => {
                if self.reader.as_mut().is_some_and(|r| r.next_page()) {
                    self.persist_progress();
                }
            }
            Command::PageBackward => {
                if self.reader.as_mut().is_some_and(|r| r.prev_page()) {
                    self.persist_progress();
                }
            }
            Command::StartJump => {
                if let Some(reader) = self.reader.as_mut() {
                    reader.jump = Some(TextField::new("Page"));
                }
            }
            Command::CycleTheme => {
                if let Some(reader) = self.reader.as_mut() {
                    reader.cycle_theme();
                }
            }
            Command::CycleFontSize => {
                if let Some(reader) = self.reader.as_mut() {
                    reader.cycle_font_size(viewport_cols);
                }
            }
            Command::CycleOption => {
                if let Some(view) = self.profile.as_mut() {
                    view.cycle_focused();
                }
            }
        }
        CommandOutcome::Continue
    }

    fn cancel(&mut self) {
        match self.mode {
            Mode::Library => {
                self.library.prompt = None;
            }
            Mode::Reader => {
                let jumping = self
                    .reader
                    .as_mut()
                    .is_some_and(|r| r.jump.take().is_some());
                if !jumping {
                    self.close_reader();
                }
            }
            Mode::Login => {
                self.login = None;
                self.mode = Mode::Library;
            }
            Mode::Register => {
                self.register = None;
                self.mode = Mode::Library;
            }
            Mode::History => {
                self.history = None;
                self.mode = Mode::Library;
            }
            Mode::Profile => {
                self.profile = None;
                self.mode = Mode::Library;
            }
            Mode::AddBook => {
                self.add_book = None;
                self.mode = Mode::Library;
            }
        }
    }

    fn submit(&mut self, viewport_cols: u16) {
        match self.mode {
            Mode::Library => self.submit_search(),
            Mode::Reader => self.submit_jump(),
            Mode::Login => self.submit_login(),
            Mode::Register => self.submit_register(),
            Mode::History => self.resume_from_history(viewport_cols),
            Mode::Profile => self.submit_profile(),
            Mode::AddBook => self.submit_add_book(),
        }
    }

    fn submit_jump(&mut self) {
        let Some(reader) = self.reader.as_mut() else {
            return;
        };
        let Some(prompt) = reader.jump.take() else {
            return;
        };
        if let Ok(page) = prompt.value.trim().parse::<usize>() {
            if reader.jump_to(page) {
                self.persist_progress();
            }
        }
    }

    fn resume_from_history(&mut self, viewport_cols: u16) {
        let selected = self
            .history
            .as_ref()
            .and_then(|v| v.selected_book_id())
            .map(str::to_string);
        if let Some(id) = selected {
            self.history = None;
            self.open_book(&id, viewport_cols);
        }
    }

    fn focus_next(&mut self) {
        match self.mode {
            Mode::Login => {
                if let Some(view) = self.login.as_mut() {
                    view.form.focus_next();
                }
            }
            Mode::Register => {
                if let Some(view) = self.register.as_mut() {
                    view.form.focus_next();
                }
            }
            Mode::AddBook => {
                if let Some(view) = self.add_book.as_mut() {
                    view.form.focus_next();
                }
            }
            Mode::Profile => {
                if let Some(view) = self.profile.as_mut() {
                    view.focus_next();
                }
            }
            _ => {}
        }
    }

    fn focus_prev(&mut self) {
        match self.mode {
            Mode::Login => {
                if let Some(view) = self.login.as_mut() {
                    view.form.focus_prev();
                }
            }
            Mode::Register => {
                if let Some(view) = self.register.as_mut() {
                    view.form.focus_prev();
                }
            }
            Mode::AddBook => {
                if let Some(view) = self.add_book.as_mut() {
                    view.form.focus_prev();
                }
            }
            Mode::Profile => {
                if let Some(view) = self.profile.as_mut() {
                    view.focus_prev();
                }
            }
            _ => {}
        }
    }

    fn insert_char(&mut self, c: char) {
        match self.mode {
            Mode::Library => {
                if let Some(prompt) = self.library.prompt.as_mut() {
                    prompt.push_char(c);
                }
            }
            Mode::Reader => {
                if let Some(prompt) = self.reader.as_mut().and_then(|r| r.jump.as_mut()) {
                    prompt.push_char(c);
                }
            }
            Mode::Login => {
                if let Some(view) = self.login.as_mut() {
                    view.form.push_char(c);
                }
            }
            Mode::Register => {
                if let Some(view) = self.register.as_mut() {
                    view.form.push_char(c);
                }
            }
            Mode::AddBook => {
                if let Some(view) = self.add_book.as_mut() {
                    view.form.push_char(c);
                }
            }
            Mode::Profile => {
                if let Some(view) = self.profile.as_mut() {
                    if view.editing_name() {
                        view.full_name.push_char(c);
                    }
                }
            }
            Mode::History => {}
        }
    }

    fn backspace(&mut self) {
        match self.mode {
            Mode::Library => {
                if let Some(prompt) = self.library.prompt.as_mut() {
                    prompt.backspace();
                }
            }
            Mode::Reader => {
                if let Some(prompt) = self.reader.as_mut().and_then(|r| r.jump.as_mut()) {
                    prompt.backspace();
                }
            }
            Mode::Login => {
                if let Some(view) = self.login.as_mut() {
                    view.form.backspace();
                }
            }
            Mode::Register => {
                if let Some(view) = self.register.as_mut() {
                    view.form.backspace();
                }
            }
            Mode::AddBook => {
                if let Some(view) = self.add_book.as_mut() {
                    view.form.backspace();
                }
            }
            Mode::Profile => {
                if let Some(view) = self.profile.as_mut() {
                    if view.editing_name() {
                        view.full_name.backspace();
                    }
                }
            }
            Mode::History => {}
        }
    }

    fn move_selection(&mut self, delta: i64) {
        match self.mode {
            Mode::Library => {
                if delta > 0 {
                    self.library.down();
                } else {
                    self.library.up();
                }
            }
            Mode::History => {
                if let Some(view) = self.history.as_mut() {
                    if delta > 0 {
                        view.down();
                    } else {
                        view.up();
                    }
                }
            }
            _ => {}
        }
    }

    fn turn_list_page(&mut self, delta: i64) {
        match self.mode {
            Mode::Library => {
                let next = if delta > 0 {
                    self.library.page.saturating_add(1).min(self.library.pages.max(1))
                } else {
                    self.library.page.saturating_sub(1).max(1)
                };
                if next != self.library.page {
                    self.library.page = next;
                    self.load_books();
                }
            }
            Mode::History => {
                let Some(view) = self.history.as_ref() else {
                    return;
                };
                let next = if delta > 0 {
                    view.page.saturating_add(1).min(view.pages.max(1))
                } else {
                    view.page.saturating_sub(1).max(1)
                };
                if next != view.page {
                    self.open_history(next);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::ApiClient;

    fn app() -> App {
        App::new(ApiClient::new("http://localhost:5000"), None)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_exits_in_any_mode() {
        let mut app = app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [Mode::Library, Mode::Login, Mode::Profile, Mode::History] {
            app.mode = mode;
            assert!(matches!(Command::from_key(&app, key), Some(Command::Exit)));
        }
    }

    #[test]
    fn library_keys_map_to_commands() {
        let app = app();
        assert!(matches!(
            Command::from_key(&app, press(KeyCode::Char('q'))),
            Some(Command::Exit)
        ));
        assert!(matches!(
            Command::from_key(&app, press(KeyCode::Char('/'))),
            Some(Command::StartSearch)
        ));
        assert!(matches!(
            Command::from_key(&app, press(KeyCode::Enter)),
            Some(Command::OpenSelected)
        ));
        assert!(Command::from_key(&app, press(KeyCode::F(5))).is_none());
    }

    #[test]
    fn search_prompt_captures_text_keys() {
        let mut app = app();
        app.apply_command(Command::StartSearch, 80);
        assert!(app.library.prompt.is_some());
        assert!(matches!(
            Command::from_key(&app, press(KeyCode::Char('q'))),
            Some(Command::Insert('q'))
        ));
        app.apply_command(Command::Insert('t'), 80);
        app.apply_command(Command::Insert('o'), 80);
        assert_eq!(app.library.prompt.as_ref().map(|p| p.value.as_str()), Some("to"));
        app.apply_command(Command::Cancel, 80);
        assert!(app.library.prompt.is_none());
        assert_eq!(app.library.search, "");
    }

    #[test]
    fn login_form_receives_input_and_cancel_returns_to_library() {
        let mut app = app();
        app.apply_command(Command::OpenLogin, 80);
        assert_eq!(app.mode, Mode::Login);
        for c in "a@b.c".chars() {
            app.apply_command(Command::Insert(c), 80);
        }
        assert_eq!(app.login.as_ref().map(|v| v.email()), Some("a@b.c"));
        app.apply_command(Command::Cancel, 80);
        assert_eq!(app.mode, Mode::Library);
        assert!(app.login.is_none());
    }

    #[test]
    fn profile_text_keys_ignored_unless_name_focused() {
        let mut app = app();
        app.mode = Mode::Profile;
        assert!(Command::from_key(&app, press(KeyCode::Char('z'))).is_none());
        assert!(matches!(
            Command::from_key(&app, press(KeyCode::Tab)),
            Some(Command::FocusNext)
        ));
    }

    fn sample_book() -> reader_core::types::Book {
        reader_core::types::Book {
            id: "b1".into(),
            title: "T".into(),
            author: "A".into(),
            description: String::new(),
            genre: String::new(),
            content: (0..650)
                .map(|i| format!("w{i}"))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    #[test]
    fn page_turns_advance_locally_without_a_session() {
        use crate::reader_view::ReaderSession;
        use reader_core::types::Preferences;

        let mut app = app();
        app.reader = Some(ReaderSession::open(
            sample_book(),
            None,
            200,
            Preferences::default(),
        ));
        app.mode = Mode::Reader;

        // Not signed in: the page still turns, nothing is persisted.
        app.apply_command(Command::PageForward, 200);
        assert_eq!(app.reader.as_ref().unwrap().cursor.current(), 2);
        app.apply_command(Command::PageBackward, 200);
        assert_eq!(app.reader.as_ref().unwrap().cursor.current(), 1);
    }

    #[test]
    fn failed_progress_update_still_turns_the_page() {
        use crate::reader_view::ReaderSession;
        use reader_core::types::{Preferences, User};
        use reader_core::Session;

        // Signed in, but the server is unreachable: the update request
        // fails and the page change survives anyway.
        let session = Session {
            token: "tok".into(),
            user: User {
                id: "u1".into(),
                username: "ana".into(),
                email: "ana@example.com".into(),
                full_name: String::new(),
                reading_preferences: Preferences::default(),
            },
        };
        let mut app = App::new(ApiClient::new("http://127.0.0.1:1"), Some(session));
        app.reader = Some(ReaderSession::open(
            sample_book(),
            None,
            200,
            Preferences::default(),
        ));
        app.mode = Mode::Reader;

        app.apply_command(Command::PageForward, 200);
        assert_eq!(app.reader.as_ref().unwrap().cursor.current(), 2);
        app.apply_command(Command::PageForward, 200);
        assert_eq!(app.reader.as_ref().unwrap().cursor.current(), 3);
    }

    #[test]
    fn exit_command_stops_the_loop() {
        let mut app = app();
        assert_eq!(app.apply_command(Command::Exit, 80), CommandOutcome::Exit);
        assert_eq!(
            app.apply_command(Command::CycleTheme, 80),
            CommandOutcome::Continue
        );
    }
}
