use std::{io::stdout, time::Duration};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use super::types::{Command, CommandOutcome, Mode};
use super::App;

impl App {
    pub fn run(mut self) -> std::io::Result<()> {
        let mut stdout = stdout();
        let raw_ok = enable_raw_mode().is_ok();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.load_books();
        let mut width: u16 = 80;

        if !raw_ok {
            // Non-interactive fallback: draw once and exit cleanly
            let _ = terminal.draw(|f| self.draw(f, &mut width));
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            return Ok(());
        }

        let mut exit = false;
        while !exit {
            terminal.draw(|f| self.draw(f, &mut width))?;

            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if let Some(command) = Command::from_key(&self, key) {
                            if self.apply_command(command, width) == CommandOutcome::Exit {
                                exit = true;
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {
                        exit = true;
                    }
                },
                Ok(false) => {}
                Err(_) => {
                    exit = true;
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame<'_>, width: &mut u16) {
        let size = f.area();
        *width = size.width;
        match self.mode {
            Mode::Reader => {
                if let Some(reader) = self.reader.as_mut() {
                    reader.reflow(size.width);
                    reader.render(f, size, self.status.as_deref());
                }
            }
            _ => {
                self.library
                    .render(f, size, self.username(), self.status.as_deref());
                match self.mode {
                    Mode::Login => {
                        if let Some(view) = &self.login {
                            view.render(f, size);
                        }
                    }
                    Mode::Register => {
                        if let Some(view) = &self.register {
                            view.render(f, size);
                        }
                    }
                    Mode::History => {
                        if let Some(view) = &self.history {
                            view.render(f, size);
                        }
                    }
                    Mode::Profile => {
                        if let Some(view) = &self.profile {
                            view.render(f, size);
                        }
                    }
                    Mode::AddBook => {
                        if let Some(view) = &self.add_book {
                            view.render(f, size);
                        }
                    }
                    Mode::Library | Mode::Reader => {}
                }
            }
        }
    }
}
