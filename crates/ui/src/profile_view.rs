use ratatui::{prelude::*, widgets::*};
use reader_core::types::{Preferences, User};

use crate::form::TextField;
use crate::layout::centered_rect;

const FOCUS_NAME: usize = 0;
const FOCUS_FONT: usize = 1;
const FOCUS_THEME: usize = 2;
const FOCUS_SPEED: usize = 3;
const FOCUS_MAX: usize = 3;

/// Profile editor: account info plus the three reading-preference options.
/// Nothing is persisted until an explicit save.
pub struct ProfileView {
    pub username: String,
    pub email: String,
    pub full_name: TextField,
    pub prefs: Preferences,
    pub focus: usize,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl ProfileView {
    pub fn new(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: TextField::with_value("Full name", &user.full_name),
            prefs: user.reading_preferences,
            focus: FOCUS_NAME,
            error: None,
            notice: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = if self.focus == FOCUS_MAX {
            0
        } else {
            self.focus + 1
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 {
            FOCUS_MAX
        } else {
            self.focus - 1
        };
    }

    pub fn editing_name(&self) -> bool {
        self.focus == FOCUS_NAME
    }

    /// Advance the focused preference option to its next value.
    pub fn cycle_focused(&mut self) {
        match self.focus {
            FOCUS_FONT => self.prefs.font_size = self.prefs.font_size.next(),
            FOCUS_THEME => self.prefs.theme = self.prefs.theme.next(),
            FOCUS_SPEED => self.prefs.reading_speed = self.prefs.reading_speed.next(),
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(70, 60, area);
        let block = Block::default()
            .title("Profile (Tab next, Space/→ change option, Enter save, Esc back)")
            .borders(Borders::ALL);

        let row = |focused: bool, label: &str, value: String| {
            let marker = if focused { "> " } else { "  " };
            let line = Line::from(vec![
                Span::raw(marker.to_string()),
                Span::styled(
                    format!("{label:<14}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(value),
            ]);
            if focused {
                line.style(Style::default().fg(Color::Blue))
            } else {
                line
            }
        };

        let mut lines = vec![
            Line::raw(""),
            Line::raw(format!("  Signed in as {} <{}>", self.username, self.email)),
            Line::raw(""),
            row(
                self.focus == FOCUS_NAME,
                "Full name:",
                self.full_name.display(),
            ),
            Line::raw(""),
            row(
                self.focus == FOCUS_FONT,
                "Font size:",
                self.prefs.font_size.label().to_string(),
            ),
            row(
                self.focus == FOCUS_THEME,
                "Theme:",
                self.prefs.theme.label().to_string(),
            ),
            row(
                self.focus == FOCUS_SPEED,
                "Reading speed:",
                self.prefs.reading_speed.label().to_string(),
            ),
        ];
        if let Some(error) = &self.error {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        if let Some(notice) = &self.notice {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {notice}"),
                Style::default().fg(Color::Green),
            ));
        }
        let body = Paragraph::new(lines).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(body, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reader_core::types::{FontSize, ReadingTheme};

    fn user() -> User {
        User {
            id: "u1".into(),
            username: "ana".into(),
            email: "ana@example.com".into(),
            full_name: "Ana B".into(),
            reading_preferences: Preferences::default(),
        }
    }

    #[test]
    fn cycles_only_the_focused_option() {
        let mut view = ProfileView::new(&user());
        view.cycle_focused();
        // Name focused: nothing changes.
        assert_eq!(view.prefs, Preferences::default());
        view.focus_next();
        view.cycle_focused();
        assert_eq!(view.prefs.font_size, FontSize::Large);
        assert_eq!(view.prefs.theme, ReadingTheme::Light);
    }

    #[test]
    fn focus_wraps_around() {
        let mut view = ProfileView::new(&user());
        view.focus_prev();
        assert_eq!(view.focus, FOCUS_SPEED);
        view.focus_next();
        assert_eq!(view.focus, FOCUS_NAME);
        assert!(view.editing_name());
    }
}
