use ratatui::{prelude::*, widgets::*};
use reader_core::validate::{password_requirements, password_strength, strength_label};

use crate::form::{FieldSet, TextField};
use crate::layout::centered_rect;

pub struct LoginView {
    pub form: FieldSet,
    pub error: Option<String>,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            form: FieldSet::new(vec![TextField::new("Email"), TextField::masked("Password")]),
            error: None,
        }
    }

    pub fn email(&self) -> &str {
        self.form.value(0)
    }

    pub fn password(&self) -> &str {
        self.form.value(1)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(60, 40, area);
        let block = Block::default()
            .title("Sign in (Tab next field, Enter submit, Esc back)")
            .borders(Borders::ALL);
        let mut lines = vec![Line::raw("")];
        lines.extend(self.form.lines());
        if let Some(error) = &self.error {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        let body = Paragraph::new(lines).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(body, popup_area);
    }
}

pub struct RegisterView {
    pub form: FieldSet,
    pub error: Option<String>,
}

impl Default for RegisterView {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterView {
    pub fn new() -> Self {
        Self {
            form: FieldSet::new(vec![
                TextField::new("Username"),
                TextField::new("Email"),
                TextField::new("Full name"),
                TextField::masked("Password"),
                TextField::masked("Confirm"),
            ]),
            error: None,
        }
    }

    pub fn username(&self) -> &str {
        self.form.value(0)
    }

    pub fn email(&self) -> &str {
        self.form.value(1)
    }

    pub fn full_name(&self) -> &str {
        self.form.value(2)
    }

    pub fn password(&self) -> &str {
        self.form.value(3)
    }

    pub fn confirm(&self) -> &str {
        self.form.value(4)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        let block = Block::default()
            .title("Create account (Tab next field, Enter submit, Esc back)")
            .borders(Borders::ALL);
        let mut lines = vec![Line::raw("")];
        lines.extend(self.form.lines());

        let password = self.password();
        if !password.is_empty() {
            let strength = password_strength(password);
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  Strength: "),
                Span::styled(
                    format!("{} ({strength}%)", strength_label(strength)),
                    Style::default().fg(strength_color(strength)),
                ),
            ]));
            for req in password_requirements(password) {
                let (mark, color) = if req.met {
                    ("✓", Color::Green)
                } else {
                    ("✗", Color::DarkGray)
                };
                lines.push(Line::styled(
                    format!("    {mark} {}", req.text),
                    Style::default().fg(color),
                ));
            }
        }
        if let Some(error) = &self.error {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        let body = Paragraph::new(lines).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(body, popup_area);
    }
}

fn strength_color(strength: u8) -> Color {
    match strength {
        0..=25 => Color::Red,
        26..=50 => Color::Yellow,
        51..=75 => Color::Blue,
        _ => Color::Green,
    }
}
