use chrono::Utc;
use ratatui::{prelude::*, widgets::*};
use reader_core::{
    nav::PageCursor,
    paginate::{paginate, words_per_page_for_width, PageSlice},
    progress::{self, ProgressTracker},
    types::{Book, FontSize, Preferences, ReadingProgress, ReadingTheme},
};

use crate::form::{render_prompt, TextField};

// Reading-surface palettes for the three theme presets.
const DARK_BG: Color = Color::Rgb(26, 27, 38);
const DARK_FG: Color = Color::Rgb(192, 202, 245);
const SEPIA_BG: Color = Color::Rgb(244, 232, 208);
const SEPIA_FG: Color = Color::Rgb(91, 70, 54);

pub struct SurfaceColors {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
}

impl SurfaceColors {
    fn for_theme(theme: ReadingTheme) -> Self {
        match theme {
            ReadingTheme::Light => SurfaceColors {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
            },
            ReadingTheme::Dark => SurfaceColors {
                bg: DARK_BG,
                fg: DARK_FG,
                accent: Color::Rgb(122, 162, 247),
            },
            ReadingTheme::Sepia => SurfaceColors {
                bg: SEPIA_BG,
                fg: SEPIA_FG,
                accent: Color::Rgb(166, 123, 91),
            },
        }
    }
}

/// The reading session view: a book paginated into word-count pages, a
/// clamped page cursor, and the cached progress record.
pub struct ReaderSession {
    pub book: Book,
    pub pages: Vec<PageSlice>,
    pub cursor: PageCursor,
    pub tracker: ProgressTracker,
    pub theme: ReadingTheme,
    pub font_size: FontSize,
    pub jump: Option<TextField>,
    words_per_page: usize,
}

impl ReaderSession {
    /// Paginate the fetched book and restore the last page from stored
    /// progress, defaulting to page 1.
    pub fn open(
        book: Book,
        stored: Option<ReadingProgress>,
        viewport_cols: u16,
        prefs: Preferences,
    ) -> Self {
        let tracker = ProgressTracker::new(stored);
        let words_per_page = words_per_page_for_width(text_cols(viewport_cols, prefs.font_size));
        let pages = paginate(&book.content, words_per_page);
        let cursor = PageCursor::restore(pages.len(), tracker.initial_page(pages.len()));
        Self {
            book,
            pages,
            cursor,
            tracker,
            theme: prefs.theme,
            font_size: prefs.font_size,
            jump: None,
            words_per_page,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.cursor.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.cursor.prev()
    }

    pub fn jump_to(&mut self, page: usize) -> bool {
        self.cursor.jump(page)
    }

    pub fn percent(&self) -> u8 {
        progress::percent(self.cursor.current(), self.cursor.total())
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }

    pub fn cycle_font_size(&mut self, viewport_cols: u16) {
        self.font_size = self.font_size.next();
        self.repaginate(words_per_page_for_width(text_cols(
            viewport_cols,
            self.font_size,
        )));
    }

    /// Re-paginate when the viewport width class changed; the current page
    /// is clamped, matching how the source re-split on resize.
    pub fn reflow(&mut self, viewport_cols: u16) {
        let wpp = words_per_page_for_width(text_cols(viewport_cols, self.font_size));
        if wpp != self.words_per_page {
            self.repaginate(wpp);
        }
    }

    fn repaginate(&mut self, words_per_page: usize) {
        self.words_per_page = words_per_page;
        let current = self.cursor.current();
        self.pages = paginate(&self.book.content, words_per_page);
        self.cursor = PageCursor::restore(self.pages.len(), Some(current.max(1)));
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, status: Option<&str>) {
        let colors = SurfaceColors::for_theme(self.theme);
        f.render_widget(
            Block::default().style(Style::default().bg(colors.bg).fg(colors.fg)),
            area,
        );

        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let title = format!(" {} — {}", self.book.title, self.book.author);
        f.render_widget(
            Paragraph::new(title).style(
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            vchunks[0],
        );

        let percent = self.percent();
        let gauge = Gauge::default()
            .ratio(f64::from(percent) / 100.0)
            .label(format!("{percent}%"))
            .gauge_style(Style::default().fg(colors.accent).bg(colors.bg));
        f.render_widget(gauge, vchunks[1]);

        let body_area = centered_column(vchunks[2], text_cols(area.width, self.font_size));
        let body = match self.pages.get(self.cursor.current().saturating_sub(1)) {
            Some(page) if self.cursor.current() >= 1 => Paragraph::new(page.text.clone())
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(colors.fg)),
            _ => Paragraph::new("No content available for this page.")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(colors.fg)
                        .add_modifier(Modifier::ITALIC),
                ),
        };
        f.render_widget(body, body_area);

        let time = progress::reading_time_label(self.tracker.started_reading(), Utc::now());
        let left = format!(
            " Page {} of {} · {percent}% · {time}",
            self.cursor.current(),
            self.cursor.total()
        );
        let right = status
            .map(|s| format!("{s} "))
            .unwrap_or_else(|| "←/→ page · g go to · t theme · f text size · Esc back ".to_string());
        let pad = (vchunks[3].width as usize)
            .saturating_sub(left.chars().count() + right.chars().count());
        let footer = Line::from(vec![
            Span::styled(left, Style::default().fg(colors.accent)),
            Span::raw(" ".repeat(pad)),
            Span::styled(right, Style::default().fg(colors.fg)),
        ]);
        f.render_widget(Paragraph::new(footer), vchunks[3]);

        if let Some(jump) = &self.jump {
            render_prompt(f, area, "Go to page (Enter, Esc)", &jump.value);
        }
    }
}

/// Column width for the reading surface: larger type gets fewer columns.
fn text_cols(viewport_cols: u16, font: FontSize) -> u16 {
    let cap = match font {
        FontSize::Small => 100,
        FontSize::Medium => 80,
        FontSize::Large => 64,
        FontSize::ExtraLarge => 52,
    };
    viewport_cols.min(cap).max(1)
}

fn centered_column(area: Rect, cols: u16) -> Rect {
    let width = cols.min(area.width);
    let left_pad = area.width.saturating_sub(width) / 2;
    Rect {
        x: area.x + left_pad,
        y: area.y,
        width,
        height: area.height,
    }
}
