//! Detail View Component
//!
//! Displays a password record in a panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::api::CredentialRecord;

const MASK: &str = "••••••••";

/// Record detail data
#[derive(Debug, Clone)]
pub struct RecordDetail {
    pub title: String,
    pub username: String,
    pub password: String,
    pub password_visible: bool,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl RecordDetail {
    pub fn new(record: &CredentialRecord, password_visible: bool) -> Self {
        Self {
            title: record.title.clone(),
            username: record.username.clone(),
            password: record.password.clone(),
            password_visible,
            url: record.url.clone(),
            notes: record.notes.clone(),
        }
    }

    /// Password as it should be drawn.
    pub fn shown_password(&self) -> &str {
        if self.password_visible { &self.password } else { MASK }
    }
}

/// Detail view widget
pub struct DetailView<'a> {
    detail: &'a RecordDetail,
}

impl<'a> DetailView<'a> {
    pub fn new(detail: &'a RecordDetail) -> Self {
        Self { detail }
    }
}

impl<'a> Widget for DetailView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.detail.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut y = inner.y;
        let value_style = Style::default().fg(Color::White);

        render_field(buf, inner, &mut y, "Username", &[
            Span::styled(&self.detail.username, value_style),
            Span::styled("  yu", Style::default().fg(Color::DarkGray)),
        ]);

        let hint = if self.detail.password_visible { "  s hide" } else { "  s show" };
        render_field(buf, inner, &mut y, "Password", &[
            Span::styled(self.detail.shown_password(), Style::default().fg(Color::Yellow)),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]);

        if let Some(ref url) = self.detail.url {
            render_field(buf, inner, &mut y, "URL", &[
                Span::styled(url, Style::default().fg(Color::Blue)),
                Span::styled("  yl", Style::default().fg(Color::DarkGray)),
            ]);
        }

        y += 1;

        if let Some(ref notes) = self.detail.notes {
            if y >= inner.y + inner.height {
                return;
            }
            buf.set_string(inner.x, y, "Notes:", Style::default().fg(Color::DarkGray));
            y += 1;
            let note_area = Rect::new(inner.x, y, inner.width, inner.height.saturating_sub(y - inner.y));
            Paragraph::new(notes.as_str())
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .render(note_area, buf);
        }
    }
}

fn render_field(buf: &mut Buffer, inner: Rect, y: &mut u16, label: &str, value: &[Span]) {
    if *y >= inner.y + inner.height {
        return;
    }

    buf.set_string(inner.x, *y, format!("{}:", label), Style::default().fg(Color::DarkGray));

    let value_x = inner.x + 12;
    let line = Line::from(value.to_vec());
    buf.set_line(value_x, *y, &line, inner.width.saturating_sub(12));

    *y += 1;
}
