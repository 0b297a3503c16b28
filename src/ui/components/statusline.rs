//! Status Line Component
//!
//! Displays mode indicator, messages, and list info.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::input::InputMode;

/// Message type for status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Status line widget
pub struct StatusLine<'a> {
    mode: InputMode,
    command_buffer: Option<&'a str>,
    message: Option<(&'a str, MessageType)>,
    item_count: Option<(usize, usize)>,
    sort_label: Option<&'a str>,
    last_sync: Option<&'a str>,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            command_buffer: None,
            message: None,
            item_count: None,
            sort_label: None,
            last_sync: None,
        }
    }

    pub fn command_buffer(mut self, buffer: &'a str) -> Self {
        self.command_buffer = Some(buffer);
        self
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    pub fn item_count(mut self, selected: usize, total: usize) -> Self {
        self.item_count = Some((selected, total));
        self
    }

    pub fn sort_label(mut self, label: &'a str) -> Self {
        self.sort_label = Some(label);
        self
    }

    pub fn last_sync(mut self, time: &'a str) -> Self {
        self.last_sync = Some(time);
        self
    }

    fn right_text(&self) -> String {
        let mut right_parts: Vec<String> = Vec::new();
        if let Some((selected, total)) = self.item_count {
            if total > 0 {
                right_parts.push(format!("{}/{}", selected + 1, total));
            } else {
                right_parts.push("0/0".to_string());
            }
        }
        if let Some(sort) = self.sort_label {
            right_parts.push(sort.to_string());
        }
        if let Some(sync) = self.last_sync {
            right_parts.push(format!("synced {}", sync));
        }
        right_parts.join(" │ ")
    }
}

impl<'a> Widget for StatusLine<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let mut x = area.x;

        let mode_style = match self.mode {
            InputMode::Normal => Style::default().fg(Color::Black).bg(Color::Blue),
            InputMode::Command => Style::default().fg(Color::Black).bg(Color::Red),
            InputMode::Search => Style::default().fg(Color::Black).bg(Color::Magenta),
            InputMode::Confirm => Style::default().fg(Color::Black).bg(Color::Red),
            InputMode::Help => Style::default().fg(Color::Black).bg(Color::Yellow),
        };

        let mode_text = format!(" {} ", self.mode.indicator());
        buf.set_string(x, area.y, &mode_text, mode_style.add_modifier(Modifier::BOLD));
        x += mode_text.len() as u16;

        buf.set_string(x, area.y, " ", Style::default().bg(Color::DarkGray));
        x += 1;

        let right_text = self.right_text();
        let right_width = right_text.chars().count() as u16;

        if let Some(buffer) = self.command_buffer {
            let prefix = match self.mode {
                InputMode::Command => ":",
                InputMode::Search => "/",
                _ => "",
            };
            let cmd_text = format!("{}{}", prefix, buffer);
            buf.set_string(x, area.y, &cmd_text, Style::default().fg(Color::White).bg(Color::DarkGray));
        } else if let Some((msg, msg_type)) = self.message {
            let room = area.width.saturating_sub(x - area.x + right_width + 2);
            let line = Line::from(Span::styled(msg, Style::default().fg(msg_type.color()).bg(Color::DarkGray)));
            buf.set_line(x, area.y, &line, room);
        }

        let right_x = area.x + area.width.saturating_sub(right_width + 1);
        buf.set_string(right_x, area.y, &right_text, Style::default().fg(Color::Gray).bg(Color::DarkGray));
    }
}

/// Help bar widget
pub struct HelpBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
}

impl<'a> HelpBar<'a> {
    pub fn for_mode(mode: InputMode) -> Self {
        let hints = match mode {
            InputMode::Normal => vec![
                ("j/k", "navigate"),
                ("n", "new"),
                ("Enter", "open"),
                ("s", "show"),
                ("yy", "copy"),
                ("dd", "delete"),
                ("/", "search"),
                (":", "command"),
                ("?", "help"),
            ],
            InputMode::Command | InputMode::Search => vec![
                ("Esc", "cancel"),
                ("Enter", "execute"),
            ],
            InputMode::Confirm => vec![
                ("y", "yes"),
                ("n", "no"),
            ],
            InputMode::Help => vec![
                ("q", "close"),
                ("j/k", "scroll"),
            ],
        };
        Self { hints }
    }

    /// Hints while a form is open
    pub fn for_form(blocking: bool) -> Self {
        let mut hints = vec![
            ("Tab", "next field"),
            ("C-s", "show"),
            ("Enter", "submit"),
        ];
        hints.push(("Esc", if blocking { "quit" } else { "cancel" }));
        Self { hints }
    }
}

impl<'a> Widget for HelpBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
        }
        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
