//! Popup Components
//!
//! Yes/no confirmation and the scrolling key reference.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

const KEY_COLUMN: usize = 14;

/// Area of `width` x `height` centered in `area`, clamped to fit.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Where the help overlay is drawn for a terminal of size `area`.
pub fn help_area(area: Rect) -> Rect {
    let height = (area.height as u32 * 7 / 10) as u16;
    popup_area(area, 64, height.max(8))
}

/// y/n prompt for destructive actions
pub struct ConfirmDialog<'a> {
    message: &'a str,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 44, 6);
        Clear.render(popup, buf);

        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };
        let text = vec![
            Line::from(self.message),
            Line::default(),
            Line::from(vec![
                key("y", Color::Green),
                Span::raw(" confirm   "),
                key("n", Color::Red),
                Span::raw(" cancel"),
            ]),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Confirm ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Yellow))
                    .style(Style::default().bg(Color::Black)),
            )
            .render(popup, buf);
    }
}

/// Scroll offset of the help overlay
#[derive(Debug, Default)]
pub struct HelpState {
    pub offset: usize,
}

impl HelpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move by `delta` lines, staying within `0..=max`.
    pub fn scroll_by(&mut self, delta: isize, max: usize) {
        self.offset = self.offset.saturating_add_signed(delta).min(max);
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self, max: usize) {
        self.offset = max;
    }
}

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SECTIONS: &[Section] = &[
    (
        "Navigation",
        &[
            ("j / ↓", "Move down"),
            ("k / ↑", "Move up"),
            ("gg / G", "Top / bottom"),
            ("Ctrl-d / u", "Half page down / up"),
            ("l / Enter", "Open password"),
            ("h / Esc", "Back to list"),
        ],
    ),
    (
        "Passwords",
        &[
            ("n", "Add password"),
            ("dd / x", "Delete password"),
            ("s", "Show / hide password"),
            ("Ctrl-r", "Refresh from server"),
        ],
    ),
    (
        "Clipboard",
        &[
            ("yy / yp", "Copy password"),
            ("yu / u", "Copy username"),
            ("yl", "Copy URL"),
        ],
    ),
    (
        "Search & Sort",
        &[
            ("/", "Search title, user, URL"),
            ("o", "Next sort field"),
            ("O", "Reverse sort order"),
        ],
    ),
    (
        "Commands",
        &[
            (":q", "Quit"),
            (":new", "Add password"),
            (":delete", "Delete selected"),
            (":passwd", "Change master password"),
            (":refresh", "Reload passwords"),
            (":lock", "Lock vault"),
            (":sort <key>", "title, user, url"),
            (":asc / :desc", "Sort order"),
            (":search <q>", "Set search"),
            (":clear", "Clear search"),
        ],
    ),
    (
        "Other",
        &[
            ("?", "Show this help"),
            ("Ctrl-p", "Change master password"),
            ("L", "Lock vault"),
            ("q", "Quit"),
        ],
    ),
];

fn help_lines() -> Vec<Line<'static>> {
    let header = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::styled(*title, header));
        lines.extend(bindings.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:<width$}", key, width = KEY_COLUMN), Style::default().fg(Color::Cyan)),
                Span::styled(*desc, Style::default().fg(Color::Gray)),
            ])
        }));
    }
    lines
}

/// Key reference overlay
pub struct HelpScreen<'a> {
    state: &'a HelpState,
}

impl<'a> HelpScreen<'a> {
    pub fn new(state: &'a HelpState) -> Self {
        Self { state }
    }

    /// Largest offset that still fills `visible_height` rows.
    pub fn max_scroll(visible_height: u16) -> usize {
        help_lines().len().saturating_sub(visible_height as usize)
    }
}

impl Widget for HelpScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = help_area(area);
        Clear.render(popup, buf);

        let offset = u16::try_from(self.state.offset).unwrap_or(u16::MAX);
        Paragraph::new(help_lines())
            .scroll((offset, 0))
            .block(
                Block::default()
                    .title(" Help ")
                    .title_bottom(Line::from(" j/k scroll • q close ").centered())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Magenta))
                    .style(Style::default().bg(Color::Black)),
            )
            .render(popup, buf);
    }
}
