//! List View Component
//!
//! Password rows, the selection cursor over them, and the empty placeholder.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::api::CredentialRecord;
use crate::ui::renderer::Renderer;

const RECORD_ICON: &str = "󰌋";

/// One row of the record list
#[derive(Debug, Clone)]
pub struct RecordItem {
    pub title: String,
    pub username: String,
    pub url: Option<String>,
}

impl From<&CredentialRecord> for RecordItem {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            title: record.title.clone(),
            username: record.username.clone(),
            url: record.url.clone(),
        }
    }
}

/// Cursor over the visible rows. `None` only when there are no rows.
#[derive(Debug, Clone, Default)]
pub struct ListViewState {
    pub total: usize,
    inner: ListState,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.inner.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.inner.select(index.filter(|&i| i < self.total));
    }

    /// Record a new row count and pull the cursor back inside it.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        let index = match (total, self.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (_, Some(i)) => Some(i.min(total - 1)),
        };
        self.inner.select(index);
    }

    /// Move by `delta` rows, stopping at either end.
    pub fn step(&mut self, delta: isize) {
        if self.total == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        let last = self.total - 1;
        self.inner.select(Some(current.saturating_add_signed(delta).min(last)));
    }

    pub fn first(&mut self) {
        self.select(Some(0));
    }

    pub fn last(&mut self) {
        self.select(self.total.checked_sub(1));
    }
}

/// Password list; `compact` drops the url column for the split detail view.
pub struct RecordList<'a> {
    items: &'a [RecordItem],
    block: Block<'a>,
    compact: bool,
}

impl<'a> RecordList<'a> {
    pub fn new(items: &'a [RecordItem], block: Block<'a>) -> Self {
        Self { items, block, compact: false }
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

fn row<'a>(item: &'a RecordItem, compact: bool) -> ListItem<'a> {
    let mut spans = vec![
        Span::styled(format!("{} ", RECORD_ICON), Style::default().fg(Color::Green)),
        Span::styled(item.title.as_str(), Style::default().fg(Color::White)),
        Span::styled(format!(" ({})", item.username), Style::default().fg(Renderer::hex_color(0x4C566A))),
    ];
    if let (false, Some(url)) = (compact, item.url.as_deref()) {
        spans.push(Span::styled(format!("  {}", url), Style::default().fg(Color::Blue)));
    }
    ListItem::new(Line::from(spans))
}

impl StatefulWidget for RecordList<'_> {
    type State = ListViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let rows: Vec<ListItem> = self.items.iter().map(|item| row(item, self.compact)).collect();

        let list = List::new(rows)
            .block(self.block)
            .highlight_symbol("▌")
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

        StatefulWidget::render(list, area, buf, &mut state.inner);
    }
}

/// Centered placeholder for an empty pane
pub struct EmptyState<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> EmptyState<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { lines: vec![Line::styled(message, Style::default().fg(Color::DarkGray))] }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        let style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
        self.lines.push(Line::styled(hint, style));
        self
    }
}

impl Widget for EmptyState<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.lines.len() as u16;
        let [middle] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
        Paragraph::new(self.lines).centered().render(middle, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stops_at_both_ends() {
        let mut state = ListViewState::new();
        state.set_total(5);
        assert_eq!(state.selected(), Some(0));

        state.step(-1);
        assert_eq!(state.selected(), Some(0));
        state.step(3);
        assert_eq!(state.selected(), Some(3));
        state.step(10);
        assert_eq!(state.selected(), Some(4));

        state.first();
        assert_eq!(state.selected(), Some(0));
        state.last();
        assert_eq!(state.selected(), Some(4));
    }

    #[test]
    fn test_empty_list_has_no_cursor() {
        let mut state = ListViewState::new();
        state.set_total(0);
        state.step(1);
        state.last();
        assert_eq!(state.selected(), None);

        state.select(Some(2));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_cursor_pulled_back_when_list_shrinks() {
        let mut state = ListViewState::new();
        state.set_total(5);
        state.last();

        state.set_total(3);
        assert_eq!(state.selected(), Some(2));

        state.set_total(0);
        assert_eq!(state.selected(), None);

        state.set_total(2);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_compact_row_hides_url() {
        let record = CredentialRecord {
            id: "r1".into(),
            title: "Mail".into(),
            username: "me".into(),
            password: "pw".into(),
            url: Some("https://mail.example".into()),
            notes: None,
        };
        let item = RecordItem::from(&record);
        let area = Rect::new(0, 0, 60, 3);

        let render = |list: RecordList| {
            let mut buf = Buffer::empty(area);
            let mut state = ListViewState::new();
            state.set_total(1);
            StatefulWidget::render(list, area, &mut buf, &mut state);
            buf.content().iter().map(|c| c.symbol()).collect::<String>()
        };

        let items = [item];
        let full = render(RecordList::new(&items, Block::default()));
        assert!(full.contains("Mail"));
        assert!(full.contains("https://mail.example"));

        let compact = render(RecordList::new(&items, Block::default()).compact());
        assert!(compact.contains("(me)"));
        assert!(!compact.contains("https://mail.example"));
    }
}
