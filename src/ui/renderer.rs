//! Renderer
//!
//! Main rendering logic for the application.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, BorderType},
    Frame,
};

use super::components::{
    ConfirmDialog, DetailView, EmptyState, Form, FormWidget, HelpBar, HelpScreen, HelpState,
    ListViewState, MessageType, RecordDetail, RecordItem, RecordList, StatusLine,
};
use crate::input::InputMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
    Form,
}

pub struct UiState<'a> {
    pub view: View,
    pub mode: InputMode,
    pub records: &'a [RecordItem],
    pub total_records: usize,
    pub list_state: &'a mut ListViewState,
    pub selected_detail: Option<&'a RecordDetail>,
    pub command_buffer: Option<&'a str>,
    pub message: Option<(&'a str, MessageType)>,
    pub confirm_message: Option<&'a str>,
    pub form: Option<&'a Form>,
    pub help_state: &'a HelpState,
    pub search_term: &'a str,
    pub sort_label: &'a str,
    pub last_sync: Option<&'a str>,
}

pub struct Renderer;

impl Renderer {
    pub fn hex_color(rgb: u32) -> Color {
        Color::Rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    pub fn render(frame: &mut Frame, state: &mut UiState) {
        let size = frame.area();
        let chunks = create_main_layout(size);

        render_content(frame, chunks[0], state);
        render_status_line(frame, chunks[1], state);
        render_help_bar(frame, chunks[2], state);
        render_overlays(frame, size, state);
    }
}

fn create_main_layout(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size)
}

fn render_content(frame: &mut Frame, area: Rect, state: &mut UiState) {
    match state.view {
        View::List => render_list(frame, area, state),
        View::Detail => render_detail(frame, area, state),
        View::Form => render_form(frame, area, state),
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &UiState) {
    let mut status = StatusLine::new(state.mode);

    if let Some(buffer) = state.command_buffer {
        status = status.command_buffer(buffer);
    } else if let Some((msg, msg_type)) = state.message {
        status = status.message(msg, msg_type);
    }

    if !is_blocking_form(state) {
        let selected = state.list_state.selected().unwrap_or(0);
        status = status
            .item_count(selected, state.list_state.total)
            .sort_label(state.sort_label);
        if let Some(sync) = state.last_sync {
            status = status.last_sync(sync);
        }
    }

    frame.render_widget(status, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let help_bar = match (state.view, state.form) {
        (View::Form, Some(form)) if state.mode == InputMode::Normal => {
            HelpBar::for_form(form.kind.is_blocking())
        }
        _ => HelpBar::for_mode(state.mode),
    };
    frame.render_widget(help_bar, area);
}

fn is_blocking_form(state: &UiState) -> bool {
    state.view == View::Form && state.form.is_some_and(|f| f.kind.is_blocking())
}

fn render_list(frame: &mut Frame, area: Rect, state: &mut UiState) {
    if state.records.is_empty() {
        let empty = if state.total_records > 0 {
            EmptyState::new("No passwords match").hint("Press '/' to change the search")
        } else {
            EmptyState::new("No passwords stored").hint("Press 'n' to add one")
        };
        frame.render_widget(empty, area);
        return;
    }

    let block = create_records_block(Color::Magenta, state.search_term, state.total_records);
    let list = RecordList::new(state.records, block);
    frame.render_stateful_widget(list, area, state.list_state);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_detail_list(frame, chunks[0], state);
    render_detail_panel(frame, chunks[1], state.selected_detail);
}

fn render_detail_list(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let block = create_records_block(Color::DarkGray, state.search_term, state.total_records);
    let list = RecordList::new(state.records, block).compact();
    frame.render_stateful_widget(list, area, state.list_state);
}

fn render_detail_panel(frame: &mut Frame, area: Rect, detail: Option<&RecordDetail>) {
    match detail {
        Some(d) => frame.render_widget(DetailView::new(d), area),
        None => frame.render_widget(EmptyState::new("Select a password"), area),
    }
}

fn create_records_block(border_color: Color, search_term: &str, total: usize) -> Block<'static> {
    let title = if search_term.is_empty() {
        " Passwords ".to_string()
    } else {
        format!(" Passwords /{} ({} total) ", search_term, total)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
}

fn render_form(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let Some(form) = state.form else {
        frame.render_widget(create_fallback_form_block(), area);
        return;
    };

    // Non-blocking forms float over the list they were opened from
    if !form.kind.is_blocking() {
        match form.previous_view {
            View::Detail => render_detail(frame, area, state),
            _ => render_list(frame, area, state),
        }
    }
    frame.render_widget(FormWidget::new(form), area);
}

fn create_fallback_form_block() -> Block<'static> {
    Block::default()
        .title(" Form ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Green))
}

fn render_overlays(frame: &mut Frame, area: Rect, state: &UiState) {
    if render_help_overlay(frame, area, state) {
        return;
    }
    render_confirm_overlay(frame, area, state);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, state: &UiState) -> bool {
    if state.mode != InputMode::Help {
        return false;
    }
    frame.render_widget(HelpScreen::new(state.help_state), area);
    true
}

fn render_confirm_overlay(frame: &mut Frame, area: Rect, state: &UiState) {
    if state.mode != InputMode::Confirm {
        return;
    }
    if let Some(msg) = state.confirm_message {
        let dialog = ConfirmDialog::new(msg);
        frame.render_widget(dialog, area);
    }
}
