//! Application State
//!
//! Core application logic tying together the backend API, the session
//! cache, UI, and input.

mod actions;
mod auth;
mod clipboard;
mod config;
mod input;
mod records;

#[cfg(test)]
mod tests;

use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::api::{CredentialRecord, VaultApi};
use crate::input::modes::ModeState;
use crate::ui::components::{Form, HelpState, ListViewState, MessageType, RecordDetail, RecordItem};
use crate::ui::renderer::{Renderer, UiState, View};
use crate::vault::search::ViewQuery;
use crate::vault::Session;

pub use config::{AppConfig, PendingAction};

pub struct App {
    pub config: AppConfig,
    api: Box<dyn VaultApi>,
    pub session: Session,
    pub query: ViewQuery,
    pub mode_state: ModeState,
    pub view: View,
    pub terminal_size: Rect,
    pub list_state: ListViewState,
    pub message: Option<(String, MessageType, Instant)>,
    pub pending_action: Option<PendingAction>,
    pub form: Option<Form>,
    pub help_state: HelpState,
    search_backup: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, api: Box<dyn VaultApi>) -> Self {
        Self {
            config,
            api,
            session: Session::new(),
            query: ViewQuery::default(),
            mode_state: ModeState::new(),
            view: View::List,
            terminal_size: Rect::default(),
            list_state: ListViewState::new(),
            message: None,
            pending_action: None,
            form: None,
            help_state: HelpState::new(),
            search_backup: None,
            should_quit: false,
        }
    }

    /// Records after search and sort, in display order.
    pub fn visible_records(&self) -> Vec<&CredentialRecord> {
        self.query.apply(self.session.records())
    }

    pub fn selected_record(&self) -> Option<&CredentialRecord> {
        let idx = self.list_state.selected()?;
        self.visible_records().get(idx).copied()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected_record().map(|r| r.id.clone())
    }

    /// Re-clamp the selection after the cache or the query changed.
    pub fn sync_list(&mut self) {
        let total = self.visible_records().len();
        self.list_state.set_total(total);
    }

    /// Move the selection onto `id` if it is visible.
    fn select_id(&mut self, id: &str) {
        let position = self.visible_records().iter().position(|r| r.id == id);
        if let Some(idx) = position {
            self.list_state.select(Some(idx));
        }
    }

    pub fn open_form(&mut self, form: Form) {
        self.mode_state.to_normal();
        self.pending_action = None;
        self.form = Some(form);
        self.view = View::Form;
    }

    /// Drop the open form (its fields are wiped on drop) and return to the
    /// view it was opened from.
    pub fn close_form(&mut self) {
        if let Some(form) = self.form.take() {
            self.view = if form.kind.is_blocking() { View::List } else { form.previous_view };
        }
        if self.view == View::Form {
            self.view = View::List;
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.terminal_size = frame.area();
        self.check_message_expiry();

        let (items, total_records, detail) = {
            let visible = self.visible_records();
            let items: Vec<RecordItem> = visible.iter().map(|r| RecordItem::from(*r)).collect();
            let detail = self
                .list_state
                .selected()
                .and_then(|idx| visible.get(idx))
                .map(|r| RecordDetail::new(r, self.session.is_revealed(&r.id)));
            (items, self.session.records().len(), detail)
        };

        let message = self.message.as_ref().map(|(m, t, _)| (m.as_str(), *t));
        let command_buffer = self.mode_state.mode.is_text_input().then(|| self.mode_state.get_buffer());
        let confirm_message = self.pending_action.as_ref().map(|a| a.confirm_message());
        let sort_label = format!("{} {}", self.query.sort_key.as_str(), self.query.sort_order.arrow());
        let last_sync = self.session.last_sync().map(|t| t.format("%H:%M").to_string());

        let mut state = UiState {
            view: self.view,
            mode: self.mode_state.mode,
            records: &items,
            total_records,
            list_state: &mut self.list_state,
            selected_detail: detail.as_ref(),
            command_buffer,
            message,
            confirm_message,
            form: self.form.as_ref(),
            help_state: &self.help_state,
            search_term: &self.query.term,
            sort_label: &sort_label,
            last_sync: last_sync.as_deref(),
        };

        Renderer::render(frame, &mut state);
    }

    fn check_message_expiry(&mut self) {
        let timeout = self.config.message_timeout();
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, time)| time.elapsed() > timeout);

        if expired {
            self.message = None;
        }
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
