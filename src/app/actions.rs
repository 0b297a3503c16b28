use crate::input::keymap::{parse_command, Action};
use crate::ui::components::{Form, MessageType};
use crate::ui::renderer::View;
use crate::vault::VaultState;

use super::config::PendingAction;
use super::App;

impl App {
    /// Apply one action. Returns true when the app should exit.
    pub fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.list_state.step(-1),
            Action::MoveDown => self.list_state.step(1),
            Action::MoveToTop => self.list_state.first(),
            Action::MoveToBottom => self.list_state.last(),
            Action::PageUp => self.scroll_pages(-2),
            Action::PageDown => self.scroll_pages(2),
            Action::HalfPageUp => self.scroll_pages(-1),
            Action::HalfPageDown => self.scroll_pages(1),

            Action::ShowHelp => self.show_help(),
            Action::ChangePassword => self.request_password_change(),

            Action::Select => self.select_record(),
            Action::Back => self.go_back(),

            Action::CopyPassword => self.copy_password(),
            Action::CopyUsername => self.copy_username(),
            Action::CopyUrl => self.copy_url(),
            Action::TogglePasswordVisibility => self.toggle_selected_visibility(),

            Action::CycleSortKey => self.set_sort(|q| q.sort_key = q.sort_key.next()),
            Action::ToggleSortOrder => self.set_sort(|q| q.sort_order = q.sort_order.toggle()),
            Action::SortBy(key) => self.set_sort(|q| q.sort_key = key),
            Action::SetSortOrder(order) => self.set_sort(|q| q.sort_order = order),

            Action::Delete => self.initiate_delete(),
            Action::New => self.new_record(),

            Action::EnterCommand => self.mode_state.to_command(),
            Action::EnterSearch => self.enter_search(),

            Action::ExecuteCommand(cmd) => return self.execute_action(parse_command(&cmd)),
            Action::Search(term) => self.apply_search(&term),

            Action::Confirm => self.handle_confirm(),
            Action::Cancel => self.cancel_pending(),

            Action::Clear => self.clear_view(),
            Action::Quit | Action::ForceQuit => {
                self.should_quit = true;
                return true;
            }
            Action::Lock => self.request_lock(),
            Action::Refresh => self.refresh(),
            Action::Invalid(cmd) => self.set_message(&format!("Unknown command: {}", cmd), MessageType::Error),

            _ => {}
        }

        false
    }

    /// Move by `halves` half screens of rows.
    fn scroll_pages(&mut self, halves: isize) {
        let half = (self.list_visible_height() / 2).max(1) as isize;
        self.list_state.step(halves * half);
    }

    fn list_visible_height(&self) -> usize {
        (self.terminal_size.height as usize).saturating_sub(4)
    }

    /// Mutating actions only make sense once records are showing.
    fn require_ready(&mut self) -> bool {
        match self.session.state() {
            VaultState::Ready => true,
            VaultState::Unknown => {
                self.set_message("Backend unavailable, press Ctrl-r to retry", MessageType::Warning);
                false
            }
            VaultState::Uninitialized | VaultState::Locked => {
                self.set_message("Vault is locked", MessageType::Warning);
                false
            }
        }
    }

    fn show_help(&mut self) {
        self.help_state.to_top();
        self.mode_state.to_help();
    }

    fn request_password_change(&mut self) {
        if self.require_ready() {
            self.open_form(Form::change_master_password(self.view));
        }
    }

    fn new_record(&mut self) {
        if self.require_ready() {
            self.open_form(Form::add_record(self.view));
        }
    }

    fn select_record(&mut self) {
        if self.selected_record().is_some() {
            self.open_detail();
        }
    }

    fn go_back(&mut self) {
        if self.view == View::Detail {
            self.view = View::List;
        } else if !self.query.term.is_empty() {
            self.apply_search("");
        }
    }

    fn toggle_selected_visibility(&mut self) {
        let Some(id) = self.selected_id() else { return };
        self.toggle_visibility(&id);
    }

    fn set_sort(&mut self, f: impl FnOnce(&mut crate::vault::search::ViewQuery)) {
        let keep = self.selected_id();
        f(&mut self.query);
        self.sync_list();
        if let Some(id) = keep {
            self.select_id(&id);
        }
    }

    fn enter_search(&mut self) {
        self.search_backup = Some(self.query.term.clone());
        self.mode_state.to_search(&self.query.term);
    }

    /// Set the search term and jump to the first match.
    pub fn apply_search(&mut self, term: &str) {
        self.query.term = term.to_string();
        self.sync_list();
        self.list_state.first();
    }

    fn clear_view(&mut self) {
        self.clear_message();
        if !self.query.term.is_empty() {
            self.apply_search("");
        }
    }

    fn initiate_delete(&mut self) {
        if !self.require_ready() {
            return;
        }
        let Some(id) = self.selected_id() else { return };

        self.pending_action = Some(PendingAction::DeleteRecord(id));
        self.mode_state.to_confirm();
    }

    fn request_lock(&mut self) {
        if !self.require_ready() {
            return;
        }
        self.pending_action = Some(PendingAction::LockVault);
        self.mode_state.to_confirm();
    }

    fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.mode_state.to_normal();
    }

    fn handle_confirm(&mut self) {
        let Some(action) = self.pending_action.take() else {
            self.mode_state.to_normal();
            return;
        };

        self.mode_state.to_normal();
        match action {
            PendingAction::DeleteRecord(id) => {
                self.delete_record(&id);
            }
            PendingAction::LockVault => {
                self.lock();
                self.set_message("Vault locked", MessageType::Info);
            }
        }
    }

    fn refresh(&mut self) {
        match self.session.state() {
            VaultState::Ready => {
                if self.list_records() && !self.session.records().is_empty() {
                    let count = self.session.records().len();
                    self.set_message(&format!("Synced {} passwords", count), MessageType::Success);
                }
            }
            VaultState::Unknown | VaultState::Uninitialized => self.check_status(),
            VaultState::Locked => {}
        }
    }
}
