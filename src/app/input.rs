use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use zeroize::Zeroizing;

use crate::input::keymap::{confirm_action, line_edit, normal_mode_action, text_input_action, Action};
use crate::input::modes::InputMode;
use crate::ui::components::popup::help_area;
use crate::ui::components::{Form, FormKind, HelpScreen, MessageType};
use crate::ui::renderer::View;

use super::App;

impl App {
    /// Handle one key press. Returns true when the app should exit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.session.touch();

        if self.view == View::Form && self.form.is_some() {
            return self.handle_form_key(key);
        }

        let action = self.resolve_action(key);
        self.execute_action(action)
    }

    fn resolve_action(&mut self, key: KeyEvent) -> Action {
        match self.mode_state.mode {
            InputMode::Normal => self.resolve_normal_action(key),
            InputMode::Command | InputMode::Search => self.resolve_text_action(key),
            InputMode::Confirm => confirm_action(key),
            InputMode::Help => {
                self.handle_help_key(key.code, key.modifiers);
                Action::None
            }
        }
    }

    fn resolve_normal_action(&mut self, key: KeyEvent) -> Action {
        let (action, pending) = normal_mode_action(key, self.mode_state.pending);
        self.mode_state.pending = pending;
        action
    }

    fn resolve_text_action(&mut self, key: KeyEvent) -> Action {
        let action = text_input_action(key);
        let action = self.handle_text_input(action);
        if self.mode_state.mode == InputMode::Search {
            self.update_live_search();
        }
        action
    }

    fn handle_text_input(&mut self, action: Action) -> Action {
        match action {
            Action::Edit(edit) => { self.mode_state.edit(edit); Action::None }
            Action::Submit => self.submit_text_input(),
            Action::Cancel => { self.cancel_text_input(); Action::None }
            _ => action,
        }
    }

    /// Filter as the user types.
    fn update_live_search(&mut self) {
        if self.mode_state.get_buffer() != self.query.term {
            let term = self.mode_state.get_buffer().to_string();
            self.apply_search(&term);
        }
    }

    fn submit_text_input(&mut self) -> Action {
        let buffer = self.mode_state.get_buffer().to_string();
        let result = match self.mode_state.mode {
            InputMode::Command => Action::ExecuteCommand(buffer),
            InputMode::Search => {
                self.search_backup = None;
                Action::Search(buffer)
            }
            _ => Action::None,
        };
        self.mode_state.to_normal();
        result
    }

    fn cancel_text_input(&mut self) {
        if self.mode_state.mode == InputMode::Search {
            let previous = self.search_backup.take().unwrap_or_default();
            self.mode_state.to_normal();
            self.apply_search(&previous);
        } else {
            self.mode_state.to_normal();
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        let Some(form) = self.form.as_mut() else { return false };

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                if form.kind.is_blocking() {
                    self.should_quit = true;
                    return true;
                }
                self.close_form();
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return true;
            }
            (KeyCode::Enter, KeyModifiers::NONE) => self.submit_form(),
            _ => dispatch_form_key(form, key),
        }
        false
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else { return };
        if let Err(e) = form.validate() {
            self.set_message(&e, MessageType::Error);
            return;
        }

        match form.kind {
            FormKind::Initialize => {
                let password = Zeroizing::new(form.value(0).to_string());
                let confirm = Zeroizing::new(form.value(1).to_string());
                self.initialize(&password, &confirm);
            }
            FormKind::Unlock => {
                let password = Zeroizing::new(form.value(0).to_string());
                self.unlock(&password);
            }
            FormKind::AddRecord => {
                let record = form.to_new_record();
                self.add_record(&record);
            }
            FormKind::ChangeMasterPassword => {
                let current = Zeroizing::new(form.value(0).to_string());
                let new = Zeroizing::new(form.value(1).to_string());
                let confirm = Zeroizing::new(form.value(2).to_string());
                self.change_master_password(&current, &new, &confirm);
            }
        }
    }

    fn help_visible_height(&self) -> u16 {
        help_area(self.terminal_size).height.saturating_sub(2)
    }

    fn handle_help_key(&mut self, code: KeyCode, mods: KeyModifiers) {
        let was_pending = self.mode_state.pending.take() == Some('g');
        let visible = self.help_visible_height();
        let max = HelpScreen::max_scroll(visible);
        let half = (visible / 2).max(1) as isize;

        match (code, mods) {
            (KeyCode::Char('?'), _) | (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                self.mode_state.to_normal();
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) if was_pending => self.help_state.to_top(),
            (KeyCode::Char('g'), KeyModifiers::NONE) => self.mode_state.pending = Some('g'),
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => self.help_state.scroll_by(1, max),
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => self.help_state.scroll_by(-1, max),
            (KeyCode::Char('G'), _) => self.help_state.to_bottom(max),
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => self.help_state.scroll_by(half, max),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.help_state.scroll_by(-half, max),
            _ => {}
        }
    }
}

fn dispatch_form_key(form: &mut Form, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => form.next_field(),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => form.prev_field(),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => form.toggle_password_visibility(),
        _ => {
            if let Some(edit) = line_edit(key) {
                form.edit(edit);
            }
        }
    }
}
