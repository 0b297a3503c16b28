use crate::ui::components::{Form, MessageType};
use crate::ui::renderer::View;
use crate::vault::VaultState;

use super::clipboard;
use super::App;

impl App {
    /// Ask the backend whether a master password exists and route to the
    /// initialize form or the record list accordingly.
    pub fn check_status(&mut self) {
        match self.api.status() {
            Ok(status) if status.initialized => {
                tracing::info!("backend initialized");
                self.session.set_state(VaultState::Ready);
                if self.form.as_ref().is_some_and(|f| f.kind.is_blocking()) {
                    self.close_form();
                }
                self.list_records();
            }
            Ok(_) => {
                tracing::info!("backend has no master password yet");
                self.session.set_state(VaultState::Uninitialized);
                self.open_form(Form::initialize());
            }
            Err(e) => {
                tracing::error!(error = %e, "status check failed");
                self.session.set_state(VaultState::Unknown);
                self.set_message("Failed to check authentication status", MessageType::Error);
            }
        }
    }

    /// Set the first master password. `confirm` must match.
    pub fn initialize(&mut self, password: &str, confirm: &str) {
        if password.is_empty() {
            self.set_message("Master password is required", MessageType::Error);
            return;
        }
        if password != confirm {
            self.set_message("Passwords do not match", MessageType::Error);
            if let Some(form) = self.form.as_mut() {
                form.reset_field(1);
            }
            return;
        }

        match self.api.initialize(password) {
            Ok(()) => {
                tracing::info!("master password initialized");
                self.session.set_state(VaultState::Ready);
                self.close_form();
                if self.list_records() {
                    self.set_message("Master password set", MessageType::Success);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "initialize failed");
                self.set_message(&e.user_message("Failed to initialize master password"), MessageType::Error);
            }
        }
    }

    /// Verify the master password with the backend and reopen the view.
    pub fn unlock(&mut self, password: &str) {
        if password.is_empty() {
            self.set_message("Master password is required", MessageType::Error);
            return;
        }

        match self.api.verify(password) {
            Ok(()) => {
                tracing::info!("vault unlocked");
                self.session.set_state(VaultState::Ready);
                self.session.touch();
                self.close_form();
                if self.list_records() {
                    self.set_message("Vault unlocked", MessageType::Success);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "unlock failed");
                if let Some(form) = self.form.as_mut() {
                    form.reset_field(0);
                }
                self.set_message(&e.user_message("Invalid master password"), MessageType::Error);
            }
        }
    }

    /// Forget everything fetched so far and demand the master password again.
    pub fn lock(&mut self) {
        tracing::info!(revealed = self.session.revealed_count(), "vault locked");
        self.session.clear();
        self.session.set_state(VaultState::Locked);
        self.query.term.clear();
        self.search_backup = None;
        self.sync_list();
        clipboard::clear_now();

        self.form = None;
        self.view = View::List;
        self.open_form(Form::unlock());
    }

    /// Lock when the session has been idle past the configured timeout.
    pub fn check_auto_lock(&mut self) {
        if self.session.should_auto_lock(self.config.auto_lock_timeout()) {
            self.lock();
            self.set_message("Locked after inactivity", MessageType::Info);
        }
    }

    pub fn change_master_password(&mut self, current: &str, new: &str, confirm: &str) {
        if current.is_empty() || new.is_empty() {
            self.set_message("All fields are required", MessageType::Error);
            return;
        }
        if new != confirm {
            self.set_message("New passwords do not match", MessageType::Error);
            if let Some(form) = self.form.as_mut() {
                form.reset_field(2);
            }
            return;
        }

        match self.api.change_master_password(current, new) {
            Ok(()) => {
                tracing::info!("master password changed");
                self.close_form();
                self.set_message("Master password changed", MessageType::Success);
            }
            Err(e) => {
                tracing::warn!(error = %e, "master password change failed");
                self.set_message(&e.user_message("Failed to change master password"), MessageType::Error);
            }
        }
    }
}
