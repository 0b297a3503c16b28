use crate::api::{ApiError, NewRecord};
use crate::ui::components::MessageType;
use crate::ui::renderer::View;

use super::clipboard;
use super::App;

/// First required field left blank, if any.
fn missing_field(record: &NewRecord) -> Option<&'static str> {
    if record.title.trim().is_empty() {
        Some("Title")
    } else if record.username.trim().is_empty() {
        Some("Username")
    } else if record.password.is_empty() {
        Some("Password")
    } else {
        None
    }
}

impl App {
    /// Refetch every record and replace the cache.
    ///
    /// Returns false when the fetch failed and the old cache was kept.
    pub fn list_records(&mut self) -> bool {
        match self.api.list_records() {
            Ok(records) => {
                tracing::debug!(count = records.len(), "records fetched");
                let empty = records.is_empty();
                self.session.replace_records(records);
                self.sync_list();
                if empty {
                    self.set_message("No passwords stored yet", MessageType::Info);
                }
                true
            }
            Err(ApiError::Decode(e)) => {
                tracing::warn!(error = %e, "unreadable record list, treating as empty");
                self.session.replace_records(Vec::new());
                self.sync_list();
                self.set_message("No passwords found", MessageType::Info);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "record fetch failed");
                self.set_message(&e.user_message("Failed to fetch passwords"), MessageType::Error);
                false
            }
        }
    }

    /// Create a record, then refetch. On failure the open form keeps its values.
    pub fn add_record(&mut self, record: &NewRecord) -> bool {
        if let Some(field) = missing_field(record) {
            self.set_message(&format!("{} is required", field), MessageType::Error);
            return false;
        }

        match self.api.add_record(record) {
            Ok(()) => {
                tracing::info!(title = %record.title, "record added");
                self.close_form();
                if self.list_records() {
                    self.set_message("Password added", MessageType::Success);
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "add failed");
                self.set_message(&e.user_message("Failed to add password"), MessageType::Error);
                false
            }
        }
    }

    pub fn delete_record(&mut self, id: &str) -> bool {
        match self.api.delete_record(id) {
            Ok(()) => {
                let title = self.session.record(id).map(|r| r.title.clone()).unwrap_or_default();
                tracing::info!(id, title = %title, "record deleted");
                self.session.remove_record(id);
                self.sync_list();
                if self.view == View::Detail && self.selected_record().is_none() {
                    self.view = View::List;
                }
                if self.list_records() {
                    self.set_message("Password deleted", MessageType::Success);
                }
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "delete failed");
                self.set_message(&e.user_message("Failed to delete password"), MessageType::Error);
                false
            }
        }
    }

    /// Show or hide one record's password. Local only.
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        self.session.toggle_revealed(id)
    }

    /// Copy `text` and schedule the clipboard wipe.
    pub fn copy_to_clipboard(&mut self, text: &str, label: &str) {
        if text.is_empty() {
            self.set_message(&format!("No {} to copy", label.to_lowercase()), MessageType::Warning);
            return;
        }
        clipboard::copy_with_timeout(text, self.config.clipboard_timeout());
        tracing::debug!(label, "copied to clipboard");
        self.set_message(
            &format!("{} copied (clears in {}s)", label, self.config.clipboard_timeout_secs),
            MessageType::Success,
        );
    }

    /// Open the detail panel for the selected record, refreshing it first.
    pub fn open_detail(&mut self) {
        let Some(id) = self.selected_id() else { return };

        match self.api.get_record(&id) {
            Ok(record) => {
                self.session.update_record(record);
                self.select_id(&id);
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "record refresh failed");
                self.set_message("Showing cached copy", MessageType::Warning);
            }
        }
        self.view = View::Detail;
    }

    pub fn copy_password(&mut self) {
        let Some(password) = self.selected_record().map(|r| r.password.clone()) else { return };
        let password = zeroize::Zeroizing::new(password);
        self.copy_to_clipboard(&password, "Password");
    }

    pub fn copy_username(&mut self) {
        let Some(username) = self.selected_record().map(|r| r.username.clone()) else { return };
        self.copy_to_clipboard(&username, "Username");
    }

    pub fn copy_url(&mut self) {
        let Some(url) = self.selected_record().map(|r| r.url_or_empty().to_string()) else { return };
        self.copy_to_clipboard(&url, "URL");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, username: &str, password: &str) -> NewRecord {
        NewRecord {
            title: title.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            url: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_missing_field_order() {
        assert_eq!(missing_field(&record("", "", "")), Some("Title"));
        assert_eq!(missing_field(&record("Mail", " ", "x")), Some("Username"));
        assert_eq!(missing_field(&record("Mail", "me", "")), Some("Password"));
        assert_eq!(missing_field(&record("Mail", "me", " ")), None);
    }
}
