use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, AppConfig, PendingAction};
use crate::api::models::parse_record_list;
use crate::api::{ApiError, ApiResult, AuthStatus, CredentialRecord, NewRecord, VaultApi};
use crate::input::modes::InputMode;
use crate::ui::components::{FormKind, MessageType};
use crate::ui::renderer::View;
use crate::vault::VaultState;

#[derive(Default)]
struct FakeState {
    initialized: bool,
    master: String,
    records: Vec<CredentialRecord>,
    next_id: u32,
    raw_list: Option<String>,
    failing: Vec<&'static str>,
    offline: bool,
    calls: Vec<&'static str>,
}

#[derive(Clone, Default)]
struct FakeApi(Rc<RefCell<FakeState>>);

impl FakeApi {
    fn call(&self, op: &'static str) -> ApiResult<()> {
        let mut state = self.0.borrow_mut();
        state.calls.push(op);
        if state.offline {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        if state.failing.contains(&op) {
            return Err(ApiError::Status { status: 500, message: String::new() });
        }
        Ok(())
    }

    fn calls(&self, op: &str) -> usize {
        self.0.borrow().calls.iter().filter(|c| **c == op).count()
    }
}

impl VaultApi for FakeApi {
    fn status(&self) -> ApiResult<AuthStatus> {
        self.call("status")?;
        Ok(AuthStatus { initialized: self.0.borrow().initialized })
    }

    fn initialize(&self, password: &str) -> ApiResult<()> {
        self.call("initialize")?;
        let mut state = self.0.borrow_mut();
        if state.initialized {
            return Err(ApiError::Status { status: 409, message: "Master password already set".to_string() });
        }
        state.initialized = true;
        state.master = password.to_string();
        Ok(())
    }

    fn verify(&self, password: &str) -> ApiResult<()> {
        self.call("verify")?;
        if self.0.borrow().master != password {
            return Err(ApiError::Status { status: 401, message: "Invalid password".to_string() });
        }
        Ok(())
    }

    fn change_master_password(&self, current: &str, new: &str) -> ApiResult<()> {
        self.call("change")?;
        let mut state = self.0.borrow_mut();
        if state.master != current {
            return Err(ApiError::Status { status: 401, message: "Invalid current password".to_string() });
        }
        state.master = new.to_string();
        Ok(())
    }

    fn list_records(&self) -> ApiResult<Vec<CredentialRecord>> {
        self.call("list")?;
        let state = self.0.borrow();
        match &state.raw_list {
            Some(raw) => parse_record_list(raw),
            None => Ok(state.records.clone()),
        }
    }

    fn get_record(&self, id: &str) -> ApiResult<CredentialRecord> {
        self.call("get")?;
        self.0
            .borrow()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ApiError::Status { status: 404, message: "Password not found".to_string() })
    }

    fn add_record(&self, record: &NewRecord) -> ApiResult<()> {
        self.call("add")?;
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let id = state.next_id.to_string();
        state.records.push(CredentialRecord {
            id,
            title: record.title.clone(),
            username: record.username.clone(),
            password: record.password.clone(),
            url: (!record.url.is_empty()).then(|| record.url.clone()),
            notes: (!record.notes.is_empty()).then(|| record.notes.clone()),
        });
        Ok(())
    }

    fn delete_record(&self, id: &str) -> ApiResult<()> {
        self.call("delete")?;
        self.0.borrow_mut().records.retain(|r| r.id != id);
        Ok(())
    }
}

impl App {
    fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|(m, _, _)| m.as_str())
    }

    fn message_type(&self) -> Option<MessageType> {
        self.message.as_ref().map(|(_, t, _)| *t)
    }
}

fn record(id: &str, title: &str, username: &str) -> CredentialRecord {
    CredentialRecord {
        id: id.to_string(),
        title: title.to_string(),
        username: username.to_string(),
        password: format!("{}-secret", id),
        url: None,
        notes: None,
    }
}

fn new_record(title: &str, username: &str, password: &str) -> NewRecord {
    NewRecord {
        title: title.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        url: String::new(),
        notes: String::new(),
    }
}

fn app_with(api: &FakeApi) -> App {
    App::new(AppConfig::default(), Box::new(api.clone()))
}

/// Backend initialized with `records`, app past the status check.
fn ready_app(records: Vec<CredentialRecord>) -> (App, FakeApi) {
    let api = FakeApi::default();
    {
        let mut state = api.0.borrow_mut();
        state.initialized = true;
        state.master = "master".to_string();
        state.next_id = 100;
        state.records = records;
    }
    let mut app = app_with(&api);
    app.check_status();
    (app, api)
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn test_status_uninitialized_opens_initialize_form() {
    let api = FakeApi::default();
    let mut app = app_with(&api);
    app.check_status();

    assert_eq!(app.session.state(), VaultState::Uninitialized);
    assert_eq!(app.view, View::Form);
    assert_eq!(app.form.as_ref().map(|f| f.kind), Some(FormKind::Initialize));
    assert_eq!(api.calls("list"), 0);
}

#[test]
fn test_status_failure_reports_generic_error() {
    let api = FakeApi::default();
    api.0.borrow_mut().offline = true;
    let mut app = app_with(&api);
    app.check_status();

    assert_eq!(app.session.state(), VaultState::Unknown);
    assert_eq!(app.message_text(), Some("Failed to check authentication status"));
    assert_eq!(app.message_type(), Some(MessageType::Error));
}

#[test]
fn test_initialize_mismatch_makes_no_call() {
    let api = FakeApi::default();
    let mut app = app_with(&api);
    app.check_status();

    app.initialize("hunter2", "hunter3");
    assert_eq!(api.calls("initialize"), 0);
    assert_eq!(app.message_text(), Some("Passwords do not match"));
    assert_eq!(app.form.as_ref().map(|f| f.value(1).to_string()), Some(String::new()));
}

#[test]
fn test_initialize_through_form() {
    let api = FakeApi::default();
    let mut app = app_with(&api);
    app.check_status();

    type_text(&mut app, "hunter2");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "hunter2");
    press(&mut app, KeyCode::Enter);

    assert_eq!(api.calls("initialize"), 1);
    assert_eq!(api.0.borrow().master, "hunter2");
    assert_eq!(app.session.state(), VaultState::Ready);
    assert!(app.form.is_none());
    assert_eq!(app.view, View::List);
    assert_eq!(api.calls("list"), 1);
}

#[test]
fn test_initialize_server_error_is_surfaced() {
    let api = FakeApi::default();
    let mut app = app_with(&api);
    app.check_status();
    api.0.borrow_mut().initialized = true;

    app.initialize("pw", "pw");
    assert_eq!(app.message_text(), Some("Master password already set"));
    assert!(app.form.is_some());
}

#[test]
fn test_add_then_list_shows_record_once() {
    let (mut app, api) = ready_app(vec![]);

    assert!(app.add_record(&new_record("GitHub", "octo", "pw")));
    assert_eq!(api.calls("add"), 1);

    let titles: Vec<&str> = app.session.records().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["GitHub"]);
    assert_eq!(app.message_text(), Some("Password added"));
}

#[test]
fn test_add_requires_fields_locally() {
    let (mut app, api) = ready_app(vec![]);

    assert!(!app.add_record(&new_record("GitHub", "octo", "")));
    assert_eq!(api.calls("add"), 0);
    assert_eq!(app.message_text(), Some("Password is required"));
}

#[test]
fn test_add_through_form_closes_it_and_refetches() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a")]);
    let lists_before = api.calls("list");

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Bank");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "jane");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "s3cret");
    press(&mut app, KeyCode::Enter);

    assert!(app.form.is_none());
    assert_eq!(app.view, View::List);
    assert_eq!(api.calls("add"), 1);
    assert_eq!(api.calls("list"), lists_before + 1);
    assert_eq!(app.message_text(), Some("Password added"));

    let banks: Vec<_> = app.session.records().iter().filter(|r| r.title == "Bank").collect();
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].username, "jane");
}

#[test]
fn test_failed_add_keeps_form_values() {
    let (mut app, api) = ready_app(vec![]);
    api.0.borrow_mut().failing.push("add");

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.form.as_ref().map(|f| f.kind), Some(FormKind::AddRecord));

    type_text(&mut app, "Bank");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "jane");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "s3cret");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.message_text(), Some("Failed to add password"));
    let form = app.form.as_ref().expect("form stays open");
    assert_eq!(form.value(0), "Bank");
    assert_eq!(form.value(2), "s3cret");
    assert_eq!(app.view, View::Form);
}

#[test]
fn test_escape_closes_add_form() {
    let (mut app, _api) = ready_app(vec![]);
    press(&mut app, KeyCode::Char('n'));
    assert!(!press(&mut app, KeyCode::Esc));
    assert!(app.form.is_none());
    assert_eq!(app.view, View::List);
}

#[test]
fn test_delete_clears_record_and_revealed_flag() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a"), record("2", "Beta", "b")]);

    assert!(app.toggle_visibility("1"));
    assert!(app.session.is_revealed("1"));

    assert!(app.delete_record("1"));
    assert_eq!(api.calls("delete"), 1);
    assert!(app.session.record("1").is_none());
    assert!(!app.session.is_revealed("1"));
    assert_eq!(app.session.records().len(), 1);
}

#[test]
fn test_failed_delete_keeps_cache() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a")]);
    api.0.borrow_mut().failing.push("delete");

    assert!(!app.delete_record("1"));
    assert!(app.session.record("1").is_some());
    assert_eq!(app.message_text(), Some("Failed to delete password"));
}

#[test]
fn test_delete_via_dd_and_confirm() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a"), record("2", "Beta", "b")]);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.mode_state.mode, InputMode::Confirm);
    assert_eq!(app.pending_action, Some(PendingAction::DeleteRecord("1".to_string())));

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(api.calls("delete"), 0);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(api.calls("delete"), 1);
    assert!(app.session.record("1").is_none());
    assert_eq!(app.mode_state.mode, InputMode::Normal);
}

#[test]
fn test_toggle_visibility_is_local() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a")]);
    let before = api.0.borrow().calls.len();

    press(&mut app, KeyCode::Char('s'));
    assert!(app.session.is_revealed("1"));
    press(&mut app, KeyCode::Char('s'));
    assert!(!app.session.is_revealed("1"));
    assert_eq!(api.0.borrow().calls.len(), before);
}

#[test]
fn test_copy_empty_url_warns() {
    let (mut app, _api) = ready_app(vec![record("1", "Alpha", "a")]);
    app.copy_url();
    assert_eq!(app.message_text(), Some("No url to copy"));
    assert_eq!(app.message_type(), Some(MessageType::Warning));
}

#[test]
fn test_malformed_list_is_empty_with_info() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a")]);
    assert_eq!(app.session.records().len(), 1);

    api.0.borrow_mut().raw_list = Some("{\"oops\": true}".to_string());
    assert!(app.list_records());
    assert!(app.session.records().is_empty());
    assert_eq!(app.message_type(), Some(MessageType::Info));
}

#[test]
fn test_null_list_is_empty_with_info() {
    let (mut app, api) = ready_app(vec![]);
    api.0.borrow_mut().raw_list = Some("null".to_string());

    assert!(app.list_records());
    assert!(app.session.records().is_empty());
    assert_eq!(app.message_type(), Some(MessageType::Info));
}

#[test]
fn test_list_failure_keeps_cache() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a")]);
    api.0.borrow_mut().offline = true;

    assert!(!app.list_records());
    assert_eq!(app.session.records().len(), 1);
    assert_eq!(app.message_text(), Some("Failed to fetch passwords"));
    assert_eq!(app.message_type(), Some(MessageType::Error));
}

#[test]
fn test_change_password_mismatch_makes_no_call() {
    let (mut app, api) = ready_app(vec![]);

    app.change_master_password("master", "new-one", "new-two");
    assert_eq!(api.calls("change"), 0);
    assert_eq!(app.message_text(), Some("New passwords do not match"));
}

#[test]
fn test_change_password_through_form() {
    let (mut app, api) = ready_app(vec![]);

    app.handle_key_event(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
    assert_eq!(app.form.as_ref().map(|f| f.kind), Some(FormKind::ChangeMasterPassword));

    type_text(&mut app, "master");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "fresh");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "fresh");
    press(&mut app, KeyCode::Enter);

    assert_eq!(api.0.borrow().master, "fresh");
    assert!(app.form.is_none());
    assert_eq!(app.message_text(), Some("Master password changed"));
}

#[test]
fn test_change_password_wrong_current_shows_server_text() {
    let (mut app, _api) = ready_app(vec![]);

    app.change_master_password("nope", "fresh", "fresh");
    assert_eq!(app.message_text(), Some("Invalid current password"));
}

#[test]
fn test_lock_clears_state_and_unlock_restores() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a")]);
    app.toggle_visibility("1");

    app.lock();
    assert_eq!(app.session.state(), VaultState::Locked);
    assert!(app.session.records().is_empty());
    assert_eq!(app.session.revealed_count(), 0);
    assert_eq!(app.form.as_ref().map(|f| f.kind), Some(FormKind::Unlock));

    app.unlock("wrong");
    assert_eq!(app.session.state(), VaultState::Locked);
    assert_eq!(app.message_text(), Some("Invalid password"));

    app.unlock("master");
    assert_eq!(app.session.state(), VaultState::Ready);
    assert_eq!(app.session.records().len(), 1);
    assert!(app.form.is_none());
    assert_eq!(api.calls("verify"), 2);
}

#[test]
fn test_idle_session_locks_itself() {
    let (mut app, _api) = ready_app(vec![record("1", "Alpha", "a")]);
    app.config.auto_lock_secs = 1;

    app.check_auto_lock();
    assert_eq!(app.session.state(), VaultState::Ready);

    thread::sleep(Duration::from_millis(1100));
    app.check_auto_lock();

    assert_eq!(app.session.state(), VaultState::Locked);
    assert!(app.session.records().is_empty());
    assert_eq!(app.form.as_ref().map(|f| f.kind), Some(FormKind::Unlock));
    assert_eq!(app.message_text(), Some("Locked after inactivity"));
    assert_eq!(app.message_type(), Some(MessageType::Info));
}

#[test]
fn test_auto_lock_disabled_with_zero() {
    let (mut app, _api) = ready_app(vec![]);
    app.config.auto_lock_secs = 0;
    thread::sleep(Duration::from_millis(5));
    app.check_auto_lock();
    assert_eq!(app.session.state(), VaultState::Ready);
}

#[test]
fn test_escape_on_blocking_form_quits() {
    let (mut app, _api) = ready_app(vec![]);
    app.lock();
    assert!(press(&mut app, KeyCode::Esc));
    assert!(app.should_quit);
}

#[test]
fn test_live_search_and_escape_restores_term() {
    let (mut app, _api) = ready_app(vec![
        record("1", "GitHub", "octo"),
        record("2", "Bank", "jane"),
        record("3", "Gitea", "me"),
    ]);

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "git");
    assert_eq!(app.query.term, "git");
    assert_eq!(app.visible_records().len(), 2);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.query.term, "");
    assert_eq!(app.visible_records().len(), 3);

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "bank");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.query.term, "bank");
    assert_eq!(app.selected_id().as_deref(), Some("2"));
}

#[test]
fn test_sort_keeps_selected_record() {
    let (mut app, _api) = ready_app(vec![record("1", "Alpha", "zed"), record("2", "Beta", "amy")]);

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.selected_id().as_deref(), Some("2"));

    app.execute_action(crate::input::keymap::parse_command("sort username"));
    assert_eq!(app.visible_records()[0].id, "2");
    assert_eq!(app.selected_id().as_deref(), Some("2"));
}

#[test]
fn test_open_detail_refreshes_record() {
    let (mut app, api) = ready_app(vec![record("1", "Alpha", "a")]);
    api.0.borrow_mut().records[0].username = "changed".to_string();

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.view, View::Detail);
    assert_eq!(api.calls("get"), 1);
    assert_eq!(app.session.record("1").map(|r| r.username.as_str()), Some("changed"));

    press(&mut app, KeyCode::Char('h'));
    assert_eq!(app.view, View::List);
}

#[test]
fn test_unknown_command_reports_error() {
    let (mut app, _api) = ready_app(vec![]);
    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "frob");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.message_text(), Some("Unknown command: frob"));
}

#[test]
fn test_quit_command() {
    let (mut app, _api) = ready_app(vec![]);
    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "q");
    assert!(press(&mut app, KeyCode::Enter));
    assert!(app.should_quit);
}
