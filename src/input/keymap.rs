//! Keymap
//!
//! Vim-style key bindings mapped to actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::modes::LineEdit;
use crate::vault::search::{SortKey, SortOrder};

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,

    // Selection
    Select,
    Back,

    // CRUD
    New,
    Delete,

    // Clipboard
    CopyPassword,
    CopyUsername,
    CopyUrl,

    // View
    TogglePasswordVisibility,
    CycleSortKey,
    ToggleSortOrder,
    SortBy(SortKey),
    SetSortOrder(SortOrder),

    // Mode changes
    EnterCommand,
    EnterSearch,
    ShowHelp,

    // Commands
    ExecuteCommand(String),
    Search(String),
    ChangePassword,

    // Confirmation
    Confirm,
    Cancel,

    // Application
    Clear,
    Quit,
    ForceQuit,
    Refresh,
    Lock,
    Invalid(String),

    // Text input
    Edit(LineEdit),
    Submit,

    // No action
    None,
}

/// Map key event to action in normal mode
pub fn normal_mode_action(key: KeyEvent, pending: Option<char>) -> (Action, Option<char>) {
    match (key.code, key.modifiers, pending) {
        // Navigation
        (KeyCode::Char('j') | KeyCode::Down, _, _) => (Action::MoveDown, None),
        (KeyCode::Char('k') | KeyCode::Up, _, _) => (Action::MoveUp, None),
        (KeyCode::Char('g'), _, None) => (Action::None, Some('g')),
        (KeyCode::Char('g'), _, Some('g')) => (Action::MoveToTop, None),
        (KeyCode::Char('G'), _, _) => (Action::MoveToBottom, None),
        (KeyCode::Char('d'), KeyModifiers::CONTROL, _) => (Action::HalfPageDown, None),
        (KeyCode::Char('u'), KeyModifiers::CONTROL, _) => (Action::HalfPageUp, None),
        (KeyCode::PageDown, _, _) => (Action::PageDown, None),
        (KeyCode::PageUp, _, _) => (Action::PageUp, None),

        // Clipboard (yy / yp / yu / yl)
        (KeyCode::Char('y') | KeyCode::Char('p'), _, Some('y')) => (Action::CopyPassword, None),
        (KeyCode::Char('u'), _, Some('y')) => (Action::CopyUsername, None),
        (KeyCode::Char('l'), _, Some('y')) => (Action::CopyUrl, None),
        (KeyCode::Char('y'), _, None) => (Action::None, Some('y')),
        (KeyCode::Char('u'), KeyModifiers::NONE, None) => (Action::CopyUsername, None),

        // Selection
        (KeyCode::Char('l'), KeyModifiers::CONTROL, _) => (Action::Clear, None),
        (KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right, _, _) => (Action::Select, None),
        (KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left, _, _) => (Action::Back, None),

        // CRUD
        (KeyCode::Char('n') | KeyCode::Char('a'), _, _) => (Action::New, None),
        (KeyCode::Char('d'), _, None) => (Action::None, Some('d')),
        (KeyCode::Char('d'), _, Some('d')) => (Action::Delete, None),
        (KeyCode::Char('x'), _, _) => (Action::Delete, None),

        // View
        (KeyCode::Char('s'), _, _) => (Action::TogglePasswordVisibility, None),
        (KeyCode::Char('o'), _, _) => (Action::CycleSortKey, None),
        (KeyCode::Char('O'), _, _) => (Action::ToggleSortOrder, None),

        // Mode changes
        (KeyCode::Char(':'), _, _) => (Action::EnterCommand, None),
        (KeyCode::Char('/'), _, _) => (Action::EnterSearch, None),
        (KeyCode::Char('?'), _, _) => (Action::ShowHelp, None),

        // Application
        (KeyCode::Char('q'), _, _) => (Action::Quit, None),
        (KeyCode::Char('Q'), _, _) => (Action::ForceQuit, None),
        (KeyCode::Char('r'), KeyModifiers::CONTROL, _) => (Action::Refresh, None),
        (KeyCode::Char('p'), KeyModifiers::CONTROL, _) => (Action::ChangePassword, None),
        (KeyCode::Char('L'), _, _) => (Action::Lock, None),

        _ => (Action::None, None),
    }
}

/// Map key event to action in text input modes
pub fn text_input_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        _ => line_edit(key).map_or(Action::None, Action::Edit),
    }
}

/// Editing keys shared by the prompts and form fields
pub fn line_edit(key: KeyEvent) -> Option<LineEdit> {
    let edit = match (key.code, key.modifiers) {
        (KeyCode::Backspace, _) => LineEdit::Backspace,
        (KeyCode::Delete, _) => LineEdit::Delete,
        (KeyCode::Left, _) => LineEdit::Left,
        (KeyCode::Right, _) => LineEdit::Right,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => LineEdit::Home,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => LineEdit::End,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => LineEdit::Clear,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => LineEdit::Insert(c),
        _ => return None,
    };
    Some(edit)
}

/// Map key event to action in confirm mode
pub fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

/// Parse command string into action
pub fn parse_command(cmd: &str) -> Action {
    let cmd = cmd.trim();
    let mut parts = cmd.splitn(2, ' ');
    let command = parts.next().unwrap_or("");
    let args = parts.next().map(str::trim).unwrap_or("");

    match command {
        "" => Action::None,
        "cls" | "clear" => Action::Clear,
        "q" | "quit" => Action::Quit,
        "q!" | "quit!" => Action::ForceQuit,
        "new" | "n" | "add" => Action::New,
        "delete" | "del" => Action::Delete,
        "help" | "h" => Action::ShowHelp,
        "passwd" | "password" | "changepw" => Action::ChangePassword,
        "lock" => Action::Lock,
        "refresh" => Action::Refresh,
        "asc" => Action::SetSortOrder(SortOrder::Ascending),
        "desc" => Action::SetSortOrder(SortOrder::Descending),
        "search" | "s" => Action::Search(args.to_string()),
        "sort" => match args.parse::<SortKey>() {
            Ok(key) => Action::SortBy(key),
            Err(_) => Action::Invalid(cmd.to_string()),
        },
        _ => Action::Invalid(cmd.to_string()),
    }
}
