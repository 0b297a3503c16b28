//! Input Modes
//!
//! Which keymap is active, plus the one-line editor shared by the command
//! line, the search prompt and form fields.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// `:` prompt
    Command,
    /// `/` prompt, filters live
    Search,
    /// y/n dialog is up
    Confirm,
    Help,
}

impl InputMode {
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Command => "COMMAND",
            Self::Search => "SEARCH",
            Self::Confirm => "CONFIRM",
            Self::Help => "HELP",
        }
    }

    /// Modes whose keys go to the line editor.
    pub fn is_text_input(&self) -> bool {
        matches!(self, Self::Command | Self::Search)
    }
}

/// One editing keystroke on a single-line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// Byte offset of the `char_idx`-th character in `s`.
fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

/// Apply `edit` to `text`. `cursor` counts characters, not bytes.
pub fn apply_edit(text: &mut String, cursor: &mut usize, edit: LineEdit) {
    let len = text.chars().count();
    *cursor = (*cursor).min(len);

    match edit {
        LineEdit::Insert(c) => {
            let at = byte_offset(text, *cursor);
            text.insert(at, c);
            *cursor += 1;
        }
        LineEdit::Backspace if *cursor > 0 => {
            *cursor -= 1;
            let at = byte_offset(text, *cursor);
            text.remove(at);
        }
        LineEdit::Delete if *cursor < len => {
            let at = byte_offset(text, *cursor);
            text.remove(at);
        }
        LineEdit::Left => *cursor = cursor.saturating_sub(1),
        LineEdit::Right => *cursor = (*cursor + 1).min(len),
        LineEdit::Home => *cursor = 0,
        LineEdit::End => *cursor = len,
        LineEdit::Clear => {
            text.clear();
            *cursor = 0;
        }
        LineEdit::Backspace | LineEdit::Delete => {}
    }
}

/// Active mode, the prompt line, and a half-typed key sequence (`g`, `d`, `y`)
#[derive(Debug, Clone, Default)]
pub struct ModeState {
    pub mode: InputMode,
    buffer: String,
    cursor: usize,
    pub pending: Option<char>,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `mode` with an empty prompt.
    fn enter(&mut self, mode: InputMode) {
        self.mode = mode;
        self.buffer.clear();
        self.cursor = 0;
        self.pending = None;
    }

    pub fn to_normal(&mut self) {
        self.enter(InputMode::Normal);
    }

    pub fn to_command(&mut self) {
        self.enter(InputMode::Command);
    }

    /// Open the search prompt holding `current`, cursor at the end.
    pub fn to_search(&mut self, current: &str) {
        self.enter(InputMode::Search);
        self.buffer.push_str(current);
        self.cursor = current.chars().count();
    }

    pub fn to_confirm(&mut self) {
        self.enter(InputMode::Confirm);
    }

    pub fn to_help(&mut self) {
        self.enter(InputMode::Help);
    }

    pub fn edit(&mut self, edit: LineEdit) {
        apply_edit(&mut self.buffer, &mut self.cursor, edit);
    }

    pub fn get_buffer(&self) -> &str {
        &self.buffer
    }
}
