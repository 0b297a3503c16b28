//! UI Components
//!
//! Reusable TUI widgets for the password list, detail panel, and forms.

pub mod detail;
pub mod form;
pub mod list;
pub mod popup;
pub mod statusline;

// Re-exports
pub use detail::{DetailView, RecordDetail};
pub use form::{Form, FormKind, FormWidget};
pub use list::{EmptyState, ListViewState, RecordItem, RecordList};
pub use popup::{ConfirmDialog, HelpScreen, HelpState};
pub use statusline::{HelpBar, MessageType, StatusLine};
