//! Form Component
//!
//! Multi-field forms for the initialize, unlock, add-record and
//! change-master-password flows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use zeroize::Zeroize;

use crate::api::NewRecord;
use crate::input::modes::{apply_edit, LineEdit};
use crate::ui::renderer::View;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub masked: bool,
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Password,
    MultiLine,
}

impl FormField {
    pub fn text(label: &'static str, required: bool) -> Self {
        Self {
            label,
            value: String::new(),
            required,
            masked: false,
            field_type: FieldType::Text,
        }
    }

    pub fn password(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: true,
            masked: true,
            field_type: FieldType::Password,
        }
    }

    pub fn multiline(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: false,
            masked: false,
            field_type: FieldType::MultiLine,
        }
    }
}

/// Which flow a form belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Initialize,
    Unlock,
    AddRecord,
    ChangeMasterPassword,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Initialize => " Initialize Master Password ",
            Self::Unlock => " Unlock Vault ",
            Self::AddRecord => " Add New Password ",
            Self::ChangeMasterPassword => " Change Master Password ",
        }
    }

    /// Forms that gate the whole client and cannot be dismissed
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Initialize | Self::Unlock)
    }
}

/// Form state
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub active_field: usize,
    pub cursor: usize,
    pub show_password: bool,
    pub scroll_offset: usize,
    pub previous_view: View,
}

impl Form {
    fn with_fields(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            active_field: 0,
            cursor: 0,
            show_password: false,
            scroll_offset: 0,
            previous_view: View::List,
        }
    }

    pub fn initialize() -> Self {
        Self::with_fields(
            FormKind::Initialize,
            vec![
                FormField::password("Master Password"),
                FormField::password("Confirm Password"),
            ],
        )
    }

    pub fn unlock() -> Self {
        Self::with_fields(FormKind::Unlock, vec![FormField::password("Master Password")])
    }

    pub fn add_record(previous_view: View) -> Self {
        let mut form = Self::with_fields(
            FormKind::AddRecord,
            vec![
                FormField::text("Title", true),
                FormField::text("Username", true),
                FormField::password("Password"),
                FormField::text("URL", false),
                FormField::multiline("Notes"),
            ],
        );
        form.previous_view = previous_view;
        form
    }

    pub fn change_master_password(previous_view: View) -> Self {
        let mut form = Self::with_fields(
            FormKind::ChangeMasterPassword,
            vec![
                FormField::password("Current Password"),
                FormField::password("New Password"),
                FormField::password("Confirm New"),
            ],
        );
        form.previous_view = previous_view;
        form
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }

    fn active_len(&self) -> usize {
        self.fields[self.active_field].value.chars().count()
    }

    fn ensure_visible(&mut self, visible_fields: usize) {
        if self.active_field < self.scroll_offset {
            self.scroll_offset = self.active_field;
        } else if self.active_field >= self.scroll_offset + visible_fields {
            self.scroll_offset = self.active_field - visible_fields + 1;
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.fields.len();
        self.cursor = self.active_len();
        self.ensure_visible(5);
    }

    pub fn prev_field(&mut self) {
        if self.active_field == 0 {
            self.active_field = self.fields.len() - 1;
        } else {
            self.active_field -= 1;
        }
        self.cursor = self.active_len();
        self.ensure_visible(5);
    }

    /// Edit the active field at the cursor.
    pub fn edit(&mut self, edit: LineEdit) {
        let field = &mut self.fields[self.active_field];
        apply_edit(&mut field.value, &mut self.cursor, edit);
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Text fields must hold more than whitespace; masked fields only need
    /// to be non-empty.
    pub fn validate(&self) -> Result<(), String> {
        for field in &self.fields {
            let blank = if field.masked { field.value.is_empty() } else { field.value.trim().is_empty() };
            if field.required && blank {
                return Err(format!("{} is required", field.label));
            }
        }
        Ok(())
    }

    /// Wipe a single field and move the cursor there.
    pub fn reset_field(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value.zeroize();
            self.active_field = index;
            self.cursor = 0;
        }
    }

    /// Wipe every field value.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
        }
        self.active_field = 0;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Record body built from an add-record form.
    pub fn to_new_record(&self) -> NewRecord {
        NewRecord {
            title: self.value(0).trim().to_string(),
            username: self.value(1).trim().to_string(),
            password: self.value(2).to_string(),
            url: self.value(3).trim().to_string(),
            notes: self.value(4).trim().to_string(),
        }
    }
}

impl Drop for Form {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Form widget
pub struct FormWidget<'a> {
    form: &'a Form,
}

impl<'a> FormWidget<'a> {
    pub fn new(form: &'a Form) -> Self {
        Self { form }
    }
}

fn display_value(field: &FormField, show_password: bool, width: usize) -> String {
    if field.masked && !show_password {
        "*".repeat(field.value.chars().count().min(width))
    } else if field.field_type == FieldType::MultiLine {
        field.value.replace('\n', " ⏎ ")
    } else {
        field.value.clone()
    }
}

impl<'a> Widget for FormWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Two rows per field plus border, padding and help line
        let wanted_height = (self.form.fields.len() as u16) * 2 + 5;
        let form_width = 70u16.min(area.width.saturating_sub(4));
        let form_height = wanted_height.min(area.height.saturating_sub(2));
        let form_x = area.x + (area.width.saturating_sub(form_width)) / 2;
        let form_y = area.y + (area.height.saturating_sub(form_height)) / 2;
        let form_area = Rect::new(form_x, form_y, form_width, form_height);

        Clear.render(form_area, buf);

        let block = Block::default()
            .title(self.form.kind.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(form_area);
        block.render(form_area, buf);
        if inner.height < 2 {
            return;
        }

        let has_up_indicator = self.form.scroll_offset > 0;
        let mut y = if has_up_indicator { inner.y + 1 } else { inner.y };
        let label_width = 20u16;
        let visible_height = inner.height.saturating_sub(2);
        let max_visible_fields = ((visible_height / 2) as usize).max(1);

        if has_up_indicator {
            let indicator = "▲";
            let x = inner.x + (inner.width.saturating_sub(1)) / 2;
            buf.set_string(x, inner.y, indicator, Style::default().fg(Color::Magenta));
        }

        for (i, field) in self.form.fields.iter().enumerate().skip(self.form.scroll_offset) {
            if i >= self.form.scroll_offset + max_visible_fields {
                break;
            }

            let is_active = i == self.form.active_field;

            let label = if field.required {
                format!("{}*:", field.label)
            } else {
                format!("{}:", field.label)
            };

            let label_style = if is_active {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            buf.set_string(inner.x, y, &label, label_style);

            let value_x = inner.x + label_width;
            let value_width = inner.width.saturating_sub(label_width + 1);

            let field_bg = if is_active { Color::DarkGray } else { Color::Black };
            for x in value_x..value_x + value_width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(Style::default().bg(field_bg));
                }
            }

            let value_style = if field.masked {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            let shown = display_value(field, self.form.show_password, value_width as usize);
            buf.set_stringn(value_x, y, &shown, value_width as usize, value_style.bg(field_bg));

            if is_active {
                let cursor_x = value_x + self.form.cursor as u16;
                if cursor_x < value_x + value_width {
                    if let Some(cell) = buf.cell_mut((cursor_x, y)) {
                        cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                    }
                }
            }

            y += 2;
        }

        if self.form.scroll_offset + max_visible_fields < self.form.fields.len() {
            let indicator = "▼";
            let x = inner.x + (inner.width.saturating_sub(1)) / 2;
            buf.set_string(x, inner.y + inner.height - 2, indicator, Style::default().fg(Color::Magenta));
        }

        let help_y = inner.y + inner.height - 1;
        let cancel = if self.form.kind.is_blocking() { " quit  " } else { " cancel  " };
        let help_text = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Magenta)),
            Span::raw(" next  "),
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw(" submit  "),
            Span::styled("Esc", Style::default().fg(Color::Magenta)),
            Span::raw(cancel),
            Span::styled("Ctrl+s", Style::default().fg(Color::Magenta)),
            Span::raw(" show pwd"),
        ]);
        buf.set_line(inner.x, help_y, &help_text, inner.width);
    }
}
