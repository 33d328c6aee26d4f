//! Editable form fields for the two plot modes.

use unicode_width::UnicodeWidthStr;

use crate::request::PlotMode;

/// A single-line or multi-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    /// Cursor position as a char index.
    cursor: usize,
    multiline: bool,
}

impl TextField {
    /// Create an empty single-line field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty multi-line field.
    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    /// Create a single-line field with initial text.
    pub fn with_value(value: &str) -> Self {
        let mut field = Self::new();
        field.set_value(value);
        field
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the field accepts newlines.
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Replace the text and put the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the cursor.
    pub fn input(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        let at = self.byte_offset();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset();
        self.value.remove(at);
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_offset();
            self.value.remove(at);
        }
    }

    /// Move the cursor left.
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor right.
    pub fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Line and display column of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.value[..self.byte_offset()];
        let line = before.matches('\n').count();
        let current = before.rsplit('\n').next().unwrap_or("");
        (line, current.width())
    }
}

/// A focusable element of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Function legend title.
    FunctionTitle,
    /// Function expression.
    Expression,
    /// Lower X bound.
    MinX,
    /// Upper X bound.
    MaxX,
    /// Data-set legend title.
    DataSetTitle,
    /// X column.
    ColumnX,
    /// Y column.
    ColumnY,
    /// Point style.
    Style,
    /// Raw tabular text.
    RawData,
    /// X axis label.
    XLabel,
    /// Y axis label.
    YLabel,
    /// Whole-label entry.
    QuickEntry,
    /// The entry list of the active mode.
    Entries,
}

const FUNCTION_RING: [Field; 8] = [
    Field::FunctionTitle,
    Field::Expression,
    Field::MinX,
    Field::MaxX,
    Field::XLabel,
    Field::YLabel,
    Field::QuickEntry,
    Field::Entries,
];

const DATA_SET_RING: [Field; 9] = [
    Field::DataSetTitle,
    Field::ColumnX,
    Field::ColumnY,
    Field::Style,
    Field::RawData,
    Field::XLabel,
    Field::YLabel,
    Field::QuickEntry,
    Field::Entries,
];

impl Field {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Field::FunctionTitle | Field::DataSetTitle => "Title",
            Field::Expression => "Function",
            Field::MinX => "Min X",
            Field::MaxX => "Max X",
            Field::ColumnX => "Column X",
            Field::ColumnY => "Column Y",
            Field::Style => "Style",
            Field::RawData => "Data",
            Field::XLabel => "X label",
            Field::YLabel => "Y label",
            Field::QuickEntry => "Quick entry",
            Field::Entries => "Entries",
        }
    }

    /// Focus order for a mode.
    pub fn ring(mode: PlotMode) -> &'static [Field] {
        match mode {
            PlotMode::Function => &FUNCTION_RING,
            PlotMode::DataSet => &DATA_SET_RING,
        }
    }
}

/// All form fields plus the focused one.
#[derive(Debug, Clone)]
pub struct FormState {
    /// Function legend title.
    pub function_title: TextField,
    /// Function expression.
    pub expression: TextField,
    /// Lower X bound.
    pub min_x: TextField,
    /// Upper X bound.
    pub max_x: TextField,
    /// Data-set legend title.
    pub data_set_title: TextField,
    /// X column.
    pub column_x: TextField,
    /// Y column.
    pub column_y: TextField,
    /// Point style.
    pub style: TextField,
    /// Raw tabular text.
    pub raw_data: TextField,
    /// X axis label.
    pub x_label: TextField,
    /// Y axis label.
    pub y_label: TextField,
    /// Whole-label entry.
    pub quick_entry: TextField,
    /// Focused element.
    pub focus: Field,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Create a form with the usual defaults.
    pub fn new() -> Self {
        Self {
            function_title: TextField::new(),
            expression: TextField::new(),
            min_x: TextField::new(),
            max_x: TextField::new(),
            data_set_title: TextField::new(),
            column_x: TextField::with_value("1"),
            column_y: TextField::with_value("2"),
            style: TextField::with_value("points"),
            raw_data: TextField::multiline(),
            x_label: TextField::new(),
            y_label: TextField::new(),
            quick_entry: TextField::new(),
            focus: Field::Expression,
        }
    }

    /// Field for a focusable element. `None` for the entry list.
    pub fn field(&self, field: Field) -> Option<&TextField> {
        Some(match field {
            Field::FunctionTitle => &self.function_title,
            Field::Expression => &self.expression,
            Field::MinX => &self.min_x,
            Field::MaxX => &self.max_x,
            Field::DataSetTitle => &self.data_set_title,
            Field::ColumnX => &self.column_x,
            Field::ColumnY => &self.column_y,
            Field::Style => &self.style,
            Field::RawData => &self.raw_data,
            Field::XLabel => &self.x_label,
            Field::YLabel => &self.y_label,
            Field::QuickEntry => &self.quick_entry,
            Field::Entries => return None,
        })
    }

    /// Mutable field for a focusable element.
    pub fn field_mut(&mut self, field: Field) -> Option<&mut TextField> {
        Some(match field {
            Field::FunctionTitle => &mut self.function_title,
            Field::Expression => &mut self.expression,
            Field::MinX => &mut self.min_x,
            Field::MaxX => &mut self.max_x,
            Field::DataSetTitle => &mut self.data_set_title,
            Field::ColumnX => &mut self.column_x,
            Field::ColumnY => &mut self.column_y,
            Field::Style => &mut self.style,
            Field::RawData => &mut self.raw_data,
            Field::XLabel => &mut self.x_label,
            Field::YLabel => &mut self.y_label,
            Field::QuickEntry => &mut self.quick_entry,
            Field::Entries => return None,
        })
    }

    /// The focused text field, if focus is not on the entry list.
    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        self.field_mut(self.focus)
    }

    /// Move focus forward within the mode's ring.
    pub fn focus_next(&mut self, mode: PlotMode) {
        let ring = Field::ring(mode);
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + 1) % ring.len()];
    }

    /// Move focus backward within the mode's ring.
    pub fn focus_prev(&mut self, mode: PlotMode) {
        let ring = Field::ring(mode);
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + ring.len() - 1) % ring.len()];
    }

    /// Put focus on the first field of a mode.
    pub fn reset_focus(&mut self, mode: PlotMode) {
        self.focus = match mode {
            PlotMode::Function => Field::Expression,
            PlotMode::DataSet => Field::ColumnX,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_handles_multibyte_characters() {
        let mut field = TextField::with_value("aé");
        field.left();
        field.input('ß');
        assert_eq!(field.value(), "aßé");
        field.backspace();
        field.backspace();
        assert_eq!(field.value(), "é");
        field.home();
        field.delete();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn newline_only_in_multiline_fields() {
        let mut single = TextField::new();
        single.input('\n');
        assert_eq!(single.value(), "");

        let mut multi = TextField::multiline();
        for c in "1 2\n3".chars() {
            multi.input(c);
        }
        assert_eq!(multi.cursor_position(), (1, 1));
    }

    #[test]
    fn focus_wraps_within_mode() {
        let mut form = FormState::new();
        form.reset_focus(PlotMode::DataSet);
        form.focus_next(PlotMode::DataSet);
        form.focus_next(PlotMode::DataSet);
        assert_eq!(form.focus, Field::Style);

        form.focus = Field::DataSetTitle;
        form.focus_prev(PlotMode::DataSet);
        assert_eq!(form.focus, Field::Entries);

        // Entries is last in the function ring too
        form.focus_next(PlotMode::Function);
        assert_eq!(form.focus, Field::FunctionTitle);
        form.focus_next(PlotMode::Function);
        assert_eq!(form.focus, Field::Expression);
    }
}
