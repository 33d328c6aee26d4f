//! Keymap help bar UI component.

use crate::app::App;
use crate::form::Field;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let keymap_text = if app.file_browser_mode {
        "jk/↑↓:nav | Enter/l:open | h:parent | .:hidden | Esc/q:close"
    } else if !app.alerts.is_empty() {
        "Esc:dismiss alerts"
    } else if app.form.focus == Field::Entries {
        "jk/↑↓:move | Space:select | ^D:delete | ^R:plot | Tab:next field | F2:mode | ^Q:quit"
    } else if app.form.focus == Field::QuickEntry {
        "Enter:add label | Tab:next field | ^R:plot | F2:mode | ^Q:quit"
    } else {
        "Tab/S-Tab:field | ^A:add | ^R:plot | ^O:open data | ^Y:copy request | F2:mode | F3:theme | ^Q:quit"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
