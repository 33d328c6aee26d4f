//! User interface rendering.
//!
//! The screen is split into the form panel on the left, the plot on the
//! right, and the status and key map bars at the bottom. Alerts are drawn
//! last as a popup over everything else.

mod alerts;
mod canvas;
mod form;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::App;
use crate::file_browser::ui::draw_file_browser;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub use theme::{terminal_color, ThemeColors};

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[0]);

    if app.file_browser_mode {
        draw_file_browser(f, &mut app.file_browser, content[0], &colors);
    } else {
        form::draw_form(f, app, content[0], &colors);
    }
    canvas::draw_canvas(f, app, content[1], &colors);

    status_bar::draw_status(f, chunks[1], app, &colors);
    keymap_bar::draw_keymap(f, chunks[2], app, &colors);

    if !app.alerts.is_empty() {
        alerts::draw_alerts(f, &app.alerts, &colors);
    }
}

/// Helper to create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
