//! Status bar UI component.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the status bar.
pub(super) fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.mode.name()),
        Style::default()
            .fg(colors.cursor_fg)
            .bg(colors.cursor_bg)
            .add_modifier(Modifier::BOLD),
    )];

    if app.is_busy() {
        spans.push(Span::styled(
            " busy ",
            Style::default().fg(colors.warning).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(format!(" {}", app.status)));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}
