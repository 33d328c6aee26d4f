//! Alert popup.

use super::{centered_rect, ThemeColors};
use crate::validate::{AlertLevel, Alerts};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the alerts as a popup over the screen.
pub(super) fn draw_alerts(f: &mut Frame<'_>, alerts: &Alerts, colors: &ThemeColors) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let worst = if alerts.iter().any(|a| a.level == AlertLevel::Error) {
        AlertLevel::Error
    } else {
        AlertLevel::Warning
    };

    let lines: Vec<Line<'_>> = alerts
        .iter()
        .map(|alert| {
            Line::from(vec![
                Span::styled(
                    format!("{:<8}", alert.level.name()),
                    Style::default()
                        .fg(colors.alert(alert.level))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(alert.message.as_str(), Style::default().fg(colors.text)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Alerts - Esc to dismiss ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.alert(worst)))
                .style(Style::default().bg(colors.bg)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
