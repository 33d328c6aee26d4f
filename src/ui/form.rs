//! Form panel: input fields and the entry list of the active mode.

use super::ThemeColors;
use crate::app::App;
use crate::entries::ListState;
use crate::form::{Field, FormState};
use crate::request::PlotMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState as ListView, Paragraph},
    Frame,
};

pub(super) fn draw_form(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    match app.mode {
        PlotMode::Function => draw_function_form(f, app, area, colors),
        PlotMode::DataSet => draw_data_set_form(f, app, area, colors),
    }
}

fn draw_function_form(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    draw_field(f, &app.form, Field::FunctionTitle, rows[0], colors);
    draw_field(f, &app.form, Field::Expression, rows[1], colors);
    draw_pair(f, &app.form, [Field::MinX, Field::MaxX], rows[2], colors);
    draw_pair(f, &app.form, [Field::XLabel, Field::YLabel], rows[3], colors);
    draw_field(f, &app.form, Field::QuickEntry, rows[4], colors);
    draw_entries(f, app, rows[5], colors);
}

fn draw_data_set_form(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    draw_field(f, &app.form, Field::DataSetTitle, rows[0], colors);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(rows[1]);
    draw_field(f, &app.form, Field::ColumnX, columns[0], colors);
    draw_field(f, &app.form, Field::ColumnY, columns[1], colors);
    draw_field(f, &app.form, Field::Style, columns[2], colors);

    draw_field(f, &app.form, Field::RawData, rows[2], colors);
    draw_pair(f, &app.form, [Field::XLabel, Field::YLabel], rows[3], colors);
    draw_field(f, &app.form, Field::QuickEntry, rows[4], colors);
    draw_entries(f, app, rows[5], colors);
}

fn draw_pair(f: &mut Frame<'_>, form: &FormState, fields: [Field; 2], area: Rect, colors: &ThemeColors) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    draw_field(f, form, fields[0], halves[0], colors);
    draw_field(f, form, fields[1], halves[1], colors);
}

fn field_block(title: &str, focused: bool, colors: &ThemeColors) -> Block<'static> {
    let (border, title_style) = if focused {
        (
            colors.focus,
            Style::default().fg(colors.heading).add_modifier(Modifier::BOLD),
        )
    } else {
        (colors.border, Style::default().fg(colors.label))
    };
    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.bg))
}

fn draw_field(f: &mut Frame<'_>, form: &FormState, field: Field, area: Rect, colors: &ThemeColors) {
    let Some(input) = form.field(field) else {
        return;
    };
    let focused = form.focus == field;
    let block = field_block(field.name(), focused, colors);
    let inner = block.inner(area);

    let (line, column) = input.cursor_position();
    // Keep the cursor line inside multi-line fields
    let scroll = if input.is_multiline() && inner.height > 0 {
        line.saturating_sub(inner.height as usize - 1)
    } else {
        0
    };

    let paragraph = Paragraph::new(input.value())
        .block(block)
        .style(Style::default().fg(colors.text))
        .scroll((scroll as u16, 0));
    f.render_widget(paragraph, area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (column as u16).min(inner.width - 1);
        let y = inner.y + ((line - scroll) as u16).min(inner.height - 1);
        f.set_cursor_position((x, y));
    }
}

fn draw_entries(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let focused = app.form.focus == Field::Entries;
    let title = match app.mode {
        PlotMode::Function => format!("Functions ({})", app.active_len()),
        PlotMode::DataSet => format!("Data sets ({})", app.active_len()),
    };
    let block = field_block(&title, focused, colors);

    if app.active_state() == ListState::Empty {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No entries yet - fill the form and press Ctrl-A",
            Style::default().fg(colors.muted),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem<'_>> = app
        .active_rows()
        .into_iter()
        .enumerate()
        .map(|(idx, (index, label, selected))| {
            let mark = if selected { "[x]" } else { "[ ]" };
            let mark_style = if selected {
                Style::default().fg(colors.selected).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted)
            };

            let line = Line::from(vec![
                Span::styled(format!("{} ", mark), mark_style),
                Span::styled(format!("{}. ", index), Style::default().fg(colors.label)),
                Span::raw(label),
            ]);

            let style = if focused && idx == app.list_cursor {
                Style::default()
                    .fg(colors.cursor_fg)
                    .bg(colors.cursor_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };

            ListItem::new(line).style(style)
        })
        .collect();

    // Selecting the cursor row makes the list scroll to keep it visible
    let mut view = ListView::default().with_selected(focused.then_some(app.list_cursor));
    f.render_stateful_widget(List::new(items).block(block), area, &mut view);
}
