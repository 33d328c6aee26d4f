//! Plot panel: projects the retained scene onto a terminal canvas.

use super::{terminal_color, ThemeColors};
use crate::app::App;
use crate::draw::{Scene, Shape};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points, Rectangle},
        Block, Borders, Paragraph,
    },
    Frame,
};

pub(super) fn draw_canvas(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let title = if app.is_busy() {
        " Plot (plotting...) ".to_string()
    } else {
        format!(" Plot {}x{} ", app.scene.width(), app.scene.height())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    if app.scene.is_blank() {
        let hint = Paragraph::new("Nothing plotted yet - Ctrl-R sends the plot request")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.muted))
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let scene = &app.scene;
    let background = scene.background().map(terminal_color).unwrap_or(colors.bg);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds([0.0, scene.width()])
        .y_bounds([0.0, scene.height()])
        .paint(|ctx| paint_scene(ctx, scene));

    f.render_widget(canvas, area);
}

fn paint_scene(ctx: &mut Context<'_>, scene: &Scene) {
    for shape in scene.shapes() {
        match shape {
            Shape::Point { x, y, colour } => ctx.draw(&Points {
                coords: &[(*x, *y)],
                color: terminal_color(*colour),
            }),
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                colour,
            } => ctx.draw(&CanvasLine {
                x1: *x1,
                y1: *y1,
                x2: *x2,
                y2: *y2,
                color: terminal_color(*colour),
            }),
            Shape::Rect {
                x,
                y,
                width,
                height,
                colour,
            } => ctx.draw(&Rectangle {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
                color: terminal_color(*colour),
            }),
            // Rotation cannot be shown in a terminal cell grid
            Shape::Text {
                x, y, text, colour, ..
            } => ctx.print(
                *x,
                *y,
                Span::styled(text.clone(), Style::default().fg(terminal_color(*colour))),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn painted_text_reaches_the_buffer() {
        let mut app = App::new(Config::default()).unwrap();
        assert!(app.apply_response(
            r##"{"routine":"p","commands":[
                {"op":"dimensions","width":100,"height":50},
                {"op":"text","x":10,"y":25,"text":"peak","colour":"#ff0000"}
            ]}"##
        ));

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let colors = ThemeColors::from_theme(&app.theme);
        terminal
            .draw(|f| {
                let area = f.area();
                draw_canvas(f, &app, area, &colors)
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("peak"));
        assert!(content.contains("Plot 100x50"));
    }
}
