//! Drawing programs returned by the render service.
//!
//! The service answers a plot request with a JSON document naming a drawing
//! routine and the ordered commands it performs:
//!
//! ```json
//! {
//!   "routine": "canvas_plot",
//!   "commands": [
//!     { "op": "dimensions", "width": 600, "height": 400 },
//!     { "op": "fill_rect", "x": 0, "y": 0, "width": 600, "height": 400, "colour": "#ffffff" },
//!     { "op": "line", "x1": 50, "y1": 40, "x2": 550, "y2": 40, "colour": "#000000" },
//!     { "op": "text", "x": 280, "y": 10, "text": "time", "colour": "#000000" }
//!   ]
//! }
//! ```
//!
//! Coordinates are surface pixels with the origin at the bottom-left corner.
//! A program is validated as a whole by [`DrawProgram::parse`] before any of
//! it runs, so a malformed response never half-paints a surface.

mod scene;

pub use scene::{Scene, Shape};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlotctlError, Result};

/// An RGB colour written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Colour {
    /// Black.
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    /// White.
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);

    /// Create a colour from its channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl TryFrom<String> for Colour {
    type Error = String;

    fn try_from(text: String) -> std::result::Result<Self, Self::Error> {
        let hex = text.strip_prefix('#').unwrap_or(&text);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid colour {:?}", text));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Colour::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// One drawing step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Reset the surface to a new size.
    Dimensions {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
    },
    /// Select the font used by later text.
    Font {
        /// Font family.
        family: String,
        /// Size in pixels.
        size: u8,
    },
    /// Annotation, not drawn.
    Comment {
        /// Comment text.
        text: String,
    },
    /// A single point.
    Point {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Stroke colour.
        colour: Colour,
    },
    /// A straight segment.
    Line {
        /// Start X.
        x1: f64,
        /// Start Y.
        y1: f64,
        /// End X.
        x2: f64,
        /// End Y.
        y2: f64,
        /// Stroke colour.
        colour: Colour,
    },
    /// Connected segments through every point.
    Path {
        /// Vertices in drawing order.
        points: Vec<[f64; 2]>,
        /// Stroke colour.
        colour: Colour,
    },
    /// A text label anchored at its baseline start.
    Text {
        /// Anchor X.
        x: f64,
        /// Anchor Y.
        y: f64,
        /// Rotation in degrees.
        #[serde(default)]
        angle: f64,
        /// Label text.
        text: String,
        /// Fill colour.
        colour: Colour,
    },
    /// A filled rectangle.
    FillRect {
        /// Left edge.
        x: f64,
        /// Bottom edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill colour.
        colour: Colour,
    },
}

impl DrawCommand {
    fn validate(&self) -> std::result::Result<(), String> {
        fn finite(values: &[f64]) -> bool {
            values.iter().all(|v| v.is_finite())
        }

        let ok = match self {
            DrawCommand::Dimensions { width, height } => {
                finite(&[*width, *height]) && *width > 0.0 && *height > 0.0
            }
            DrawCommand::Font { family, size } => !family.trim().is_empty() && *size > 0,
            DrawCommand::Comment { .. } => true,
            DrawCommand::Point { x, y, .. } => finite(&[*x, *y]),
            DrawCommand::Line { x1, y1, x2, y2, .. } => finite(&[*x1, *y1, *x2, *y2]),
            DrawCommand::Path { points, .. } => {
                !points.is_empty() && points.iter().all(|p| finite(&p[..]))
            }
            DrawCommand::Text { x, y, angle, .. } => finite(&[*x, *y, *angle]),
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                ..
            } => finite(&[*x, *y, *width, *height]) && *width >= 0.0 && *height >= 0.0,
        };

        if ok {
            Ok(())
        } else {
            Err(format!("bad parameters for {}", self.name()))
        }
    }

    /// Operation name as written on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            DrawCommand::Dimensions { .. } => "dimensions",
            DrawCommand::Font { .. } => "font",
            DrawCommand::Comment { .. } => "comment",
            DrawCommand::Point { .. } => "point",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Path { .. } => "path",
            DrawCommand::Text { .. } => "text",
            DrawCommand::FillRect { .. } => "fill_rect",
        }
    }
}

/// Something a drawing program can paint onto.
pub trait Surface {
    /// Clear everything and resize.
    fn reset(&mut self, width: f64, height: f64);

    /// Select the font for later text.
    fn set_font(&mut self, family: &str, size: u8);

    /// Plot one point.
    fn point(&mut self, x: f64, y: f64, colour: Colour);

    /// Stroke one segment.
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, colour: Colour);

    /// Stroke connected segments.
    fn path(&mut self, points: &[[f64; 2]], colour: Colour) {
        match points {
            [single] => self.point(single[0], single[1], colour),
            _ => {
                for pair in points.windows(2) {
                    self.line(pair[0][0], pair[0][1], pair[1][0], pair[1][1], colour);
                }
            }
        }
    }

    /// Write a text label.
    fn text(&mut self, x: f64, y: f64, angle: f64, text: &str, colour: Colour);

    /// Fill a rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, colour: Colour);
}

/// A validated drawing program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawProgram {
    /// Name of the routine the program defines.
    pub routine: String,
    /// Commands in execution order.
    pub commands: Vec<DrawCommand>,
}

impl DrawProgram {
    /// Decode and validate a response body.
    pub fn parse(text: &str) -> Result<Self> {
        let program: DrawProgram = serde_json::from_str(text)
            .map_err(|e| PlotctlError::drawing(format!("not a drawing program: {}", e)))?;
        program.validate()?;
        Ok(program)
    }

    fn validate(&self) -> Result<()> {
        if self.routine.trim().is_empty() {
            return Err(PlotctlError::drawing("routine name is empty"));
        }
        for (n, command) in self.commands.iter().enumerate() {
            command
                .validate()
                .map_err(|e| PlotctlError::drawing(format!("command {}: {}", n + 1, e)))?;
        }
        Ok(())
    }

    /// Invoke the routine against a surface.
    pub fn run<S: Surface + ?Sized>(&self, surface: &mut S) {
        tracing::debug!(
            "running {} with {} command(s)",
            self.routine,
            self.commands.len()
        );

        for command in &self.commands {
            match command {
                DrawCommand::Dimensions { width, height } => surface.reset(*width, *height),
                DrawCommand::Font { family, size } => surface.set_font(family, *size),
                DrawCommand::Comment { text } => tracing::trace!("{}: {}", self.routine, text),
                DrawCommand::Point { x, y, colour } => surface.point(*x, *y, *colour),
                DrawCommand::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    colour,
                } => surface.line(*x1, *y1, *x2, *y2, *colour),
                DrawCommand::Path { points, colour } => surface.path(points, *colour),
                DrawCommand::Text {
                    x,
                    y,
                    angle,
                    text,
                    colour,
                } => surface.text(*x, *y, *angle, text, *colour),
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    colour,
                } => surface.fill_rect(*x, *y, *width, *height, *colour),
            }
        }
    }
}
