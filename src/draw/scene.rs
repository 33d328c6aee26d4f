//! Retained drawing surface.

use super::{Colour, Surface};

/// One retained primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Single point.
    Point {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Colour.
        colour: Colour,
    },
    /// Segment.
    Line {
        /// Start X.
        x1: f64,
        /// Start Y.
        y1: f64,
        /// End X.
        x2: f64,
        /// End Y.
        y2: f64,
        /// Colour.
        colour: Colour,
    },
    /// Text label.
    Text {
        /// Anchor X.
        x: f64,
        /// Anchor Y.
        y: f64,
        /// Rotation in degrees. Terminal output ignores it.
        angle: f64,
        /// Label text.
        text: String,
        /// Colour.
        colour: Colour,
    },
    /// Rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Bottom edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Colour.
        colour: Colour,
    },
}

/// In-memory surface a drawing program paints onto. The ui renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: f64,
    height: f64,
    background: Option<Colour>,
    font: (String, u8),
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create a blank scene.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            font: ("Verdana".to_string(), 10),
            shapes: Vec::new(),
        }
    }

    /// Surface width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Surface height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Fill colour covering the whole surface, if one was painted.
    pub fn background(&self) -> Option<Colour> {
        self.background
    }

    /// Current font family and size.
    pub fn font(&self) -> (&str, u8) {
        (&self.font.0, self.font.1)
    }

    /// Painted primitives in order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Check if nothing has been painted.
    pub fn is_blank(&self) -> bool {
        self.shapes.is_empty() && self.background.is_none()
    }

    fn covers_surface(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height
    }
}

impl Surface for Scene {
    fn reset(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.background = None;
        self.shapes.clear();
    }

    fn set_font(&mut self, family: &str, size: u8) {
        self.font = (family.to_string(), size);
    }

    fn point(&mut self, x: f64, y: f64, colour: Colour) {
        self.shapes.push(Shape::Point { x, y, colour });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, colour: Colour) {
        self.shapes.push(Shape::Line {
            x1,
            y1,
            x2,
            y2,
            colour,
        });
    }

    fn text(&mut self, x: f64, y: f64, angle: f64, text: &str, colour: Colour) {
        self.shapes.push(Shape::Text {
            x,
            y,
            angle,
            text: text.to_string(),
            colour,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, colour: Colour) {
        // A fill over the whole surface repaints the background.
        if self.covers_surface(x, y, width, height) {
            self.background = Some(colour);
            self.shapes.clear();
            return;
        }
        self.shapes.push(Shape::Rect {
            x,
            y,
            width,
            height,
            colour,
        });
    }
}
