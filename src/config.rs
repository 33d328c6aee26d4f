//! Runtime configuration.

use std::time::Duration;

/// Default render endpoint of a locally running service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/plot/api/canvas";

/// Configuration for the render client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL the plot request is posted to.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Logical size of the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 600.0,  // service canvas default
            height: 400.0,
        }
    }
}

impl SurfaceConfig {
    /// Width and height floored to whole pixels, as sent to the service.
    pub fn pixel_size(&self) -> (i64, i64) {
        (self.width.floor() as i64, self.height.floor() as i64)
    }

    /// Both sides are finite and at least one whole pixel.
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|side| side.is_finite() && *side >= 1.0)
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Render client settings.
    pub client: ClientConfig,
    /// Drawing surface settings.
    pub surface: SurfaceConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_is_floored() {
        let surface = SurfaceConfig {
            width: 640.9,
            height: 480.2,
        };
        assert_eq!(surface.pixel_size(), (640, 480));
        assert!(surface.is_valid());
    }

    #[test]
    fn degenerate_surfaces_are_invalid() {
        for (width, height) in [
            (0.0, 400.0),
            (600.0, -1.0),
            (0.5, 400.0),
            (f64::NAN, 400.0),
            (600.0, f64::INFINITY),
        ] {
            assert!(!SurfaceConfig { width, height }.is_valid(), "{width}x{height}");
        }
    }
}
