//! Drawing surface abstraction.
//!
//! [`Surface`] is the narrow set of primitives every shape strategy, the
//! redraw procedure, and the background loader need. The browser binds it to
//! a `CanvasRenderingContext2d` (see `web::CanvasSurface`);
//! [`RecordingSurface`] keeps a display list instead of pixels so the whole
//! pipeline runs headless. For a display list, "pixels" are the ops drawn
//! since the last clear/restore, which makes two surfaces comparable with `==`.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::Serialize;

use crate::geom::{Point, Rect};

/// A fallible host drawing call failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    /// The host API rejected the call; the payload is its error rendered as text.
    #[error("drawing surface call failed: {0}")]
    Host(String),
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    Middle,
    Alphabetic,
}

impl Baseline {
    /// Canvas `textBaseline` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Middle => "middle",
            Self::Alphabetic => "alphabetic",
        }
    }
}

/// Font, color, and baseline for one text placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: String,
    pub color: String,
    pub baseline: Baseline,
}

/// Primitive drawing target.
pub trait Surface {
    /// Captured pixel state, restorable with [`Surface::restore`].
    type Snapshot: Clone;
    /// Rasterized image that can be composited onto the surface.
    type Image;

    /// Surface width in pixels.
    fn width(&self) -> f64;
    /// Surface height in pixels.
    fn height(&self) -> f64;
    /// Resize the surface. Resizing discards the current pixels.
    fn resize(&mut self, width: f64, height: f64);
    /// Clear every pixel.
    fn clear(&mut self);

    /// Capture the current pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host refuses to read the pixel buffer.
    fn snapshot(&self) -> Result<Self::Snapshot, SurfaceError>;

    /// Replace the current pixels with a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host refuses to write the pixel buffer.
    fn restore(&mut self, snapshot: &Self::Snapshot) -> Result<(), SurfaceError>;

    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64);
    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: &str);

    /// Draw left-aligned text with its anchor at `at`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host text call fails.
    fn place_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), SurfaceError>;

    /// Advance width of `text` in `font`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host cannot measure text.
    fn measure_text(&mut self, text: &str, font: &str) -> Result<f64, SurfaceError>;

    /// Composite an image with its top-left corner at the origin.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host image call fails.
    fn draw_image(&mut self, image: &Self::Image) -> Result<(), SurfaceError>;
}

// =============================================================
// Display-list surface
// =============================================================

/// One primitive recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DrawOp {
    StrokeRect { rect: Rect, color: String, line_width: f64 },
    FillRect { rect: Rect, color: String },
    Text { text: String, at: Point, style: TextStyle },
    Image { name: String, width: f64, height: f64 },
}

/// Stand-in for a rasterized page on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedImage {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

/// Headless surface that records draw calls as a display list.
///
/// Text width is estimated as `0.6 × font size` per character, which is
/// enough for label centering to be deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create a blank surface.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    /// Ops currently visible, bottom first.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text of every visible label, bottom first.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Pixel size parsed from a CSS font shorthand such as `"12px Arial"`.
fn font_px(font: &str) -> f64 {
    let Some(px) = font.split_whitespace().find_map(|part| part.strip_suffix("px")) else {
        return 10.0;
    };
    px.parse::<f64>().unwrap_or(10.0)
}

impl Surface for RecordingSurface {
    type Snapshot = Vec<DrawOp>;
    type Image = RecordedImage;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.ops.clear();
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn snapshot(&self) -> Result<Self::Snapshot, SurfaceError> {
        Ok(self.ops.clone())
    }

    fn restore(&mut self, snapshot: &Self::Snapshot) -> Result<(), SurfaceError> {
        self.ops.clone_from(snapshot);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect { rect, color: color.to_string(), line_width });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ops.push(DrawOp::FillRect { rect, color: color.to_string() });
    }

    fn place_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Text { text: text.to_string(), at, style: style.clone() });
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str, font: &str) -> Result<f64, SurfaceError> {
        Ok(text.chars().count() as f64 * font_px(font) * 0.6)
    }

    fn draw_image(&mut self, image: &Self::Image) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Image {
            name: image.name.clone(),
            width: image.width,
            height: image.height,
        });
        Ok(())
    }
}
