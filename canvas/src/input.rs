//! Input model: tools, the current tool selection, and the drag state machine.
//!
//! `ToolSelection` is what the host's controls write to and what a new record
//! is stamped with on commit. `InputState` tracks the active drag between
//! pointer-down and pointer-up; the pre-drag snapshot it carries is what the
//! live preview restores on every move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{ShapeKind, ShapeRecord};
use crate::geom::{Point, Rect};
use crate::tools::{ToolError, kind_for_id};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Draw a shape of the given kind.
    Shape(ShapeKind),
    /// Remove the record under the pointer.
    Eraser,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Shape(ShapeKind::Rectangle)
    }
}

impl Tool {
    /// Identifier used by the host controls.
    pub const ERASER_ID: &'static str = "eraser";

    /// Resolve a tool identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NoSuchTool`] for an unknown identifier.
    pub fn parse(id: &str) -> Result<Self, ToolError> {
        if id == Self::ERASER_ID {
            return Ok(Self::Eraser);
        }
        kind_for_id(id).map(Self::Shape)
    }

    /// The identifier this tool parses from.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Shape(kind) => kind.id(),
            Self::Eraser => Self::ERASER_ID,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Current tool and style, written by the host controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSelection {
    /// Active tool.
    pub tool: Tool,
    /// Stroke color for new records.
    pub color: String,
    /// Stroke width for new records.
    pub brush_width: f64,
    /// Whether new records are filled.
    pub fill: bool,
    /// Raw floor-count text; parsed each time labels are computed.
    pub floor_count: String,
}

impl Default for ToolSelection {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: "#000".to_string(),
            brush_width: 5.0,
            fill: false,
            floor_count: String::new(),
        }
    }
}

impl ToolSelection {
    /// Stamp a record of `kind` spanning `rect` with the current style.
    #[must_use]
    pub fn record(&self, kind: ShapeKind, rect: Rect) -> ShapeRecord {
        ShapeRecord {
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            stroke: self.color.clone(),
            stroke_width: self.brush_width,
            filled: self.fill,
        }
    }
}

/// Context of an in-progress drag.
#[derive(Debug, Clone)]
pub struct DragState<S> {
    /// Kind the drag will commit; fixed at pointer-down.
    pub kind: ShapeKind,
    /// Surface point where the drag started.
    pub origin: Point,
    /// Pixels before the drag started, restored under every preview frame.
    pub snapshot: S,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone)]
pub enum InputState<S> {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// The user is dragging out a new shape.
    Dragging(DragState<S>),
}

impl<S> Default for InputState<S> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<S> InputState<S> {
    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}
