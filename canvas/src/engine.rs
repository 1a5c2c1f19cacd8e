use serde::Serialize;

use crate::config::{EditorConfig, Variant};
use crate::doc::{ShapeKind, ShapeRecord, ShapeStore};
use crate::formula::parse_floor_count;
use crate::geom::{Point, Rect};
use crate::input::{Button, DragState, InputState, Tool, ToolSelection};
use crate::render::{self, RenderParams};
use crate::surface::{Surface, SurfaceError};
use crate::tools::ToolError;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// A drag completed and the record was appended at `index`.
    RecordCommitted { index: usize, record: ShapeRecord },
    /// The record at `index` was removed.
    RecordErased { index: usize, record: ShapeRecord },
    /// Show or hide the host's legend element.
    LegendVisible { visible: bool },
}

/// Core engine state — the interaction controller over any [`Surface`].
///
/// Generic over the surface so it can be tested without WASM/browser dependencies.
pub struct EngineCore<S: Surface> {
    pub surface: S,
    pub store: ShapeStore,
    pub selection: ToolSelection,
    pub input: InputState<S::Snapshot>,
    pub background: Option<S::Snapshot>,
    pub config: EditorConfig,
}

impl<S: Surface> EngineCore<S> {
    #[must_use]
    pub fn new(surface: S, config: EditorConfig) -> Self {
        Self {
            surface,
            store: ShapeStore::new(),
            selection: ToolSelection::default(),
            input: InputState::Idle,
            background: None,
            config,
        }
    }

    /// Render parameters for the current controls. The floor count is parsed here, on every call.
    #[must_use]
    pub fn params(&self) -> RenderParams<'_> {
        render_params(&self.config, &self.selection)
    }

    /// Repaint from the background and the record list.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a surface call fails.
    pub fn redraw(&mut self) -> Result<(), SurfaceError> {
        let params = render_params(&self.config, &self.selection);
        render::redraw(&mut self.surface, self.background.as_ref(), &self.store, &params)
    }

    // --- Controls ---

    /// Select a tool by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NoSuchTool`] for an unknown identifier and
    /// [`ToolError::UnavailableInVariant`] for a tool the variant does not offer.
    pub fn set_tool(&mut self, id: &str) -> Result<Vec<Action>, ToolError> {
        let tool = Tool::parse(id)?;
        let offered = match self.config.variant {
            Variant::Parametric => !matches!(tool, Tool::Eraser),
            Variant::Freehand => matches!(tool, Tool::Eraser | Tool::Shape(ShapeKind::Rectangle)),
        };
        if !offered {
            return Err(ToolError::UnavailableInVariant {
                tool: id.to_string(),
                variant: self.config.variant.name(),
            });
        }
        self.selection.tool = tool;
        log::debug!("tool selected: {}", tool.id());
        Ok(self.legend_action(false))
    }

    /// Stroke color for new records.
    pub fn set_color(&mut self, color: &str) {
        self.selection.color = color.to_string();
    }

    /// Stroke width for new records.
    pub fn set_brush_width(&mut self, width: f64) {
        self.selection.brush_width = width;
    }

    /// Fill flag for new records.
    pub fn set_fill(&mut self, fill: bool) {
        self.selection.fill = fill;
    }

    /// Flip the fill flag.
    pub fn toggle_fill(&mut self) {
        self.selection.fill = !self.selection.fill;
    }

    /// Store the raw floor-count text and refresh labels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn set_floor_count(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.selection.floor_count = text.to_string();
        if self.input.is_dragging() {
            return Ok(());
        }
        self.redraw()
    }

    /// Device pixel ratio for the freehand calibration.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.config.device_pixel_ratio = ratio;
    }

    /// Drop every record and repaint the background.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn clear_all(&mut self) -> Result<Vec<Action>, SurfaceError> {
        self.store.clear();
        self.input = InputState::Idle;
        self.redraw()?;
        Ok(self.legend_action(false))
    }

    /// Remove the record at `index` and repaint.
    ///
    /// A drag in progress keeps going over the repainted surface.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw or the drag snapshot fails.
    pub fn delete_record(&mut self, index: usize) -> Result<Vec<Action>, SurfaceError> {
        let Some(record) = self.store.remove_at(index) else {
            return Ok(Vec::new());
        };
        self.redraw()?;
        if let InputState::Dragging(drag) = &mut self.input {
            drag.snapshot = self.surface.snapshot()?;
        }
        Ok(vec![Action::RecordErased { index, record }])
    }

    // --- Pointer input ---

    /// Start a drag, or erase under the pointer when the eraser is active.
    ///
    /// A pointer-down while a drag is already in progress is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pre-drag snapshot or a redraw fails.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Result<Vec<Action>, SurfaceError> {
        if self.input.is_dragging() || button != Button::Primary {
            return Ok(Vec::new());
        }

        match self.selection.tool {
            Tool::Eraser => {
                let Some((index, record)) = self.store.erase_at(pt) else {
                    return Ok(Vec::new());
                };
                log::debug!("erased record {index}");
                self.redraw()?;
                Ok(vec![Action::RecordErased { index, record }])
            }
            Tool::Shape(kind) => {
                let snapshot = self.surface.snapshot()?;
                self.input = InputState::Dragging(DragState { kind, origin: pt, snapshot });
                Ok(self.legend_action(true))
            }
        }
    }

    /// Repaint the live preview for the current pointer position.
    ///
    /// # Errors
    ///
    /// Returns `Err` if restoring the snapshot or drawing the preview fails.
    pub fn on_pointer_move(&mut self, pt: Point) -> Result<Vec<Action>, SurfaceError> {
        let InputState::Dragging(drag) = &self.input else {
            return Ok(Vec::new());
        };
        let preview = self.selection.record(drag.kind, Rect::from_drag(drag.origin, pt));
        self.surface.restore(&drag.snapshot)?;
        let params = render_params(&self.config, &self.selection);
        render::draw_record(&mut self.surface, &preview, &params)?;
        Ok(Vec::new())
    }

    /// Finish the drag: commit a record unless the pointer never moved, then repaint.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails. The record is committed even then.
    pub fn on_pointer_up(&mut self, pt: Point) -> Result<Vec<Action>, SurfaceError> {
        let InputState::Dragging(drag) = std::mem::take(&mut self.input) else {
            return Ok(Vec::new());
        };

        let rect = Rect::from_drag(drag.origin, pt);
        if rect.width.abs() < f64::EPSILON && rect.height.abs() < f64::EPSILON {
            self.surface.restore(&drag.snapshot)?;
            return Ok(Vec::new());
        }

        let record = self.selection.record(drag.kind, rect);
        let index = self.store.len();
        self.store.append(record.clone());
        log::debug!("committed {} record at index {index}", record.kind.id());
        self.redraw()?;
        Ok(vec![Action::RecordCommitted { index, record }])
    }

    /// Pointer left the canvas: abort the drag if the configuration says so.
    ///
    /// # Errors
    ///
    /// Returns `Err` if restoring the pre-drag snapshot fails.
    pub fn on_pointer_leave(&mut self) -> Result<Vec<Action>, SurfaceError> {
        if !self.config.aborts_on_leave() {
            return Ok(Vec::new());
        }
        if let InputState::Dragging(drag) = std::mem::take(&mut self.input) {
            self.surface.restore(&drag.snapshot)?;
        }
        Ok(Vec::new())
    }

    // --- Background ---

    /// Resize the surface for an incoming page. Any drag in progress is dropped
    /// since its snapshot no longer matches the surface.
    pub fn begin_background(&mut self, width: f64, height: f64) {
        self.input = InputState::Idle;
        self.surface.resize(width, height);
    }

    /// Return to the `width` x `height` surface a failed page load started
    /// from, and repaint the background that was there before.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn abort_background(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.surface.resize(width, height);
        self.redraw()
    }

    /// Composite the rasterized page, capture it as the background, and replay the records over it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if compositing, capturing, or the redraw fails.
    pub fn finish_background(&mut self, page: &S::Image) -> Result<(), SurfaceError> {
        self.surface.clear();
        self.surface.draw_image(page)?;
        self.background = Some(self.surface.snapshot()?);
        self.redraw()
    }

    // --- Queries ---

    /// All committed records in paint order.
    #[must_use]
    pub fn records(&self) -> &[ShapeRecord] {
        self.store.all()
    }

    /// Whether a background page has been captured.
    #[must_use]
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    fn legend_action(&self, visible: bool) -> Vec<Action> {
        if self.config.variant == Variant::Freehand {
            vec![Action::LegendVisible { visible }]
        } else {
            Vec::new()
        }
    }
}

fn render_params<'a>(config: &'a EditorConfig, selection: &ToolSelection) -> RenderParams<'a> {
    RenderParams {
        variant: config.variant,
        floors: parse_floor_count(&selection.floor_count),
        font: &config.label_font,
        device_pixel_ratio: config.device_pixel_ratio,
    }
}

/// Download name for an exported image taken at `now_ms` (milliseconds since the epoch).
#[must_use]
pub fn export_file_name(now_ms: f64) -> String {
    format!("{now_ms:.0}.jpg")
}
