//! Tool dispatch: one rendering strategy per shape kind.
//!
//! Every strategy strokes (and optionally fills) the shape's bounding
//! rectangle, measures it with [`crate::formula::measure`], and lays its
//! labels out under a shared x: the first label is centered on the shape and
//! every following line reuses that x at its own vertical offset. Strategies
//! differ only in which label lines they produce, so the table below maps a
//! kind to a label builder.

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;

use crate::consts::LABEL_COLOR;
use crate::doc::{ShapeKind, ShapeRecord};
use crate::formula::{Measurement, measure, to_fixed};
use crate::geom::Point;
use crate::surface::{Baseline, Surface, SurfaceError, TextStyle};

/// Tool selection failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// The identifier does not name any tool.
    #[error("no such tool: {0}")]
    NoSuchTool(String),
    /// The tool exists but the active editor variant does not offer it.
    #[error("tool {tool} is not available in the {variant} variant")]
    UnavailableInVariant { tool: String, variant: &'static str },
}

/// One label line, offset from the shape's vertical center.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub dy: f64,
}

impl Label {
    fn new(text: String, dy: f64) -> Self {
        Self { text, dy }
    }
}

type LabelFn = fn(&Measurement) -> Vec<Label>;

/// Rendering strategy for one shape kind.
pub struct Strategy {
    pub kind: ShapeKind,
    labels: LabelFn,
}

static RECTANGLE: Strategy = Strategy { kind: ShapeKind::Rectangle, labels: rectangle_labels };
static SQUARE: Strategy = Strategy { kind: ShapeKind::Square, labels: square_labels };
static CIRCLE: Strategy = Strategy { kind: ShapeKind::Circle, labels: circle_labels };
static TEE: Strategy = Strategy { kind: ShapeKind::TeeSection, labels: tee_labels };
static ELL: Strategy = Strategy { kind: ShapeKind::LSection, labels: ell_labels };
static BEAM: Strategy = Strategy { kind: ShapeKind::BeamSection, labels: beam_labels };
static FOOTING: Strategy = Strategy { kind: ShapeKind::FootingSection, labels: footing_labels };
static SLAB: Strategy = Strategy { kind: ShapeKind::SlabSection, labels: slab_labels };

/// Strategy for a kind.
#[must_use]
pub fn strategy(kind: ShapeKind) -> &'static Strategy {
    match kind {
        ShapeKind::Rectangle => &RECTANGLE,
        ShapeKind::Square => &SQUARE,
        ShapeKind::Circle => &CIRCLE,
        ShapeKind::TeeSection => &TEE,
        ShapeKind::LSection => &ELL,
        ShapeKind::BeamSection => &BEAM,
        ShapeKind::FootingSection => &FOOTING,
        ShapeKind::SlabSection => &SLAB,
    }
}

/// Resolve a tool identifier to a shape kind.
///
/// # Errors
///
/// Returns [`ToolError::NoSuchTool`] if no kind has this identifier.
pub fn kind_for_id(id: &str) -> Result<ShapeKind, ToolError> {
    ShapeKind::ALL
        .into_iter()
        .find(|kind| kind.id() == id)
        .ok_or_else(|| ToolError::NoSuchTool(id.to_string()))
}

impl Strategy {
    /// Label lines for a shape measured with `floors`.
    #[must_use]
    pub fn labels(&self, record: &ShapeRecord, floors: f64) -> Vec<Label> {
        (self.labels)(&measure(self.kind, record.rect(), floors))
    }

    /// Draw the outline and labels of `record`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a text call on the surface fails.
    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        record: &ShapeRecord,
        floors: f64,
        font: &str,
    ) -> Result<(), SurfaceError> {
        draw_outline(surface, record);
        place_labels(surface, record, &self.labels(record, floors), font)
    }
}

/// Stroke the record's bounding rectangle, then fill it if requested.
pub fn draw_outline<S: Surface>(surface: &mut S, record: &ShapeRecord) {
    let rect = record.rect();
    surface.stroke_rect(rect, &record.stroke, record.stroke_width);
    if record.filled {
        surface.fill_rect(rect, &record.stroke);
    }
}

fn place_labels<S: Surface>(
    surface: &mut S,
    record: &ShapeRecord,
    labels: &[Label],
    font: &str,
) -> Result<(), SurfaceError> {
    let Some(first) = labels.first() else {
        return Ok(());
    };
    let text_width = surface.measure_text(&first.text, font)?;
    let x = record.x + record.width / 2.0 - text_width / 2.0;
    let center_y = record.y + record.height / 2.0;
    let style = TextStyle { font: font.to_string(), color: LABEL_COLOR.to_string(), baseline: Baseline::Middle };
    for label in labels {
        surface.place_text(&label.text, Point::new(x, center_y + label.dy), &style)?;
    }
    Ok(())
}

// =============================================================
// Label builders
// =============================================================

fn area_line(m: &Measurement) -> String {
    format!("AT: {} m²", to_fixed(m.primary))
}

fn column_line(m: &Measurement) -> String {
    format!("AC: {} cm²", to_fixed(m.column.unwrap_or(f64::NAN)))
}

fn derived(m: &Measurement) -> String {
    to_fixed(m.derived.unwrap_or(f64::NAN))
}

fn rectangle_labels(m: &Measurement) -> Vec<Label> {
    vec![Label::new(area_line(m), 0.0), Label::new(column_line(m), 10.0)]
}

fn square_labels(m: &Measurement) -> Vec<Label> {
    let mut labels = rectangle_labels(m);
    labels.push(Label::new(format!("A□: {} m²", derived(m)), 20.0));
    labels
}

fn circle_labels(m: &Measurement) -> Vec<Label> {
    let mut labels = rectangle_labels(m);
    labels.push(Label::new(format!("A◯: {} m²", derived(m)), 20.0));
    labels
}

fn tee_labels(m: &Measurement) -> Vec<Label> {
    let mut labels = rectangle_labels(m);
    labels.push(Label::new(format!("A⫟: {} m²", derived(m)), 20.0));
    labels
}

fn ell_labels(m: &Measurement) -> Vec<Label> {
    let mut labels = rectangle_labels(m);
    labels.push(Label::new(format!("AL: {} m²", derived(m)), 20.0));
    labels
}

fn footing_labels(m: &Measurement) -> Vec<Label> {
    let mut labels = rectangle_labels(m);
    labels.push(Label::new(format!("A⫠ {} m²", derived(m)), 25.0));
    labels
}

fn beam_labels(m: &Measurement) -> Vec<Label> {
    vec![
        Label::new(area_line(m), 5.0),
        Label::new(format!("L: {} m²", derived(m)), 15.0),
    ]
}

fn slab_labels(m: &Measurement) -> Vec<Label> {
    vec![
        Label::new(format!("Luz: {} m", to_fixed(m.primary)), 5.0),
        Label::new(format!("h: {} cm", derived(m)), 15.0),
    ]
}
