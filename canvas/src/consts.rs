//! Shared numeric constants for the canvas crate.

// ── Calibration ─────────────────────────────────────────────────

/// Centimeters per surface pixel for the parametric shapes.
///
/// 96 DPI screen, drawings plotted at 1:50 (0.02) with 113 px per printed cm.
pub const PARAMETRIC_CM_PER_PX: f64 = (2.54 / 96.0) / (113.0 * 0.02);

/// Centimeters per surface pixel for the freehand legend at a given device pixel ratio.
#[must_use]
pub fn freehand_cm_per_px(device_pixel_ratio: f64) -> f64 {
    2.54 / (device_pixel_ratio * 96.0)
}

// ── Structural heuristics ───────────────────────────────────────

/// Load per floor used by the column-area heuristic.
pub const COLUMN_LOAD_FACTOR: f64 = 1000.0;

/// Allowable stress ratio applied to concrete strength (0.45 f'c).
pub const COLUMN_STRESS_RATIO: f64 = 0.45;

/// Concrete compressive strength f'c in kg/cm².
pub const CONCRETE_STRENGTH: f64 = 210.0;

/// Area deducted from the column figure for T and L sections.
pub const FLANGE_DEDUCTION: f64 = 900.0 / 60.0;

/// Span-to-depth divisor for beams.
pub const BEAM_SPAN_DIVISOR: f64 = 14.0;

/// Divisor from column area to footing area.
pub const FOOTING_DIVISOR: f64 = 25.0;

/// Span-to-thickness divisor for slabs.
pub const SLAB_SPAN_DIVISOR: f64 = 25.0;

// ── Labels ──────────────────────────────────────────────────────

/// Default font for shape labels and the legend.
pub const LABEL_FONT: &str = "12px Arial";

/// Label text color.
pub const LABEL_COLOR: &str = "black";

// ── Legend panel (freehand) ─────────────────────────────────────

/// Legend panel width in pixels.
pub const LEGEND_WIDTH: f64 = 275.0;

/// Padding around the legend panel.
pub const LEGEND_PADDING: f64 = 5.0;

/// Height of one legend text row.
pub const LEGEND_TEXT_HEIGHT: f64 = 14.0;

/// Gap between legend rows.
pub const LEGEND_LINE_SPACING: f64 = 5.0;

/// Legend panel background.
pub const LEGEND_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";

/// Legend text color.
pub const LEGEND_TEXT_COLOR: &str = "white";

// ── Background ──────────────────────────────────────────────────

/// Scale applied to the first PDF page viewport.
pub const PDF_SCALE: f64 = 1.5;

// ── Export ──────────────────────────────────────────────────────

/// Encoding of the downloaded image. Unpainted pixels stay transparent.
pub const EXPORT_MIME_TYPE: &str = "image/png";
