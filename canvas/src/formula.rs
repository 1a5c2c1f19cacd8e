//! Pre-dimensioning formulas.
//!
//! Every function here is pure: the same geometry and floor count always give
//! the same [`Measurement`]. Unit suffixes on the labels follow the drafting
//! convention the tool was built around and are not dimensionally checked;
//! values are computed from the signed pixel size, so dragging up or left
//! yields negative areas and those are shown as-is.

#[cfg(test)]
#[path = "formula_test.rs"]
mod formula_test;

use crate::consts::{
    BEAM_SPAN_DIVISOR, COLUMN_LOAD_FACTOR, COLUMN_STRESS_RATIO, CONCRETE_STRENGTH, FLANGE_DEDUCTION,
    FOOTING_DIVISOR, PARAMETRIC_CM_PER_PX, SLAB_SPAN_DIVISOR, freehand_cm_per_px,
};
use crate::doc::{ShapeKind, ShapeRecord};
use crate::geom::Rect;

/// Quantities computed for one parametric shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Base area (or span, for slabs) from the calibrated pixel size.
    pub primary: f64,
    /// Column-sizing figure, already rounded to two decimals. `None` for beams and slabs.
    pub column: Option<f64>,
    /// Kind-specific secondary quantity, if the kind has one.
    pub derived: Option<f64>,
}

/// Measure a committed (or provisional) record for a floor count.
#[must_use]
pub fn area_for_shape(record: &ShapeRecord, floors: f64) -> Measurement {
    measure(record.kind, record.rect(), floors)
}

/// Measure a shape of `kind` spanning `rect`.
#[must_use]
pub fn measure(kind: ShapeKind, rect: Rect, floors: f64) -> Measurement {
    let primary = calibrated_area(rect);
    let longest = rect.width.max(rect.height);

    match kind {
        ShapeKind::Rectangle => Measurement {
            primary,
            column: Some(column_area(primary, floors)),
            derived: None,
        },
        ShapeKind::Square | ShapeKind::Circle => Measurement {
            primary,
            column: Some(column_area(primary, floors)),
            derived: Some(primary),
        },
        ShapeKind::TeeSection | ShapeKind::LSection => {
            let column = column_area(primary, floors);
            Measurement { primary, column: Some(column), derived: Some(column - FLANGE_DEDUCTION) }
        }
        ShapeKind::FootingSection => {
            let column = column_area(primary, floors);
            Measurement { primary, column: Some(column), derived: Some(column / FOOTING_DIVISOR) }
        }
        ShapeKind::BeamSection => Measurement {
            primary,
            column: None,
            derived: Some(longest / BEAM_SPAN_DIVISOR),
        },
        ShapeKind::SlabSection => Measurement {
            primary,
            column: None,
            derived: Some(longest / SLAB_SPAN_DIVISOR),
        },
    }
}

/// Signed area of `rect` after converting both sides with the parametric calibration.
#[must_use]
pub fn calibrated_area(rect: Rect) -> f64 {
    (rect.width * PARAMETRIC_CM_PER_PX) * (rect.height * PARAMETRIC_CM_PER_PX)
}

/// Column area heuristic `A·n·1000 / (0.45·f'c)`, rounded to two decimals.
///
/// Later formulas consume the rounded figure, not the exact one.
#[must_use]
pub fn column_area(primary: f64, floors: f64) -> f64 {
    round_fixed(primary * floors * COLUMN_LOAD_FACTOR / (COLUMN_STRESS_RATIO * CONCRETE_STRENGTH))
}

/// One legend row for a freehand rectangle at the given device pixel ratio.
///
/// Dimensions are not stored on the record. Each redraw passes the ratio
/// current at that moment, so rows drawn before a ratio change show new
/// centimetre values afterwards.
#[must_use]
pub fn legend_line(rect: Rect, device_pixel_ratio: f64) -> String {
    let k = freehand_cm_per_px(device_pixel_ratio);
    let width_cm = rect.width.abs() * k;
    let height_cm = rect.height.abs() * k;
    let area = (rect.width * k * rect.height * k) / 2.0;
    format!(
        "Width: {} cm, Height: {} cm, Área: {} cm²",
        to_fixed(width_cm),
        to_fixed(height_cm),
        to_fixed(area)
    )
}

/// Parse a floor count the way a form field's text is read: the longest
/// leading decimal prefix wins, anything unparseable is NaN.
#[must_use]
pub fn parse_floor_count(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Format with two decimals; non-finite values print as `NaN`, `Infinity`, `-Infinity`.
#[must_use]
pub fn to_fixed(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // -0.0 prints unsigned.
        "0.00".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Round to the two decimals [`to_fixed`] would print.
#[must_use]
pub fn round_fixed(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    to_fixed(value).parse::<f64>().unwrap_or(f64::NAN)
}
