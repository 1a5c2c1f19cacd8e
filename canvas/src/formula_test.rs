#![allow(clippy::float_cmp)]

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn record(kind: ShapeKind, w: f64, h: f64) -> ShapeRecord {
    ShapeRecord {
        kind,
        x: 0.0,
        y: 0.0,
        width: w,
        height: h,
        stroke: "#000".into(),
        stroke_width: 5.0,
        filled: false,
    }
}

// =============================================================
// Calibration
// =============================================================

#[test]
fn parametric_calibration_value() {
    assert!(approx(PARAMETRIC_CM_PER_PX, 2.54 / (96.0 * 0.02 * 113.0)));
}

#[test]
fn freehand_calibration_depends_on_dpr() {
    assert!(approx(freehand_cm_per_px(1.0), 2.54 / 96.0));
    assert!(approx(freehand_cm_per_px(2.0), 2.54 / 192.0));
    assert!(!approx(freehand_cm_per_px(1.0), PARAMETRIC_CM_PER_PX));
}

// =============================================================
// Rectangle scenario: 500 x 300 px, 3 floors
// =============================================================

#[test]
fn rectangle_500_by_300_three_floors() {
    let k = 2.54 / (96.0 * 0.02 * 113.0);
    let m = area_for_shape(&record(ShapeKind::Rectangle, 500.0, 300.0), 3.0);

    assert!(approx(m.primary, (500.0 * k) * (300.0 * k)));
    let expected_column = m.primary * 3.0 * 1000.0 / (0.45 * 210.0);
    assert_eq!(m.column, Some(round_fixed(expected_column)));
    assert_eq!(to_fixed(m.primary), "20.56");
    assert_eq!(to_fixed(m.column.unwrap()), "652.66");
    assert!(m.derived.is_none());
}

#[test]
fn area_is_pure() {
    let r = record(ShapeKind::FootingSection, 123.0, 456.0);
    assert_eq!(area_for_shape(&r, 4.0), area_for_shape(&r, 4.0));
}

// =============================================================
// Per-kind derived quantities
// =============================================================

#[test]
fn square_and_circle_repeat_primary() {
    for kind in [ShapeKind::Square, ShapeKind::Circle] {
        let m = area_for_shape(&record(kind, 500.0, 300.0), 3.0);
        assert_eq!(m.derived, Some(m.primary));
    }
}

#[test]
fn tee_and_l_deduct_from_rounded_column() {
    for kind in [ShapeKind::TeeSection, ShapeKind::LSection] {
        let m = area_for_shape(&record(kind, 500.0, 300.0), 3.0);
        assert_eq!(to_fixed(m.derived.unwrap()), "637.66");
    }
}

#[test]
fn footing_divides_rounded_column() {
    let m = area_for_shape(&record(ShapeKind::FootingSection, 500.0, 300.0), 3.0);
    assert!(approx(m.derived.unwrap(), 652.66 / 25.0));
    assert_eq!(to_fixed(m.derived.unwrap()), "26.11");
}

#[test]
fn beam_uses_longest_side_over_fourteen() {
    let m = area_for_shape(&record(ShapeKind::BeamSection, 500.0, 300.0), 3.0);
    assert!(m.column.is_none());
    assert_eq!(to_fixed(m.derived.unwrap()), "35.71");
}

#[test]
fn slab_uses_longest_side_over_twenty_five() {
    let m = area_for_shape(&record(ShapeKind::SlabSection, 300.0, 500.0), f64::NAN);
    assert!(m.column.is_none());
    assert_eq!(to_fixed(m.derived.unwrap()), "20.00");
}

#[test]
fn beam_ignores_floor_count() {
    let a = area_for_shape(&record(ShapeKind::BeamSection, 280.0, 70.0), 1.0);
    let b = area_for_shape(&record(ShapeKind::BeamSection, 280.0, 70.0), f64::NAN);
    assert_eq!(a.derived, b.derived);
}

// =============================================================
// Edge cases
// =============================================================

#[test]
fn negative_size_gives_negative_area() {
    let m = area_for_shape(&record(ShapeKind::Rectangle, -500.0, 300.0), 3.0);
    assert_eq!(to_fixed(m.primary), "-20.56");
}

#[test]
fn nan_floor_count_propagates() {
    let m = area_for_shape(&record(ShapeKind::TeeSection, 500.0, 300.0), f64::NAN);
    assert!(m.column.unwrap().is_nan());
    assert!(m.derived.unwrap().is_nan());
    assert_eq!(to_fixed(m.column.unwrap()), "NaN");
}

#[test]
fn zero_floor_count_is_zero_not_nan() {
    let m = area_for_shape(&record(ShapeKind::Rectangle, 500.0, 300.0), 0.0);
    assert_eq!(to_fixed(m.column.unwrap()), "0.00");
}

#[test]
fn zero_size_is_zero_area() {
    let m = area_for_shape(&record(ShapeKind::Square, 0.0, 300.0), 3.0);
    assert_eq!(m.primary, 0.0);
}

#[test]
fn vertical_upward_drag_prints_unsigned_zero() {
    let m = measure(ShapeKind::Rectangle, Rect::new(100.0, 100.0, 0.0, -50.0), 3.0);
    assert!(m.primary.is_sign_negative());
    assert_eq!(to_fixed(m.primary), "0.00");
    assert_eq!(to_fixed(m.column.unwrap()), "0.00");

    let line = legend_line(Rect::new(100.0, 100.0, 0.0, -50.0), 1.0);
    assert_eq!(line, "Width: 0.00 cm, Height: 1.32 cm, Área: 0.00 cm²");
}

// =============================================================
// parse_floor_count
// =============================================================

#[test]
fn parse_plain_numbers() {
    assert_eq!(parse_floor_count("3"), 3.0);
    assert_eq!(parse_floor_count("2.5"), 2.5);
    assert_eq!(parse_floor_count("  4"), 4.0);
    assert_eq!(parse_floor_count("-1"), -1.0);
    assert_eq!(parse_floor_count(".5"), 0.5);
    assert_eq!(parse_floor_count("1e2"), 100.0);
}

#[test]
fn parse_takes_leading_prefix() {
    assert_eq!(parse_floor_count("3 pisos"), 3.0);
    assert_eq!(parse_floor_count("2.5.1"), 2.5);
    assert_eq!(parse_floor_count("7e"), 7.0);
}

#[test]
fn parse_empty_or_garbage_is_nan() {
    assert!(parse_floor_count("").is_nan());
    assert!(parse_floor_count("abc").is_nan());
    assert!(parse_floor_count(".").is_nan());
    assert!(parse_floor_count("-").is_nan());
}

#[test]
fn parse_infinity() {
    assert_eq!(parse_floor_count("Infinity"), f64::INFINITY);
    assert_eq!(parse_floor_count("-Infinity"), f64::NEG_INFINITY);
}

// =============================================================
// Formatting
// =============================================================

#[test]
fn to_fixed_formats_two_decimals() {
    assert_eq!(to_fixed(1.0), "1.00");
    assert_eq!(to_fixed(1.234), "1.23");
    assert_eq!(to_fixed(-0.5), "-0.50");
}

#[test]
fn to_fixed_negative_zero_has_no_sign() {
    assert_eq!(to_fixed(-0.0), "0.00");
    assert_eq!(to_fixed(0.0), "0.00");
}

#[test]
fn to_fixed_non_finite() {
    assert_eq!(to_fixed(f64::NAN), "NaN");
    assert_eq!(to_fixed(f64::INFINITY), "Infinity");
    assert_eq!(to_fixed(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn round_fixed_passes_non_finite_through() {
    assert!(round_fixed(f64::NAN).is_nan());
    assert_eq!(round_fixed(f64::INFINITY), f64::INFINITY);
    assert_eq!(round_fixed(1.006), 1.01);
}

// =============================================================
// Freehand legend
// =============================================================

#[test]
fn legend_line_at_dpr_one() {
    let line = legend_line(Rect::new(0.0, 0.0, 200.0, 100.0), 1.0);
    assert_eq!(line, "Width: 5.29 cm, Height: 2.65 cm, Área: 7.00 cm²");
}

#[test]
fn legend_line_dimensions_are_absolute_but_area_signed() {
    let line = legend_line(Rect::new(0.0, 0.0, -200.0, 100.0), 1.0);
    assert_eq!(line, "Width: 5.29 cm, Height: 2.65 cm, Área: -7.00 cm²");
}

#[test]
fn legend_line_scales_with_dpr() {
    let one = legend_line(Rect::new(0.0, 0.0, 200.0, 100.0), 1.0);
    let two = legend_line(Rect::new(0.0, 0.0, 400.0, 200.0), 2.0);
    assert_eq!(one, two);
}
