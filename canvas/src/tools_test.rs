#![allow(clippy::float_cmp)]

use super::*;
use crate::surface::{DrawOp, RecordingSurface};

fn record(kind: ShapeKind, x: f64, y: f64, w: f64, h: f64) -> ShapeRecord {
    ShapeRecord {
        kind,
        x,
        y,
        width: w,
        height: h,
        stroke: "#336699".into(),
        stroke_width: 3.0,
        filled: false,
    }
}

fn texts_and_offsets(kind: ShapeKind) -> Vec<(String, f64)> {
    strategy(kind)
        .labels(&record(kind, 0.0, 0.0, 500.0, 300.0), 3.0)
        .into_iter()
        .map(|l| (l.text, l.dy))
        .collect()
}

// =============================================================
// Lookup
// =============================================================

#[test]
fn every_kind_maps_to_its_own_strategy() {
    for kind in ShapeKind::ALL {
        assert_eq!(strategy(kind).kind, kind);
    }
}

#[test]
fn kind_for_id_round_trips_ids() {
    for kind in ShapeKind::ALL {
        assert_eq!(kind_for_id(kind.id()).unwrap(), kind);
    }
}

#[test]
fn unknown_id_is_no_such_tool() {
    let err = kind_for_id("hexagon").unwrap_err();
    assert_eq!(err, ToolError::NoSuchTool("hexagon".into()));
    assert_eq!(err.to_string(), "no such tool: hexagon");
}

#[test]
fn ids_are_case_sensitive() {
    assert!(kind_for_id("Rectangle").is_err());
}

// =============================================================
// Labels per kind
// =============================================================

#[test]
fn rectangle_labels_and_offsets() {
    assert_eq!(
        texts_and_offsets(ShapeKind::Rectangle),
        vec![("AT: 20.56 m²".into(), 0.0), ("AC: 652.66 cm²".into(), 10.0)]
    );
}

#[test]
fn square_adds_third_line() {
    let labels = texts_and_offsets(ShapeKind::Square);
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[2], ("A□: 20.56 m²".into(), 20.0));
}

#[test]
fn circle_adds_third_line() {
    let labels = texts_and_offsets(ShapeKind::Circle);
    assert_eq!(labels[2], ("A◯: 20.56 m²".into(), 20.0));
}

#[test]
fn tee_and_l_third_line() {
    assert_eq!(texts_and_offsets(ShapeKind::TeeSection)[2], ("A⫟: 637.66 m²".into(), 20.0));
    assert_eq!(texts_and_offsets(ShapeKind::LSection)[2], ("AL: 637.66 m²".into(), 20.0));
}

#[test]
fn footing_third_line_at_twenty_five() {
    assert_eq!(texts_and_offsets(ShapeKind::FootingSection)[2], ("A⫠ 26.11 m²".into(), 25.0));
}

#[test]
fn beam_labels_and_offsets() {
    assert_eq!(
        texts_and_offsets(ShapeKind::BeamSection),
        vec![("AT: 20.56 m²".into(), 5.0), ("L: 35.71 m²".into(), 15.0)]
    );
}

#[test]
fn slab_labels_and_offsets() {
    assert_eq!(
        texts_and_offsets(ShapeKind::SlabSection),
        vec![("Luz: 20.56 m".into(), 5.0), ("h: 20.00 cm".into(), 15.0)]
    );
}

#[test]
fn nan_floor_count_displayed_literally() {
    let labels = strategy(ShapeKind::Rectangle).labels(&record(ShapeKind::Rectangle, 0.0, 0.0, 500.0, 300.0), f64::NAN);
    assert_eq!(labels[1].text, "AC: NaN cm²");
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn draw_strokes_then_places_centered_labels() {
    let mut surface = RecordingSurface::default();
    let r = record(ShapeKind::Rectangle, 100.0, 50.0, 200.0, 100.0);
    strategy(ShapeKind::Rectangle).draw(&mut surface, &r, 3.0, "10px Arial").unwrap();

    let ops = surface.ops();
    assert_eq!(ops.len(), 3);
    assert!(matches!(&ops[0], DrawOp::StrokeRect { color, line_width, .. } if color == "#336699" && *line_width == 3.0));

    let first_text = surface.texts()[0].to_string();
    let width = first_text.chars().count() as f64 * 10.0 * 0.6;
    let DrawOp::Text { at, style, .. } = &ops[1] else {
        panic!("expected text op");
    };
    assert_eq!(at.x, 200.0 - width / 2.0);
    assert_eq!(at.y, 100.0);
    assert_eq!(style.baseline, Baseline::Middle);
    assert_eq!(style.color, "black");

    let DrawOp::Text { at: second, .. } = &ops[2] else {
        panic!("expected text op");
    };
    assert_eq!(second.x, at.x);
    assert_eq!(second.y, 110.0);
}

#[test]
fn filled_record_fills_after_stroke() {
    let mut surface = RecordingSurface::default();
    let mut r = record(ShapeKind::BeamSection, 0.0, 0.0, 50.0, 20.0);
    r.filled = true;
    strategy(ShapeKind::BeamSection).draw(&mut surface, &r, 1.0, "12px Arial").unwrap();
    assert!(matches!(surface.ops()[0], DrawOp::StrokeRect { .. }));
    assert!(matches!(&surface.ops()[1], DrawOp::FillRect { color, .. } if color == "#336699"));
}

#[test]
fn negative_size_centers_on_signed_midpoint() {
    let mut surface = RecordingSurface::default();
    let r = record(ShapeKind::SlabSection, 100.0, 100.0, -40.0, -20.0);
    strategy(ShapeKind::SlabSection).draw(&mut surface, &r, 1.0, "12px Arial").unwrap();
    let DrawOp::Text { at, .. } = &surface.ops()[1] else {
        panic!("expected text op");
    };
    assert_eq!(at.y, 90.0 + 5.0);
}
