#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::ShapeKind;
use crate::surface::{DrawOp, RecordedImage, RecordingSurface};

// =============================================================
// Helpers
// =============================================================

fn record(kind: ShapeKind, x: f64, y: f64, w: f64, h: f64) -> ShapeRecord {
    ShapeRecord {
        kind,
        x,
        y,
        width: w,
        height: h,
        stroke: "#000".into(),
        stroke_width: 5.0,
        filled: false,
    }
}

fn params(variant: Variant) -> RenderParams<'static> {
    RenderParams { variant, floors: 3.0, font: "12px Arial", device_pixel_ratio: 1.0 }
}

fn sample_store() -> ShapeStore {
    let mut store = ShapeStore::new();
    store.append(record(ShapeKind::Rectangle, 10.0, 10.0, 100.0, 50.0));
    store.append(record(ShapeKind::BeamSection, 200.0, 40.0, -80.0, 30.0));
    store.append(record(ShapeKind::FootingSection, 50.0, 300.0, 120.0, 120.0));
    store
}

fn background_surface() -> (RecordingSurface, Vec<DrawOp>) {
    let mut surface = RecordingSurface::new(900.0, 600.0);
    surface
        .draw_image(&RecordedImage { name: "page-1".into(), width: 900.0, height: 600.0 })
        .unwrap();
    let snapshot = surface.snapshot().unwrap();
    (surface, snapshot)
}

// =============================================================
// Redraw
// =============================================================

#[test]
fn redraw_is_idempotent() {
    let store = sample_store();
    let (mut surface, background) = background_surface();

    redraw(&mut surface, Some(&background), &store, &params(Variant::Parametric)).unwrap();
    let first = surface.clone();
    redraw(&mut surface, Some(&background), &store, &params(Variant::Parametric)).unwrap();
    assert_eq!(surface, first);
}

#[test]
fn redraw_is_idempotent_without_background() {
    let store = sample_store();
    let mut surface = RecordingSurface::default();
    surface.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), "red");

    redraw(&mut surface, None, &store, &params(Variant::Freehand)).unwrap();
    let first = surface.clone();
    redraw(&mut surface, None, &store, &params(Variant::Freehand)).unwrap();
    assert_eq!(surface, first);
    assert!(!surface.ops().iter().any(|op| matches!(op, DrawOp::FillRect { color, .. } if color == "red")));
}

#[test]
fn redraw_starts_from_background() {
    let store = sample_store();
    let (mut surface, background) = background_surface();
    surface.stroke_rect(Rect::new(1.0, 1.0, 1.0, 1.0), "ghost", 1.0);

    redraw(&mut surface, Some(&background), &store, &params(Variant::Parametric)).unwrap();
    assert!(matches!(&surface.ops()[0], DrawOp::Image { name, .. } if name == "page-1"));
    assert!(!surface.ops().iter().any(|op| matches!(op, DrawOp::StrokeRect { color, .. } if color == "ghost")));
}

#[test]
fn redraw_paints_in_store_order() {
    let store = sample_store();
    let mut surface = RecordingSurface::default();
    redraw(&mut surface, None, &store, &params(Variant::Parametric)).unwrap();

    let strokes: Vec<Rect> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::StrokeRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    let expected: Vec<Rect> = store.all().iter().map(ShapeRecord::rect).collect();
    assert_eq!(strokes, expected);
}

#[test]
fn deleting_then_redrawing_matches_replay_without_record() {
    let (base, background) = background_surface();
    for i in 0..3 {
        let mut store = sample_store();
        let mut deleted = base.clone();
        store.remove_at(i).unwrap();
        redraw(&mut deleted, Some(&background), &store, &params(Variant::Parametric)).unwrap();

        let mut replay_store = ShapeStore::new();
        for (j, r) in sample_store().all().iter().enumerate() {
            if j != i {
                replay_store.append(r.clone());
            }
        }
        let mut replayed = base.clone();
        redraw(&mut replayed, Some(&background), &replay_store, &params(Variant::Parametric)).unwrap();

        assert_eq!(deleted, replayed);
    }
}

#[test]
fn parametric_redraw_has_labels() {
    let mut store = ShapeStore::new();
    store.append(record(ShapeKind::Rectangle, 0.0, 0.0, 500.0, 300.0));
    let mut surface = RecordingSurface::default();
    redraw(&mut surface, None, &store, &params(Variant::Parametric)).unwrap();
    assert_eq!(surface.texts(), vec!["AT: 20.56 m²", "AC: 652.66 cm²"]);
}

// =============================================================
// Freehand legend
// =============================================================

#[test]
fn freehand_records_have_no_shape_labels_but_a_legend() {
    let mut store = ShapeStore::new();
    store.append(record(ShapeKind::Rectangle, 0.0, 0.0, 200.0, 100.0));
    store.append(record(ShapeKind::Rectangle, 10.0, 10.0, 20.0, 20.0));
    let mut surface = RecordingSurface::new(800.0, 600.0);
    redraw(&mut surface, None, &store, &params(Variant::Freehand)).unwrap();

    let texts = surface.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], "Width: 5.29 cm, Height: 2.65 cm, Área: 7.00 cm²");
}

#[test]
fn legend_panel_geometry() {
    let mut store = ShapeStore::new();
    store.append(record(ShapeKind::Rectangle, 0.0, 0.0, 200.0, 100.0));
    store.append(record(ShapeKind::Rectangle, 10.0, 10.0, 20.0, 20.0));
    let mut surface = RecordingSurface::new(800.0, 600.0);
    draw_legend(&mut surface, &store, &params(Variant::Freehand)).unwrap();

    // Two rows of 19px: panel x = 800 - 275 - 5, y = 600 - 38 - 5.
    let DrawOp::FillRect { rect, color } = &surface.ops()[0] else {
        panic!("expected legend background");
    };
    assert_eq!(*rect, Rect::new(515.0, 552.0, 275.0, 48.0));
    assert_eq!(color, "rgba(0, 0, 0, 0.8)");

    let DrawOp::Text { at, style, .. } = &surface.ops()[2] else {
        panic!("expected legend row");
    };
    assert_eq!(*at, Point::new(520.0, 557.0 + 38.0));
    assert_eq!(style.color, "white");
    assert_eq!(style.baseline, Baseline::Alphabetic);
}

#[test]
fn freehand_empty_store_has_no_legend() {
    let mut surface = RecordingSurface::default();
    redraw(&mut surface, None, &ShapeStore::new(), &params(Variant::Freehand)).unwrap();
    assert!(surface.ops().is_empty());
}

#[test]
fn legend_uses_device_pixel_ratio() {
    let mut store = ShapeStore::new();
    store.append(record(ShapeKind::Rectangle, 0.0, 0.0, 400.0, 200.0));
    let mut surface = RecordingSurface::default();
    let p = RenderParams { device_pixel_ratio: 2.0, ..params(Variant::Freehand) };
    redraw(&mut surface, None, &store, &p).unwrap();
    assert_eq!(surface.texts()[0], "Width: 5.29 cm, Height: 2.65 cm, Área: 7.00 cm²");
}
