//! Rendering: rebuilds the visible surface from the background and the record list.
//!
//! [`redraw`] is the only way committed state reaches the surface. It starts
//! from the background snapshot (or a cleared surface), replays every record
//! in store order with its own committed geometry, and, for the freehand
//! variant with at least one record, paints the legend panel on top. Because nothing else persists
//! between passes, calling it twice in a row gives the same pixels.
//!
//! All fallible surface calls propagate errors via `Result<(), SurfaceError>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::Variant;
use crate::consts::{
    LEGEND_BACKGROUND, LEGEND_LINE_SPACING, LEGEND_PADDING, LEGEND_TEXT_COLOR, LEGEND_TEXT_HEIGHT, LEGEND_WIDTH,
};
use crate::doc::{ShapeRecord, ShapeStore};
use crate::formula::legend_line;
use crate::geom::{Point, Rect};
use crate::surface::{Baseline, Surface, SurfaceError, TextStyle};
use crate::tools::{draw_outline, strategy};

/// Inputs that shape how records are painted, read fresh for every pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub variant: Variant,
    /// Parsed floor count for the column heuristics.
    pub floors: f64,
    pub font: &'a str,
    pub device_pixel_ratio: f64,
}

/// Repaint the surface from `background` and every record in `store`.
///
/// # Errors
///
/// Returns `Err` if any surface call fails; the surface is left as far as
/// the pass got.
pub fn redraw<S: Surface>(
    surface: &mut S,
    background: Option<&S::Snapshot>,
    store: &ShapeStore,
    params: &RenderParams<'_>,
) -> Result<(), SurfaceError> {
    match background {
        Some(snapshot) => surface.restore(snapshot)?,
        None => surface.clear(),
    }

    for record in store.all() {
        draw_record(surface, record, params)?;
    }

    if params.variant == Variant::Freehand && !store.is_empty() {
        draw_legend(surface, store, params)?;
    }
    Ok(())
}

/// Paint one record (committed or provisional) the way its variant shows it.
///
/// # Errors
///
/// Returns `Err` if a surface text call fails.
pub fn draw_record<S: Surface>(
    surface: &mut S,
    record: &ShapeRecord,
    params: &RenderParams<'_>,
) -> Result<(), SurfaceError> {
    match params.variant {
        Variant::Parametric => strategy(record.kind).draw(surface, record, params.floors, params.font),
        Variant::Freehand => {
            draw_outline(surface, record);
            Ok(())
        }
    }
}

/// Paint the legend panel in the bottom-right corner, one row per record.
///
/// # Errors
///
/// Returns `Err` if a surface text call fails.
pub fn draw_legend<S: Surface>(
    surface: &mut S,
    store: &ShapeStore,
    params: &RenderParams<'_>,
) -> Result<(), SurfaceError> {
    let row = LEGEND_TEXT_HEIGHT + LEGEND_LINE_SPACING;
    #[allow(clippy::cast_precision_loss)]
    let total_height = row * store.len() as f64;
    let x = surface.width() - LEGEND_WIDTH - LEGEND_PADDING;
    let y = surface.height() - total_height - LEGEND_PADDING;

    surface.fill_rect(
        Rect::new(
            x - LEGEND_PADDING,
            y - LEGEND_PADDING,
            LEGEND_WIDTH,
            total_height + LEGEND_PADDING * 2.0,
        ),
        LEGEND_BACKGROUND,
    );

    let style = TextStyle {
        font: params.font.to_string(),
        color: LEGEND_TEXT_COLOR.to_string(),
        baseline: Baseline::Alphabetic,
    };
    for (index, record) in store.all().iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let text_y = y + (index + 1) as f64 * row;
        let text = legend_line(record.rect(), params.device_pixel_ratio);
        surface.place_text(&text, Point::new(x, text_y), &style)?;
    }
    Ok(())
}
