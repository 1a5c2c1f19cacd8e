//! Document model: shape records and the ordered store that owns them.
//!
//! A [`ShapeRecord`] is the committed description of one drawn shape. Records
//! are immutable once committed; the only mutation the [`ShapeStore`] allows
//! besides appending is deletion. Store order is paint order, so the renderer
//! replays `all()` front to back.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect};
use crate::hit;

/// The kind of a shape record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// Plain rectangle with area and column labels.
    Rectangle,
    /// Square column section.
    Square,
    /// Circular column section (drawn by its bounding box).
    Circle,
    /// T-shaped column section.
    TeeSection,
    /// L-shaped column section.
    LSection,
    /// Beam cross-section; labels the span-derived depth.
    BeamSection,
    /// Footing section; labels the footing area derived from the column.
    FootingSection,
    /// Slab section; labels the span and the derived thickness.
    SlabSection,
}

impl ShapeKind {
    /// Every kind, in tool-bar order.
    pub const ALL: [Self; 8] = [
        Self::Rectangle,
        Self::Square,
        Self::Circle,
        Self::TeeSection,
        Self::LSection,
        Self::BeamSection,
        Self::FootingSection,
        Self::SlabSection,
    ];

    /// Tool identifier as used by the host controls and on the wire.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Square => "square",
            Self::Circle => "circle",
            Self::TeeSection => "teeSection",
            Self::LSection => "lSection",
            Self::BeamSection => "beamSection",
            Self::FootingSection => "footingSection",
            Self::SlabSection => "slabSection",
        }
    }
}

/// A committed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    /// Shape kind; selects the rendering strategy.
    pub kind: ShapeKind,
    /// Drag origin x in surface pixels.
    pub x: f64,
    /// Drag origin y in surface pixels.
    pub y: f64,
    /// Signed width; negative when dragged leftwards.
    pub width: f64,
    /// Signed height; negative when dragged upwards.
    pub height: f64,
    /// Stroke (and fill) color as a CSS color string.
    pub stroke: String,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Whether the bounding rectangle is filled with the stroke color.
    pub filled: bool,
}

impl ShapeRecord {
    /// The record's geometry.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Ordered store of committed shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    records: Vec<ShapeRecord>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Append a record; it paints above everything already stored.
    pub fn append(&mut self, record: ShapeRecord) {
        self.records.push(record);
    }

    /// Remove the record at `index`, returning it if the index was valid.
    pub fn remove_at(&mut self, index: usize) -> Option<ShapeRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// All records in paint order.
    #[must_use]
    pub fn all(&self) -> &[ShapeRecord] {
        &self.records
    }

    /// Record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ShapeRecord> {
        self.records.get(index)
    }

    /// Replace every record.
    pub fn load(&mut self, records: Vec<ShapeRecord>) {
        self.records = records;
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Remove the first record (in paint order) whose bounds contain `pt`.
    pub fn erase_at(&mut self, pt: Point) -> Option<(usize, ShapeRecord)> {
        let index = hit::first_containing(pt, self)?;
        self.remove_at(index).map(|record| (index, record))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
