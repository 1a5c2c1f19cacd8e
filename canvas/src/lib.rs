//! Blueprint annotation engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It lays a
//! rasterized PDF page down as the canvas background and lets the user drag
//! out architectural shapes over it. The parametric variant labels each shape
//! with its calibrated area and the column heuristics derived from a floor
//! count; the freehand variant draws plain rectangles, lists their physical
//! dimensions in a legend panel, and offers an eraser. The host page wires
//! DOM events to [`web::Editor`] and reacts to the returned
//! [`engine::Action`]s.
//!
//! Everything above [`web`] is browser-free and runs headless against
//! [`surface::RecordingSurface`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller [`engine::EngineCore`] |
//! | [`doc`] | Shape records and the ordered record store |
//! | [`input`] | Tool selection and the drag state machine |
//! | [`tools`] | Per-kind drawing strategies and label layout |
//! | [`formula`] | Area calibration, column heuristics, number formatting |
//! | [`render`] | Full redraw from background and records, legend panel |
//! | [`loader`] | PDF background loading sequence |
//! | [`surface`] | Drawing surface trait and a display-list implementation |
//! | [`hit`] | Point-in-record hit testing for the eraser |
//! | [`geom`] | Points, rectangles, bounds |
//! | [`config`] | Host-supplied editor configuration |
//! | [`consts`] | Calibration factors, label and legend styling |
//! | `web` | `Canvas2D` surface, pdf.js backend, the `Editor` binding (wasm only) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod formula;
pub mod geom;
pub mod hit;
pub mod input;
pub mod loader;
pub mod render;
pub mod surface;
pub mod tools;
#[cfg(target_arch = "wasm32")]
pub mod web;
