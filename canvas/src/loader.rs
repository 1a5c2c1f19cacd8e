//! Background loader: decode a PDF, rasterize its first page, and install it
//! as the surface background.
//!
//! The PDF engine sits behind [`PdfBackend`] so the sequencing can be driven
//! headless. [`load_background`] holds the engine borrow only between awaits,
//! never across one, so pointer handlers keep running while the page renders.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use std::cell::RefCell;

use crate::engine::EngineCore;
use crate::surface::{Surface, SurfaceError};

/// Pixel size of a page at a given scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

/// Loading a background page failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The payload is not a readable PDF.
    #[error("could not decode pdf: {0}")]
    Decode(String),
    /// The document has no first page, or it could not be opened.
    #[error("could not open first page: {0}")]
    Page(String),
    /// Rasterizing the page failed.
    #[error("could not render page: {0}")]
    Render(String),
    /// Compositing onto the surface failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// A PDF engine able to rasterize pages for surface `S`.
#[allow(async_fn_in_trait)]
pub trait PdfBackend<S: Surface> {
    type Document;
    type Page;

    /// Parse the raw bytes.
    async fn decode(&self, data: &[u8]) -> Result<Self::Document, LoadError>;

    /// Open page 1.
    async fn first_page(&self, document: &Self::Document) -> Result<Self::Page, LoadError>;

    /// Page size at `scale`.
    fn viewport(&self, page: &Self::Page, scale: f64) -> Result<Viewport, LoadError>;

    /// Render the page into an image of the viewport's size.
    async fn rasterize(&self, page: &Self::Page, viewport: &Viewport) -> Result<S::Image, LoadError>;
}

/// Load `data` as the background of `core`.
///
/// On a decode or page failure nothing changes. Once the page is open the
/// surface is resized to the viewport; if rendering then fails it goes back
/// to its previous size and the previous background, if any, is repainted
/// under the records.
///
/// # Errors
///
/// Returns the first [`LoadError`] hit along the way.
pub async fn load_background<S, B>(
    backend: &B,
    data: &[u8],
    core: &RefCell<EngineCore<S>>,
) -> Result<Viewport, LoadError>
where
    S: Surface,
    B: PdfBackend<S>,
{
    let document = backend.decode(data).await?;
    let page = backend.first_page(&document).await?;

    let scale = core.borrow().config.pdf_scale;
    let viewport = backend.viewport(&page, scale)?;
    log::info!("loading background page at {}x{}", viewport.width, viewport.height);
    let (width, height) = {
        let mut core = core.borrow_mut();
        let previous = (core.surface.width(), core.surface.height());
        core.begin_background(viewport.width, viewport.height);
        previous
    };

    let image = match backend.rasterize(&page, &viewport).await {
        Ok(image) => image,
        Err(err) => {
            log::warn!("page render failed, keeping {width}x{height} surface: {err}");
            core.borrow_mut().abort_background(width, height)?;
            return Err(err);
        }
    };

    core.borrow_mut().finish_background(&image)?;
    Ok(viewport)
}
