//! Browser bindings: the `Canvas2D` surface, the pdf.js backend, and the
//! `Editor` object the host page drives.
//!
//! Everything here is thin. Input events are forwarded to [`EngineCore`]
//! and the resulting [`crate::engine::Action`]s are handed back to the host
//! as a JSON array string. pdf.js must be loaded as the global `pdfjsLib`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Promise, Reflect, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement, ImageData};

use crate::config::EditorConfig;
use crate::consts::EXPORT_MIME_TYPE;
use crate::engine::{EngineCore, export_file_name};
use crate::geom::{Point, Rect};
use crate::input::Button;
use crate::loader::{LoadError, PdfBackend, Viewport, load_background};
use crate::surface::{Surface, SurfaceError, TextStyle};

/// Install the panic hook and route `log` to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&err.to_string().into());
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn host(err: JsValue) -> SurfaceError {
    SurfaceError::Host(describe(&err))
}

fn js_error(err: JsValue) -> JsError {
    JsError::new(&describe(&err))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(value: f64) -> u32 {
    value.max(0.0).round() as u32
}

// =============================================================
// Canvas surface
// =============================================================

/// [`Surface`] over a `<canvas>` element's 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    type Snapshot = ImageData;
    type Image = HtmlCanvasElement;

    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(pixels(width));
        self.canvas.set_height(pixels(height));
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn snapshot(&self) -> Result<ImageData, SurfaceError> {
        self.ctx
            .get_image_data(0.0, 0.0, self.width(), self.height())
            .map_err(host)
    }

    fn restore(&mut self, snapshot: &ImageData) -> Result<(), SurfaceError> {
        self.ctx.put_image_data(snapshot, 0.0, 0.0).map_err(host)
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn place_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), SurfaceError> {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(&style.color);
        self.ctx.set_text_baseline(style.baseline.as_css());
        self.ctx.fill_text(text, at.x, at.y).map_err(host)
    }

    fn measure_text(&mut self, text: &str, font: &str) -> Result<f64, SurfaceError> {
        self.ctx.set_font(font);
        Ok(self.ctx.measure_text(text).map_err(host)?.width())
    }

    fn draw_image(&mut self, image: &HtmlCanvasElement) -> Result<(), SurfaceError> {
        self.ctx
            .draw_image_with_html_canvas_element(image, 0.0, 0.0)
            .map_err(host)
    }
}

// =============================================================
// pdf.js
// =============================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = pdfjsLib, js_name = getDocument)]
    fn get_document(source: &JsValue) -> Result<PdfLoadingTask, JsValue>;

    type PdfLoadingTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &PdfLoadingTask) -> Promise;

    /// A decoded pdf.js document.
    pub type PdfDocumentProxy;

    #[wasm_bindgen(method, catch, js_name = getPage)]
    fn get_page(this: &PdfDocumentProxy, number: u32) -> Result<Promise, JsValue>;

    /// One page of a pdf.js document.
    pub type PdfPageProxy;

    #[wasm_bindgen(method, catch, js_name = getViewport)]
    fn get_viewport(this: &PdfPageProxy, params: &JsValue) -> Result<PdfViewport, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn render(this: &PdfPageProxy, params: &JsValue) -> Result<PdfRenderTask, JsValue>;

    type PdfViewport;

    #[wasm_bindgen(method, getter)]
    fn width(this: &PdfViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    fn height(this: &PdfViewport) -> f64;

    type PdfRenderTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &PdfRenderTask) -> Promise;
}

fn set(object: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(object, &JsValue::from_str(key), value)?;
    Ok(())
}

fn page_viewport(page: &PdfPageProxy, scale: f64) -> Result<PdfViewport, JsValue> {
    let params = Object::new();
    set(&params, "scale", &JsValue::from_f64(scale))?;
    page.get_viewport(&params)
}

/// [`PdfBackend`] backed by the global pdf.js library.
pub struct PdfJs {
    document: Document,
}

impl PdfBackend<CanvasSurface> for PdfJs {
    type Document = PdfDocumentProxy;
    type Page = PdfPageProxy;

    async fn decode(&self, data: &[u8]) -> Result<PdfDocumentProxy, LoadError> {
        let decode = |err: JsValue| LoadError::Decode(describe(&err));
        let source = Object::new();
        set(&source, "data", &Uint8Array::from(data)).map_err(decode)?;
        let task = get_document(&source).map_err(decode)?;
        let document = JsFuture::from(task.promise()).await.map_err(decode)?;
        Ok(document.unchecked_into())
    }

    async fn first_page(&self, document: &PdfDocumentProxy) -> Result<PdfPageProxy, LoadError> {
        let page_err = |err: JsValue| LoadError::Page(describe(&err));
        let promise = document.get_page(1).map_err(page_err)?;
        let page = JsFuture::from(promise).await.map_err(page_err)?;
        Ok(page.unchecked_into())
    }

    fn viewport(&self, page: &PdfPageProxy, scale: f64) -> Result<Viewport, LoadError> {
        let viewport = page_viewport(page, scale).map_err(|err| LoadError::Page(describe(&err)))?;
        Ok(Viewport { width: viewport.width(), height: viewport.height(), scale })
    }

    async fn rasterize(&self, page: &PdfPageProxy, viewport: &Viewport) -> Result<HtmlCanvasElement, LoadError> {
        let render_err = |err: JsValue| LoadError::Render(describe(&err));
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(render_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|el| render_err(el.into()))?;
        canvas.set_width(pixels(viewport.width));
        canvas.set_height(pixels(viewport.height));

        let ctx = context_2d(&canvas).map_err(render_err)?;
        let page_viewport = page_viewport(page, viewport.scale).map_err(render_err)?;
        let params = Object::new();
        set(&params, "canvasContext", &ctx).map_err(render_err)?;
        set(&params, "viewport", &page_viewport).map_err(render_err)?;
        let task = page.render(&params).map_err(render_err)?;
        JsFuture::from(task.promise()).await.map_err(render_err)?;
        Ok(canvas)
    }
}

// =============================================================
// Editor
// =============================================================

/// The annotation editor bound to one `<canvas>`.
#[wasm_bindgen]
pub struct Editor {
    canvas: HtmlCanvasElement,
    document: Document,
    core: Rc<RefCell<EngineCore<CanvasSurface>>>,
}

fn actions_json<T: serde::Serialize>(actions: &T) -> Result<String, JsError> {
    Ok(serde_json::to_string(actions)?)
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor over `canvas`. `config` is a JSON object; pass `""` for defaults.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an invalid config or a canvas without a 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: &str) -> Result<Editor, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
        let document = window.document().ok_or_else(|| JsError::new("no document"))?;
        let mut config = EditorConfig::from_json(config)?;
        config.device_pixel_ratio = window.device_pixel_ratio();

        let surface = CanvasSurface::new(canvas.clone()).map_err(js_error)?;
        log::info!("editor ready ({} variant)", config.variant.name());
        Ok(Self { canvas, document, core: Rc::new(RefCell::new(EngineCore::new(surface, config))) })
    }

    /// # Errors
    ///
    /// Returns `Err` if a surface call fails.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f64, y: f64, button: i16) -> Result<String, JsError> {
        let actions = self.core.borrow_mut().on_pointer_down(Point::new(x, y), Button::from_dom(button))?;
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if a surface call fails.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, y: f64) -> Result<String, JsError> {
        let actions = self.core.borrow_mut().on_pointer_move(Point::new(x, y))?;
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if a surface call fails.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, x: f64, y: f64) -> Result<String, JsError> {
        let actions = self.core.borrow_mut().on_pointer_up(Point::new(x, y))?;
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if a surface call fails.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) -> Result<String, JsError> {
        let actions = self.core.borrow_mut().on_pointer_leave()?;
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` for an unknown tool or one the variant does not offer.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&self, id: &str) -> Result<String, JsError> {
        let actions = self.core.borrow_mut().set_tool(id)?;
        actions_json(&actions)
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, color: &str) {
        self.core.borrow_mut().set_color(color);
    }

    #[wasm_bindgen(js_name = setBrushWidth)]
    pub fn set_brush_width(&self, width: f64) {
        self.core.borrow_mut().set_brush_width(width);
    }

    #[wasm_bindgen(js_name = setFill)]
    pub fn set_fill(&self, fill: bool) {
        self.core.borrow_mut().set_fill(fill);
    }

    #[wasm_bindgen(js_name = toggleFill)]
    pub fn toggle_fill(&self) {
        self.core.borrow_mut().toggle_fill();
    }

    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    #[wasm_bindgen(js_name = setFloorCount)]
    pub fn set_floor_count(&self, text: &str) -> Result<(), JsError> {
        Ok(self.core.borrow_mut().set_floor_count(text)?)
    }

    #[wasm_bindgen(js_name = setDevicePixelRatio)]
    pub fn set_device_pixel_ratio(&self, ratio: f64) {
        self.core.borrow_mut().set_device_pixel_ratio(ratio);
    }

    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) -> Result<String, JsError> {
        let actions = self.core.borrow_mut().clear_all()?;
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    #[wasm_bindgen(js_name = deleteRecord)]
    pub fn delete_record(&self, index: usize) -> Result<String, JsError> {
        let actions = self.core.borrow_mut().delete_record(index)?;
        actions_json(&actions)
    }

    /// Committed records as a JSON array, in paint order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    #[wasm_bindgen(js_name = recordsJson)]
    pub fn records_json(&self) -> Result<String, JsError> {
        actions_json(&self.core.borrow().records())
    }

    /// Download the visible canvas as a PNG named after the current time.
    ///
    /// The download name still ends in `.jpg`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot be encoded or the link cannot be created.
    #[wasm_bindgen(js_name = saveImage)]
    pub fn save_image(&self) -> Result<(), JsError> {
        let url = self.canvas.to_data_url_with_type(EXPORT_MIME_TYPE).map_err(js_error)?;
        let link = self
            .document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|el| js_error(el.into()))?;
        let name = export_file_name(js_sys::Date::now());
        link.set_href(&url);
        link.set_download(&name);
        link.click();
        log::info!("exported {name}");
        Ok(())
    }

    /// Decode `data` as a PDF and install its first page as the background.
    ///
    /// Resolves with the page size as `{ width, height }`; rejects with the
    /// error text. Pointer input keeps working while the page renders.
    #[wasm_bindgen(js_name = loadPdf)]
    pub fn load_pdf(&self, data: Vec<u8>) -> Promise {
        let core = Rc::clone(&self.core);
        let backend = PdfJs { document: self.document.clone() };
        future_to_promise(async move {
            match load_background(&backend, &data, &*core).await {
                Ok(viewport) => {
                    let size = Object::new();
                    set(&size, "width", &JsValue::from_f64(viewport.width))?;
                    set(&size, "height", &JsValue::from_f64(viewport.height))?;
                    Ok(size.into())
                }
                Err(err) => {
                    log::error!("background load failed: {err}");
                    Err(JsValue::from_str(&err.to_string()))
                }
            }
        })
    }
}
