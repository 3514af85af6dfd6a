use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn backdrop_canvas(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// Match the canvas backing store to its CSS size at a capped device pixel
/// ratio. The bounding-rect read is a forced layout, so this is only called
/// at mount and from the debounced resize path.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, pixel_ratio_cap: f64) {
    if let Some(window) = web::window() {
        let dpr = window.device_pixel_ratio().min(pixel_ratio_cap);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

#[inline]
pub fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// Scrollable extent of the page beyond the viewport. Forces layout, so it
/// is cached by the caller and refreshed only on (debounced) resize.
pub fn max_scroll(window: &web::Window, document: &web::Document) -> f32 {
    let page = document.body().map(|b| b.scroll_height()).unwrap_or(0) as f32;
    let (_, view_h) = viewport_size(window);
    (page - view_h).max(0.0)
}

/// Logical core count; browsers that do not report one get a generous
/// default so they are not misclassified as low-end.
#[inline]
pub fn logical_cores(window: &web::Window) -> u32 {
    let cores = window.navigator().hardware_concurrency();
    if cores.is_finite() && cores >= 1.0 {
        cores as u32
    } else {
        8
    }
}
