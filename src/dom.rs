use crate::constants::{DARK_THEME, THEME_ATTRIBUTE};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Read once at mount; later theme switches don't affect a running field.
pub fn is_dark_theme(document: &web::Document) -> bool {
    document
        .document_element()
        .and_then(|el| el.get_attribute(THEME_ATTRIBUTE))
        .map(|t| t == DARK_THEME)
        .unwrap_or(false)
}

/// Size of the canvas's parent container, falling back to the window's inner
/// size when the parent reports zero.
pub fn container_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let parent = canvas
        .parent_element()
        .and_then(|p| p.dyn_into::<web::HtmlElement>().ok());
    let (pw, ph) = parent
        .map(|p| (p.offset_width(), p.offset_height()))
        .unwrap_or((0, 0));
    let (ww, wh) = window_inner_size();
    let w = if pw > 0 { pw as f32 } else { ww };
    let h = if ph > 0 { ph as f32 } else { wh };
    Vec2::new(w.max(1.0), h.max(1.0))
}

fn window_inner_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    (read(w.inner_width()), read(w.inner_height()))
}

/// Match the canvas backing store to `size` (CSS pixels, no DPR scaling).
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement, size: Vec2) {
    canvas.set_width(size.x as u32);
    canvas.set_height(size.y as u32);
}

/// Convert client coordinates to canvas-local ones.
#[inline]
pub fn client_to_canvas(canvas: &web::HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        client_x as f32 - rect.left() as f32,
        client_y as f32 - rect.top() as f32,
    )
}
