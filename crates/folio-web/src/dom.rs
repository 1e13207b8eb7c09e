use folio_core::{TargetRect, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current canvas placement: the render viewport (CSS size plus clamped pixel
/// ratio) and the input surface in client coordinates.
pub fn canvas_layout(canvas: &web::HtmlCanvasElement) -> (Viewport, TargetRect) {
    let rect = canvas.get_bounding_client_rect();
    let (fallback_height, dpr) = match web::window() {
        Some(w) => (
            w.inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
            w.device_pixel_ratio(),
        ),
        None => (0.0, 1.0),
    };
    let height = if rect.height() > 0.0 {
        rect.height()
    } else {
        fallback_height
    };
    let viewport = Viewport::new(rect.width() as f32, height as f32, dpr);
    let target = TargetRect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        height as f32,
    );
    (viewport, target)
}

/// Match the canvas backing store to its CSS size times the clamped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let w_px = (viewport.width as f64 * viewport.pixel_ratio) as u32;
    let h_px = (viewport.height as f64 * viewport.pixel_ratio) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}

#[inline]
pub fn add_window_listener(window: &web::Window, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
