use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Experience, PointerInput};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Listener = Closure<dyn FnMut(web::Event)>;

// ---------------- Event translation ----------------
#[inline]
fn mouse_input(kind: &str, ev: &web::MouseEvent) -> Option<PointerInput> {
    let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
    match kind {
        "mousedown" => Some(PointerInput::Down { x, y }),
        "mousemove" => Some(PointerInput::Move { x, y }),
        "mouseup" => Some(PointerInput::Up),
        "mouseleave" => Some(PointerInput::Leave),
        _ => None,
    }
}

/// Touch input follows the first touch only.
#[inline]
fn touch_input(kind: &str, ev: &web::TouchEvent) -> Option<PointerInput> {
    match kind {
        "touchend" => return Some(PointerInput::Up),
        "touchcancel" => return Some(PointerInput::Leave),
        _ => {}
    }
    let touch = ev.touches().get(0)?;
    let (x, y) = (touch.client_x() as f32, touch.client_y() as f32);
    match kind {
        "touchstart" => Some(PointerInput::Down { x, y }),
        "touchmove" => Some(PointerInput::Move { x, y }),
        _ => None,
    }
}

const MOUSE_EVENTS: [&str; 4] = ["mousedown", "mousemove", "mouseup", "mouseleave"];
const TOUCH_EVENTS: [&str; 4] = ["touchstart", "touchmove", "touchend", "touchcancel"];

/// Owns the canvas input listeners feeding the pointer router.
///
/// Listeners are kept (not leaked) so `detach` can remove exactly what
/// `attach` added.
pub struct PointerBinding {
    canvas: web::HtmlCanvasElement,
    listeners: Vec<(&'static str, Listener)>,
}

impl PointerBinding {
    pub fn new(canvas: web::HtmlCanvasElement) -> Self {
        Self {
            canvas,
            listeners: Vec::new(),
        }
    }

    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn attach(&mut self, experience: Rc<RefCell<Experience>>) {
        if self.is_attached() {
            log::warn!("[pointer] listeners already attached");
            return;
        }
        for kind in MOUSE_EVENTS.into_iter().chain(TOUCH_EVENTS) {
            let exp = experience.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::Event| {
                let input = if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
                    mouse_input(kind, m)
                } else if let Some(t) = ev.dyn_ref::<web::TouchEvent>() {
                    t.prevent_default();
                    touch_input(kind, t)
                } else {
                    None
                };
                let Some(input) = input else {
                    return;
                };
                match exp.try_borrow_mut() {
                    Ok(mut e) => e.pointer(input),
                    Err(_) => log::debug!("[pointer] dropped {:?}: experience busy", input),
                }
            }) as Box<dyn FnMut(web::Event)>);
            if let Err(e) = self
                .canvas
                .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                log::error!("[pointer] add {} listener: {:?}", kind, e);
                continue;
            }
            self.listeners.push((kind, closure));
        }
        log::debug!("[pointer] attached {} listeners", self.listeners.len());
    }

    pub fn detach(&mut self) {
        for (kind, closure) in self.listeners.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        log::debug!("[pointer] detached");
    }
}

impl Drop for PointerBinding {
    fn drop(&mut self) {
        if self.is_attached() {
            self.detach();
        }
    }
}
