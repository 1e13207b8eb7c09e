#![cfg(target_arch = "wasm32")]
mod dom;
mod frame;
mod input;
mod overlay;
mod render;

use folio_core::{Experience, ExperienceConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let debug = web::window()
        .and_then(|w| w.location().hash().ok())
        .is_some_and(|h| h == "#debug");
    let level = if debug {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (viewport, target) = dom::canvas_layout(&canvas);
    let hash = window
        .location()
        .hash()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let config = ExperienceConfig::from_page(
        &hash,
        viewport.width,
        viewport.height,
        viewport.height,
        viewport.pixel_ratio,
        rand::random(),
    );
    dom::sync_canvas_backing_size(&canvas, &config.viewport);

    let mut experience = Experience::new(config, Instant::now())?;
    experience.resize(viewport, target);
    {
        let doc = document.clone();
        experience
            .navigation_mut()
            .on_view_changed(move |id| overlay::show_panel(&doc, id));
    }
    if let Some(current) = experience.current_view() {
        overlay::show_panel(&document, current);
    }
    let experience = Rc::new(RefCell::new(experience));

    // Keep canvas backing store, camera and input surface in step with layout
    {
        let canvas_resize = canvas.clone();
        let exp = experience.clone();
        dom::add_window_listener(&window, "resize", move || {
            let (viewport, target) = dom::canvas_layout(&canvas_resize);
            dom::sync_canvas_backing_size(&canvas_resize, &viewport);
            match exp.try_borrow_mut() {
                Ok(mut e) => e.resize(viewport, target),
                Err(_) => log::warn!("[resize] experience busy; resize dropped"),
            }
        });
    }

    let gpu = frame::init_gpu(&canvas).await;

    // Listeners live as long as the page; the binding is kept alive by the
    // frame context and detaches itself if that is ever dropped.
    let mut binding = input::PointerBinding::new(canvas.clone());
    if experience.borrow_mut().enable_input() {
        binding.attach(experience.clone());
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        experience,
        canvas,
        document,
        gpu,
        last_hint: None,
        binding,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
