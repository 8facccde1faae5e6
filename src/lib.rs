#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod intro;
mod loader;
mod render;
mod scene;
mod style;

use intro::IntroChoreographer;
use scene::SceneRenderer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    when_ready(&document, init)
}

/// Run `f` now if the document has parsed, otherwise on DOMContentLoaded.
fn when_ready(document: &web::Document, f: fn()) -> Result<(), JsValue> {
    let state = js_sys::Reflect::get(document, &JsValue::from_str("readyState"))?
        .as_string()
        .unwrap_or_default();
    if state != "loading" {
        f();
        return Ok(());
    }
    let closure = Closure::once_into_js(f);
    document.add_event_listener_with_callback("DOMContentLoaded", closure.unchecked_ref())
}

fn init() {
    let Some(window) = web::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let device = dom::detect_device_class(&window);

    // The two components are independent: either may be missing from a page.
    match IntroChoreographer::new(&document, device) {
        Ok(intro) => {
            intro.start();
        }
        Err(e) => log::error!("[intro] {:?}", e),
    }
    match SceneRenderer::new(&window, &document) {
        Ok(scene) => {
            scene.start();
        }
        Err(e) => log::error!("[scene] {:?}", e),
    }
}
