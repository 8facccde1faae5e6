use crate::style;
use anyhow::anyhow;
use hero_core::{is_compact_user_agent, DeviceClass, ViewportState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Narrow layouts get the compact placement even on desktop user agents.
const COMPACT_MEDIA_QUERY: &str = "(max-width: 767px)";

pub fn query_html(document: &web::Document, selector: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .query_selector(selector)
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("missing {}", selector))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow!("{} is not an HTML element", selector))
}

pub fn query_all_html(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Fails for a zero-area window so callers skip the resize.
pub fn current_viewport(window: &web::Window) -> anyhow::Result<ViewportState> {
    let width = window
        .inner_width()
        .map_err(|e| anyhow!("{:?}", e))?
        .as_f64()
        .ok_or_else(|| anyhow!("innerWidth is not a number"))?;
    let height = window
        .inner_height()
        .map_err(|e| anyhow!("{:?}", e))?
        .as_f64()
        .ok_or_else(|| anyhow!("innerHeight is not a number"))?;
    Ok(ViewportState::try_new(
        width,
        height,
        window.device_pixel_ratio(),
    )?)
}

pub fn detect_device_class(window: &web::Window) -> DeviceClass {
    let ua_compact = window
        .navigator()
        .user_agent()
        .map(|ua| is_compact_user_agent(&ua))
        .unwrap_or(false);
    let narrow = matches!(
        window.match_media(COMPACT_MEDIA_QUERY),
        Ok(Some(mql)) if mql.matches()
    );
    DeviceClass::from_compact(ua_compact || narrow)
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("[dom] set {} failed: {:?}", property, e);
    }
}

/// Size the canvas backing store to CSS size times the clamped pixel ratio.
pub fn apply_canvas_size(canvas: &web::HtmlCanvasElement, viewport: &ViewportState) {
    let (w, h) = viewport.physical_size();
    canvas.set_width(w);
    canvas.set_height(h);
    set_style(canvas, "width", &style::px(viewport.width));
    set_style(canvas, "height", &style::px(viewport.height));
}

pub fn create_canvas(
    document: &web::Document,
    host: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("created element is not a canvas"))?;
    host.append_child(&canvas).map_err(|e| anyhow!("{:?}", e))?;
    Ok(canvas)
}

#[inline]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn set_timeout(delay_ms: f64, callback: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::once_into_js(callback);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        delay_ms.ceil() as i32,
    ) {
        log::warn!("[dom] setTimeout failed: {:?}", e);
    }
}
