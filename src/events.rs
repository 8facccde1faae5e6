use crate::dom;
use hero_core::{Throttle, ThrottleDecision};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Forward every pointer move on the document as client coordinates.
pub fn wire_pointer_move(document: &web::Document, mut handler: impl FnMut(f64, f64) + 'static) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        handler(ev.client_x() as f64, ev.client_y() as f64);
    }) as Box<dyn FnMut(_)>);
    if let Err(e) =
        document.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
    {
        log::error!("[events] pointermove listener: {:?}", e);
    }
    closure.forget();
}

/// Run `handler` on window resize at most once per `interval_ms`, with a
/// trailing call so the final size is always seen.
pub fn wire_throttled_resize(
    window: &web::Window,
    interval_ms: f64,
    handler: impl FnMut() + 'static,
) {
    let throttle = Rc::new(RefCell::new(Throttle::new(interval_ms)));
    let handler: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(handler));
    let closure = Closure::wrap(Box::new(move || {
        let decision = throttle.borrow_mut().poll(dom::now_ms());
        match decision {
            ThrottleDecision::Fire => (&mut *handler.borrow_mut())(),
            ThrottleDecision::ScheduleTrailing(delay) => {
                let throttle = throttle.clone();
                let handler = handler.clone();
                dom::set_timeout(delay, move || {
                    if throttle.borrow_mut().fire_trailing(dom::now_ms()) {
                        (&mut *handler.borrow_mut())();
                    }
                });
            }
            ThrottleDecision::Skip => {}
        }
    }) as Box<dyn FnMut()>);
    if let Err(e) =
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
    {
        log::error!("[events] resize listener: {:?}", e);
    }
    closure.forget();
}
