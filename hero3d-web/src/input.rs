/// Listeners that feed browser input into the shared `InputState`
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use hero3d_core::InputState;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlCanvasElement, HtmlElement, MediaQueryList, MediaQueryListEvent, PointerEvent,
    Window,
};

use crate::dom;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// The reduced-motion media query, if the browser supports it
pub fn reduced_motion_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

/// Pointer position anywhere on the page, relative to the hero box
pub fn track_pointer(
    document: &Document,
    hero: &HtmlElement,
    input: &Rc<RefCell<InputState>>,
) -> EventListener {
    let hero = hero.clone();
    let input = Rc::clone(input);
    EventListener::new(document, "pointermove", move |event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let bounds = dom::bounds(&hero);
        input.borrow_mut().pointer.pointer_moved(
            event.client_x() as f64,
            event.client_y() as f64,
            &bounds,
        );
    })
}

/// Pointer drags on the canvas orbit the camera
pub fn track_drag(canvas: &HtmlCanvasElement, input: &Rc<RefCell<InputState>>) -> Vec<EventListener> {
    let down = {
        let input = Rc::clone(input);
        let canvas_for_capture = canvas.clone();
        EventListener::new(canvas, "pointerdown", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if event.button() != 0 {
                return;
            }
            let _ = canvas_for_capture.set_pointer_capture(event.pointer_id());
            input
                .borrow_mut()
                .drag
                .begin(event.client_x() as f64, event.client_y() as f64);
        })
    };
    let moved = {
        let input = Rc::clone(input);
        EventListener::new(canvas, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            input
                .borrow_mut()
                .drag
                .moved(event.client_x() as f64, event.client_y() as f64);
        })
    };
    let ended = ["pointerup", "pointercancel"].map(|name| {
        let input = Rc::clone(input);
        EventListener::new(canvas, name, move |_event| {
            input.borrow_mut().drag.end();
        })
    });

    let mut listeners = vec![down, moved];
    listeners.extend(ended);
    listeners
}

/// Follow changes of the user's reduced-motion preference
pub fn track_reduced_motion(
    query: &MediaQueryList,
    input: &Rc<RefCell<InputState>>,
) -> EventListener {
    let input = Rc::clone(input);
    EventListener::new(query, "change", move |event| {
        let Some(event) = event.dyn_ref::<MediaQueryListEvent>() else {
            return;
        };
        let reduced = event.matches();
        log::info!("reduced motion {}", if reduced { "on" } else { "off" });
        input.borrow_mut().motion.set_reduced(reduced);
    })
}
