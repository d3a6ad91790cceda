/// Typed DOM lookups and measurements
use hero3d_core::Bounds;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::error::{WebError, WebResult};

pub fn window() -> WebResult<Window> {
    web_sys::window().ok_or(WebError::NoWindow)
}

pub fn document(window: &Window) -> WebResult<Document> {
    window.document().ok_or(WebError::NoDocument)
}

/// Resolve a required element, failing on absence or a type mismatch
pub fn require<T: JsCast>(document: &Document, selector: &str, expected: &'static str) -> WebResult<T> {
    let element = document
        .query_selector(selector)?
        .ok_or_else(|| WebError::MissingElement {
            selector: selector.to_string(),
        })?;
    element
        .dyn_into::<T>()
        .map_err(|_| WebError::WrongElementType {
            selector: selector.to_string(),
            expected,
        })
}

/// Resolve an element that may legitimately be absent
pub fn optional<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    let found = document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok());
    if found.is_none() {
        log::debug!("optional element `{selector}` not found");
    }
    found
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

/// Viewport-relative box of an element
pub fn bounds(element: &Element) -> Bounds {
    let rect = element.get_bounding_client_rect();
    Bounds::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Content-box size in CSS pixels
pub fn content_size(element: &HtmlElement) -> (u32, u32) {
    (
        element.client_width().max(0) as u32,
        element.client_height().max(0) as u32,
    )
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

/// Device pixel ratio capped at `max`
pub fn pixel_ratio(window: &Window, max: f64) -> f64 {
    window.device_pixel_ratio().min(max)
}
