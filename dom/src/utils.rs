//! Helper functions for accessing DOM environment
use crate::result::Result;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

/// Return the current browser [`web_sys::Window`] element
pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| "Unable to access window".into())
}

/// Return the current browser [`web_sys::Document`] element
pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| "Unable to access document".into())
}

fn first_by_tag(tag: &str) -> Result<Element> {
    document()?
        .get_elements_by_tag_name(tag)
        .item(0)
        .ok_or_else(|| format!("Unable to locate {tag} element").into())
}

/// Return the `head` element of the current document
pub fn head() -> Result<Element> {
    first_by_tag("head")
}

/// Return the `body` element of the current document
pub fn body() -> Result<Element> {
    first_by_tag("body")
}

/// Check whether `name` is defined (not `undefined`) in the global scope.
pub fn is_global_defined(name: &str) -> bool {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map(|value| !value.is_undefined())
        .unwrap_or(false)
}
