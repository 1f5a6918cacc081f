//! Small DOM traversal helpers.

use gridfx_core::GridError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Node};

/// Nearest following sibling that is an element, skipping text and comments.
pub fn next_element_sibling(node: &Node) -> Option<Element> {
    let mut sibling = node.next_sibling();
    while let Some(candidate) = sibling {
        if candidate.node_type() == Node::ELEMENT_NODE {
            return candidate.dyn_into::<Element>().ok();
        }
        sibling = candidate.next_sibling();
    }
    None
}

/// All descendants of `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, GridError> {
    let list = root.query_selector_all(selector).map_err(js_error)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// First descendant of `root` matching `selector`, if any.
pub fn query(root: &Element, selector: &str) -> Result<Option<Element>, GridError> {
    root.query_selector(selector).map_err(js_error)
}

/// Convert a thrown JS value into a `GridError`.
pub fn js_error(value: JsValue) -> GridError {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    GridError::Dom(message)
}
