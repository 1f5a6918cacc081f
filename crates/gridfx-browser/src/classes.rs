//! CSS class manipulation over one or more elements.
//!
//! Failures from the `DOMTokenList` API only happen for invalid class names,
//! which are compile-time constants here, so they are logged and dropped.

use web_sys::Element;

pub fn add_class<'a>(elements: impl IntoIterator<Item = &'a Element>, class: &str) {
    for element in elements {
        if let Err(e) = element.class_list().add_1(class) {
            tracing::warn!(class, "failed to add class: {:?}", e);
        }
    }
}

pub fn remove_class<'a>(elements: impl IntoIterator<Item = &'a Element>, class: &str) {
    for element in elements {
        if let Err(e) = element.class_list().remove_1(class) {
            tracing::warn!(class, "failed to remove class: {:?}", e);
        }
    }
}

pub fn toggle_class<'a>(elements: impl IntoIterator<Item = &'a Element>, class: &str) {
    for element in elements {
        if let Err(e) = element.class_list().toggle(class) {
            tracing::warn!(class, "failed to toggle class: {:?}", e);
        }
    }
}

/// Add or remove `class` depending on `on`.
pub fn set_class<'a>(elements: impl IntoIterator<Item = &'a Element>, class: &str, on: bool) {
    if on {
        add_class(elements, class);
    } else {
        remove_class(elements, class);
    }
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}
