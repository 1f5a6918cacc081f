//! Platform abstraction for the grid controller.
//!
//! The controller never touches the DOM directly. Everything it needs from
//! the page (measuring thumbnails, creating the clone, toggling classes,
//! waiting on transitions and image loads) goes through `GridSurface`, so the
//! same pipeline runs against the browser or a scripted test double.

use crate::GridError;
use crate::geometry::{Rect, Size, Transform};

/// CSS transition capability, resolved once at startup and passed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionSupport {
    pub supports_transitions: bool,
    /// Name of the event fired when a transition finishes.
    pub transition_end_event: String,
}

impl TransitionSupport {
    pub fn unsupported() -> Self {
        Self {
            supports_transitions: false,
            transition_end_event: String::new(),
        }
    }

    /// Support keyed by the style property that was found on the page.
    ///
    /// Probe order matters: the unprefixed property wins over vendor ones.
    pub fn for_style_property(property: &str) -> Option<Self> {
        let event = match property {
            "transition" => "transitionend",
            "WebkitTransition" => "webkitTransitionEnd",
            "MozTransition" => "transitionend",
            "OTransition" => "oTransitionEnd",
            "msTransition" => "MSTransitionEnd",
            _ => return None,
        };
        Some(Self {
            supports_transitions: true,
            transition_end_event: event.to_string(),
        })
    }

    /// Style properties checked for transition support, in preference order.
    pub const STYLE_PROPERTIES: [&'static str; 5] = [
        "transition",
        "WebkitTransition",
        "MozTransition",
        "OTransition",
        "msTransition",
    ];
}

impl Default for TransitionSupport {
    fn default() -> Self {
        Self {
            supports_transitions: true,
            transition_end_event: "transitionend".to_string(),
        }
    }
}

/// State classes the controller toggles on the preview overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreviewClass {
    Open,
    ImageLoaded,
}

impl PreviewClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewClass::Open => "preview--open",
            PreviewClass::ImageLoaded => "preview--image-loaded",
        }
    }
}

/// Class marking the grid item whose image is in the preview.
pub const CURRENT_ITEM_CLASS: &str = "grid__item--current";

/// Page-side operations the grid controller drives.
///
/// Mutators are infallible: an implementation that hits a platform error
/// logs it and carries on, the same way a failed class toggle would simply
/// leave the page unstyled. Only element creation can fail.
#[allow(async_fn_in_trait)]
pub trait GridSurface {
    /// Handle to an image element owned by the controller.
    type Image: Clone;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// On-screen box of the item's thumbnail, in viewport coordinates.
    fn thumbnail_rect(&self, index: usize) -> Rect;

    /// Layout box of the item's thumbnail, used to place the clone.
    fn thumbnail_layout(&self, index: usize) -> Rect;

    /// Create the clone of the item's thumbnail at `layout` inside the preview.
    fn create_clone(&self, index: usize, layout: Rect) -> Result<Self::Image, GridError>;

    /// Create the full-resolution image in the preview and start loading it.
    fn create_original(&self, src: &str) -> Result<Self::Image, GridError>;

    fn set_transform(&self, image: &Self::Image, transform: &Transform);

    fn set_opacity(&self, image: &Self::Image, opacity: f64);

    /// Remove the image from the page.
    fn detach(&self, image: Self::Image);

    fn set_item_current(&self, index: usize, current: bool);

    fn set_preview_class(&self, class: PreviewClass, on: bool);

    /// Copy the item's description, if it has one, into the preview.
    fn show_description(&self, index: usize);

    fn clear_description(&self);

    /// Resolves on the next animation frame.
    async fn next_frame(&self);

    /// Resolves when a transition on `image` itself finishes.
    async fn transition_end(&self, image: &Self::Image);

    /// Resolves once `image` has loaded or failed to load.
    async fn image_ready(&self, image: &Self::Image);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_for_prefixes() {
        let cases = [
            ("transition", "transitionend"),
            ("WebkitTransition", "webkitTransitionEnd"),
            ("MozTransition", "transitionend"),
            ("OTransition", "oTransitionEnd"),
            ("msTransition", "MSTransitionEnd"),
        ];
        for (property, event) in cases {
            let support = TransitionSupport::for_style_property(property).unwrap();
            assert!(support.supports_transitions);
            assert_eq!(support.transition_end_event, event);
        }
        assert_eq!(TransitionSupport::for_style_property("animation"), None);
    }

    #[test]
    fn test_style_properties_cover_every_known_property() {
        for property in TransitionSupport::STYLE_PROPERTIES {
            assert!(TransitionSupport::for_style_property(property).is_some());
        }
    }
}
