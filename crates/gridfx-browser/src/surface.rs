//! `GridSurface` implementation over the real DOM.

use gridfx_core::{
    CURRENT_ITEM_CLASS, GridError, GridSurface, PreviewClass, Rect, Size, Transform,
    TransitionSupport,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement, Window};

use crate::classes::set_class;
use crate::dom::js_error;
use crate::images::{image_ready, next_animation_frame};
use crate::markup::{GridMarkup, ItemMarkup};
use crate::transition::transition_end;

const CLONE_CLASS: &str = "clone";
const ORIGINAL_CLASS: &str = "original";

/// Browser surface for one grid and its preview overlay.
pub struct DomSurface {
    window: Window,
    document: Document,
    markup: GridMarkup,
    support: TransitionSupport,
}

impl DomSurface {
    pub fn new(
        window: Window,
        document: Document,
        markup: GridMarkup,
        support: TransitionSupport,
    ) -> Self {
        Self {
            window,
            document,
            markup,
            support,
        }
    }

    pub fn markup(&self) -> &GridMarkup {
        &self.markup
    }

    fn item(&self, index: usize) -> Option<&ItemMarkup> {
        self.markup.items.get(index)
    }

    fn create_image(&self, class: &str) -> Result<HtmlImageElement, GridError> {
        let image = self
            .document
            .create_element("img")
            .map_err(js_error)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| GridError::Dom("created element is not an image".into()))?;
        image.set_class_name(class);
        Ok(image)
    }

    fn set_style(&self, element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value) {
            tracing::warn!(property, value, "failed to set style: {:?}", e);
        }
    }
}

fn window_dimension(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl GridSurface for DomSurface {
    type Image = HtmlImageElement;

    fn viewport(&self) -> Size {
        Size::new(
            window_dimension(self.window.inner_width()),
            window_dimension(self.window.inner_height()),
        )
    }

    fn thumbnail_rect(&self, index: usize) -> Rect {
        let Some(item) = self.item(index) else {
            return Rect::default();
        };
        let rect = item.thumbnail.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn thumbnail_layout(&self, index: usize) -> Rect {
        let Some(item) = self.item(index) else {
            return Rect::default();
        };
        let thumb = &item.thumbnail;
        Rect::new(
            thumb.offset_left() as f64,
            thumb.offset_top() as f64,
            thumb.offset_width() as f64,
            thumb.offset_height() as f64,
        )
    }

    fn create_clone(&self, index: usize, layout: Rect) -> Result<HtmlImageElement, GridError> {
        let item = self.item(index).ok_or(GridError::ItemOutOfRange {
            index,
            len: self.markup.items.len(),
        })?;
        let clone = self.create_image(CLONE_CLASS)?;
        clone.set_src(&item.thumbnail.src());
        self.set_style(&clone, "left", &format!("{}px", layout.left));
        self.set_style(&clone, "top", &format!("{}px", layout.top));
        self.set_style(&clone, "width", &format!("{}px", layout.width));
        self.set_style(&clone, "height", &format!("{}px", layout.height));
        self.markup.preview.append_child(&clone).map_err(js_error)?;
        // Flush layout so the transform applied next animates from here.
        let _ = clone.offset_width();
        Ok(clone)
    }

    fn create_original(&self, src: &str) -> Result<HtmlImageElement, GridError> {
        let original = self.create_image(ORIGINAL_CLASS)?;
        original.set_src(src);
        self.markup
            .preview
            .append_child(&original)
            .map_err(js_error)?;
        Ok(original)
    }

    fn set_transform(&self, image: &HtmlImageElement, transform: &Transform) {
        let css = transform.to_css();
        self.set_style(image, "-webkit-transform", &css);
        self.set_style(image, "transform", &css);
    }

    fn set_opacity(&self, image: &HtmlImageElement, opacity: f64) {
        self.set_style(image, "opacity", &opacity.to_string());
    }

    fn detach(&self, image: HtmlImageElement) {
        image.remove();
    }

    fn set_item_current(&self, index: usize, current: bool) {
        if let Some(item) = self.item(index) {
            set_class([&item.element], CURRENT_ITEM_CLASS, current);
        }
    }

    fn set_preview_class(&self, class: PreviewClass, on: bool) {
        set_class([&*self.markup.preview], class.as_str(), on);
    }

    fn show_description(&self, index: usize) {
        if let Some(description) = self.item(index).and_then(|i| i.description.as_ref()) {
            self.markup
                .description_slot
                .set_inner_html(&description.inner_html());
        }
    }

    fn clear_description(&self) {
        self.markup.description_slot.set_inner_html("");
    }

    async fn next_frame(&self) {
        next_animation_frame().await;
    }

    async fn transition_end(&self, image: &HtmlImageElement) {
        transition_end(image, &self.support).await;
    }

    async fn image_ready(&self, image: &HtmlImageElement) {
        image_ready(image).await;
    }
}
