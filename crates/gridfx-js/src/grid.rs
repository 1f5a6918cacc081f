//! GridFx - the grid wrapper for JavaScript.

use gridfx_browser::BrowserGrid;
use gridfx_browser::dom::query_all;
use gridfx_browser::markup::ITEM_SELECTOR;
use gridfx_core::GridOptionsPatch;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::hooks::JsHooks;

/// An expand/collapse image grid bound to a page element.
#[wasm_bindgen]
pub struct GridFx {
    inner: BrowserGrid<JsHooks>,
}

#[wasm_bindgen]
impl GridFx {
    /// Build a grid on `root`.
    ///
    /// Throws if the markup is incomplete or the options are invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, options: JsValue) -> Result<GridFx, JsError> {
        let patch: GridOptionsPatch = if options.is_undefined() || options.is_null() {
            GridOptionsPatch::default()
        } else {
            serde_wasm_bindgen::from_value(options.clone())
                .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
        };

        let items = query_all(&root, ITEM_SELECTOR).map_err(|e| JsError::new(&e.to_string()))?;
        let hooks = JsHooks::from_options(&options, items);

        let inner =
            BrowserGrid::new(&root, &patch, hooks).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Open the item at `index`. Ignored while another item is open or animating.
    #[wasm_bindgen(js_name = openItem)]
    pub fn open_item(&self, index: usize) -> Result<(), JsError> {
        self.inner
            .open_item(index)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Close the open item. Ignored while animating.
    #[wasm_bindgen(js_name = closeItem)]
    pub fn close_item(&self) {
        self.inner.close_item();
    }

    #[wasm_bindgen(getter)]
    pub fn current(&self) -> Option<usize> {
        self.inner.state().current()
    }

    #[wasm_bindgen(getter = isExpanded)]
    pub fn is_expanded(&self) -> bool {
        self.inner.state().is_expanded()
    }

    #[wasm_bindgen(getter = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.inner.state().is_animating()
    }

    #[wasm_bindgen(getter = itemCount)]
    pub fn item_count(&self) -> usize {
        self.inner.item_count()
    }
}
