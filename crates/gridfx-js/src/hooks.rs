//! Lifecycle hooks backed by JavaScript functions.

use gridfx_core::{GridHooks, GridState, Phase};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// State snapshot handed to JS hooks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsGridState {
    pub phase: &'static str,
    pub current: Option<usize>,
    pub is_expanded: bool,
    pub is_animating: bool,
}

impl From<GridState> for JsGridState {
    fn from(state: GridState) -> Self {
        let phase = match state.phase() {
            Phase::Closed => "closed",
            Phase::Opening => "opening",
            Phase::Open => "open",
            Phase::Closing => "closing",
        };
        Self {
            phase,
            current: state.current(),
            is_expanded: state.is_expanded(),
            is_animating: state.is_animating(),
        }
    }
}

/// Hooks read from the `onInit`, `onResize`, `onOpenItem`, `onCloseItem`
/// and `onExpand` keys of the options object.
///
/// Each hook is called with a [`JsGridState`] snapshot taken at the moment
/// it fires, not with a handle to the `GridFx` instance, so a hook can read
/// the state but cannot call `openItem`/`closeItem` through its arguments.
/// `onInit` fires while the `GridFx` constructor is still running, before
/// the instance exists on the JS side; code that needs the instance should
/// use the constructor's return value instead.
#[derive(Default)]
pub struct JsHooks {
    on_init: Option<js_sys::Function>,
    on_resize: Option<js_sys::Function>,
    on_open_item: Option<js_sys::Function>,
    on_close_item: Option<js_sys::Function>,
    on_expand: Option<js_sys::Function>,
    items: Vec<Element>,
}

impl JsHooks {
    /// Pick the hook functions out of `options`; anything else is ignored.
    pub fn from_options(options: &JsValue, items: Vec<Element>) -> Self {
        Self {
            on_init: function_at(options, "onInit"),
            on_resize: function_at(options, "onResize"),
            on_open_item: function_at(options, "onOpenItem"),
            on_close_item: function_at(options, "onCloseItem"),
            on_expand: function_at(options, "onExpand"),
            items,
        }
    }

    fn call(
        &self,
        name: &str,
        hook: Option<&js_sys::Function>,
        state: GridState,
        item: Option<usize>,
    ) -> bool {
        let Some(hook) = hook else {
            return true;
        };
        let state = match serde_wasm_bindgen::to_value(&JsGridState::from(state)) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(hook = name, "failed to serialize grid state: {}", e);
                JsValue::UNDEFINED
            }
        };
        let item = item
            .and_then(|i| self.items.get(i))
            .map(|e| JsValue::from(e.clone()))
            .unwrap_or(JsValue::UNDEFINED);

        match hook.call2(&JsValue::NULL, &state, &item) {
            Ok(result) => result.as_bool().unwrap_or(true),
            Err(e) => {
                tracing::warn!(hook = name, "hook threw: {:?}", e);
                true
            }
        }
    }
}

fn function_at(options: &JsValue, key: &str) -> Option<js_sys::Function> {
    if !options.is_object() {
        return None;
    }
    js_sys::Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

impl GridHooks for JsHooks {
    fn on_init(&self, state: GridState) -> bool {
        self.call("onInit", self.on_init.as_ref(), state, None)
    }

    fn on_resize(&self, state: GridState) -> bool {
        self.call("onResize", self.on_resize.as_ref(), state, None)
    }

    fn on_open_item(&self, state: GridState, index: usize) -> bool {
        self.call("onOpenItem", self.on_open_item.as_ref(), state, Some(index))
    }

    fn on_close_item(&self, state: GridState, index: usize) -> bool {
        self.call("onCloseItem", self.on_close_item.as_ref(), state, Some(index))
    }

    fn on_expand(&self, state: GridState) -> bool {
        self.call("onExpand", self.on_expand.as_ref(), state, None)
    }
}
