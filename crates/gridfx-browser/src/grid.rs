//! `BrowserGrid`: a grid controller bound to the page.
//!
//! Owns the controller and every DOM listener it needs. Dropping the grid
//! removes the listeners; pipelines already in flight finish on their own.

use std::cell::Cell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gridfx_core::{
    GridController, GridError, GridHooks, GridOptions, GridOptionsPatch, GridState,
};
use web_sys::{Document, HtmlElement};

use crate::markup::GridMarkup;
use crate::surface::DomSurface;
use crate::transition::detect_transition_support;

pub type DomController<H> = GridController<DomSurface, H>;

/// How an item is activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// A `click` on the item opens it.
    Click,
    /// A touchstart followed by touchend, with no touchmove between, opens it.
    Touch,
}

impl InputMode {
    /// `Touch` on documents that expose `ontouchstart`, `Click` elsewhere.
    pub fn detect(document: &Document) -> Self {
        if js_sys::Reflect::has(document, &"ontouchstart".into()).unwrap_or(false) {
            InputMode::Touch
        } else {
            InputMode::Click
        }
    }
}

pub struct BrowserGrid<H: GridHooks + 'static> {
    controller: Rc<DomController<H>>,
    _listeners: Vec<EventListener>,
}

impl<H: GridHooks + 'static> BrowserGrid<H> {
    /// Build a grid on `root`, wire its events, and fire `on_init`.
    ///
    /// Fails if the markup is incomplete or the options are out of range.
    pub fn new(root: &HtmlElement, patch: &GridOptionsPatch, hooks: H) -> Result<Self, GridError> {
        let document = root
            .owner_document()
            .ok_or(GridError::Dom("no document".into()))?;
        Self::with_input_mode(root, patch, hooks, InputMode::detect(&document))
    }

    /// Like [`BrowserGrid::new`], with the item activation mode given
    /// instead of detected.
    pub fn with_input_mode(
        root: &HtmlElement,
        patch: &GridOptionsPatch,
        hooks: H,
        input: InputMode,
    ) -> Result<Self, GridError> {
        let window = web_sys::window().ok_or(GridError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or(GridError::Dom("no document".into()))?;

        let options = GridOptions::from_patch(patch)?;
        let markup = GridMarkup::parse(root)?;
        let items = markup.grid_items();
        let support = detect_transition_support(&document);

        let surface = DomSurface::new(window.clone(), document, markup, support);
        let controller = Rc::new(GridController::new(surface, hooks, options, items)?);

        let mut listeners = Vec::new();
        for (index, item) in controller.surface().markup().items.iter().enumerate() {
            match input {
                InputMode::Touch => {
                    listeners.extend(tap_listeners(&controller, &item.element, index))
                }
                InputMode::Click => {
                    listeners.push(click_listener(&controller, &item.element, index))
                }
            }
        }

        let close_control = controller.surface().markup().close_control.clone();
        let ctl = controller.clone();
        listeners.push(EventListener::new(&close_control, "click", move |_| {
            spawn_close(&ctl);
        }));

        let ctl = controller.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            ctl.handle_resize();
        }));

        tracing::debug!(?input, "grid events wired");
        controller.init();

        Ok(Self {
            controller,
            _listeners: listeners,
        })
    }

    pub fn controller(&self) -> &DomController<H> {
        &self.controller
    }

    pub fn state(&self) -> GridState {
        self.controller.state()
    }

    pub fn item_count(&self) -> usize {
        self.controller.items().len()
    }

    /// Request that item `index` opens. Returns immediately.
    pub fn open_item(&self, index: usize) -> Result<(), GridError> {
        if index >= self.item_count() {
            return Err(GridError::ItemOutOfRange {
                index,
                len: self.item_count(),
            });
        }
        spawn_open(&self.controller, index);
        Ok(())
    }

    /// Request that the open item closes. Returns immediately.
    pub fn close_item(&self) {
        spawn_close(&self.controller);
    }
}

fn spawn_open<H: GridHooks + 'static>(controller: &Rc<DomController<H>>, index: usize) {
    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = controller.open_item(index).await {
            tracing::warn!(index, "open failed: {}", e);
        }
    });
}

fn spawn_close<H: GridHooks + 'static>(controller: &Rc<DomController<H>>) {
    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = controller.close_item().await {
            tracing::warn!("close failed: {}", e);
        }
    });
}

fn click_listener<H: GridHooks + 'static>(
    controller: &Rc<DomController<H>>,
    element: &web_sys::Element,
    index: usize,
) -> EventListener {
    let controller = controller.clone();
    EventListener::new_with_options(
        element,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            spawn_open(&controller, index);
        },
    )
}

/// A tap is a touchstart followed by touchend with no touchmove between.
fn tap_listeners<H: GridHooks + 'static>(
    controller: &Rc<DomController<H>>,
    element: &web_sys::Element,
    index: usize,
) -> [EventListener; 3] {
    let armed = Rc::new(Cell::new(false));

    let on_start = {
        let armed = armed.clone();
        EventListener::new(element, "touchstart", move |_| armed.set(true))
    };
    let on_move = {
        let armed = armed.clone();
        EventListener::new(element, "touchmove", move |_| armed.set(false))
    };
    let on_end = {
        let controller = controller.clone();
        EventListener::new_with_options(
            element,
            "touchend",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if armed.replace(false) {
                    event.prevent_default();
                    spawn_open(&controller, index);
                }
            },
        )
    };

    [on_start, on_move, on_end]
}
