//! The grid controller: open/close pipelines over a `GridSurface`.
//!
//! Each state-machine edge is a single `async fn`. State lives in a `Cell`
//! and is never held across an await, so a request that arrives while a
//! pipeline is suspended sees the in-flight phase and is turned away.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use web_time::Instant;

use crate::GridError;
use crate::geometry::{Transform, expand_transform};
use crate::hooks::{GridHooks, NoHooks};
use crate::item::GridItem;
use crate::options::GridOptions;
use crate::platform::{GridSurface, PreviewClass};
use crate::state::GridState;
use crate::throttle::Throttle;

/// Window resize events are throttled to this interval.
pub const RESIZE_THROTTLE: Duration = Duration::from_millis(10);

/// What became of an open or close request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request was accepted and its pipeline ran to the end.
    Completed,
    /// The grid was busy or already in the requested state.
    Ignored,
}

/// Controller for one grid and its preview overlay.
pub struct GridController<S: GridSurface, H: GridHooks = NoHooks> {
    surface: S,
    hooks: H,
    options: GridOptions,
    items: Vec<GridItem>,
    state: Cell<GridState>,
    clone_image: RefCell<Option<S::Image>>,
    original_image: RefCell<Option<S::Image>>,
    resize_gate: RefCell<Throttle>,
}

impl<S: GridSurface, H: GridHooks> GridController<S, H> {
    pub fn new(
        surface: S,
        hooks: H,
        options: GridOptions,
        items: Vec<GridItem>,
    ) -> Result<Self, GridError> {
        options.validate()?;
        if items.is_empty() {
            return Err(GridError::NoItems);
        }
        Ok(Self {
            surface,
            hooks,
            options,
            items,
            state: Cell::new(GridState::default()),
            clone_image: RefCell::new(None),
            original_image: RefCell::new(None),
            resize_gate: RefCell::new(Throttle::new(RESIZE_THROTTLE)),
        })
    }

    pub fn state(&self) -> GridState {
        self.state.get()
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Whether a clone image is currently held.
    pub fn has_clone(&self) -> bool {
        self.clone_image.borrow().is_some()
    }

    /// Whether a full-resolution image is currently held.
    pub fn has_original(&self) -> bool {
        self.original_image.borrow().is_some()
    }

    /// Fire `on_init`. Called by the host once events are wired.
    pub fn init(&self) {
        let accepted = self.hooks.on_init(self.state());
        note_hook("on_init", accepted);
    }

    /// Handle a window resize, throttled on the leading edge.
    ///
    /// Returns true if `on_resize` fired.
    pub fn handle_resize(&self) -> bool {
        self.handle_resize_at(Instant::now())
    }

    pub fn handle_resize_at(&self, now: Instant) -> bool {
        if !self.resize_gate.borrow_mut().ready_at(now) {
            return false;
        }
        let accepted = self.hooks.on_resize(self.state());
        note_hook("on_resize", accepted);
        true
    }

    /// Open item `index` into the preview.
    ///
    /// Returns once the full image is showing, or immediately with
    /// `Ignored` if the grid is animating or already has an item open.
    pub async fn open_item(&self, index: usize) -> Result<RequestOutcome, GridError> {
        let Some(item) = self.items.get(index) else {
            return Err(GridError::ItemOutOfRange {
                index,
                len: self.items.len(),
            });
        };

        let mut state = self.state.get();
        if let Err(refusal) = state.begin_open(index) {
            tracing::debug!(index, ?refusal, "open request ignored");
            return Ok(RequestOutcome::Ignored);
        }
        self.state.set(state);
        tracing::debug!(index, "opening item");

        let thumb = self.surface.thumbnail_rect(index);
        let layout = self.surface.thumbnail_layout(index);
        let transform = expand_transform(
            thumb,
            self.surface.viewport(),
            item.natural_size,
            &self.options,
        );
        // A zero-sized thumbnail gives an infinite scale, which the page
        // would reject without ever ending a transition.
        if !thumb.has_area() || !transform.is_finite() {
            self.abort_open(index);
            return Err(GridError::DegenerateThumbnail {
                index,
                width: thumb.width,
                height: thumb.height,
            });
        }

        let original = match self.surface.create_original(&item.full_src) {
            Ok(image) => image,
            Err(e) => {
                self.abort_open(index);
                return Err(e);
            }
        };
        self.surface.set_opacity(&original, 0.0);
        self.original_image.replace(Some(original.clone()));

        let accepted = self.hooks.on_open_item(self.state(), index);
        note_hook("on_open_item", accepted);

        let clone = match self.surface.create_clone(index, layout) {
            Ok(image) => image,
            Err(e) => {
                self.abort_open(index);
                return Err(e);
            }
        };
        self.clone_image.replace(Some(clone.clone()));

        self.surface.set_item_current(index, true);
        self.surface.set_transform(&clone, &transform);
        self.surface.show_description(index);

        self.surface.next_frame().await;
        self.surface.set_preview_class(PreviewClass::Open, true);
        let accepted = self.hooks.on_expand(self.state());
        note_hook("on_expand", accepted);

        self.surface.transition_end(&clone).await;
        tracing::trace!(index, "clone in place, waiting for full image");

        self.surface.image_ready(&original).await;
        self.surface.set_preview_class(PreviewClass::ImageLoaded, true);
        self.surface.set_opacity(&original, 1.0);

        self.surface.transition_end(&original).await;
        self.surface.set_opacity(&clone, 0.0);

        let mut state = self.state.get();
        state.finish_open();
        self.state.set(state);
        tracing::debug!(index, "item open");

        Ok(RequestOutcome::Completed)
    }

    /// Close the open item, returning the clone to its thumbnail.
    ///
    /// Ignored while animating or when nothing is open.
    pub async fn close_item(&self) -> Result<RequestOutcome, GridError> {
        let mut state = self.state.get();
        let index = match state.begin_close() {
            Ok(index) => index,
            Err(refusal) => {
                tracing::debug!(?refusal, "close request ignored");
                return Ok(RequestOutcome::Ignored);
            }
        };
        self.state.set(state);
        tracing::debug!(index, "closing item");

        self.surface.set_item_current(index, false);
        self.surface.set_preview_class(PreviewClass::Open, false);
        self.surface.set_preview_class(PreviewClass::ImageLoaded, false);

        let accepted = self.hooks.on_close_item(self.state(), index);
        note_hook("on_close_item", accepted);

        if let Some(original) = self.original_image.borrow().as_ref() {
            self.surface.set_opacity(original, 0.0);
        }

        let clone = self.clone_image.borrow().clone();
        if let Some(clone) = clone {
            self.surface.set_opacity(&clone, 1.0);
            self.surface.next_frame().await;
            self.surface.set_transform(&clone, &Transform::IDENTITY);
            self.surface.transition_end(&clone).await;
        }

        self.release_images();
        self.surface.clear_description();

        let mut state = self.state.get();
        state.finish_close();
        self.state.set(state);
        tracing::debug!(index, "item closed");

        Ok(RequestOutcome::Completed)
    }

    fn release_images(&self) {
        if let Some(clone) = self.clone_image.take() {
            self.surface.detach(clone);
        }
        if let Some(original) = self.original_image.take() {
            self.surface.detach(original);
        }
    }

    /// Undo a partially started open after a surface or geometry failure.
    fn abort_open(&self, index: usize) {
        tracing::warn!(index, "open aborted, restoring closed state");
        self.release_images();
        self.surface.set_item_current(index, false);
        self.surface.clear_description();
        self.state.set(GridState::default());
    }
}

fn note_hook(name: &'static str, accepted: bool) {
    if !accepted {
        tracing::debug!(hook = name, "hook returned false, continuing");
    }
}
