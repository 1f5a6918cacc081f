//! gridfx-core: host-agnostic logic for the expand/collapse image grid.
//!
//! This crate provides:
//! - `GridOptions` and the defaults-plus-overrides merge
//! - `expand_transform` - translate + scale geometry for the enlarged image
//! - `GridState` - the Closed/Opening/Open/Closing state machine
//! - `Throttle` - leading-edge throttling for resize events
//! - `GridController<S>` - open/close pipelines, generic over a `GridSurface`

pub mod controller;
pub mod error;
pub mod geometry;
pub mod hooks;
pub mod item;
pub mod options;
pub mod platform;
pub mod state;
pub mod throttle;

pub use controller::{GridController, RESIZE_THROTTLE, RequestOutcome};
pub use error::GridError;
pub use geometry::{Rect, Size, Transform, expand_transform};
pub use hooks::{GridHooks, NoHooks};
pub use item::GridItem;
pub use options::{GridOptions, GridOptionsPatch, ImagePosition};
pub use platform::{CURRENT_ITEM_CLASS, GridSurface, PreviewClass, TransitionSupport};
pub use state::{GridState, Phase, Refusal};
pub use throttle::{Throttle, throttle};
