//! Browser DOM layer for the gridfx expand/collapse grid.
//!
//! This crate wires `gridfx-core`'s controller to a real page. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `classes`: add/remove/toggle/has a CSS class on one or more elements
//! - `dom`: sibling lookup and small query helpers
//! - `transition`: transition capability detection and the transition-end watcher
//! - `images`: image-ready detection (loaded, cached, or broken)
//! - `markup`: reading and validating the grid's markup contract
//! - `surface`: `DomSurface`, the `GridSurface` implementation
//! - `grid`: `BrowserGrid`, which owns the controller and its DOM listeners
//!
//! # Re-exports
//!
//! This crate re-exports `gridfx-core` for convenience, so consumers only
//! need to depend on `gridfx-browser`.

// Re-export core crate
pub use gridfx_core;
pub use gridfx_core::*;

pub mod classes;
pub mod dom;
pub mod grid;
pub mod images;
pub mod markup;
pub mod surface;
pub mod transition;

pub use grid::{BrowserGrid, InputMode};
pub use markup::GridMarkup;
pub use surface::DomSurface;
pub use transition::{detect_transition_support, on_end_transition, transition_end};
