//! WASM bindings for the gridfx expand/collapse grid.
//!
//! Exposes `GridFx` to JavaScript: build it on a grid element with a plain
//! options object, and it handles clicks, taps, the close control and
//! resizes on its own.

mod grid;
mod hooks;

pub use grid::*;
pub use hooks::*;

use wasm_bindgen::prelude::*;

/// Install the panic hook and route `tracing` output to the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // A host page may already have installed a subscriber.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}
