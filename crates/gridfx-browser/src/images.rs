//! Image readiness and animation-frame futures.

use std::cell::RefCell;
use std::rc::Rc;

use futures_channel::oneshot;
use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

/// Resolve once `image` has finished loading.
///
/// Images that are already complete (cached, or broken) resolve at once; an
/// `error` event counts as ready, so a missing file cannot stall the caller.
pub async fn image_ready(image: &HtmlImageElement) {
    if image.complete() {
        return;
    }

    let (tx, rx) = oneshot::channel::<()>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let resolve = |tx: Rc<RefCell<Option<oneshot::Sender<()>>>>| {
        move |_: &web_sys::Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(());
            }
        }
    };
    let _on_load = EventListener::once(image, "load", resolve(tx.clone()));
    let _on_error = EventListener::once(image, "error", resolve(tx));

    let _ = rx.await;
    tracing::trace!(src = %image.src(), width = image.natural_width(), "image ready");
}

/// Resolve on the next animation frame.
///
/// Falls back to resolving immediately if there is no window.
pub async fn next_animation_frame() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let (tx, rx) = oneshot::channel::<()>();
    let closure = Closure::once(move || {
        let _ = tx.send(());
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        tracing::warn!("requestAnimationFrame failed: {:?}", e);
        return;
    }

    let _ = rx.await;
    // Keep the closure alive until the frame has fired.
    drop(closure);
}
