//! CSS transition support detection and the transition-end watcher.

use futures_channel::oneshot;
use gloo_events::EventListener;
use gridfx_core::TransitionSupport;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// Probe the page once for CSS transition support.
///
/// Checks a scratch element's style object for the unprefixed property first,
/// then the vendor-prefixed ones.
pub fn detect_transition_support(document: &Document) -> TransitionSupport {
    let Ok(div) = document.create_element("div") else {
        return TransitionSupport::unsupported();
    };
    let Some(div) = div.dyn_ref::<web_sys::HtmlElement>() else {
        return TransitionSupport::unsupported();
    };
    let style = div.style();

    for property in TransitionSupport::STYLE_PROPERTIES {
        let present = js_sys::Reflect::has(&style, &JsValue::from_str(property)).unwrap_or(false);
        if present {
            if let Some(support) = TransitionSupport::for_style_property(property) {
                tracing::debug!(property, event = %support.transition_end_event, "transitions supported");
                return support;
            }
        }
    }

    tracing::debug!("no CSS transition support detected");
    TransitionSupport::unsupported()
}

/// Resolve when a transition on `element` itself finishes.
///
/// Events bubbling up from descendants are ignored. The listener is removed
/// as soon as this future completes or is dropped. Resolves immediately when
/// transitions are unsupported.
pub async fn transition_end(element: &Element, support: &TransitionSupport) {
    if !support.supports_transitions {
        return;
    }

    let (tx, rx) = oneshot::channel::<()>();
    let mut tx = Some(tx);
    let target = element.clone();
    let _listener = EventListener::new(
        element,
        support.transition_end_event.clone(),
        move |event| {
            let origin = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            if origin.as_ref() != Some(&target) {
                return;
            }
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        },
    );

    let _ = rx.await;
}

/// Run `callback` once when a transition on `element` finishes.
///
/// Without transition support the callback runs before this returns and no
/// listener is registered.
pub fn on_end_transition(
    element: &Element,
    support: &TransitionSupport,
    callback: impl FnOnce() + 'static,
) {
    if !support.supports_transitions {
        callback();
        return;
    }

    let element = element.clone();
    let support = support.clone();
    wasm_bindgen_futures::spawn_local(async move {
        transition_end(&element, &support).await;
        callback();
    });
}
