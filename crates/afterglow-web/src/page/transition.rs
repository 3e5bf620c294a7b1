use afterglow_core::site::transition::{
    should_intercept, BODY_CLASSES, FADED_CLASS, FADE_OUT_MS, INTERNAL_LINK_SELECTOR,
};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, Window};

use super::{class_array, elements};

/// Fades the body in on the next frame, and fades it out before following
/// internal links.
pub fn install(window: &Window, document: &Document) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no <body>"))?;
    body.class_list().add(&class_array(&BODY_CLASSES))?;

    let fading_in = body.clone();
    let fade_in = Closure::once_into_js(move || {
        let _ = fading_in.class_list().remove_1(FADED_CLASS);
    });
    window.request_animation_frame(fade_in.unchecked_ref())?;

    for link in elements(document.query_selector_all(INTERNAL_LINK_SELECTOR)?) {
        let window = window.clone();
        let body = body.clone();
        let anchor = link.clone();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let href = anchor.get_attribute("href");
            if !should_intercept(href.as_deref()) {
                return;
            }
            let Some(href) = href else {
                return;
            };
            event.prevent_default();
            let _ = body.class_list().add_1(FADED_CLASS);

            let location = window.location();
            let navigate = Closure::once_into_js(move || {
                if location.set_href(&href).is_err() {
                    warn!("navigation to {href} failed");
                }
            });
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    navigate.unchecked_ref(),
                    FADE_OUT_MS,
                )
                .is_err()
            {
                warn!("could not schedule page transition");
            }
        }) as Box<dyn FnMut(Event)>);
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
