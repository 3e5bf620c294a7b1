use afterglow_core::site::reveal::{
    HIDDEN_CLASSES, ROOT_MARGIN, STYLESHEET, TARGET_SELECTOR, THRESHOLD, VISIBLE_CLASS,
};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{class_array, elements};

fn inject_stylesheet(document: &Document) -> Result<(), JsValue> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(STYLESHEET));
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }
    Ok(())
}

/// Hides matching elements and fades each one up the first time it scrolls
/// into view. Elements are observed once.
pub fn install(document: &Document) -> Result<(), JsValue> {
    inject_stylesheet(document)?;

    let on_intersect = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let _ = target.class_list().add_1(VISIBLE_CLASS);
                observer.unobserve(&target);
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    on_intersect.forget();

    let hidden = class_array(&HIDDEN_CLASSES);
    for element in elements(document.query_selector_all(TARGET_SELECTOR)?) {
        element.class_list().add(&hidden)?;
        observer.observe(&element);
    }
    Ok(())
}
