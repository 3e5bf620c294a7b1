use std::rc::Rc;

use afterglow_core::site::theme::{
    Theme, DARK_CLASS, DARK_SCHEME_QUERY, ICON_SELECTOR, STORAGE_KEY, TOGGLE_SELECTOR,
};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use super::elements;

fn apply(root: &Element, theme: Theme) -> Result<(), JsValue> {
    root.class_list()
        .toggle_with_force(DARK_CLASS, theme.is_dark())
        .map(|_| ())
}

fn update_icons(toggles: &[Element], theme: Theme) {
    for toggle in toggles {
        if let Ok(Some(icon)) = toggle.query_selector(ICON_SELECTOR) {
            icon.set_text_content(Some(theme.toggle_icon()));
        }
    }
}

/// Applies the saved or system theme and wires every toggle button.
pub fn install(window: &Window, document: &Document) -> Result<(), JsValue> {
    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("document has no root element"))?;
    let storage = window.local_storage().ok().flatten();
    let stored = storage
        .as_ref()
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
    let system_dark = window
        .match_media(DARK_SCHEME_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false);

    let theme = Theme::resolve(stored.as_deref(), system_dark);
    apply(&root, theme)?;
    debug!("initial theme {}", theme.as_str());

    let toggles = Rc::new(elements(document.query_selector_all(TOGGLE_SELECTOR)?));
    update_icons(&toggles, theme);

    for toggle in toggles.iter() {
        let root = root.clone();
        let storage = storage.clone();
        let all = Rc::clone(&toggles);
        let on_click = Closure::wrap(Box::new(move || {
            let current = if root.class_list().contains(DARK_CLASS) {
                Theme::Dark
            } else {
                Theme::Light
            };
            let next = current.toggled();
            if let Err(err) = apply(&root, next) {
                warn!("failed to switch theme: {err:?}");
                return;
            }
            if let Some(storage) = &storage {
                if storage.set_item(STORAGE_KEY, next.as_str()).is_err() {
                    warn!("could not persist theme preference");
                }
            }
            update_icons(&all, next);
        }) as Box<dyn FnMut()>);
        toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
