//! Browser host: the cursor trail on a `<canvas>` overlay plus the page
//! behaviours that ship with it.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;

use afterglow_core::TrailConfig;
use afterglow_platform::TrailSession;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

mod canvas;
mod host;
mod logging;
pub mod page;

pub use canvas::Canvas2d;
pub use host::{AnimationFrames, CanvasSurface, DomInput, WebHost};

/// Id of an optional `<script type="application/json">` holding trail config.
pub const CONFIG_ELEMENT_ID: &str = "afterglow-config";

thread_local! {
    static RUNNING: RefCell<Option<(WebHost, TrailSession)>> = const { RefCell::new(None) };
}

fn page_config(document: &Document) -> TrailConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return TrailConfig::default();
    };
    TrailConfig::from_json_str(&json).unwrap_or_else(|err| {
        warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
        TrailConfig::default()
    })
}

fn start_trail(window: &Window, document: &Document) {
    let mut host = WebHost::new(window.clone(), document.clone());
    match TrailSession::start(&mut host, page_config(document)) {
        Ok(Some(session)) => RUNNING.with(|running| *running.borrow_mut() = Some((host, session))),
        Ok(None) => {}
        Err(err) => warn!("cursor trail failed to start: {err}"),
    }
}

fn install_page(window: &Window, document: &Document) {
    start_trail(window, document);
    let results = [
        ("theme", page::theme::install(window, document)),
        ("reveal", page::reveal::install(document)),
        ("transition", page::transition::install(window, document)),
        ("skills", page::skills::install(document)),
        ("tilt", page::tilt::install(document)),
    ];
    for (name, result) in results {
        if let Err(err) = result {
            warn!("{name} behaviour not installed: {err:?}");
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();
    info!("afterglow-web starting");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let (w, d) = (window.clone(), document.clone());
        let on_ready = Closure::once_into_js(move || install_page(&w, &d));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        install_page(&window, &document);
    }
    Ok(())
}

/// Removes the trail's listeners, stops its frame loop and takes the canvas
/// off the page.
#[wasm_bindgen]
pub fn stop_trail() {
    let Some((mut host, session)) = RUNNING.with(|running| running.borrow_mut().take()) else {
        return;
    };
    if let Err(err) = session.shutdown(&mut host) {
        warn!("cursor trail shutdown failed: {err}");
    }
}
