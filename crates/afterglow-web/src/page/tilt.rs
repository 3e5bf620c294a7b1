use afterglow_core::site::tilt::{CardTilt, CARD_SELECTOR};
use afterglow_core::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, Node};

fn card_under(target: Option<EventTarget>) -> Option<HtmlElement> {
    target?
        .dyn_into::<Element>()
        .ok()?
        .closest(CARD_SELECTOR)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn apply(card: &HtmlElement, tilt: &CardTilt) {
    let style = card.style();
    for (property, value) in tilt.properties() {
        let _ = style.set_property(property, value);
    }
}

/// Delegated listeners on the document, so cards added later tilt too.
pub fn install(document: &Document) -> Result<(), JsValue> {
    let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(card) = card_under(event.target()) else {
            return;
        };
        let rect = card.get_bounding_client_rect();
        let local = Vec2::new(
            (event.client_x() as f64 - rect.left()) as f32,
            (event.client_y() as f64 - rect.top()) as f32,
        );
        let size = Vec2::new(rect.width() as f32, rect.height() as f32);
        apply(&card, &CardTilt::from_pointer(local, size));
    }) as Box<dyn FnMut(MouseEvent)>);
    document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    let on_out = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(card) = card_under(event.target()) else {
            return;
        };
        let related = event
            .related_target()
            .and_then(|target| target.dyn_into::<Node>().ok());
        // Moving between a card's children is not leaving the card.
        if !card.contains(related.as_ref()) {
            apply(&card, &CardTilt::reset());
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    document.add_event_listener_with_callback("mouseout", on_out.as_ref().unchecked_ref())?;
    on_out.forget();
    Ok(())
}
