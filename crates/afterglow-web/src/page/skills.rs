use std::cell::Cell;
use std::rc::Rc;

use afterglow_core::site::skills::{
    render_level_view, SkillCard, ACTIVE_TAB_CLASSES, CARD_SELECTOR, DOMAIN_VIEW_ID, HIDDEN_CLASS,
    INACTIVE_TAB_CLASSES, LEVEL_TAG_SELECTOR, LEVEL_VIEW_ID, NAME_SELECTOR, TAB_DOMAIN_ID,
    TAB_LEVEL_ID,
};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::{class_array, elements};

struct SkillTabs {
    tab_domain: Element,
    tab_level: Element,
    domain_view: Element,
    level_view: Element,
    populated: Cell<bool>,
}

impl SkillTabs {
    fn find(document: &Document) -> Option<Self> {
        Some(Self {
            tab_domain: document.get_element_by_id(TAB_DOMAIN_ID)?,
            tab_level: document.get_element_by_id(TAB_LEVEL_ID)?,
            domain_view: document.get_element_by_id(DOMAIN_VIEW_ID)?,
            level_view: document.get_element_by_id(LEVEL_VIEW_ID)?,
            populated: Cell::new(false),
        })
    }

    fn activate(active: &Element, inactive: &Element) -> Result<(), JsValue> {
        let on = class_array(&ACTIVE_TAB_CLASSES);
        let off = class_array(&INACTIVE_TAB_CLASSES);
        active.class_list().add(&on)?;
        active.class_list().remove(&off)?;
        inactive.class_list().remove(&on)?;
        inactive.class_list().add(&off)
    }

    fn cards(&self) -> Result<Vec<SkillCard>, JsValue> {
        let cards = elements(self.domain_view.query_selector_all(CARD_SELECTOR)?)
            .into_iter()
            .filter_map(|card| {
                let name = card.query_selector(NAME_SELECTOR).ok().flatten()?;
                let level = card.query_selector(LEVEL_TAG_SELECTOR).ok().flatten()?;
                Some(SkillCard::new(
                    &name.text_content().unwrap_or_default(),
                    &level.text_content().unwrap_or_default(),
                    card.inner_html(),
                ))
            })
            .collect();
        Ok(cards)
    }

    /// Builds the level view from the domain cards. An empty result shows the
    /// placeholder and is retried on the next switch.
    fn populate(&self) -> Result<(), JsValue> {
        let cards = self.cards()?;
        self.level_view.set_inner_html(&render_level_view(&cards));
        if !cards.is_empty() {
            self.populated.set(true);
            debug!("level view built from {} skill cards", cards.len());
        }
        Ok(())
    }

    fn show_domain(&self) -> Result<(), JsValue> {
        Self::activate(&self.tab_domain, &self.tab_level)?;
        self.domain_view.class_list().remove_1(HIDDEN_CLASS)?;
        self.level_view.class_list().add_1(HIDDEN_CLASS)
    }

    fn show_level(&self) -> Result<(), JsValue> {
        if !self.populated.get() {
            self.populate()?;
        }
        Self::activate(&self.tab_level, &self.tab_domain)?;
        self.domain_view.class_list().add_1(HIDDEN_CLASS)?;
        self.level_view.class_list().remove_1(HIDDEN_CLASS)
    }
}

/// Wires the domain/level tabs. Pages without them are left alone.
pub fn install(document: &Document) -> Result<(), JsValue> {
    let Some(tabs) = SkillTabs::find(document) else {
        return Ok(());
    };
    let tabs = Rc::new(tabs);

    let domain = Rc::clone(&tabs);
    let on_domain = Closure::wrap(Box::new(move || {
        if let Err(err) = domain.show_domain() {
            warn!("failed to show domain view: {err:?}");
        }
    }) as Box<dyn FnMut()>);
    tabs.tab_domain
        .add_event_listener_with_callback("click", on_domain.as_ref().unchecked_ref())?;
    on_domain.forget();

    let level = Rc::clone(&tabs);
    let on_level = Closure::wrap(Box::new(move || {
        if let Err(err) = level.show_level() {
            warn!("failed to show level view: {err:?}");
        }
    }) as Box<dyn FnMut()>);
    tabs.tab_level
        .add_event_listener_with_callback("click", on_level.as_ref().unchecked_ref())?;
    on_level.forget();
    Ok(())
}
