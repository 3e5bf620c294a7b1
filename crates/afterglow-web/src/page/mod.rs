//! DOM wiring for the page behaviours that ship alongside the trail.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, NodeList};

pub mod reveal;
pub mod skills;
pub mod theme;
pub mod tilt;
pub mod transition;

pub(crate) fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn class_array(classes: &[&str]) -> Array {
    classes.iter().map(|class| JsValue::from_str(class)).collect()
}
