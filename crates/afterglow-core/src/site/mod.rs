//! Page behaviours that ship with the trail. Only the decisions live here;
//! the DOM wiring is in the web host.

pub mod reveal;
pub mod skills;
pub mod theme;
pub mod tilt;
pub mod transition;
