//! Afterglow core engine: platform-agnostic cursor trail logic.
//!
//! Pointer moves go through the [`Emitter`], land in the [`ParticleStore`],
//! and are advanced, culled and handed to a [`Canvas`] by [`TrailEngine::tick`].

pub mod config;
pub mod emitter;
pub mod engine;
pub mod particle;
pub mod render;
pub mod site;
pub mod store;

pub use config::{ConfigError, Decay, RadiusRange, TrailConfig};
pub use emitter::{Emitter, SpawnRequest};
pub use engine::{FrameStats, TrailEngine};
pub use particle::{ColorToken, Particle, Rgba, Viewport};
pub use render::{Canvas, CircleMark, Renderer};
pub use store::ParticleStore;

pub use glam::Vec2;
