//! Platform abstraction traits so `afterglow-core` stays host-agnostic.

use std::cell::Cell;
use std::rc::Rc;

use afterglow_core::{Canvas, ConfigError, Vec2, Viewport};
use thiserror::Error;

mod capabilities;
mod raster;
mod session;

pub use capabilities::{is_mobile_user_agent, PointerKind};
pub use raster::PixelCanvas;
pub use session::TrailSession;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("drawing surface unavailable: {0}")]
    Surface(String),
    #[error("input source failed: {0}")]
    Input(String),
    #[error("frame scheduling failed: {0}")]
    Scheduler(String),
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl PlatformError {
    pub fn backend<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        PlatformError::Backend(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in surface coordinates.
    PointerMoved(Vec2),
    Resized(Viewport),
}

pub type EventSink = Rc<dyn Fn(InputEvent)>;
pub type FrameStep = Box<dyn FnMut()>;

/// Cancels a scheduled frame loop. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct FrameHandle {
    stopped: Rc<Cell<bool>>,
}

impl FrameHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Full-viewport, input-transparent drawing surface above all other content.
pub trait OverlaySurface {
    fn viewport(&self) -> Viewport;
    fn resize(&mut self, viewport: Viewport) -> Result<()>;
    fn canvas(&mut self) -> &mut dyn Canvas;
    /// Pushes the finished frame to the screen, for backends that need it.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
    /// Takes the surface off screen when the trail stops.
    fn detach(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Source of pointer-move and resize events.
pub trait InputSource {
    fn start(&mut self, sink: EventSink) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Runs a step once per display refresh until its handle is stopped.
pub trait FrameScheduler {
    fn schedule(&mut self, step: FrameStep) -> Result<FrameHandle>;
}

/// Everything a host environment provides to run the trail.
pub trait TrailHost {
    type Surface: OverlaySurface + 'static;
    type Input: InputSource;
    type Scheduler: FrameScheduler;

    fn pointer_kind(&self) -> PointerKind;
    /// Seed for particle randomness.
    fn seed(&self) -> u64;
    fn create_surface(&mut self) -> Result<Self::Surface>;
    fn input(&mut self) -> &mut Self::Input;
    fn scheduler(&mut self) -> &mut Self::Scheduler;
}
