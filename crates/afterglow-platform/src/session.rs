use std::cell::RefCell;
use std::rc::Rc;

use afterglow_core::{TrailConfig, TrailEngine};
use tracing::{info, warn};

use crate::{
    EventSink, FrameHandle, FrameScheduler, InputEvent, InputSource, OverlaySurface, Result,
    TrailHost,
};

/// A running trail: one engine and one surface, driven by the host's input
/// and frame scheduler until `shutdown`.
pub struct TrailSession {
    engine: Rc<RefCell<TrailEngine>>,
    surface: Rc<RefCell<dyn OverlaySurface>>,
    frames: FrameHandle,
}

impl TrailSession {
    /// Starts the trail on `host`. Returns `Ok(None)` when the host has no
    /// fine pointer or cannot provide a drawing surface; in both cases no
    /// listener is attached.
    pub fn start<H: TrailHost>(host: &mut H, config: TrailConfig) -> Result<Option<Self>> {
        let engine = TrailEngine::new(config, host.seed())?;

        let pointer = host.pointer_kind();
        if !pointer.supports_trail() {
            info!("pointer kind {pointer:?}; cursor trail disabled");
            return Ok(None);
        }

        let surface = match host.create_surface() {
            Ok(surface) => surface,
            Err(err) => {
                warn!("cursor trail disabled, no surface: {err}");
                return Ok(None);
            }
        };

        let engine = Rc::new(RefCell::new(engine));
        let viewport = surface.viewport();
        engine.borrow_mut().resize(viewport);
        let surface = Rc::new(RefCell::new(surface));

        let sink: EventSink = {
            let engine = Rc::clone(&engine);
            let surface = Rc::clone(&surface);
            Rc::new(move |event: InputEvent| match event {
                // Moves delivered re-entrantly during a frame step are dropped.
                InputEvent::PointerMoved(at) => {
                    if let Ok(mut engine) = engine.try_borrow_mut() {
                        engine.pointer_moved(at);
                    }
                }
                InputEvent::Resized(viewport) => {
                    if let Err(err) = surface.borrow_mut().resize(viewport) {
                        warn!("failed to resize trail surface: {err}");
                        return;
                    }
                    engine.borrow_mut().resize(viewport);
                }
            })
        };
        host.input().start(sink)?;

        let step = {
            let engine = Rc::clone(&engine);
            let surface = Rc::clone(&surface);
            Box::new(move || {
                let mut surface = surface.borrow_mut();
                engine.borrow_mut().tick(surface.canvas());
                if let Err(err) = surface.present() {
                    warn!("failed to present trail frame: {err}");
                }
            })
        };
        let frames = match host.scheduler().schedule(step) {
            Ok(frames) => frames,
            Err(err) => {
                let _ = host.input().stop();
                return Err(err);
            }
        };

        info!(
            "cursor trail running on {}x{} surface",
            viewport.width, viewport.height
        );
        Ok(Some(Self {
            engine,
            surface,
            frames,
        }))
    }

    pub fn engine(&self) -> Rc<RefCell<TrailEngine>> {
        Rc::clone(&self.engine)
    }

    pub fn frames(&self) -> &FrameHandle {
        &self.frames
    }

    /// Stops frames and input, then detaches the surface. The engine and
    /// surface are freed once the scheduler drops its step.
    pub fn shutdown<H: TrailHost>(self, host: &mut H) -> Result<()> {
        self.frames.stop();
        host.input().stop()?;
        self.surface.borrow_mut().detach()?;
        info!(
            "cursor trail stopped after {} frames",
            self.engine.borrow().frame()
        );
        Ok(())
    }
}
