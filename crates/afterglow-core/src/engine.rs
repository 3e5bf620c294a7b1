use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::{ConfigError, Decay, TrailConfig};
use crate::emitter::Emitter;
use crate::particle::{Particle, Viewport};
use crate::render::{Canvas, Renderer};
use crate::store::ParticleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub culled: usize,
    pub drawn: usize,
    pub live: usize,
}

/// Owns everything the trail needs for one session: emitter, particles,
/// renderer and the current viewport. Hosts call `pointer_moved` from their
/// input callback and `tick` once per display refresh.
pub struct TrailEngine<R = SmallRng> {
    config: TrailConfig,
    decay: Decay,
    emitter: Emitter,
    store: ParticleStore,
    renderer: Renderer,
    viewport: Viewport,
    rng: R,
    frame: u64,
}

impl TrailEngine<SmallRng> {
    pub fn new(config: TrailConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TrailEngine<R> {
    pub fn with_rng(config: TrailConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let emitter = Emitter::new(config.spawn_interval);
        debug!(
            "trail engine: one particle every {} moves, {} palette colors",
            emitter.interval(),
            config.palette.len()
        );
        Ok(Self {
            decay: config.decay(),
            emitter,
            store: ParticleStore::new(),
            renderer: Renderer::new(&config),
            viewport: Viewport::default(),
            rng,
            frame: 0,
            config,
        })
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    /// Frame steps run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            debug!(
                "trail viewport {}x{} -> {}x{}",
                self.viewport.width, self.viewport.height, viewport.width, viewport.height
            );
            self.viewport = viewport;
        }
    }

    /// Feeds one pointer move to the emitter. Returns true when it spawned.
    pub fn pointer_moved(&mut self, at: Vec2) -> bool {
        match self.emitter.observe(at) {
            Some(request) => {
                let particle = self.emitter.spawn(request, &self.config, &mut self.rng);
                trace!(
                    x = at.x,
                    y = at.y,
                    lifetime = particle.remaining_frames(&self.decay),
                    "spawned particle"
                );
                self.store.push(particle);
                true
            }
            None => false,
        }
    }

    /// One frame step: clear, cull, then advance and draw every survivor.
    pub fn tick(&mut self, canvas: &mut dyn Canvas) -> FrameStats {
        canvas.clear(self.viewport);
        let culled = self.store.cull();
        self.store.advance(&self.decay);

        let mut drawn = 0;
        for particle in &self.store {
            if self.renderer.draw(particle, canvas) {
                drawn += 1;
            }
        }
        self.frame += 1;

        let stats = FrameStats {
            culled,
            drawn,
            live: self.store.len(),
        };
        if culled > 0 {
            trace!(frame = self.frame, ?stats, "culled expired particles");
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RadiusRange;
    use crate::render::tests::RecordingCanvas;

    fn engine() -> TrailEngine {
        let mut engine = TrailEngine::new(TrailConfig::default(), 3).unwrap();
        engine.resize(Viewport::new(800, 600));
        engine
    }

    #[test]
    fn rejects_invalid_config() {
        let config = TrailConfig {
            spawn_interval: 0,
            ..TrailConfig::default()
        };
        assert!(TrailEngine::new(config, 0).is_err());
    }

    #[test]
    fn spawns_on_every_third_move() {
        let mut engine = engine();
        let spawned: Vec<bool> = (0..6)
            .map(|i| engine.pointer_moved(Vec2::new(i as f32, 0.0)))
            .collect();
        assert_eq!(spawned, [false, false, true, false, false, true]);
        assert_eq!(engine.particles().len(), 2);
        assert_eq!(engine.particles()[0].position, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn tick_clears_to_the_viewport_and_draws_each_particle_once() {
        let mut engine = engine();
        for i in 0..9 {
            engine.pointer_moved(Vec2::splat(i as f32));
        }
        let mut canvas = RecordingCanvas::default();
        let stats = engine.tick(&mut canvas);
        assert_eq!(canvas.clears, vec![Viewport::new(800, 600)]);
        assert_eq!(
            stats,
            FrameStats {
                culled: 0,
                drawn: 3,
                live: 3
            }
        );
        assert_eq!(canvas.marks.len(), 3);
        assert_eq!(engine.frame(), 1);
    }

    #[test]
    fn spent_particles_stay_until_the_next_cull() {
        let config = TrailConfig {
            radius: RadiusRange { min: 8.0, max: 8.0 },
            ..TrailConfig::default()
        };
        let mut engine = TrailEngine::new(config, 5).unwrap();
        for _ in 0..3 {
            engine.pointer_moved(Vec2::ZERO);
        }
        let mut canvas = RecordingCanvas::default();
        for _ in 0..50 {
            engine.tick(&mut canvas);
        }
        // Spent on the 50th update, so nothing was drawn but it is still stored.
        assert_eq!(engine.particles().len(), 1);
        assert!(canvas.marks.is_empty());

        let stats = engine.tick(&mut canvas);
        assert_eq!(
            stats,
            FrameStats {
                culled: 1,
                drawn: 0,
                live: 0
            }
        );
    }

    #[test]
    fn resize_replaces_the_viewport() {
        let mut engine = engine();
        engine.resize(Viewport::new(1024, 768));
        assert_eq!(engine.viewport(), Viewport::new(1024, 768));
    }
}
