use glam::Vec2;
use rand::Rng;

use crate::config::TrailConfig;
use crate::particle::Particle;

/// Instruction to create exactly one particle at `at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub at: Vec2,
}

/// Turns a pointer-move stream into spawn requests, one per `interval` moves,
/// so spawn density does not depend on the device's event rate.
#[derive(Debug, Clone)]
pub struct Emitter {
    interval: u32,
    counter: u32,
}

impl Emitter {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            counter: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn observe(&mut self, at: Vec2) -> Option<SpawnRequest> {
        self.counter += 1;
        if self.counter >= self.interval {
            self.counter = 0;
            Some(SpawnRequest { at })
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn spawn<R: Rng + ?Sized>(
        &self,
        request: SpawnRequest,
        config: &TrailConfig,
        rng: &mut R,
    ) -> Particle {
        let range = config.radius;
        let radius = range.min + rng.gen::<f32>() * (range.max - range.min);
        let color = config.palette[rng.gen_range(0..config.palette.len())];
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * config.drift,
            (rng.gen::<f32>() - 0.5) * config.drift,
        );
        Particle::new(request.at, velocity, radius, color)
    }
}
