use glam::Vec2;

use crate::config::TrailConfig;
use crate::particle::{Particle, Rgba, Viewport};

/// One blurred disc, fully resolved for a drawing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMark {
    pub center: Vec2,
    pub radius: f32,
    /// Global alpha applied to the whole mark.
    pub alpha: f32,
    pub fill: Rgba,
    pub glow: Rgba,
    pub blur: f32,
}

/// Drawing surface seam. Implemented by the canvas 2D backend and by the
/// software rasterizer used for desktop overlays.
pub trait Canvas {
    fn clear(&mut self, viewport: Viewport);
    fn fill_circle(&mut self, mark: &CircleMark);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    blur: f32,
    glow_alpha: f32,
}

impl Renderer {
    pub fn new(config: &TrailConfig) -> Self {
        Self {
            blur: config.blur,
            glow_alpha: config.glow_alpha,
        }
    }

    pub fn mark(&self, particle: &Particle) -> CircleMark {
        CircleMark {
            center: particle.position,
            radius: particle.radius.max(0.0),
            alpha: particle.opacity,
            fill: particle.color.with_alpha(particle.opacity),
            glow: particle.color.with_alpha(self.glow_alpha),
            blur: self.blur,
        }
    }

    /// Paints `particle` unless it has already run out of opacity or radius.
    pub fn draw(&self, particle: &Particle, canvas: &mut dyn Canvas) -> bool {
        if particle.opacity <= 0.0 || particle.radius <= 0.0 {
            return false;
        }
        canvas.fill_circle(&self.mark(particle));
        true
    }
}
