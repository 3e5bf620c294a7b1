use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Decay;

/// A palette entry. Serialized as an `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(pub [u8; 3]);

impl ColorToken {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba { color: self, alpha }
    }
}

/// A palette color paired with an alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: ColorToken,
    pub alpha: f32,
}

impl Rgba {
    /// CSS `rgba()` notation, as canvas 2D fill and shadow styles expect.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.color.r(),
            self.color.g(),
            self.color.b(),
            self.alpha
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub color: ColorToken,
    initial_radius: f32,
    age: u32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, color: ColorToken) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity: 1.0,
            color,
            initial_radius: radius,
            age: 0,
        }
    }

    /// Number of updates applied so far.
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn initial_radius(&self) -> f32 {
        self.initial_radius
    }

    /// One Euler step plus decay. Opacity and radius are recomputed from the
    /// age so they stay exactly `start - age * rate`.
    pub fn advance(&mut self, decay: &Decay) {
        self.position += self.velocity;
        self.age += 1;
        let age = self.age as f32;
        self.opacity = 1.0 - age * decay.life_speed;
        self.radius = self.initial_radius - age * decay.shrink_speed;
    }

    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0 && self.radius > 0.0
    }

    /// Updates left before the particle becomes eligible for removal.
    pub fn remaining_frames(&self, decay: &Decay) -> u32 {
        let by_opacity = (1.0 / decay.life_speed).ceil() as u32;
        let by_radius = (self.initial_radius / decay.shrink_speed).ceil() as u32;
        by_opacity.min(by_radius).saturating_sub(self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECAY: Decay = Decay {
        life_speed: 0.02,
        shrink_speed: 0.1,
    };

    fn particle(radius: f32) -> Particle {
        Particle::new(
            Vec2::new(10.0, 20.0),
            Vec2::new(0.5, -0.25),
            radius,
            ColorToken::new(1, 2, 3),
        )
    }

    #[test]
    fn decays_linearly_with_age() {
        let mut p = particle(8.0);
        for k in 1..=30u32 {
            p.advance(&DECAY);
            assert!((p.opacity - (1.0 - k as f32 * 0.02)).abs() < 1e-6);
            assert!((p.radius - (8.0 - k as f32 * 0.1)).abs() < 1e-5);
        }
        assert_eq!(p.age(), 30);
    }

    #[test]
    fn integrates_velocity_once_per_step() {
        let mut p = particle(8.0);
        p.advance(&DECAY);
        p.advance(&DECAY);
        assert_eq!(p.position, Vec2::new(11.0, 19.5));
    }

    #[test]
    fn opacity_runs_out_after_fifty_steps() {
        let mut p = particle(8.0);
        for _ in 0..49 {
            p.advance(&DECAY);
        }
        assert!(p.opacity > 0.0);
        p.advance(&DECAY);
        assert!(p.opacity <= 0.0);
        assert!(!p.is_alive());
    }

    #[test]
    fn small_particle_runs_out_of_radius_first() {
        let mut p = particle(4.0);
        for _ in 0..39 {
            p.advance(&DECAY);
        }
        assert!(p.is_alive());
        p.advance(&DECAY);
        assert!(p.radius <= 0.0);
        assert!(p.opacity > 0.0);
        assert!(!p.is_alive());
    }

    #[test]
    fn never_grows_back() {
        let mut p = particle(6.0);
        let (mut opacity, mut radius) = (p.opacity, p.radius);
        for _ in 0..100 {
            p.advance(&DECAY);
            assert!(p.opacity <= opacity && p.radius <= radius);
            opacity = p.opacity;
            radius = p.radius;
        }
    }

    #[test]
    fn remaining_frames_takes_the_tighter_bound() {
        assert_eq!(particle(8.0).remaining_frames(&DECAY), 50);
        let mut p = particle(4.0);
        assert_eq!(p.remaining_frames(&DECAY), 40);
        p.advance(&DECAY);
        assert_eq!(p.remaining_frames(&DECAY), 39);
    }

    #[test]
    fn css_color_carries_alpha() {
        let css = ColorToken::new(99, 102, 241).with_alpha(0.5).to_css();
        assert_eq!(css, "rgba(99, 102, 241, 0.5)");
    }
}
