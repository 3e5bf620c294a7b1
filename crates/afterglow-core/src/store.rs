use crate::config::Decay;
use crate::particle::Particle;

/// Live particles in insertion order. Culling compacts in place.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Drops every particle failing the liveness predicate and returns how
    /// many were removed. Keeps the allocation.
    pub fn cull(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);
        before - self.particles.len()
    }

    pub fn advance(&mut self, decay: &Decay) {
        for particle in &mut self.particles {
            particle.advance(decay);
        }
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ColorToken;
    use glam::Vec2;

    const DECAY: Decay = Decay {
        life_speed: 0.25,
        shrink_speed: 0.1,
    };

    fn particle(radius: f32) -> Particle {
        Particle::new(Vec2::ZERO, Vec2::ONE, radius, ColorToken::new(0, 0, 0))
    }

    #[test]
    fn cull_keeps_live_particles() {
        let mut store = ParticleStore::new();
        store.push(particle(1.0));
        store.push(particle(2.0));
        assert_eq!(store.cull(), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn cull_removes_expired_particles_once() {
        let mut store = ParticleStore::new();
        store.push(particle(0.15));
        store.push(particle(5.0));
        store.advance(&DECAY);
        store.advance(&DECAY);
        assert_eq!(store.cull(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.cull(), 0);
        assert_eq!(store.iter().next().unwrap().initial_radius(), 5.0);
    }

    #[test]
    fn advance_ages_every_particle() {
        let mut store = ParticleStore::new();
        store.push(particle(1.0));
        store.push(particle(2.0));
        store.advance(&DECAY);
        let ages: Vec<u32> = (&store).into_iter().map(Particle::age).collect();
        assert_eq!(ages, [1, 1]);
    }

    #[test]
    fn cull_does_not_reallocate() {
        let mut store = ParticleStore::new();
        for _ in 0..64 {
            store.push(particle(0.05));
        }
        let capacity = store.particles.capacity();
        store.advance(&DECAY);
        assert_eq!(store.cull(), 64);
        assert!(store.is_empty());
        assert_eq!(store.particles.capacity(), capacity);
    }
}
