//! Short-lived particle bursts standing in for an event's energy release.
//!
//! The engine owns every burst. The active set is capped; spawning past the
//! cap evicts the oldest burst first, so sustained triggering (Chaos with a
//! large table) cannot grow it without bound.

use crate::constants::*;
use crate::mapping::color_for_depth;
use crate::scene::{random_unit_vector, SpriteInstance};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Clone, Debug)]
pub struct ParticleBurst {
    pub origin: Vec3,
    pub particles: SmallVec<[Particle; 32]>,
    pub life: f32,
    pub color: [f32; 3],
}

impl ParticleBurst {
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Number of particles a trigger of `magnitude` produces.
#[inline]
pub fn particle_count(magnitude: f32, count_scale: f32) -> usize {
    let n = (magnitude * PARTICLES_PER_MAGNITUDE * count_scale).floor();
    if n.is_finite() && n > 0.0 {
        n.min(MAX_PARTICLES_PER_BURST as f32) as usize
    } else {
        0
    }
}

#[derive(Clone, Debug)]
pub struct BurstParams {
    pub max_active: usize,
    pub speed_min: f32,
    pub speed_max: f32,
    pub velocity_scale: f32,
    pub decay_per_sec: f32,
}

impl Default for BurstParams {
    fn default() -> Self {
        Self {
            max_active: MAX_ACTIVE_BURSTS,
            speed_min: BURST_SPEED_MIN,
            speed_max: BURST_SPEED_MAX,
            velocity_scale: BURST_VELOCITY_SCALE,
            decay_per_sec: BURST_DECAY_PER_SEC,
        }
    }
}

pub struct BurstEngine {
    pub params: BurstParams,
    active: VecDeque<ParticleBurst>,
    evicted: u64,
}

impl BurstEngine {
    pub fn new(params: BurstParams) -> Self {
        Self {
            active: VecDeque::with_capacity(params.max_active.min(1024)),
            params,
            evicted: 0,
        }
    }

    /// Spawn a burst sized by `magnitude` and colored by the depth band.
    /// Returns false when the magnitude yields no particles.
    pub fn spawn(&mut self, origin: Vec3, magnitude: f32, depth_km: f32, rng: &mut impl Rng) -> bool {
        self.spawn_scaled(origin, magnitude, depth_km, 1.0, rng)
    }

    pub fn spawn_scaled(
        &mut self,
        origin: Vec3,
        magnitude: f32,
        depth_km: f32,
        count_scale: f32,
        rng: &mut impl Rng,
    ) -> bool {
        let n = particle_count(magnitude, count_scale);
        if n == 0 || self.params.max_active == 0 {
            return false;
        }
        let (lo, hi) = (self.params.speed_min, self.params.speed_max.max(self.params.speed_min));
        let particles = (0..n)
            .map(|_| {
                let speed = if hi > lo { rng.gen_range(lo..hi) } else { lo };
                Particle {
                    position: origin,
                    velocity: random_unit_vector(rng) * speed,
                }
            })
            .collect();
        while self.active.len() >= self.params.max_active {
            self.active.pop_front();
            self.evicted += 1;
        }
        self.active.push_back(ParticleBurst {
            origin,
            particles,
            life: 1.0,
            color: color_for_depth(depth_km).color(),
        });
        true
    }

    /// Integrate every burst by `dt` seconds and drop the dead ones.
    pub fn update(&mut self, dt: f32) {
        let step = dt * self.params.velocity_scale;
        let decay = self.params.decay_per_sec * dt;
        for burst in self.active.iter_mut() {
            for p in burst.particles.iter_mut() {
                p.position += p.velocity * step;
            }
            burst.life -= decay;
        }
        self.active.retain(|b| b.is_alive());
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Total bursts dropped by the cap since creation.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleBurst> {
        self.active.iter()
    }

    pub fn particle_total(&self) -> usize {
        self.active.iter().map(|b| b.particles.len()).sum()
    }

    pub fn push_instances(&self, out: &mut Vec<SpriteInstance>) {
        for b in &self.active {
            let a = b.opacity();
            for p in &b.particles {
                out.push(SpriteInstance::new(p.position, PARTICLE_SIZE, b.color, a));
            }
        }
    }
}

impl Default for BurstEngine {
    fn default() -> Self {
        Self::new(BurstParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn count_is_floor_of_scaled_magnitude() {
        assert_eq!(particle_count(2.37, 1.0), 23);
        assert_eq!(particle_count(0.05, 1.0), 0);
        assert_eq!(particle_count(f32::NAN, 1.0), 0);
        assert_eq!(particle_count(-1.0, 1.0), 0);
        assert_eq!(particle_count(1.0, 4.0), 40);
    }

    #[test]
    fn extreme_magnitudes_are_capped() {
        assert_eq!(particle_count(1e30, 1.0), MAX_PARTICLES_PER_BURST);
        assert_eq!(particle_count(f32::INFINITY, 1.0), 0);
        let mut rng = StdRng::seed_from_u64(9);
        let mut e = BurstEngine::default();
        assert!(e.spawn_scaled(Vec3::ZERO, 1e30, 5.0, FLIGHT_BURST_SCALE, &mut rng));
        assert_eq!(e.particle_total(), MAX_PARTICLES_PER_BURST);
    }

    #[test]
    fn particles_move_outward() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut e = BurstEngine::default();
        assert!(e.spawn(Vec3::ZERO, 1.0, 5.0, &mut rng));
        e.update(0.1);
        let b = e.iter().next().unwrap();
        for p in &b.particles {
            let d = p.position.length();
            assert!(d >= BURST_SPEED_MIN * 0.1 - 1e-4);
            assert!(d <= BURST_SPEED_MAX * 0.1 + 1e-4);
        }
    }
}
