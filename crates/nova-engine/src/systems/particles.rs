//! Particle system for explosion and impact effects.
//!
//! Particles are short-lived decaying points with simple physics: gravity,
//! per-update velocity damping, alpha fade tied to remaining life, and
//! multiplicative shrink. Damping and shrink are applied per update call
//! rather than dt-scaled, matching the visual decay of the 60fps baseline.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::core::rng::Rng;
use crate::render::surface::{DrawSurface, GradientStop, Rgba};

/// Downward gravity applied to particle velocity, px/s².
const GRAVITY: f32 = 100.0;
/// Velocity damping factor per update call.
const DAMPING: f32 = 0.98;
/// Size shrink factor per update call.
const SHRINK: f32 = 0.995;
/// Particles below this size are culled.
const MIN_SIZE: f32 = 0.1;

/// Explicit spawn parameters for a single particle.
#[derive(Debug, Clone, Copy)]
pub struct ParticleSpec {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgba,
    pub life_ms: f64,
    pub size: f32,
}

/// Optional overrides for burst emission. Unset fields get randomized
/// defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurstOptions {
    pub color: Option<Rgba>,
    pub life_ms: Option<f64>,
    pub size: Option<f32>,
}

/// A single decaying visual point. No identity beyond its fields.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgba,
    pub life_ms: f64,
    pub max_life_ms: f64,
    pub size: f32,
    pub alpha: f32,
}

/// Owns the active particle set exclusively.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Rng,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(256),
            rng: Rng::new(seed),
        }
    }

    /// Append one particle with explicit parameters.
    pub fn emit(&mut self, spec: ParticleSpec) {
        self.particles.push(Particle {
            position: spec.position,
            velocity: spec.velocity,
            color: spec.color,
            life_ms: spec.life_ms,
            max_life_ms: spec.life_ms,
            size: spec.size,
            alpha: 1.0,
        });
    }

    /// Emit `count` particles in a radial fan with angular jitter and
    /// randomized speed.
    pub fn emit_burst(&mut self, position: Vec2, count: u32, options: BurstOptions) {
        for i in 0..count {
            let angle =
                TAU * i as f32 / count as f32 + (self.rng.next_f32() - 0.5) * 0.5;
            let speed = self.rng.range(50.0, 200.0);
            let spec = ParticleSpec {
                position,
                velocity: Vec2::from_angle(angle) * speed,
                color: options.color.unwrap_or(Rgba::WHITE),
                life_ms: options
                    .life_ms
                    .unwrap_or_else(|| 1000.0 + self.rng.range(0.0, 500.0) as f64),
                size: options.size.unwrap_or_else(|| self.rng.range(2.0, 5.0)),
            };
            self.emit(spec);
        }
    }

    pub fn update(&mut self, dt_ms: f64) {
        let dt_s = (dt_ms / 1000.0) as f32;
        for p in &mut self.particles {
            p.position += p.velocity * dt_s;

            p.velocity.y += GRAVITY * dt_s;
            p.velocity *= DAMPING;

            p.life_ms -= dt_ms;
            p.alpha = (p.life_ms / p.max_life_ms).clamp(0.0, 1.0) as f32;
            p.size *= SHRINK;
        }
        self.particles
            .retain(|p| p.life_ms > 0.0 && p.size > MIN_SIZE);
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) {
        for p in &self.particles {
            let glow = [
                GradientStop::new(0.0, p.color.fade(p.alpha)),
                GradientStop::new(0.5, p.color.fade(p.alpha * 0.5)),
                GradientStop::new(1.0, p.color.with_alpha(0)),
            ];
            surface.splat(p.position, p.size * 2.0, &glow);
            surface.fill_circle(p.position, p.size, p.color.fade(p.alpha));
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_particle() -> ParticleSystem {
        let mut ps = ParticleSystem::new(42);
        ps.emit(ParticleSpec {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(50.0, -50.0),
            color: Rgba::WHITE,
            life_ms: 1000.0,
            size: 4.0,
        });
        ps
    }

    #[test]
    fn life_and_size_non_increasing() {
        let mut ps = one_particle();
        let mut last_life = f64::INFINITY;
        let mut last_size = f32::INFINITY;
        for _ in 0..30 {
            ps.update(16.0);
            let Some(p) = ps.iter().next() else { break };
            assert!(p.life_ms <= last_life);
            assert!(p.size <= last_size);
            last_life = p.life_ms;
            last_size = p.size;
        }
    }

    #[test]
    fn alpha_tracks_remaining_life() {
        let mut ps = one_particle();
        ps.update(500.0);
        let p = ps.iter().next().unwrap();
        assert!((p.alpha - 0.5).abs() < 0.01);
    }

    #[test]
    fn removed_when_life_runs_out() {
        let mut ps = one_particle();
        ps.update(999.0);
        assert_eq!(ps.len(), 1);
        ps.update(2.0);
        assert_eq!(ps.len(), 0);
    }

    #[test]
    fn removed_when_shrunk_below_floor() {
        let mut ps = ParticleSystem::new(42);
        ps.emit(ParticleSpec {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color: Rgba::WHITE,
            life_ms: 1e9,
            size: 0.11,
        });
        for _ in 0..50 {
            ps.update(16.0);
        }
        assert_eq!(ps.len(), 0);
    }

    #[test]
    fn gravity_pulls_velocity_down() {
        let mut ps = one_particle();
        let vy0 = ps.iter().next().unwrap().velocity.y;
        ps.update(100.0);
        let vy1 = ps.iter().next().unwrap().velocity.y;
        assert!(vy1 > vy0);
    }

    #[test]
    fn burst_emits_requested_count() {
        let mut ps = ParticleSystem::new(42);
        ps.emit_burst(Vec2::new(50.0, 50.0), 15, BurstOptions::default());
        assert_eq!(ps.len(), 15);
        for p in ps.iter() {
            let speed = p.velocity.length();
            assert!((50.0..200.0).contains(&speed), "speed {}", speed);
            assert!((1000.0..1500.0).contains(&p.life_ms));
            assert!((2.0..5.0).contains(&p.size));
        }
    }

    #[test]
    fn burst_honors_overrides() {
        let mut ps = ParticleSystem::new(42);
        ps.emit_burst(
            Vec2::ZERO,
            5,
            BurstOptions {
                color: Some(Rgba::BLAST_GREEN),
                life_ms: Some(750.0),
                size: Some(3.0),
            },
        );
        for p in ps.iter() {
            assert_eq!(p.color, Rgba::BLAST_GREEN);
            assert_eq!(p.life_ms, 750.0);
            assert_eq!(p.size, 3.0);
        }
    }

    #[test]
    fn clear_empties_active_set() {
        let mut ps = one_particle();
        ps.clear();
        assert!(ps.is_empty());
    }
}
