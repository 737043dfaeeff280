use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::Entity;
use crate::render::surface::{DrawSurface, GradientStop, Rgba};

/// Player-fired shot. Straight-line motion at spawn velocity, no
/// acceleration. Carries a fixed lifetime counted down each update; the
/// owning collection's cleanup pass enforces expiry, the projectile never
/// removes itself.
#[derive(Debug, Clone)]
pub struct Projectile {
    position: Vec2,
    velocity: Vec2,
    trail: VecDeque<Vec2>,
    life_ms: f64,
    max_life_ms: f64,
}

impl Projectile {
    pub const RADIUS: f32 = 4.0;
    pub const COLOR: Rgba = Rgba::AMBER;
    const MAX_TRAIL: usize = 8;

    pub fn new(position: Vec2, velocity: Vec2, lifetime_ms: f64) -> Self {
        Self {
            position,
            velocity,
            trail: VecDeque::with_capacity(Self::MAX_TRAIL),
            life_ms: lifetime_ms,
            max_life_ms: lifetime_ms,
        }
    }

    /// Lifetime has run out. Checked by the engine's cleanup pass.
    pub fn is_expired(&self) -> bool {
        self.life_ms <= 0.0
    }

    /// Outside the surface bounds by more than `margin` on any side.
    pub fn is_offscreen(&self, width: f32, height: f32, margin: f32) -> bool {
        self.position.x < -margin
            || self.position.x > width + margin
            || self.position.y < -margin
            || self.position.y > height + margin
    }

    pub fn remaining_life_ms(&self) -> f64 {
        self.life_ms
    }

    fn age_ms(&self) -> f64 {
        self.max_life_ms - self.life_ms
    }
}

impl Entity for Projectile {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn radius(&self) -> f32 {
        Self::RADIUS
    }

    fn color(&self) -> Rgba {
        Self::COLOR
    }

    fn update(&mut self, dt_ms: f64) {
        let dt_s = (dt_ms / 1000.0) as f32;
        self.position += self.velocity * dt_s;

        self.trail.push_front(self.position);
        self.trail.truncate(Self::MAX_TRAIL);

        self.life_ms -= dt_ms;
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        // Fading, shrinking trail (newest first)
        for (i, point) in self.trail.iter().enumerate() {
            let f = (Self::MAX_TRAIL - i) as f32 / Self::MAX_TRAIL as f32;
            surface.fill_circle(*point, Self::RADIUS * f, Self::COLOR.fade(0.6 * f));
        }

        // Glow halo
        let glow = [
            GradientStop::new(0.0, Self::COLOR),
            GradientStop::new(0.3, Self::COLOR.with_alpha(0x80)),
            GradientStop::new(1.0, Self::COLOR.with_alpha(0)),
        ];
        surface.splat(self.position, Self::RADIUS * 3.0, &glow);

        // Body and bright core
        surface.fill_circle(self.position, Self::RADIUS, Self::COLOR);
        surface.fill_circle(self.position, Self::RADIUS * 0.5, Rgba::WHITE);

        // Orbiting sparkles
        for i in 0..4 {
            let angle = ((self.age_ms() * 0.01) as f32 + i as f32 * PI / 2.0) % TAU;
            let sparkle = self.position + Vec2::from_angle(angle) * Self::RADIUS * 1.5;
            surface.fill_circle(sparkle, 1.0, Rgba::WHITE.with_alpha(0x80));
        }
    }
}
