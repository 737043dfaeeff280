use std::collections::VecDeque;

use glam::Vec2;

use super::{Entity, Projectile};
use crate::api::config::EngineConfig;
use crate::render::surface::{DrawSurface, GradientStop, Rgba};

/// The user-controlled avatar. One per engine instance.
///
/// Movement state is set externally each frame via [`set_velocity`]; the
/// player only integrates it. Firing is rate-limited and queued: shots land
/// in an internal pending queue that the engine drains into its active
/// projectile collection, each projectile handed off exactly once.
///
/// [`set_velocity`]: Player::set_velocity
pub struct Player {
    position: Vec2,
    velocity: Vec2,
    /// Recent positions, newest first. Visual only.
    trail: VecDeque<Vec2>,
    pending: Vec<Projectile>,
    last_shot_ms: f64,
    shot_cooldown_ms: f64,
    projectile_speed: f32,
    projectile_lifetime_ms: f64,
    elapsed_ms: f64,
}

impl Player {
    pub const RADIUS: f32 = 15.0;
    pub const COLOR: Rgba = Rgba::INDIGO;
    const MAX_TRAIL: usize = 10;

    pub fn new(position: Vec2, config: &EngineConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            trail: VecDeque::with_capacity(Self::MAX_TRAIL),
            pending: Vec::new(),
            last_shot_ms: f64::NEG_INFINITY,
            shot_cooldown_ms: config.shot_cooldown_ms,
            projectile_speed: config.projectile_speed,
            projectile_lifetime_ms: config.projectile_lifetime_ms,
            elapsed_ms: 0.0,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Fire a projectile straight up, rate-limited by the shot cooldown.
    /// Calls within the cooldown window are no-ops. Returns whether a shot
    /// was actually queued.
    pub fn shoot(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_shot_ms < self.shot_cooldown_ms {
            return false;
        }
        self.pending.push(Projectile::new(
            self.position,
            Vec2::new(0.0, -self.projectile_speed),
            self.projectile_lifetime_ms,
        ));
        self.last_shot_ms = now_ms;
        true
    }

    /// Atomically drain the pending-projectile queue. Each projectile is
    /// returned exactly once.
    pub fn drain_projectiles(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.pending)
    }

    /// Clamp position to the surface bounds minus `padding` on every side.
    pub fn clamp_to_bounds(&mut self, width: f32, height: f32, padding: f32) {
        self.position = self.position.clamp(
            Vec2::splat(padding),
            Vec2::new(width - padding, height - padding),
        );
    }

    #[cfg(test)]
    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

impl Entity for Player {
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
        self.elapsed_ms += dt_ms;

        // Trail only grows while moving
        if self.velocity != Vec2::ZERO {
            self.trail.push_front(self.position);
            self.trail.truncate(Self::MAX_TRAIL);
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        for (i, point) in self.trail.iter().enumerate() {
            let f = (Self::MAX_TRAIL - i) as f32 / Self::MAX_TRAIL as f32;
            surface.fill_circle(*point, Self::RADIUS * 0.8 * f, Self::COLOR.fade(0.3 * f));
        }

        // Outer glow
        let glow = [
            GradientStop::new(0.0, Self::COLOR.with_alpha(0x80)),
            GradientStop::new(0.5, Self::COLOR.with_alpha(0x40)),
            GradientStop::new(1.0, Self::COLOR.with_alpha(0)),
        ];
        surface.splat(self.position, Self::RADIUS * 2.0, &glow);

        // Main body and inner highlight
        surface.fill_circle(self.position, Self::RADIUS, Self::COLOR);
        surface.fill_circle(
            self.position - Vec2::new(3.0, 3.0),
            Self::RADIUS * 0.6,
            Rgba::WHITE.with_alpha(0x40),
        );

        // Pulsing ring
        let pulse_radius = Self::RADIUS + ((self.elapsed_ms * 0.01).sin() as f32) * 5.0;
        surface.stroke_circle(self.position, pulse_radius, 2.0, Self::COLOR.with_alpha(0x60));
    }
}
