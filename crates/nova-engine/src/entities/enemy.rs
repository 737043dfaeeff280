use std::f32::consts::PI;

use glam::Vec2;

use super::Entity;
use crate::render::surface::{DrawSurface, GradientStop, Rgba};

/// Visual state advances normalized to a 60fps baseline so rotation and
/// pulse speed are frame-rate independent.
const BASELINE_FRAME_MS: f64 = 16.67;

/// Pursuing adversary. Pure pursuit: velocity is re-aimed at the player's
/// current position every frame, no prediction or lead.
pub struct Enemy {
    position: Vec2,
    velocity: Vec2,
    speed: f32,
    rotation: f32,
    pulse_phase: f32,
}

impl Enemy {
    pub const RADIUS: f32 = 12.0;
    pub const COLOR: Rgba = Rgba::RED;
    const ROTATION_STEP: f32 = 0.05;
    const PULSE_STEP: f32 = 0.1;

    /// `pulse_phase` is a random offset fixed at creation so enemies do not
    /// pulse in lockstep.
    pub fn new(position: Vec2, speed: f32, pulse_phase: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            speed,
            rotation: 0.0,
            pulse_phase,
        }
    }

    /// Re-aim velocity as a unit vector toward `target`, scaled by the
    /// fixed speed. A zero-distance target leaves velocity untouched.
    pub fn move_towards(&mut self, target: Vec2) {
        let delta = target - self.position;
        let distance = delta.length();
        if distance > 0.0 {
            self.velocity = delta / distance * self.speed;
        }
    }

    /// Outside the surface bounds by more than `margin` on any side.
    pub fn is_offscreen(&self, width: f32, height: f32, margin: f32) -> bool {
        self.position.x < -margin
            || self.position.x > width + margin
            || self.position.y < -margin
            || self.position.y > height + margin
    }
}

impl Entity for Enemy {
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

        let steps = (dt_ms / BASELINE_FRAME_MS) as f32;
        self.rotation += Self::ROTATION_STEP * steps;
        self.pulse_phase += Self::PULSE_STEP * steps;
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        // Pulsing outer glow
        let pulse_intensity = 0.5 + self.pulse_phase.sin() * 0.3;
        let glow_radius = Self::RADIUS * (1.5 + pulse_intensity * 0.5);
        let glow = [
            GradientStop::new(0.0, Self::COLOR.with_alpha(0x80)),
            GradientStop::new(0.6, Self::COLOR.with_alpha(0x40)),
            GradientStop::new(1.0, Self::COLOR.with_alpha(0)),
        ];
        surface.splat(self.position, glow_radius, &glow);

        // Hexagonal body, rotated with the enemy
        let mut hex = [Vec2::ZERO; 6];
        for (i, corner) in hex.iter_mut().enumerate() {
            let angle = self.rotation + i as f32 * PI / 3.0;
            *corner = self.position + Vec2::from_angle(angle) * Self::RADIUS;
        }
        surface.fill_polygon(&hex, Self::COLOR);

        // Inner core
        surface.fill_circle(self.position, Self::RADIUS * 0.6, Rgba::CORAL);

        // Rotating spikes
        for i in 0..8 {
            let angle = self.rotation + i as f32 * PI / 4.0;
            let dir = Vec2::from_angle(angle);
            surface.stroke_line(
                self.position + dir * Self::RADIUS * 0.8,
                self.position + dir * Self::RADIUS * 1.3,
                2.0,
                Self::COLOR,
            );
        }

        // Pulsing energy ring
        let ring_radius = Self::RADIUS + (self.pulse_phase * 2.0).sin() * 3.0;
        surface.stroke_circle(self.position, ring_radius, 1.0, Self::COLOR.with_alpha(0x80));
    }
}
