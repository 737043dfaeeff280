//! Faked dynamic illumination via an off-screen light accumulation buffer.
//!
//! Each frame the light list is cleared and rebuilt, every light splats a
//! radial gradient (bright core plus falloff) additively into the buffer,
//! and the buffer is composited onto the main frame twice: a multiply-like
//! darkening pass that shapes the visible areas, then a screen-like
//! additive pass at low opacity for glow bloom.

use glam::Vec2;

use crate::core::rng::Rng;
use crate::render::pixmap::Pixmap;
use crate::render::surface::{BlendMode, DrawSurface, GradientStop, Rgba};

/// Opacity of the darkening (multiply) composite pass.
const DARKEN_ALPHA: f32 = 0.8;
/// Opacity of the bloom (screen) composite pass.
const BLOOM_ALPHA: f32 = 0.3;
/// Number of decorative drifting ambient lights injected per frame.
const AMBIENT_COUNT: u32 = 5;

/// Transient per-frame light record. The active set has no persistence
/// across frames.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub intensity: f32,
}

/// Owns the per-frame light list and the off-screen accumulation buffer.
/// The buffer is resized in lockstep with the main surface.
pub struct LightingSystem {
    lights: Vec<Light>,
    buffer: Pixmap,
}

impl LightingSystem {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            lights: Vec::with_capacity(64),
            buffer: Pixmap::new(width, height),
        }
    }

    /// Drop last frame's lights and reset the accumulation buffer to the
    /// black ambient base, re-fitting it to the main surface size first.
    pub fn begin_frame(&mut self, width: u32, height: u32) {
        if self.buffer.width() != width || self.buffer.height() != height {
            self.buffer.resize(width, height);
        }
        self.lights.clear();
        self.buffer.clear(Rgba::BLACK);
    }

    pub fn add_light(&mut self, position: Vec2, radius: f32, color: Rgba, intensity: f32) {
        self.lights.push(Light {
            position,
            radius,
            color,
            intensity,
        });
    }

    /// Inject slowly drifting decorative lights driven by wall-clock time.
    /// Independent of simulation state.
    pub fn update(&mut self, now_ms: f64) {
        let time = (now_ms * 0.001) as f32;
        let (w, h) = (self.buffer.width() as f32, self.buffer.height() as f32);
        for i in 0..AMBIENT_COUNT {
            let i = i as f32;
            let x = ((time * 0.5 + i).sin() * 0.5 + 0.5) * w;
            let y = ((time * 0.3 + i * 2.0).cos() * 0.5 + 0.5) * h;
            let radius = 20.0 + (time * 2.0 + i).sin() * 10.0;
            let intensity = 0.1 + (time * 3.0 + i).sin() * 0.05;
            self.add_light(Vec2::new(x, y), radius, Rgba::INDIGO, intensity);
        }
    }

    /// Randomly jittered light, for fire and damage effects.
    pub fn add_flicker(&mut self, position: Vec2, base_radius: f32, color: Rgba, rng: &mut Rng) {
        let intensity = rng.range(0.8, 1.2);
        let radius = base_radius * rng.range(0.8, 1.2);
        self.add_light(position, radius, color, intensity);
    }

    /// Sinusoidally pulsing light at `frequency` Hz.
    pub fn add_pulse(
        &mut self,
        position: Vec2,
        base_radius: f32,
        color: Rgba,
        frequency: f32,
        now_ms: f64,
    ) {
        let time = (now_ms * 0.001) as f32;
        let intensity = 0.5 + (time * frequency * std::f32::consts::TAU).sin() * 0.5;
        let radius = base_radius * (0.8 + intensity * 0.4);
        self.add_light(position, radius, color, intensity);
    }

    /// Accumulate every light into the buffer, then composite the buffer
    /// onto the main frame: multiply to darken, screen to bloom.
    pub fn apply(&mut self, surface: &mut dyn DrawSurface) {
        for light in &self.lights {
            let alpha = light.intensity.clamp(0.0, 1.0);
            let falloff = [
                GradientStop::new(0.0, light.color.fade(alpha)),
                GradientStop::new(0.5, light.color.fade(alpha * 0.5)),
                GradientStop::new(1.0, light.color.with_alpha(0)),
            ];
            self.buffer
                .splat_blend(light.position, light.radius, &falloff, BlendMode::Additive);

            // Bright inner core
            let core = [
                GradientStop::new(0.0, Rgba::WHITE.fade(alpha * 0.5)),
                GradientStop::new(1.0, light.color.with_alpha(0)),
            ];
            self.buffer.splat_blend(
                light.position,
                light.radius * 0.3,
                &core,
                BlendMode::Additive,
            );
        }

        surface.blit(&self.buffer, BlendMode::Multiply, DARKEN_ALPHA);
        surface.blit(&self.buffer, BlendMode::Screen, BLOOM_ALPHA);
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self) -> &Pixmap {
        &self.buffer
    }
}
