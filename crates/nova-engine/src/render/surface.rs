//! Drawable-surface contract.
//!
//! The engine never talks to a concrete windowing or canvas layer; it draws
//! through this trait. The crate ships a CPU rasterizer ([`Pixmap`]) as the
//! reference backend, and hosts may implement the trait against a GPU or
//! canvas backend of their own.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::pixmap::Pixmap;

/// 8-bit RGBA color. Value type, copied on assignment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Rgba = Rgba::new(0xff, 0xff, 0xff, 0xff);
    pub const BLACK: Rgba = Rgba::new(0x00, 0x00, 0x00, 0xff);
    /// Deep night-blue frame background.
    pub const BACKGROUND: Rgba = Rgba::new(0x0f, 0x0f, 0x23, 0xff);
    /// Player indigo.
    pub const INDIGO: Rgba = Rgba::new(0x63, 0x66, 0xf1, 0xff);
    /// Enemy red.
    pub const RED: Rgba = Rgba::new(0xef, 0x44, 0x44, 0xff);
    /// Enemy inner core.
    pub const CORAL: Rgba = Rgba::new(0xff, 0x66, 0x66, 0xff);
    /// Projectile amber.
    pub const AMBER: Rgba = Rgba::new(0xf5, 0x9e, 0x0b, 0xff);
    /// Player-death explosion red.
    pub const BLAST_RED: Rgba = Rgba::new(0xff, 0x44, 0x44, 0xff);
    /// Enemy-kill explosion green.
    pub const BLAST_GREEN: Rgba = Rgba::new(0x44, 0xff, 0x44, 0xff);

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha scaled by `factor` (clamped to [0, 1]).
    pub fn fade(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        self.with_alpha((self.a as f32 * f) as u8)
    }
}

/// One stop of a radial gradient: `t` is the normalized distance from the
/// center (0 = center, 1 = rim). Stops must be sorted by `t`.
#[derive(Debug, Clone, Copy)]
pub struct GradientStop {
    pub t: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(t: f32, color: Rgba) -> Self {
        Self { t, color }
    }
}

/// Compositing mode for buffer-to-buffer blits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Standard source-over alpha blending.
    Alpha,
    /// dst += src, saturating. Canvas "lighter".
    Additive,
    /// dst = lerp(dst, dst * src, alpha). Darkens unlit regions.
    Multiply,
    /// dst = lerp(dst, 255 - (255-dst)(255-src), alpha). Lightens; glow bloom.
    Screen,
}

/// Surface the engine renders each frame into.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Re-fit the surface to the host's reported viewport size.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill the whole surface with an opaque color.
    fn clear(&mut self, color: Rgba);

    /// Fill a solid circle, alpha-blended over the existing pixels.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Stroke a circle outline of the given line width.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba);

    /// Stroke a line segment of the given width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Fill a simple polygon (even-odd rule).
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    /// Paint a radial gradient disc, alpha-blended. Used for glow halos.
    fn splat(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]);

    /// Composite an off-screen buffer over this surface at (0, 0).
    /// `alpha` is the global opacity of the pass, in [0, 1].
    fn blit(&mut self, src: &Pixmap, blend: BlendMode, alpha: f32);
}

impl<T: DrawSurface + ?Sized> DrawSurface for Box<T> {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }
    fn clear(&mut self, color: Rgba) {
        (**self).clear(color)
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        (**self).fill_circle(center, radius, color)
    }
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        (**self).stroke_circle(center, radius, line_width, color)
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        (**self).stroke_line(from, to, width, color)
    }
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        (**self).fill_polygon(points, color)
    }
    fn splat(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]) {
        (**self).splat(center, radius, stops)
    }
    fn blit(&mut self, src: &Pixmap, blend: BlendMode, alpha: f32) {
        (**self).blit(src, blend, alpha)
    }
}
