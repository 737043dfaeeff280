//! CPU RGBA8 rasterizer backing the [`DrawSurface`] contract.
//!
//! Good enough for headless simulation, tests, and software presentation.
//! Also used directly by the lighting system as its off-screen light
//! accumulation buffer.

use glam::Vec2;

use super::surface::{BlendMode, DrawSurface, GradientStop, Rgba};

/// Alpha blend a single color channel.
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Linear interpolation between two colors, including alpha.
#[inline]
fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Rgba::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Sample a radial gradient at normalized distance `t`.
/// Stops must be sorted by `t` ascending.
fn sample_gradient(stops: &[GradientStop], t: f32) -> Rgba {
    match stops {
        [] => Rgba::new(0, 0, 0, 0),
        [only] => only.color,
        [first, ..] if t <= first.t => first.color,
        [.., last] if t >= last.t => last.color,
        _ => {
            for pair in stops.windows(2) {
                let (lo, hi) = (pair[0], pair[1]);
                if t >= lo.t && t <= hi.t {
                    let span = (hi.t - lo.t).max(f32::EPSILON);
                    return lerp_color(lo.color, hi.color, (t - lo.t) / span);
                }
            }
            stops[stops.len() - 1].color
        }
    }
}

/// Distance from point `p` to segment `ab`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// RGBA8 pixel buffer for software rendering.
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::new(0, 0, 0, 0); (width * height) as usize],
        }
    }

    /// Raw pixel bytes (RGBA byte order), for host presentation.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Read one pixel; `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 || color.a == 0 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        let dst = self.pixels[idx];
        let a = color.a as u16;
        self.pixels[idx] = Rgba::new(
            blend_channel(color.r, dst.r, a),
            blend_channel(color.g, dst.g, a),
            blend_channel(color.b, dst.b, a),
            dst.a.max(color.a),
        );
    }

    #[inline]
    fn blend_pixel_additive(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 || color.a == 0 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        let dst = self.pixels[idx];
        let a = color.a as u16;
        let add = |s: u8, d: u8| d.saturating_add(((s as u16 * a) >> 8) as u8);
        self.pixels[idx] = Rgba::new(
            add(color.r, dst.r),
            add(color.g, dst.g),
            add(color.b, dst.b),
            dst.a,
        );
    }

    /// Integer bounding box of a disc, clipped to the buffer.
    fn disc_bounds(&self, center: Vec2, radius: f32) -> (i32, i32, i32, i32) {
        let x0 = (center.x - radius).floor().max(0.0) as i32;
        let y0 = (center.y - radius).floor().max(0.0) as i32;
        let x1 = ((center.x + radius).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((center.y + radius).ceil() as i32).min(self.height as i32 - 1);
        (x0, y0, x1, y1)
    }

    /// Radial gradient disc with an explicit blend mode. The additive form is
    /// what the lighting system uses to accumulate light energy.
    pub fn splat_blend(
        &mut self,
        center: Vec2,
        radius: f32,
        stops: &[GradientStop],
        blend: BlendMode,
    ) {
        if radius <= 0.0 {
            return;
        }
        let (x0, y0, x1, y1) = self.disc_bounds(center, radius);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = p.distance(center) / radius;
                if t >= 1.0 {
                    continue;
                }
                let color = sample_gradient(stops, t);
                match blend {
                    BlendMode::Additive => self.blend_pixel_additive(x, y, color),
                    _ => self.blend_pixel(x, y, color),
                }
            }
        }
    }
}

impl DrawSurface for Pixmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::new(0, 0, 0, 0); (width * height) as usize];
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a == 0 {
            return;
        }
        let (x0, y0, x1, y1) = self.disc_bounds(center, radius);
        let r_sq = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if p.distance_squared(center) <= r_sq {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        if radius <= 0.0 || color.a == 0 {
            return;
        }
        let half = line_width.max(1.0) * 0.5;
        let outer = radius + half;
        let inner = (radius - half).max(0.0);
        let (x0, y0, x1, y1) = self.disc_bounds(center, outer);
        let (outer_sq, inner_sq) = (outer * outer, inner * inner);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d_sq = p.distance_squared(center);
                if d_sq <= outer_sq && d_sq >= inner_sq {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        if color.a == 0 {
            return;
        }
        let half = width.max(1.0) * 0.5;
        let min = from.min(to) - Vec2::splat(half);
        let max = from.max(to) + Vec2::splat(half);
        let x0 = min.x.floor().max(0.0) as i32;
        let y0 = min.y.floor().max(0.0) as i32;
        let x1 = (max.x.ceil() as i32).min(self.width as i32 - 1);
        let y1 = (max.y.ceil() as i32).min(self.height as i32 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if segment_distance(p, from, to) <= half {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 || color.a == 0 {
            return;
        }
        let y_min = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let y_max = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let y0 = y_min.floor().max(0.0) as i32;
        let y1 = (y_max.ceil() as i32).min(self.height as i32 - 1);

        let mut xs: Vec<f32> = Vec::with_capacity(points.len());
        for y in y0..=y1 {
            let yc = y as f32 + 0.5;
            xs.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                    xs.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            xs.sort_by(|l, r| l.total_cmp(r));
            for span in xs.chunks_exact(2) {
                let sx = span[0].round().max(0.0) as i32;
                let ex = (span[1].round() as i32).min(self.width as i32 - 1);
                for x in sx..=ex {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn splat(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]) {
        self.splat_blend(center, radius, stops, BlendMode::Alpha);
    }

    fn blit(&mut self, src: &Pixmap, blend: BlendMode, alpha: f32) {
        let a16 = (alpha.clamp(0.0, 1.0) * 255.0) as u16;
        if a16 == 0 {
            return;
        }
        let w = self.width.min(src.width);
        let h = self.height.min(src.height);
        for y in 0..h {
            for x in 0..w {
                let si = (y * src.width + x) as usize;
                let di = (y * self.width + x) as usize;
                let s = src.pixels[si];
                let d = self.pixels[di];
                let out = match blend {
                    BlendMode::Alpha => {
                        let ea = (s.a as u16 * a16) / 255;
                        Rgba::new(
                            blend_channel(s.r, d.r, ea),
                            blend_channel(s.g, d.g, ea),
                            blend_channel(s.b, d.b, ea),
                            d.a,
                        )
                    }
                    BlendMode::Additive => {
                        let add =
                            |sv: u8, dv: u8| dv.saturating_add(((sv as u16 * a16) >> 8) as u8);
                        Rgba::new(add(s.r, d.r), add(s.g, d.g), add(s.b, d.b), d.a)
                    }
                    BlendMode::Multiply => {
                        let mul = |sv: u8, dv: u8| {
                            let m = ((sv as u16 * dv as u16) / 255) as u8;
                            blend_channel(m, dv, a16)
                        };
                        Rgba::new(mul(s.r, d.r), mul(s.g, d.g), mul(s.b, d.b), d.a)
                    }
                    BlendMode::Screen => {
                        let scr = |sv: u8, dv: u8| {
                            let s16 = 255 - ((255 - sv as u16) * (255 - dv as u16)) / 255;
                            blend_channel(s16 as u8, dv, a16)
                        };
                        Rgba::new(scr(s.r, d.r), scr(s.g, d.g), scr(s.b, d.b), d.a)
                    }
                };
                self.pixels[di] = out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut pm = Pixmap::new(8, 8);
        pm.clear(Rgba::BACKGROUND);
        assert_eq!(pm.pixel(0, 0), Some(Rgba::BACKGROUND));
        assert_eq!(pm.pixel(7, 7), Some(Rgba::BACKGROUND));
    }

    #[test]
    fn fill_circle_paints_center_not_corner() {
        let mut pm = Pixmap::new(20, 20);
        pm.clear(Rgba::BLACK);
        pm.fill_circle(Vec2::new(10.0, 10.0), 5.0, Rgba::RED);
        assert_eq!(pm.pixel(10, 10), Some(Rgba::RED.with_alpha(0xff)));
        assert_eq!(pm.pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn stroke_circle_leaves_interior() {
        let mut pm = Pixmap::new(40, 40);
        pm.clear(Rgba::BLACK);
        pm.stroke_circle(Vec2::new(20.0, 20.0), 10.0, 2.0, Rgba::WHITE);
        assert_eq!(pm.pixel(20, 20), Some(Rgba::BLACK));
        // A point on the ring
        assert_ne!(pm.pixel(30, 20), Some(Rgba::BLACK));
    }

    #[test]
    fn polygon_fill_covers_interior() {
        let mut pm = Pixmap::new(20, 20);
        pm.clear(Rgba::BLACK);
        let square = [
            Vec2::new(5.0, 5.0),
            Vec2::new(15.0, 5.0),
            Vec2::new(15.0, 15.0),
            Vec2::new(5.0, 15.0),
        ];
        pm.fill_polygon(&square, Rgba::RED);
        assert_eq!(pm.pixel(10, 10), Some(Rgba::RED));
        assert_eq!(pm.pixel(1, 1), Some(Rgba::BLACK));
    }

    #[test]
    fn additive_splat_saturates() {
        let mut pm = Pixmap::new(10, 10);
        pm.clear(Rgba::BLACK);
        let stops = [
            GradientStop::new(0.0, Rgba::WHITE),
            GradientStop::new(1.0, Rgba::WHITE.with_alpha(0)),
        ];
        for _ in 0..10 {
            pm.splat_blend(Vec2::new(5.0, 5.0), 4.0, &stops, BlendMode::Additive);
        }
        let c = pm.pixel(5, 5).unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
    }

    #[test]
    fn splat_center_brighter_than_rim() {
        let mut pm = Pixmap::new(20, 20);
        pm.clear(Rgba::BLACK);
        let stops = [
            GradientStop::new(0.0, Rgba::INDIGO),
            GradientStop::new(1.0, Rgba::INDIGO.with_alpha(0)),
        ];
        pm.splat(Vec2::new(10.0, 10.0), 8.0, &stops);
        let center = pm.pixel(10, 10).unwrap();
        let rim = pm.pixel(16, 10).unwrap();
        assert!(center.b > rim.b);
    }

    #[test]
    fn multiply_blit_darkens() {
        let mut main = Pixmap::new(4, 4);
        main.clear(Rgba::new(200, 200, 200, 255));
        let mut light = Pixmap::new(4, 4);
        light.clear(Rgba::new(50, 50, 50, 255));
        main.blit(&light, BlendMode::Multiply, 1.0);
        let c = main.pixel(2, 2).unwrap();
        assert!(c.r < 200, "multiply should darken, got {}", c.r);
    }

    #[test]
    fn screen_blit_lightens() {
        let mut main = Pixmap::new(4, 4);
        main.clear(Rgba::new(50, 50, 50, 255));
        let mut light = Pixmap::new(4, 4);
        light.clear(Rgba::new(200, 200, 200, 255));
        main.blit(&light, BlendMode::Screen, 1.0);
        let c = main.pixel(2, 2).unwrap();
        assert!(c.r > 50, "screen should lighten, got {}", c.r);
    }

    #[test]
    fn blit_zero_alpha_is_noop() {
        let mut main = Pixmap::new(4, 4);
        main.clear(Rgba::new(50, 50, 50, 255));
        let mut light = Pixmap::new(4, 4);
        light.clear(Rgba::WHITE);
        main.blit(&light, BlendMode::Screen, 0.0);
        assert_eq!(main.pixel(1, 1), Some(Rgba::new(50, 50, 50, 255)));
    }

    #[test]
    fn resize_reallocates() {
        let mut pm = Pixmap::new(4, 4);
        pm.clear(Rgba::WHITE);
        pm.resize(8, 6);
        assert_eq!((pm.width(), pm.height()), (8, 6));
        assert_eq!(pm.pixel(7, 5), Some(Rgba::new(0, 0, 0, 0)));
    }

    #[test]
    fn gradient_sample_endpoints() {
        let stops = [
            GradientStop::new(0.0, Rgba::new(255, 0, 0, 255)),
            GradientStop::new(1.0, Rgba::new(0, 0, 255, 0)),
        ];
        assert_eq!(sample_gradient(&stops, 0.0), stops[0].color);
        assert_eq!(sample_gradient(&stops, 1.0), stops[1].color);
        let mid = sample_gradient(&stops, 0.5);
        assert!(mid.r > 0 && mid.b > 0);
    }
}
