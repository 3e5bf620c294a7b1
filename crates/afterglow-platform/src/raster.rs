use afterglow_core::{Canvas, CircleMark, ColorToken, Viewport};

/// Software canvas over premultiplied BGRA pixels, top row first. The layout
/// matches a 32-bit top-down DIB so desktop overlays can copy it verbatim.
#[derive(Debug, Clone, Default)]
pub struct PixelCanvas {
    viewport: Viewport,
    pixels: Vec<u32>,
}

impl PixelCanvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pixels: vec![0; viewport.area()],
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.pixels.clear();
        self.pixels.resize(viewport.area(), 0);
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Premultiplied `[a, r, g, b]` at `(x, y)`, or `None` outside the canvas.
    pub fn argb(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        let pixel = self.pixels[self.index(x, y)];
        Some([(pixel >> 24) as u8, (pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.viewport.width as usize + x as usize
    }
}

impl Canvas for PixelCanvas {
    fn clear(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.resize(viewport);
        } else {
            self.pixels.fill(0);
        }
    }

    fn fill_circle(&mut self, mark: &CircleMark) {
        let Viewport { width, height } = self.viewport;
        if width == 0 || height == 0 || mark.radius <= 0.0 || mark.alpha <= 0.0 {
            return;
        }
        let reach = mark.radius + mark.blur.max(0.0) + 1.0;
        let x0 = (mark.center.x - reach).floor().max(0.0) as u32;
        let y0 = (mark.center.y - reach).floor().max(0.0) as u32;
        let x1 = ((mark.center.x + reach).ceil().max(0.0) as u32).min(width);
        let y1 = ((mark.center.y + reach).ceil().max(0.0) as u32).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - mark.center.x;
                let dy = y as f32 + 0.5 - mark.center.y;
                let distance = (dx * dx + dy * dy).sqrt();
                let index = self.index(x, y);
                let mut pixel = self.pixels[index];

                if mark.blur > 0.0 {
                    let falloff = 1.0 - (distance - mark.radius).max(0.0) / mark.blur;
                    if falloff > 0.0 {
                        let alpha = mark.glow.alpha * falloff * falloff * mark.alpha;
                        pixel = blend(pixel, mark.glow.color, alpha);
                    }
                }

                let coverage = (mark.radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    pixel = blend(pixel, mark.fill.color, mark.fill.alpha * mark.alpha * coverage);
                }
                self.pixels[index] = pixel;
            }
        }
    }
}

/// Source-over of a flat color onto a premultiplied pixel.
fn blend(dst: u32, color: ColorToken, alpha: f32) -> u32 {
    if alpha <= 0.0 {
        return dst;
    }
    let alpha = alpha.min(1.0);
    let keep = 1.0 - alpha;
    let mix = |src: f32, shift: u32| {
        let below = ((dst >> shift) & 0xff) as f32;
        ((src * alpha + below * keep).round().min(255.0) as u32) << shift
    };
    mix(255.0, 24) | mix(color.r() as f32, 16) | mix(color.g() as f32, 8) | mix(color.b() as f32, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use afterglow_core::Vec2;

    const INDIGO: ColorToken = ColorToken::new(99, 102, 241);

    fn mark(center: Vec2, radius: f32) -> CircleMark {
        CircleMark {
            center,
            radius,
            alpha: 1.0,
            fill: INDIGO.with_alpha(1.0),
            glow: INDIGO.with_alpha(0.5),
            blur: 4.0,
        }
    }

    #[test]
    fn opaque_core_takes_the_fill_color() {
        let mut canvas = PixelCanvas::new(Viewport::new(32, 32));
        canvas.fill_circle(&mark(Vec2::new(16.0, 16.0), 5.0));
        assert_eq!(canvas.argb(16, 16), Some([255, 99, 102, 241]));
        assert_eq!(canvas.argb(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn glow_fades_outside_the_disc() {
        let mut canvas = PixelCanvas::new(Viewport::new(32, 32));
        canvas.fill_circle(&mark(Vec2::new(16.0, 16.0), 5.0));
        let [near, ..] = canvas.argb(22, 16).unwrap();
        let [far, ..] = canvas.argb(23, 16).unwrap();
        assert!(near > far && far > 0 && near < 255, "near {near} far {far}");
        assert_eq!(canvas.argb(26, 16).unwrap()[0], 0);
    }

    #[test]
    fn global_alpha_scales_the_mark() {
        let mut canvas = PixelCanvas::new(Viewport::new(16, 16));
        let faded = CircleMark {
            alpha: 0.5,
            fill: INDIGO.with_alpha(0.5),
            blur: 0.0,
            ..mark(Vec2::new(8.0, 8.0), 4.0)
        };
        canvas.fill_circle(&faded);
        assert_eq!(canvas.argb(8, 8).unwrap()[0], 64);
    }

    #[test]
    fn clips_marks_at_the_edges() {
        let mut canvas = PixelCanvas::new(Viewport::new(8, 8));
        canvas.fill_circle(&mark(Vec2::new(-3.0, -3.0), 5.0));
        canvas.fill_circle(&mark(Vec2::new(100.0, 100.0), 5.0));
        assert!(canvas.argb(0, 0).unwrap()[0] > 0);
        assert_eq!(canvas.argb(7, 7).unwrap()[0], 0);
    }

    #[test]
    fn clear_wipes_and_tracks_the_viewport() {
        let mut canvas = PixelCanvas::new(Viewport::new(8, 8));
        canvas.fill_circle(&mark(Vec2::new(4.0, 4.0), 2.0));
        canvas.clear(Viewport::new(8, 8));
        assert!(canvas.pixels().iter().all(|&p| p == 0));
        canvas.clear(Viewport::new(4, 2));
        assert_eq!(canvas.pixels().len(), 8);
        assert_eq!(canvas.as_bytes().len(), 32);
    }
}
