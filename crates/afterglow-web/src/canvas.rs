use std::f64::consts::TAU;

use afterglow_core::{Canvas, CircleMark, Viewport};
use web_sys::CanvasRenderingContext2d;

/// `Canvas` over a 2D rendering context. Glow is the context's shadow.
pub struct Canvas2d {
    context: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }
}

impl Canvas for Canvas2d {
    fn clear(&mut self, viewport: Viewport) {
        self.context
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn fill_circle(&mut self, mark: &CircleMark) {
        let ctx = &self.context;
        ctx.save();
        ctx.set_global_alpha(mark.alpha as f64);
        ctx.set_fill_style_str(&mark.fill.to_css());
        ctx.set_shadow_blur(mark.blur as f64);
        ctx.set_shadow_color(&mark.glow.to_css());
        ctx.begin_path();
        if ctx
            .arc(
                mark.center.x as f64,
                mark.center.y as f64,
                mark.radius.max(0.0) as f64,
                0.0,
                TAU,
            )
            .is_ok()
        {
            ctx.fill();
        }
        ctx.restore();
    }
}
