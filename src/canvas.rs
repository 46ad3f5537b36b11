use fx_core::{Rgb, Surface};
use glam::Vec2;
use std::f64::consts::TAU;
use web_sys as web;

/// [`Surface`] over a browser 2D canvas context.
pub struct CanvasSurface<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(canvas: &web::HtmlCanvasElement, ctx: &'a web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            width: canvas.width(),
            height: canvas.height(),
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) -> bool {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
    }
}

impl Surface for CanvasSurface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Option<Rgb>) {
        let (w, h) = (self.width as f64, self.height as f64);
        match color {
            Some(c) => {
                self.ctx.set_fill_style_str(&c.to_hex());
                self.ctx.fill_rect(0.0, 0.0, w, h);
            }
            None => self.ctx.clear_rect(0.0, 0.0, w, h),
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 || !self.circle_path(center, radius) {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient = match self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, radius as f64)
        {
            Ok(g) => g,
            Err(_) => return,
        };
        _ = gradient.add_color_stop(0.0, &color.to_css(alpha));
        _ = gradient.add_color_stop(1.0, "transparent");
        if !self.circle_path(center, radius) {
            return;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb, alpha: f32) {
        if width <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.ctx.set_line_width(width as f64);
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
    }
}
