use crate::constants::{BLOOM_FILTER, COMPOSITE_NORMAL, COMPOSITE_SCREEN, NO_FILTER};
use crate::core::{Blend, ColorStop, DrawStyle, Paint, Surface};
use anyhow::anyhow;
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// [`Surface`] over a canvas 2D context. Every draw is wrapped in
/// save/restore so alpha and composite mode never leak between entities.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn begin(&self, style: DrawStyle) {
        self.ctx.save();
        self.ctx.set_global_alpha(style.alpha.clamp(0.0, 1.0) as f64);
        let op = match style.blend {
            Blend::Normal => COMPOSITE_NORMAL,
            Blend::Screen => COMPOSITE_SCREEN,
        };
        _ = self.ctx.set_global_composite_operation(op);
    }

    fn apply_paint(&self, paint: &Paint) {
        match paint {
            Paint::Solid(c) => self.ctx.set_fill_style_str(&c.to_css()),
            Paint::Linear { from, to, stops } => {
                let g = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                add_stops(&g, stops);
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                match self
                    .ctx
                    .create_radial_gradient(x, y, 0.0, x, y, radius.max(0.0) as f64)
                {
                    Ok(g) => {
                        add_stops(&g, stops);
                        self.ctx.set_fill_style_canvas_gradient(&g);
                    }
                    Err(_) => self.ctx.set_fill_style_str(&stops[0].color.to_css()),
                }
            }
        }
    }
}

fn add_stops(g: &web::CanvasGradient, stops: &[ColorStop]) {
    for s in stops {
        _ = g.add_color_stop(s.offset, &s.color.to_css());
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, style: DrawStyle) {
        self.begin(style);
        self.apply_paint(paint);
        self.ctx.begin_path();
        _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            TAU,
        );
        self.ctx.fill();
        self.ctx.restore();
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], paint: &Paint, style: DrawStyle) {
        self.begin(style);
        self.apply_paint(paint);
        self.ctx.begin_path();
        self.ctx.move_to(points[0].x as f64, points[0].y as f64);
        self.ctx.line_to(points[1].x as f64, points[1].y as f64);
        self.ctx.line_to(points[2].x as f64, points[2].y as f64);
        self.ctx.close_path();
        self.ctx.fill();
        self.ctx.restore();
    }
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
    transparent: bool,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    let raw = if transparent {
        let opts = js_sys::Object::new();
        _ = js_sys::Reflect::set(&opts, &JsValue::from_str("alpha"), &JsValue::TRUE);
        canvas.get_context_with_context_options("2d", &opts)
    } else {
        canvas.get_context("2d")
    };
    let ctx = raw
        .map_err(|e| anyhow!("getContext failed: {:?}", e))?
        .ok_or_else(|| anyhow!("missing 2d context"))?;
    ctx.dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("not a 2d context: {:?}", e))
}

/// Entities render into a hidden canvas, which is then blitted onto the
/// visible one twice: blurred, then crisp, for a cheap bloom.
pub struct Compositor {
    visible: web::CanvasRenderingContext2d,
    offscreen_canvas: web::HtmlCanvasElement,
    offscreen: CanvasSurface,
    size: Vec2,
}

impl Compositor {
    pub fn new(
        document: &web::Document,
        canvas: &web::HtmlCanvasElement,
        size: Vec2,
    ) -> anyhow::Result<Self> {
        let visible = context_2d(canvas, false)?;
        let offscreen_canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow!("create canvas: {:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow!("{:?}", e))?;
        crate::dom::sync_canvas_size(&offscreen_canvas, size);
        let offscreen = CanvasSurface::new(context_2d(&offscreen_canvas, true)?);
        Ok(Self {
            visible,
            offscreen_canvas,
            offscreen,
            size,
        })
    }

    #[inline]
    pub fn surface(&mut self) -> &mut CanvasSurface {
        &mut self.offscreen
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
        crate::dom::sync_canvas_size(&self.offscreen_canvas, size);
    }

    pub fn present(&self) {
        let (w, h) = (self.size.x as f64, self.size.y as f64);
        self.visible.clear_rect(0.0, 0.0, w, h);
        self.visible.set_filter(BLOOM_FILTER);
        _ = self
            .visible
            .draw_image_with_html_canvas_element(&self.offscreen_canvas, 0.0, 0.0);
        self.visible.set_filter(NO_FILTER);
        _ = self
            .visible
            .draw_image_with_html_canvas_element(&self.offscreen_canvas, 0.0, 0.0);
    }
}
