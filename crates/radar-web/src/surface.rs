use std::f64::consts::TAU;

use glam::Vec2;
use radar_engine::{Glow, RadarError, RadialGradient, Stroke, Surface, SurfaceSize, TextStyle};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas2D implementation of the engine's `Surface`.
///
/// Logical sizes come from the element's bounding box and the window's
/// `devicePixelRatio`; the backing store is sized in physical pixels and the
/// context carries an absolute `dpr` transform, so repeated resizes never
/// compound the scale.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, RadarError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| RadarError::SurfaceUnavailable(format!("getContext failed: {e:?}")))?
            .ok_or_else(|| RadarError::SurfaceUnavailable("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RadarError::SurfaceUnavailable("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    /// Look up `<canvas id=...>` in the current document.
    pub fn from_canvas_id(id: &str) -> Result<Self, RadarError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| RadarError::SurfaceUnavailable("no document".into()))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| RadarError::SurfaceUnavailable(format!("no element #{id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RadarError::SurfaceUnavailable(format!("#{id} is not a canvas")))?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_glow(&self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_color(&glow.color.to_css());
                self.ctx.set_shadow_blur(glow.blur as f64);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }

    fn gradient(&self, fill: &RadialGradient) -> Option<CanvasGradient> {
        let (x, y) = (fill.center.x as f64, fill.center.y as f64);
        let gradient = self
            .ctx
            .create_radial_gradient(x, y, fill.inner as f64, x, y, fill.outer as f64)
            .map_err(|e| log::debug!("createRadialGradient failed: {e:?}"))
            .ok()?;
        for stop in fill.stops {
            // Offsets outside [0, 1] throw; clamp instead of dropping the fill.
            check(
                gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css()),
                "addColorStop",
            );
        }
        Some(gradient)
    }
}

fn check(result: Result<(), JsValue>, what: &str) {
    if let Err(e) = result {
        log::debug!("{what} failed: {e:?}");
    }
}

impl Surface for CanvasSurface {
    fn measure(&self) -> SurfaceSize {
        let rect = self.canvas.get_bounding_client_rect();
        let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        SurfaceSize::new(rect.width() as f32, rect.height() as f32).with_pixel_ratio(ratio as f32)
    }

    fn configure(&mut self, size: SurfaceSize) {
        let (w, h) = size.physical();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let dpr = size.pixel_ratio as f64;
        check(self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0), "setTransform");
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        check(
            self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU),
            "arc",
        );
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        self.set_glow(stroke.glow);
        self.ctx.stroke();
        self.set_glow(None);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        self.set_glow(stroke.glow);
        self.ctx.stroke();
        self.set_glow(None);
    }

    fn fill_sector(&mut self, center: Vec2, radius: f32, start: f32, end: f32, fill: &RadialGradient) {
        if radius <= 0.0 {
            return;
        }
        let Some(gradient) = self.gradient(fill) else {
            return;
        };
        let (x, y) = (center.x as f64, center.y as f64);
        self.ctx.begin_path();
        self.ctx.move_to(x, y);
        check(self.ctx.arc(x, y, radius as f64, start as f64, end as f64), "arc");
        self.ctx.close_path();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &RadialGradient) {
        if radius <= 0.0 {
            return;
        }
        let Some(gradient) = self.gradient(fill) else {
            return;
        };
        self.ctx.begin_path();
        check(
            self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU),
            "arc",
        );
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.set_glow(style.glow);
        check(self.ctx.fill_text(text, pos.x as f64, pos.y as f64), "fillText");
        self.set_glow(None);
    }
}
