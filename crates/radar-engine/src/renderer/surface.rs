//! Drawing surface contract.
//!
//! The engine never touches pixel buffers. Hosts implement `Surface` over
//! whatever they draw with (Canvas2D in the browser, a tessellator for GPU
//! hosts, a command recorder in tests). Coordinates are logical pixels; the
//! implementation owns the device-pixel-ratio transform.

use glam::Vec2;

use crate::core::geometry::SurfaceSize;
use crate::renderer::color::Color;

/// Soft shadow drawn behind a stroke or glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// Line style for circles and segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub glow: Option<Glow>,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            glow: None,
        }
    }

    pub fn with_glow(mut self, color: Color, blur: f32) -> Self {
        self.glow = Some(Glow { color, blur });
        self
    }
}

/// Gradient stop; `offset` runs 0.0 (inner) to 1.0 (outer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Radial gradient between two concentric circles.
#[derive(Debug, Clone, Copy)]
pub struct RadialGradient<'a> {
    pub center: Vec2,
    pub inner: f32,
    pub outer: f32,
    pub stops: &'a [ColorStop],
}

impl RadialGradient<'_> {
    /// Color at `offset` (0..1), linearly interpolated between stops.
    pub fn sample(&self, offset: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if offset <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if offset <= b.offset {
                let span = (b.offset - a.offset).max(f32::EPSILON);
                let t = (offset - a.offset) / span;
                return Color::new(
                    a.color.r + (b.color.r - a.color.r) * t,
                    a.color.g + (b.color.g - a.color.g) * t,
                    a.color.b + (b.color.b - a.color.b) * t,
                    a.color.a + (b.color.a - a.color.a) * t,
                );
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

/// Label text style. Text is always centered on its anchor point.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub font_px: f32,
    pub family: &'a str,
    pub bold: bool,
    /// Fill color including alpha.
    pub color: Color,
    pub glow: Option<Glow>,
}

impl TextStyle<'_> {
    /// CSS font shorthand, e.g. `bold 24px 'Noto Sans JP', sans-serif`.
    pub fn css_font(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{weight}{}px {}", self.font_px, self.family)
    }
}

/// A 2D drawable rectangle owned by one scheduler.
pub trait Surface {
    /// Current logical size and device-pixel ratio as reported by the host.
    fn measure(&self) -> SurfaceSize;

    /// Size the backing store for `size` and set the logical-to-device
    /// transform. Called on activation and on every applied resize.
    fn configure(&mut self, size: SurfaceSize);

    /// Clear the whole logical area.
    fn clear(&mut self, width: f32, height: f32);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);

    /// Fill the pie slice from `start` to `end` radians (clockwise in screen space).
    fn fill_sector(&mut self, center: Vec2, radius: f32, start: f32, end: f32, fill: &RadialGradient);

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &RadialGradient);

    /// Draw `text` centered on `pos`.
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}
