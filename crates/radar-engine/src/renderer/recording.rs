//! Headless surface that records draw calls instead of rasterizing them.
//! Used to assert renderer and scheduler behavior without a browser.

use glam::Vec2;

use crate::core::geometry::SurfaceSize;
use crate::renderer::color::Color;
use crate::renderer::surface::{ColorStop, Glow, RadialGradient, Stroke, Surface, TextStyle};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Configure(SurfaceSize),
    Clear { width: f32, height: f32 },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke },
    StrokeLine { from: Vec2, to: Vec2, stroke: Stroke },
    FillSector { center: Vec2, radius: f32, start: f32, end: f32, stops: Vec<ColorStop> },
    FillCircle { center: Vec2, radius: f32, stops: Vec<ColorStop> },
    Text { text: String, pos: Vec2, font: String, color: Color, glow: Option<Glow> },
}

pub struct RecordingSurface {
    size: SurfaceSize,
    configured: Option<SurfaceSize>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            configured: None,
            commands: Vec::new(),
        }
    }

    /// Simulate the host element changing size. The scheduler still has to be
    /// told via `notify_resize`.
    pub fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    /// Size last passed to `configure`.
    pub fn configured(&self) -> Option<SurfaceSize> {
        self.configured
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Label texts in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn measure(&self) -> SurfaceSize {
        self.size
    }

    fn configure(&mut self, size: SurfaceSize) {
        self.configured = Some(size);
        self.commands.push(DrawCommand::Configure(size));
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn fill_sector(&mut self, center: Vec2, radius: f32, start: f32, end: f32, fill: &RadialGradient) {
        self.commands.push(DrawCommand::FillSector {
            center,
            radius,
            start,
            end,
            stops: fill.stops.to_vec(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &RadialGradient) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            stops: fill.stops.to_vec(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: style.css_font(),
            color: style.color,
            glow: style.glow,
        });
    }
}
