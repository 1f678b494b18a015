//! Lyon-backed surface for GPU hosts.
//!
//! Tessellates every draw call into a flat triangle list of `VectorVertex`
//! (position + RGBA) that a host can upload as-is. Gradients become
//! per-vertex colors; glows become a wider translucent stroke underneath.
//! Text cannot be tessellated here, so labels are collected as
//! `LabelInstance`s for the host's own text pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, StrokeOptions,
    StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::core::geometry::SurfaceSize;
use crate::renderer::color::Color;
use crate::renderer::surface::{Glow, RadialGradient, Stroke, Surface, TextStyle};

/// Tessellation tolerance in logical pixels.
const TOLERANCE: f32 = 0.5;
/// Max angular step when flattening arcs, in radians.
const ARC_STEP: f32 = 0.05;
/// Glow halo opacity relative to the glow color.
const GLOW_OPACITY: f32 = 0.35;

/// Per-vertex data: 6 floats = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(pos: lyon::math::Point, color: Color) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// A label the host should draw with its own text renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelInstance {
    pub text: String,
    pub pos: Vec2,
    pub font: String,
    pub font_px: f32,
    pub color: Color,
    pub glow: Option<Glow>,
}

/// Colors each vertex from a flat color or a radial gradient.
enum Paint<'a> {
    Solid(Color),
    Radial(&'a RadialGradient<'a>),
}

impl Paint<'_> {
    fn color_at(&self, pos: lyon::math::Point) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Radial(g) => {
                let d = Vec2::new(pos.x, pos.y).distance(g.center);
                let span = (g.outer - g.inner).max(f32::EPSILON);
                g.sample((d - g.inner) / span)
            }
        }
    }
}

impl FillVertexConstructor<VectorVertex> for Paint<'_> {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.color_at(vertex.position()))
    }
}

impl StrokeVertexConstructor<VectorVertex> for Paint<'_> {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.color_at(vertex.position()))
    }
}

pub struct TessellatedSurface {
    size: SurfaceSize,
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
    labels: Vec<LabelInstance>,
}

impl TessellatedSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
            labels: Vec::new(),
        }
    }

    /// Host reports a new element size. Applied by the scheduler through
    /// `measure`/`configure`.
    pub fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex data ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn labels(&self) -> &[LabelInstance] {
        &self.labels
    }

    /// Expand indexed geometry into the flat triangle list.
    fn flush_geometry(&mut self) {
        let VertexBuffers { vertices, indices } = &mut self.geometry;
        self.vertices
            .extend(indices.iter().map(|&i| vertices[i as usize]));
        vertices.clear();
        indices.clear();
    }

    fn fill_path(&mut self, path: &Path, paint: Paint) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, paint),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::debug!("fill tessellation failed: {e:?}"),
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, paint: Paint) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, paint),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::debug!("stroke tessellation failed: {e:?}"),
        }
    }

    /// Stroke with an optional halo drawn first.
    fn stroke_with_glow(&mut self, path: &Path, stroke: &Stroke) {
        if let Some(glow) = stroke.glow {
            let halo = glow.color.fade(GLOW_OPACITY);
            self.stroke_path(path, stroke.width + glow.blur * 0.5, Paint::Solid(halo));
        }
        if stroke.width > 0.0 {
            self.stroke_path(path, stroke.width, Paint::Solid(stroke.color));
        }
    }

    /// Annular sector between radii `r0` and `r1`, flattened to a polygon.
    fn band(center: Vec2, r0: f32, r1: f32, start: f32, end: f32) -> Path {
        let segments = ((end - start).abs() / ARC_STEP).ceil().max(1.0) as usize;
        let arc = |r: f32, i: usize| {
            let a = start + (end - start) * i as f32 / segments as f32;
            let p = center + Vec2::from_angle(a) * r;
            point(p.x, p.y)
        };

        let mut builder = Path::builder();
        builder.begin(arc(r1, 0));
        for i in 1..=segments {
            builder.line_to(arc(r1, i));
        }
        if r0 > 0.0 {
            for i in (0..=segments).rev() {
                builder.line_to(arc(r0, i));
            }
        } else {
            builder.line_to(point(center.x, center.y));
        }
        builder.close();
        builder.build()
    }

    /// Fill a sector band by band so every gradient stop lands on a vertex ring.
    fn fill_gradient_sector(&mut self, center: Vec2, radius: f32, start: f32, end: f32, fill: &RadialGradient) {
        if radius <= 0.0 || start == end {
            return;
        }
        let mut offsets: Vec<f32> = fill
            .stops
            .iter()
            .map(|s| s.offset.clamp(0.0, 1.0))
            .collect();
        offsets.insert(0, 0.0);
        offsets.push(1.0);
        offsets.dedup();

        for pair in offsets.windows(2) {
            let (r0, r1) = (pair[0] * radius, pair[1] * radius);
            if r1 <= r0 {
                continue;
            }
            let path = Self::band(center, r0, r1, start, end);
            self.fill_path(&path, Paint::Radial(fill));
        }
    }
}

impl Surface for TessellatedSurface {
    fn measure(&self) -> SurfaceSize {
        self.size
    }

    fn configure(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.vertices.clear();
        self.labels.clear();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();
        self.stroke_with_glow(&path, stroke);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.line_to(point(to.x, to.y));
        builder.end(false);
        let path = builder.build();
        self.stroke_with_glow(&path, stroke);
    }

    fn fill_sector(&mut self, center: Vec2, radius: f32, start: f32, end: f32, fill: &RadialGradient) {
        self.fill_gradient_sector(center, radius, start, end, fill);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &RadialGradient) {
        // Two halves; a single closed ring would fold onto its own seam.
        let half = std::f32::consts::PI;
        self.fill_gradient_sector(center, radius, 0.0, half, fill);
        self.fill_gradient_sector(center, radius, half, 2.0 * half, fill);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.labels.push(LabelInstance {
            text: text.to_string(),
            pos,
            font: style.css_font(),
            font_px: style.font_px,
            color: style.color,
            glow: style.glow,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::ColorStop;
    use std::mem::size_of;

    const STOPS: [ColorStop; 2] = [
        ColorStop::new(0.0, Color::new(1.0, 0.0, 0.0, 1.0)),
        ColorStop::new(1.0, Color::new(0.0, 0.0, 1.0, 0.0)),
    ];

    fn surface() -> TessellatedSurface {
        TessellatedSurface::new(SurfaceSize::new(400.0, 400.0))
    }

    #[test]
    fn vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn line_produces_triangles() {
        let mut s = surface();
        s.stroke_line(Vec2::ZERO, Vec2::new(100.0, 0.0), &Stroke::new(Color::WHITE, 2.0));
        assert!(s.vertex_count() > 0);
        assert_eq!(s.vertex_count() % 3, 0);
        assert_eq!(s.as_bytes().len(), s.vertex_count() * VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn glow_adds_a_halo_pass() {
        let stroke = Stroke::new(Color::WHITE, 2.0);
        let mut plain = surface();
        plain.stroke_circle(Vec2::splat(200.0), 50.0, &stroke);
        let mut glowing = surface();
        glowing.stroke_circle(Vec2::splat(200.0), 50.0, &stroke.with_glow(Color::WHITE, 8.0));
        assert!(glowing.vertex_count() > plain.vertex_count());
    }

    #[test]
    fn sector_colors_follow_gradient() {
        let mut s = surface();
        let center = Vec2::splat(200.0);
        let g = RadialGradient {
            center,
            inner: 0.0,
            outer: 100.0,
            stops: &STOPS,
        };
        s.fill_sector(center, 100.0, 0.0, 0.5, &g);
        assert!(s.vertex_count() > 0);
        for v in s.vertices() {
            let d = Vec2::new(v.x, v.y).distance(center);
            let expected = g.sample(d / 100.0);
            assert!((v.a - expected.a).abs() < 1e-3, "alpha {} at distance {d}", v.a);
        }
    }

    #[test]
    fn full_circle_and_clear() {
        let mut s = surface();
        let g = RadialGradient {
            center: Vec2::splat(200.0),
            inner: 0.0,
            outer: 70.0,
            stops: &STOPS,
        };
        s.fill_circle(Vec2::splat(200.0), 70.0, &g);
        s.fill_text("任天堂", Vec2::splat(200.0), &TextStyle {
            font_px: 18.0,
            family: "sans-serif",
            bold: true,
            color: Color::WHITE,
            glow: None,
        });
        assert!(s.vertex_count() > 0);
        assert_eq!(s.labels()[0].text, "任天堂");
        assert_eq!(s.labels()[0].font, "bold 18px sans-serif");

        s.clear(400.0, 400.0);
        assert_eq!(s.vertex_count(), 0);
        assert!(s.labels().is_empty());
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut s = surface();
        let g = RadialGradient {
            center: Vec2::ZERO,
            inner: 0.0,
            outer: 10.0,
            stops: &STOPS,
        };
        s.fill_sector(Vec2::ZERO, 0.0, 0.0, 1.0, &g);
        s.fill_sector(Vec2::ZERO, 10.0, 1.0, 1.0, &g);
        s.stroke_circle(Vec2::ZERO, -1.0, &Stroke::new(Color::WHITE, 1.0));
        assert_eq!(s.vertex_count(), 0);
    }
}
