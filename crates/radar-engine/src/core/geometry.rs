use glam::Vec2;

/// Logical size of the host surface plus its device-pixel ratio.
///
/// All simulation math works in logical (CSS) pixels; only the surface
/// backend multiplies by `pixel_ratio` when sizing its backing store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    /// Set the device-pixel ratio. Non-positive or non-finite ratios become 1.0.
    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = if ratio > 0.0 && ratio.is_finite() { ratio } else { 1.0 };
        self
    }

    /// Backing-store size in physical pixels, rounded down.
    pub fn physical(&self) -> (u32, u32) {
        (
            (self.width.max(0.0) * self.pixel_ratio) as u32,
            (self.height.max(0.0) * self.pixel_ratio) as u32,
        )
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Per-frame scene layout derived from the surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneGeometry {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
    /// Radius of the outermost ring. May be zero or negative on tiny surfaces.
    pub max_radius: f32,
}

impl SceneGeometry {
    /// `center = (w/2, h/2)`, `max_radius = min(w, h)/2 - inset`.
    pub fn from_size(size: SurfaceSize, inset: f32) -> Self {
        let width = size.width.max(0.0);
        let height = size.height.max(0.0);
        Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height / 2.0),
            max_radius: width.min(height) / 2.0 - inset,
        }
    }

    /// True when there is no room to draw rings, spokes or labels.
    pub fn is_degenerate(&self) -> bool {
        self.max_radius <= 0.0 || self.max_radius.is_nan()
    }

    /// Factor applied to reference-scale orbit radii.
    pub fn radius_scale(&self, reference_radius: f32) -> f32 {
        self.max_radius.max(0.0) / reference_radius
    }

    /// Polar-to-Cartesian projection around the scene center.
    pub fn project(&self, angle: f64, radius: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        self.center + Vec2::new(cos as f32, sin as f32) * radius
    }

    /// Angle of `point` around the center, normalized to [0, 2π).
    pub fn angle_of(&self, point: Vec2) -> f32 {
        let d = point - self.center;
        d.y.atan2(d.x).rem_euclid(std::f32::consts::TAU)
    }
}
