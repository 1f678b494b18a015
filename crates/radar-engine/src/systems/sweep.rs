//! Angular sweep reveal: a beam rotating around the scene center shows
//! labels whose bearing is within `width` radians of it.

use std::f32::consts::{PI, TAU};

use crate::api::config::SweepConfig;
use crate::core::geometry::SceneGeometry;
use crate::core::orbit::OrbitingEntity;
use crate::renderer::color::Color;
use crate::systems::reveal::{falloff_alpha, Reveal};

/// Hue offset between consecutive catalog entries, in degrees.
const HUE_STEP: f32 = 30.0;
/// Hue drift in degrees per millisecond of wall-clock time.
const HUE_DRIFT: f64 = 0.05;

/// Wrap an angle into [0, 2π).
fn wrap(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU {
        0.0
    } else {
        a
    }
}

pub struct SweepReveal {
    /// Beam angle, always in [0, 2π).
    angle: f32,
    config: SweepConfig,
}

impl SweepReveal {
    pub fn new(config: SweepConfig) -> Self {
        Self { angle: 0.0, config }
    }

    /// Start the beam at `angle` (wrapped).
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = wrap(angle);
        self
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Rotate the beam by `ticks` steps of `rate`.
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.angle = wrap(self.angle + self.config.rate);
        }
    }

    /// Shortest circular distance between `bearing` and the beam.
    pub fn angle_diff(&self, bearing: f32) -> f32 {
        let diff = (bearing - self.angle).abs();
        if diff > PI {
            TAU - diff
        } else {
            diff
        }
    }

    /// Label colors for entity `index` at `elapsed_ms`: fill and glow.
    pub fn label_colors(index: usize, elapsed_ms: f64, alpha: f32) -> (Color, Color) {
        let hue = ((index as f64 * HUE_STEP as f64 + elapsed_ms * HUE_DRIFT) % 360.0) as f32;
        (
            Color::hsla(hue, 0.85, 0.65, alpha),
            Color::hsla(hue, 0.90, 0.70, 0.8),
        )
    }

    pub fn compute(
        &self,
        entities: &[OrbitingEntity],
        geometry: &SceneGeometry,
        elapsed_ms: f64,
        out: &mut Vec<Reveal>,
    ) {
        for (index, entity) in entities.iter().enumerate() {
            let font_px = entity.size_class().font_px();
            let diff = self.angle_diff(geometry.angle_of(entity.pos()));
            let reveal = match falloff_alpha(diff, self.config.width, self.config.falloff) {
                Some(alpha) => {
                    let (color, glow) = Self::label_colors(index, elapsed_ms, alpha);
                    Reveal {
                        index,
                        visible: true,
                        alpha,
                        font_px,
                        color,
                        glow,
                    }
                }
                None => Reveal::hidden(index, font_px),
            };
            out.push(reveal);
        }
    }
}
