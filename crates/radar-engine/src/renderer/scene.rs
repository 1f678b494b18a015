use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;

use crate::api::config::{DecorationConfig, RadarConfig, SweepConfig};
use crate::core::geometry::SceneGeometry;
use crate::core::orbit::EntityOrbitModel;
use crate::renderer::surface::{Glow, RadialGradient, Stroke, Surface, TextStyle};
use crate::renderer::theme::Theme;
use crate::systems::reveal::{Reveal, RevealEngine};

/// Ring pulse amplitude (opacity units).
const PULSE_AMPLITUDE: f32 = 0.15;
/// Ring pulse speed in radians per millisecond.
const PULSE_SPEED: f64 = 0.001;
/// Phase offset between consecutive rings.
const PULSE_PHASE: f32 = 0.5;
/// Lens handle length as a fraction of the lens radius.
const HANDLE_LENGTH: f32 = 0.35;

/// Draws one frame: decoration, directional cue, then revealed labels.
///
/// Reads the orbit model and reveal engine; never mutates either.
pub struct SceneRenderer {
    theme: Theme,
    decoration: DecorationConfig,
    wedge_span: f32,
    trail_span: f32,
    lens_radius: f32,
    /// Reused per-frame visibility buffer.
    reveals: Vec<Reveal>,
}

impl SceneRenderer {
    pub fn new(config: &RadarConfig) -> Self {
        Self::with_theme(config, Theme::for_mode(config.mode))
    }

    pub fn with_theme(config: &RadarConfig, theme: Theme) -> Self {
        let SweepConfig {
            wedge_span,
            trail_span,
            ..
        } = config.sweep;
        Self {
            theme,
            decoration: config.decoration.clone(),
            wedge_span,
            trail_span,
            lens_radius: config.lens.reveal_radius,
            reveals: Vec::new(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Visibility decisions from the most recent frame.
    pub fn last_reveals(&self) -> &[Reveal] {
        &self.reveals
    }

    pub fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        geometry: &SceneGeometry,
        model: &EntityOrbitModel,
        reveal: &RevealEngine,
        elapsed_ms: f64,
    ) {
        surface.clear(geometry.width, geometry.height);

        if geometry.is_degenerate() {
            self.reveals.clear();
            return;
        }

        self.draw_rings(surface, geometry, elapsed_ms);
        self.draw_spokes(surface, geometry);
        self.draw_cue(surface, geometry, reveal);

        reveal.compute_visibility(model.entities(), geometry, elapsed_ms, &mut self.reveals);
        self.draw_labels(surface, model);
    }

    fn draw_rings<S: Surface + ?Sized>(&self, surface: &mut S, geometry: &SceneGeometry, elapsed_ms: f64) {
        let count = self.decoration.ring_count;
        if count == 0 {
            return;
        }
        let spacing = geometry.max_radius / count as f32;
        for i in 1..=count {
            let style = self.theme.ring(i as usize - 1);
            let phase = (elapsed_ms * PULSE_SPEED) as f32 + i as f32 * PULSE_PHASE;
            let pulse = phase.sin() * PULSE_AMPLITUDE;

            let stroke = Stroke::new(
                style.base.with_alpha((style.base.a + pulse).clamp(0.0, 1.0)),
                self.theme.ring_width + pulse * 0.5,
            )
            .with_glow(style.glow, self.theme.ring_glow + pulse * 5.0);

            surface.stroke_circle(geometry.center, spacing * i as f32, &stroke);
        }
    }

    fn draw_spokes<S: Surface + ?Sized>(&self, surface: &mut S, geometry: &SceneGeometry) {
        let count = self.decoration.spoke_count;
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            let tip = geometry.center + Vec2::from_angle(angle) * geometry.max_radius;
            surface.stroke_line(geometry.center, tip, &self.theme.spoke);
        }
    }

    fn draw_cue<S: Surface + ?Sized>(&self, surface: &mut S, geometry: &SceneGeometry, reveal: &RevealEngine) {
        if let Some(angle) = reveal.sweep_angle() {
            let radius = geometry.max_radius;
            let trail = RadialGradient {
                center: geometry.center,
                inner: 0.0,
                outer: radius,
                stops: &self.theme.trail,
            };
            let wedge = RadialGradient {
                stops: &self.theme.wedge,
                ..trail
            };
            let wedge_start = angle - self.wedge_span;
            surface.fill_sector(
                geometry.center,
                radius,
                wedge_start - self.trail_span,
                wedge_start,
                &trail,
            );
            surface.fill_sector(geometry.center, radius, wedge_start, angle, &wedge);
        }

        if let Some(pos) = reveal.probe_position() {
            let radius = self.lens_radius;
            let fill = RadialGradient {
                center: pos,
                inner: 0.0,
                outer: radius,
                stops: &self.theme.lens_fill,
            };
            surface.fill_circle(pos, radius, &fill);
            surface.stroke_circle(pos, radius, &self.theme.lens_rim);

            let dir = Vec2::from_angle(FRAC_PI_4);
            let handle = Stroke {
                width: self.theme.lens_rim.width * 2.0,
                ..self.theme.lens_rim
            };
            surface.stroke_line(pos + dir * radius, pos + dir * radius * (1.0 + HANDLE_LENGTH), &handle);
        }
    }

    fn draw_labels<S: Surface + ?Sized>(&self, surface: &mut S, model: &EntityOrbitModel) {
        let entities = model.entities();
        for r in self.reveals.iter().filter(|r| r.visible) {
            let Some(entity) = entities.get(r.index) else {
                continue;
            };
            let style = TextStyle {
                font_px: r.font_px,
                family: &self.decoration.font_family,
                bold: true,
                color: r.color,
                glow: Some(Glow {
                    color: r.glow,
                    blur: self.decoration.label_glow,
                }),
            };
            surface.fill_text(entity.label(), entity.pos(), &style);
        }
    }
}
