//! Reveal strategies: decide per entity per frame whether its label shows,
//! and with what alpha, size and color.
//!
//! The two strategies are mutually exclusive configurations of one scene.
//! `RevealEngine` picks one at construction and dispatches by `match`.

use glam::Vec2;

use crate::api::config::RadarConfig;
use crate::api::types::RevealMode;
use crate::core::geometry::SceneGeometry;
use crate::core::orbit::OrbitingEntity;
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::systems::lens::LensReveal;
use crate::systems::sweep::SweepReveal;

/// Visibility decision for one entity in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    /// Index into the orbit model's entity list (catalog order).
    pub index: usize,
    pub visible: bool,
    /// Label opacity. Zero when hidden.
    pub alpha: f32,
    pub font_px: f32,
    /// Fill color, alpha already applied.
    pub color: Color,
    /// Glow (shadow) color.
    pub glow: Color,
}

impl Reveal {
    pub(crate) fn hidden(index: usize, font_px: f32) -> Self {
        Self {
            index,
            visible: false,
            alpha: 0.0,
            font_px,
            color: Color::TRANSPARENT,
            glow: Color::TRANSPARENT,
        }
    }
}

/// Shared falloff rule: visible iff `distance < threshold` (strict), with
/// alpha `1 - (distance / threshold) * falloff`.
pub fn falloff_alpha(distance: f32, threshold: f32, falloff: f32) -> Option<f32> {
    if distance < threshold {
        Some(1.0 - (distance / threshold) * falloff)
    } else {
        None
    }
}

/// The active reveal strategy of a radar instance.
pub enum RevealEngine {
    Sweep(SweepReveal),
    Lens(LensReveal),
}

impl RevealEngine {
    /// Build the strategy named by `config.mode`.
    pub fn new(config: &RadarConfig, rng: Rng) -> Self {
        match config.mode {
            RevealMode::Sweep => RevealEngine::Sweep(SweepReveal::new(config.sweep.clone())),
            RevealMode::Lens => RevealEngine::Lens(LensReveal::new(config.lens.clone(), rng)),
        }
    }

    pub fn mode(&self) -> RevealMode {
        match self {
            RevealEngine::Sweep(_) => RevealMode::Sweep,
            RevealEngine::Lens(_) => RevealMode::Lens,
        }
    }

    /// Called when the scheduler activates with a measured surface.
    pub fn on_activate(&mut self, geometry: &SceneGeometry) {
        if let RevealEngine::Lens(lens) = self {
            lens.place(geometry.width, geometry.height);
        }
    }

    /// Advance strategy state by `ticks` simulation ticks.
    pub fn step(&mut self, ticks: u32, geometry: &SceneGeometry, elapsed_secs: f32) {
        match self {
            RevealEngine::Sweep(sweep) => sweep.advance(ticks),
            RevealEngine::Lens(lens) => {
                for _ in 0..ticks {
                    lens.step(geometry.width, geometry.height, elapsed_secs);
                }
            }
        }
    }

    /// Fill `out` with one `Reveal` per entity, in entity order.
    pub fn compute_visibility(
        &self,
        entities: &[OrbitingEntity],
        geometry: &SceneGeometry,
        elapsed_ms: f64,
        out: &mut Vec<Reveal>,
    ) {
        out.clear();
        match self {
            RevealEngine::Sweep(sweep) => sweep.compute(entities, geometry, elapsed_ms, out),
            RevealEngine::Lens(lens) => lens.compute(entities, out),
        }
    }

    /// Lens center for the renderer. `None` in sweep mode.
    pub fn probe_position(&self) -> Option<Vec2> {
        match self {
            RevealEngine::Sweep(_) => None,
            RevealEngine::Lens(lens) => Some(lens.position()),
        }
    }

    /// Current beam angle. `None` in lens mode.
    pub fn sweep_angle(&self) -> Option<f32> {
        match self {
            RevealEngine::Sweep(sweep) => Some(sweep.angle()),
            RevealEngine::Lens(_) => None,
        }
    }
}
