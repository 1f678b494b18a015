use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::api::types::RevealMode;
use crate::error::RadarError;

/// Configuration for one radar instance, provided by the host.
///
/// Every field has a default matching the shipped widget, so a host can pass
/// a partial JSON object and only override what it cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Reveal strategy. Chosen once, never switched at runtime.
    pub mode: RevealMode,
    /// RNG seed. `None` lets the host pick one (e.g. from the wall clock).
    pub seed: Option<u64>,
    /// Fixed simulation rate. `None` runs exactly one tick per display frame.
    pub ticks_per_second: Option<f32>,
    pub orbit: OrbitConfig,
    pub sweep: SweepConfig,
    pub lens: LensConfig,
    pub decoration: DecorationConfig,
}

/// Orbit parameters for catalog entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Angle added to every entity per tick, in radians (default: 0.003).
    pub angular_step: f64,
    /// Lower bound of the randomized orbit radius at reference scale (default: 80).
    pub radius_min: f32,
    /// Exclusive upper bound of the orbit radius at reference scale (default: 200).
    pub radius_max: f32,
    /// `maxRadius` at which orbit radii are drawn 1:1 (default: 200).
    pub reference_radius: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            angular_step: 0.003,
            radius_min: 80.0,
            radius_max: 200.0,
            reference_radius: 200.0,
        }
    }
}

/// Angular sweep reveal parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Beam rotation per tick in radians (default: 0.02).
    pub rate: f32,
    /// Half-width of the reveal cone in radians (default: 1.2).
    pub width: f32,
    /// Alpha lost at the edge of the cone (default: 0.5).
    pub falloff: f32,
    /// Angular span of the bright wedge behind the beam (default: 0.5).
    pub wedge_span: f32,
    /// Angular span of the faint trail behind the wedge (default: 1.0).
    pub trail_span: f32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            rate: 0.02,
            width: 1.2,
            falloff: 0.5,
            wedge_span: 0.5,
            trail_span: 1.0,
        }
    }
}

/// Wandering lens reveal parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Reveal distance in pixels (default: 70).
    pub reveal_radius: f32,
    /// Alpha lost at the reveal radius (default: 0.3).
    pub falloff: f32,
    /// Speed cap in pixels per tick (default: 2).
    pub max_speed: f32,
    /// Distance the lens center keeps from every surface edge (default: 40).
    pub margin: f32,
    /// Damping factor range applied on a wall bounce (default: [0.9, 1.1)).
    pub damping_min: f32,
    pub damping_max: f32,
    /// Per-tick probability of a random velocity nudge (default: 0.02).
    pub perturb_chance: f32,
    /// Maximum nudge per velocity component in pixels per tick (default: 0.3).
    pub perturb_strength: f32,
    /// Amplitude of the sinusoidal wander in pixels per tick (default: 0.3).
    pub wander_amplitude: f32,
    /// Wander angular frequency in radians per second (default: 0.7).
    pub wander_frequency: f32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            reveal_radius: 70.0,
            falloff: 0.3,
            max_speed: 2.0,
            margin: 40.0,
            damping_min: 0.9,
            damping_max: 1.1,
            perturb_chance: 0.02,
            perturb_strength: 0.3,
            wander_amplitude: 0.3,
            wander_frequency: 0.7,
        }
    }
}

/// Static decoration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Gap between the outer ring and the nearest surface edge (default: 20).
    pub inset: f32,
    /// Number of concentric rings (default: 3).
    pub ring_count: u32,
    /// Number of radial spokes (default: 8).
    pub spoke_count: u32,
    /// CSS font family for labels.
    pub font_family: String,
    /// Label glow blur radius in pixels (default: 15).
    pub label_glow: f32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            inset: 20.0,
            ring_count: 3,
            spoke_count: 8,
            font_family: "'Noto Sans JP', sans-serif".to_string(),
            label_glow: 15.0,
        }
    }
}

impl RadarConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, RadarError> {
        let config: RadarConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Start from defaults with the given reveal mode.
    pub fn with_mode(mode: RevealMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), RadarError> {
        let o = &self.orbit;
        if !(o.angular_step > 0.0 && o.angular_step.is_finite()) {
            return invalid("orbit.angular_step must be positive");
        }
        if !(o.radius_min >= 0.0 && o.radius_min < o.radius_max && o.radius_max.is_finite()) {
            return invalid("orbit radius range must satisfy 0 <= radius_min < radius_max");
        }
        if !(o.reference_radius > 0.0 && o.reference_radius.is_finite()) {
            return invalid("orbit.reference_radius must be positive");
        }

        let s = &self.sweep;
        if !(s.rate > 0.0 && s.rate < TAU) {
            return invalid("sweep.rate must lie in (0, 2π)");
        }
        if !(s.width > 0.0 && s.width.is_finite()) {
            return invalid("sweep.width must be positive");
        }
        if !(0.0..=1.0).contains(&s.falloff) {
            return invalid("sweep.falloff must lie in [0, 1]");
        }

        let l = &self.lens;
        if !(l.reveal_radius > 0.0 && l.reveal_radius.is_finite()) {
            return invalid("lens.reveal_radius must be positive");
        }
        if !(0.0..=1.0).contains(&l.falloff) {
            return invalid("lens.falloff must lie in [0, 1]");
        }
        if !(l.max_speed > 0.0 && l.max_speed.is_finite()) {
            return invalid("lens.max_speed must be positive");
        }
        if !(l.margin >= 0.0 && l.margin.is_finite()) {
            return invalid("lens.margin must be non-negative");
        }
        if !(l.damping_min > 0.0 && l.damping_min <= l.damping_max && l.damping_max.is_finite()) {
            return invalid("lens damping range must satisfy 0 < damping_min <= damping_max");
        }
        if !(0.0..=1.0).contains(&l.perturb_chance) {
            return invalid("lens.perturb_chance must lie in [0, 1]");
        }
        if !l.perturb_strength.is_finite() || !l.wander_amplitude.is_finite() || !l.wander_frequency.is_finite() {
            return invalid("lens perturbation parameters must be finite");
        }

        if let Some(rate) = self.ticks_per_second {
            if !(rate > 0.0 && rate.is_finite()) {
                return invalid("ticks_per_second must be positive");
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> Result<(), RadarError> {
    log::warn!("rejecting radar config: {reason}");
    Err(RadarError::InvalidConfig(reason.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_constants() {
        let config = RadarConfig::default();
        assert_eq!(config.mode, RevealMode::Sweep);
        assert_eq!(config.orbit.angular_step, 0.003);
        assert_eq!(config.sweep.width, 1.2);
        assert_eq!(config.lens.reveal_radius, 70.0);
        assert_eq!(config.decoration.spoke_count, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "mode": "lens", "lens": { "max_speed": 3.5 }, "seed": 9 }"#;
        let config = RadarConfig::from_json(json).unwrap();
        assert_eq!(config.mode, RevealMode::Lens);
        assert_eq!(config.lens.max_speed, 3.5);
        assert_eq!(config.lens.reveal_radius, 70.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sweep.rate, 0.02);
    }

    #[test]
    fn empty_object_is_default() {
        let config = RadarConfig::from_json("{}").unwrap();
        assert_eq!(config.ticks_per_second, None);
        assert_eq!(config.decoration.ring_count, 3);
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let json = r#"{ "orbit": { "radius_min": 200, "radius_max": 80 } }"#;
        assert!(matches!(
            RadarConfig::from_json(json),
            Err(RadarError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_zero_speed_cap() {
        let mut config = RadarConfig::default();
        config.lens.max_speed = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_advancing_rates() {
        let json = r#"{ "orbit": { "angular_step": -0.01 } }"#;
        assert!(matches!(RadarConfig::from_json(json), Err(RadarError::InvalidConfig(_))));

        let mut config = RadarConfig::default();
        config.orbit.angular_step = 0.0;
        assert!(config.validate().is_err());

        for rate in [0.0, -0.02, TAU, 7.0, f32::NAN] {
            let mut config = RadarConfig::default();
            config.sweep.rate = rate;
            assert!(config.validate().is_err(), "rate {rate} accepted");
        }

        let mut config = RadarConfig::default();
        config.sweep.rate = 6.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            RadarConfig::from_json("{ mode: "),
            Err(RadarError::Config(_))
        ));
    }
}
