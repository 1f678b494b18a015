use crate::api::types::RevealMode;
use crate::renderer::color::Color;
use crate::renderer::surface::{ColorStop, Stroke};

/// Color pair for one concentric ring. `base.a` is the resting opacity the
/// pulse oscillates around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub base: Color,
    pub glow: Color,
}

/// Decoration palette. Each reveal mode ships its own look.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Ring styles, cycled when there are more rings than entries.
    pub rings: Vec<RingStyle>,
    /// Resting ring stroke width before the pulse.
    pub ring_width: f32,
    /// Resting ring glow blur before the pulse.
    pub ring_glow: f32,
    pub spoke: Stroke,
    /// Bright wedge directly behind the sweep beam.
    pub wedge: Vec<ColorStop>,
    /// Faint trail behind the wedge.
    pub trail: Vec<ColorStop>,
    /// Lens disc fill.
    pub lens_fill: Vec<ColorStop>,
    /// Lens rim and handle.
    pub lens_rim: Stroke,
}

impl Theme {
    pub fn for_mode(mode: RevealMode) -> Self {
        match mode {
            RevealMode::Sweep => Self::sweep(),
            RevealMode::Lens => Self::lens(),
        }
    }

    /// Neon palette: cyan, pink and green rings with an amber-to-blue beam.
    pub fn sweep() -> Self {
        Self {
            rings: vec![
                RingStyle {
                    base: Color::rgba8(0, 200, 255, 0.4),
                    glow: Color::rgba8(0, 200, 255, 0.6),
                },
                RingStyle {
                    base: Color::rgba8(255, 100, 200, 0.4),
                    glow: Color::rgba8(255, 100, 200, 0.6),
                },
                RingStyle {
                    base: Color::rgba8(100, 255, 100, 0.4),
                    glow: Color::rgba8(100, 255, 100, 0.6),
                },
            ],
            ring_width: 2.0,
            ring_glow: 8.0,
            spoke: Stroke::new(Color::rgba8(200, 150, 255, 0.3), 1.5),
            wedge: vec![
                ColorStop::new(0.0, Color::rgba8(255, 200, 0, 0.3)),
                ColorStop::new(0.5, Color::rgba8(255, 100, 150, 0.2)),
                ColorStop::new(1.0, Color::rgba8(100, 200, 255, 0.05)),
            ],
            trail: vec![
                ColorStop::new(0.0, Color::rgba8(100, 200, 255, 0.15)),
                ColorStop::new(1.0, Color::rgba8(100, 200, 255, 0.0)),
            ],
            lens_fill: Vec::new(),
            lens_rim: Stroke::new(Color::TRANSPARENT, 0.0),
        }
    }

    /// Warm amber palette around a glowing orange lens.
    pub fn lens() -> Self {
        Self {
            rings: vec![
                RingStyle {
                    base: Color::rgba8(255, 167, 38, 0.3),
                    glow: Color::rgba8(255, 167, 38, 0.5),
                },
                RingStyle {
                    base: Color::rgba8(255, 140, 66, 0.3),
                    glow: Color::rgba8(255, 140, 66, 0.5),
                },
                RingStyle {
                    base: Color::rgba8(255, 200, 120, 0.3),
                    glow: Color::rgba8(255, 200, 120, 0.5),
                },
            ],
            ring_width: 1.5,
            ring_glow: 6.0,
            spoke: Stroke::new(Color::rgba8(255, 167, 38, 0.2), 1.0),
            wedge: Vec::new(),
            trail: Vec::new(),
            lens_fill: vec![
                ColorStop::new(0.0, Color::rgba8(255, 200, 120, 0.25)),
                ColorStop::new(0.7, Color::rgba8(255, 140, 66, 0.12)),
                ColorStop::new(1.0, Color::rgba8(255, 140, 66, 0.0)),
            ],
            lens_rim: Stroke::new(Color::rgba8(255, 167, 38, 0.8), 2.0)
                .with_glow(Color::rgba8(255, 140, 66, 0.9), 18.0),
        }
    }

    /// Style for ring `i` (zero-based).
    pub fn ring(&self, i: usize) -> RingStyle {
        if self.rings.is_empty() {
            return RingStyle {
                base: Color::WHITE.with_alpha(0.3),
                glow: Color::WHITE.with_alpha(0.5),
            };
        }
        self.rings[i % self.rings.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_styles_cycle() {
        let theme = Theme::sweep();
        assert_eq!(theme.ring(0), theme.ring(3));
        assert_ne!(theme.ring(0), theme.ring(1));
    }

    #[test]
    fn each_mode_has_its_cue() {
        let sweep = Theme::for_mode(RevealMode::Sweep);
        assert!(!sweep.wedge.is_empty() && !sweep.trail.is_empty());
        let lens = Theme::for_mode(RevealMode::Lens);
        assert!(!lens.lens_fill.is_empty());
        assert!(lens.lens_rim.glow.is_some());
    }
}
