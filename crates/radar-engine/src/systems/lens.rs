//! Lens reveal: a circular probe wanders the surface under simple physics and
//! shows labels within `reveal_radius` of its center.

use glam::Vec2;

use crate::api::config::LensConfig;
use crate::core::orbit::OrbitingEntity;
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::systems::reveal::{falloff_alpha, Reveal};

/// Fixed accent for revealed labels in lens mode.
pub const LABEL_COLOR: Color = Color::new(1.0, 0.655, 0.149, 1.0);
/// Glow behind revealed labels in lens mode.
pub const LABEL_GLOW: Color = Color::new(1.0, 0.549, 0.259, 0.8);

/// Position and velocity of the probe, in logical pixels and pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LensState {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl LensState {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Scale velocity down to `max_speed` if faster, keeping its direction.
    pub fn clamp_speed(&mut self, max_speed: f32) {
        self.vel = self.vel.clamp_length_max(max_speed);
    }
}

/// Reflect-and-damp on one axis. Keeps `pos` inside `[lo, hi]`; a span too
/// small to hold the probe pins it to the middle.
fn bounce_axis(pos: &mut f32, vel: &mut f32, lo: f32, hi: f32, damping: f32) {
    if hi < lo {
        *pos = (lo + hi) / 2.0;
        return;
    }
    if *pos < lo {
        *vel = vel.abs() * damping;
        *pos = lo;
    } else if *pos > hi {
        *vel = -vel.abs() * damping;
        *pos = hi;
    }
}

pub struct LensReveal {
    state: LensState,
    config: LensConfig,
    rng: Rng,
    placed: bool,
}

impl LensReveal {
    /// New probe at the origin with a random heading. `place` moves it to the
    /// surface center once the surface has been measured.
    pub fn new(config: LensConfig, mut rng: Rng) -> Self {
        let heading = rng.range(0.0, std::f32::consts::TAU);
        let speed = rng.range(0.5, 1.0) * config.max_speed;
        let vel = Vec2::from_angle(heading) * speed;
        Self {
            state: LensState::new(Vec2::ZERO, vel),
            config,
            rng,
            placed: false,
        }
    }

    /// Use an explicit starting state instead of a centered random one.
    pub fn with_state(mut self, state: LensState) -> Self {
        self.state = state;
        self.placed = true;
        self
    }

    /// Center the probe on the first activation. Later calls keep its position.
    pub fn place(&mut self, width: f32, height: f32) {
        if !self.placed {
            self.state.pos = Vec2::new(width / 2.0, height / 2.0);
            self.placed = true;
        }
    }

    pub fn state(&self) -> &LensState {
        &self.state
    }

    pub fn position(&self) -> Vec2 {
        self.state.pos
    }

    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    /// One physics tick inside a `width` x `height` surface.
    pub fn step(&mut self, width: f32, height: f32, elapsed_secs: f32) {
        let cfg = &self.config;
        let s = &mut self.state;

        s.pos += s.vel;

        // Bounded wander keyed to elapsed time keeps the path from looking scripted.
        let t = elapsed_secs * cfg.wander_frequency;
        s.pos += Vec2::new(t.sin(), (t * 1.3).cos()) * cfg.wander_amplitude;

        let damping_x = self.rng.range(cfg.damping_min, cfg.damping_max);
        let damping_y = self.rng.range(cfg.damping_min, cfg.damping_max);
        bounce_axis(&mut s.pos.x, &mut s.vel.x, cfg.margin, width - cfg.margin, damping_x);
        bounce_axis(&mut s.pos.y, &mut s.vel.y, cfg.margin, height - cfg.margin, damping_y);

        if self.rng.chance(cfg.perturb_chance) {
            let p = cfg.perturb_strength;
            s.vel += Vec2::new(self.rng.range(-p, p), self.rng.range(-p, p));
        }

        s.clamp_speed(cfg.max_speed);
    }

    pub fn compute(&self, entities: &[OrbitingEntity], out: &mut Vec<Reveal>) {
        for (index, entity) in entities.iter().enumerate() {
            let font_px = entity.size_class().font_px();
            let distance = entity.pos().distance(self.state.pos);
            let reveal = match falloff_alpha(distance, self.config.reveal_radius, self.config.falloff) {
                Some(alpha) => Reveal {
                    index,
                    visible: true,
                    alpha,
                    font_px,
                    color: LABEL_COLOR.with_alpha(alpha),
                    glow: LABEL_GLOW,
                },
                None => Reveal::hidden(index, font_px),
            };
            out.push(reveal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SizeClass;
    use crate::assets::catalog::CatalogEntry;

    fn entity_at(pos: Vec2) -> OrbitingEntity {
        OrbitingEntity::new(&CatalogEntry::new("ソニー", SizeClass::Large), 0.0, 100.0).with_pos(pos)
    }

    fn lens_at(pos: Vec2, vel: Vec2) -> LensReveal {
        LensReveal::new(LensConfig::default(), Rng::new(42)).with_state(LensState::new(pos, vel))
    }

    #[test]
    fn outside_radius_is_hidden() {
        let lens = lens_at(Vec2::ZERO, Vec2::ZERO);
        let mut out = Vec::new();
        lens.compute(&[entity_at(Vec2::new(71.0, 0.0))], &mut out);
        assert!(!out[0].visible);
        assert_eq!(out[0].alpha, 0.0);
    }

    #[test]
    fn inside_radius_fades_with_distance() {
        let lens = lens_at(Vec2::ZERO, Vec2::ZERO);
        let mut out = Vec::new();
        lens.compute(&[entity_at(Vec2::new(0.0, 35.0))], &mut out);
        assert!(out[0].visible);
        assert!((out[0].alpha - 0.85).abs() < 1e-6, "alpha = {}", out[0].alpha);
        assert_eq!(out[0].font_px, 24.0);
        assert_eq!(out[0].color, LABEL_COLOR.with_alpha(out[0].alpha));
    }

    #[test]
    fn exactly_at_radius_is_hidden() {
        let lens = lens_at(Vec2::ZERO, Vec2::ZERO);
        let mut out = Vec::new();
        lens.compute(&[entity_at(Vec2::new(70.0, 0.0))], &mut out);
        assert!(!out[0].visible);
    }

    #[test]
    fn speed_clamp_keeps_direction() {
        let mut state = LensState::new(Vec2::ZERO, Vec2::new(3.0, 0.0));
        state.clamp_speed(2.0);
        assert_eq!(state.vel, Vec2::new(2.0, 0.0));

        let mut state = LensState::new(Vec2::ZERO, Vec2::new(3.0, 4.0));
        state.clamp_speed(2.0);
        assert!((state.speed() - 2.0).abs() < 1e-5);
        assert!((state.vel.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);

        let mut slow = LensState::new(Vec2::ZERO, Vec2::new(0.5, 0.5));
        slow.clamp_speed(2.0);
        assert_eq!(slow.vel, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn step_caps_speed() {
        let mut lens = lens_at(Vec2::new(200.0, 150.0), Vec2::new(3.0, 0.0));
        lens.step(400.0, 300.0, 0.0);
        assert!(lens.state().speed() <= 2.0 + 1e-5);
    }

    #[test]
    fn bounce_reflects_and_clamps() {
        // Heading straight out of the left edge.
        let mut lens = lens_at(Vec2::new(41.0, 150.0), Vec2::new(-2.0, 0.0));
        lens.step(400.0, 300.0, 0.0);
        let s = lens.state();
        assert_eq!(s.pos.x, 40.0);
        assert!(s.vel.x > 0.0, "vel = {}", s.vel);
    }

    #[test]
    fn bounce_damping_stays_in_range() {
        let config = LensConfig {
            perturb_chance: 0.0,
            wander_amplitude: 0.0,
            ..LensConfig::default()
        };
        for seed in 1..200 {
            // Slow enough that the speed cap cannot mask the damping factor.
            let mut lens = LensReveal::new(config.clone(), Rng::new(seed))
                .with_state(LensState::new(Vec2::new(40.5, 150.0), Vec2::new(-1.0, 0.0)));
            lens.step(400.0, 300.0, 0.0);
            let s = lens.state();
            assert_eq!(s.pos.x, 40.0);
            assert!(s.vel.x >= 0.9 && s.vel.x < 1.1, "damped vel.x = {} (seed {seed})", s.vel.x);
            assert_eq!(s.vel.y, 0.0);

            // Same from the high side.
            let mut lens = LensReveal::new(config.clone(), Rng::new(seed))
                .with_state(LensState::new(Vec2::new(359.5, 150.0), Vec2::new(1.0, 0.0)));
            lens.step(400.0, 300.0, 0.0);
            let s = lens.state();
            assert_eq!(s.pos.x, 360.0);
            assert!(s.vel.x <= -0.9 && s.vel.x > -1.1, "damped vel.x = {} (seed {seed})", s.vel.x);
        }
    }

    #[test]
    fn wander_is_bounded_by_amplitude() {
        let config = LensConfig {
            perturb_chance: 0.0,
            ..LensConfig::default()
        };
        let amp = config.wander_amplitude;
        let start = Vec2::new(200.0, 150.0);
        for i in 0..500 {
            let t = i as f32 * 0.037;
            let mut lens = LensReveal::new(config.clone(), Rng::new(3)).with_state(LensState::new(start, Vec2::ZERO));
            lens.step(400.0, 300.0, t);
            let d = lens.position() - start;
            assert!(d.x.abs() <= amp + 1e-5 && d.y.abs() <= amp + 1e-5, "wander {d} at t = {t}");
            assert_eq!(lens.state().vel, Vec2::ZERO);
        }
    }

    #[test]
    fn invariants_hold_over_long_runs() {
        let config = LensConfig {
            perturb_chance: 0.5,
            perturb_strength: 1.5,
            wander_amplitude: 2.0,
            ..LensConfig::default()
        };
        let (w, h) = (480.0, 300.0);
        let mut lens = LensReveal::new(config.clone(), Rng::new(1234));
        lens.place(w, h);

        for tick in 0..20_000 {
            lens.step(w, h, tick as f32 / 60.0);
            let s = lens.state();
            assert!(s.speed() <= config.max_speed + 1e-4, "speed {} at tick {tick}", s.speed());
            assert!(s.pos.x >= config.margin && s.pos.x <= w - config.margin, "x {} at tick {tick}", s.pos.x);
            assert!(s.pos.y >= config.margin && s.pos.y <= h - config.margin, "y {} at tick {tick}", s.pos.y);
        }
    }

    #[test]
    fn surface_smaller_than_margins_pins_to_center() {
        let mut lens = lens_at(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0));
        lens.step(50.0, 60.0, 0.0);
        assert_eq!(lens.position(), Vec2::new(25.0, 30.0));
    }

    #[test]
    fn place_only_centers_once() {
        let mut lens = LensReveal::new(LensConfig::default(), Rng::new(8));
        lens.place(400.0, 200.0);
        assert_eq!(lens.position(), Vec2::new(200.0, 100.0));
        lens.step(400.0, 200.0, 0.0);
        let moved = lens.position();
        lens.place(800.0, 600.0);
        assert_eq!(lens.position(), moved);
    }

    #[test]
    fn closer_entity_is_never_dimmer() {
        let lens = lens_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
        let entities: Vec<OrbitingEntity> = (0..30)
            .map(|i| entity_at(Vec2::new(100.0 + i as f32 * 3.0, 100.0 + i as f32)))
            .collect();
        let mut out = Vec::new();
        lens.compute(&entities, &mut out);
        for pair in out.windows(2) {
            assert!(pair[0].alpha >= pair[1].alpha);
        }
    }
}
