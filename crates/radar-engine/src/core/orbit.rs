use glam::Vec2;

use crate::api::config::OrbitConfig;
use crate::api::types::SizeClass;
use crate::assets::catalog::{Catalog, CatalogEntry};
use crate::core::geometry::SceneGeometry;
use crate::core::rng::Rng;

/// A catalog entry circling the scene center.
///
/// `angle` and `radius` are the simulation state; `pos` is derived from them
/// and the current geometry, so it changes on resize while they do not.
#[derive(Debug, Clone)]
pub struct OrbitingEntity {
    label: String,
    size_class: SizeClass,
    /// Unwrapped angle in radians. f64 so long sessions keep per-tick precision.
    angle: f64,
    /// Orbit radius at reference scale.
    radius: f32,
    pos: Vec2,
}

impl OrbitingEntity {
    pub fn new(entry: &CatalogEntry, angle: f64, radius: f32) -> Self {
        Self {
            label: entry.label.clone(),
            size_class: entry.size_class,
            angle,
            radius,
            pos: Vec2::ZERO,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Projected position in logical pixels.
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    fn project(&mut self, geometry: &SceneGeometry, scale: f32) {
        self.pos = geometry.project(self.angle, self.radius * scale);
    }

    #[cfg(test)]
    pub(crate) fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }
}

/// Owns every orbiting entity and is the only thing that moves them.
/// Flat Vec storage in catalog order; the catalog is small (tens of entries).
pub struct EntityOrbitModel {
    entities: Vec<OrbitingEntity>,
    angular_step: f64,
    reference_radius: f32,
}

impl EntityOrbitModel {
    /// Build one entity per catalog entry. Entry `i` of `n` starts at angle
    /// `i/n · 2π` with a radius drawn from `[radius_min, radius_max)`.
    pub fn new(catalog: &Catalog, config: &OrbitConfig, rng: &mut Rng) -> Self {
        let n = catalog.len().max(1) as f64;
        let entities = catalog
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let angle = i as f64 / n * std::f64::consts::TAU;
                let radius = rng.range(config.radius_min, config.radius_max);
                OrbitingEntity::new(entry, angle, radius)
            })
            .collect();

        Self {
            entities,
            angular_step: config.angular_step,
            reference_radius: config.reference_radius,
        }
    }

    /// Build a model from pre-placed entities.
    pub fn from_entities(entities: Vec<OrbitingEntity>, config: &OrbitConfig) -> Self {
        Self {
            entities,
            angular_step: config.angular_step,
            reference_radius: config.reference_radius,
        }
    }

    /// Advance every entity by `ticks` angular steps and re-project.
    pub fn advance(&mut self, ticks: u32, geometry: &SceneGeometry) {
        let delta = self.angular_step * ticks as f64;
        for entity in &mut self.entities {
            entity.angle += delta;
        }
        self.project(geometry);
    }

    /// Recompute positions against `geometry` without touching angles or radii.
    pub fn project(&mut self, geometry: &SceneGeometry) {
        let scale = geometry.radius_scale(self.reference_radius);
        for entity in &mut self.entities {
            entity.project(geometry, scale);
        }
    }

    pub fn entities(&self) -> &[OrbitingEntity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitingEntity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn angular_step(&self) -> f64 {
        self.angular_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::SurfaceSize;
    use std::f64::consts::TAU;

    fn catalog(n: usize) -> Catalog {
        (0..n)
            .map(|i| CatalogEntry::new(format!("S{i}"), SizeClass::Medium))
            .collect()
    }

    fn geometry(w: f32, h: f32) -> SceneGeometry {
        SceneGeometry::from_size(SurfaceSize::new(w, h), 20.0)
    }

    #[test]
    fn initial_angles_spread_evenly() {
        let model = EntityOrbitModel::new(&catalog(4), &OrbitConfig::default(), &mut Rng::new(1));
        let angles: Vec<f64> = model.iter().map(|e| e.angle()).collect();
        assert_eq!(angles, vec![0.0, TAU / 4.0, TAU / 2.0, 3.0 * TAU / 4.0]);
    }

    #[test]
    fn radii_fall_in_band() {
        let model = EntityOrbitModel::new(&catalog(200), &OrbitConfig::default(), &mut Rng::new(3));
        for e in model.iter() {
            assert!(e.radius() >= 80.0 && e.radius() < 200.0, "radius = {}", e.radius());
        }
    }

    #[test]
    fn angle_tracks_tick_count() {
        let config = OrbitConfig::default();
        let mut model = EntityOrbitModel::new(&catalog(5), &config, &mut Rng::new(11));
        let initial: Vec<f64> = model.iter().map(|e| e.angle()).collect();
        let g = geometry(440.0, 440.0);

        let mut ticks = 0u32;
        for step in [1, 1, 3, 10, 1] {
            model.advance(step, &g);
            ticks += step;
        }
        for _ in 0..1000 {
            model.advance(1, &g);
            ticks += 1;
        }

        for (e, a0) in model.iter().zip(initial) {
            let expected = (a0 + ticks as f64 * config.angular_step).rem_euclid(TAU);
            let actual = e.angle().rem_euclid(TAU);
            assert!((expected - actual).abs() < 1e-9, "expected {expected}, got {actual}");
        }
    }

    #[test]
    fn angle_strictly_increases() {
        let mut model = EntityOrbitModel::new(&catalog(3), &OrbitConfig::default(), &mut Rng::new(5));
        let g = geometry(300.0, 300.0);
        let mut prev: Vec<f64> = model.iter().map(|e| e.angle()).collect();
        for _ in 0..100 {
            model.advance(1, &g);
            for (e, p) in model.iter().zip(&prev) {
                assert!(e.angle() > *p);
            }
            prev = model.iter().map(|e| e.angle()).collect();
        }
    }

    #[test]
    fn position_is_polar_projection() {
        let entry = CatalogEntry::new("トヨタ", SizeClass::Large);
        let config = OrbitConfig::default();
        let mut model = EntityOrbitModel::from_entities(vec![OrbitingEntity::new(&entry, 0.0, 100.0)], &config);
        // max_radius = 440/2 - 20 = 200 → scale 1.0
        model.project(&geometry(440.0, 440.0));
        let pos = model.entities()[0].pos();
        assert!((pos - Vec2::new(320.0, 220.0)).length() < 1e-4, "pos = {pos}");

        // max_radius = 100 → scale 0.5
        model.project(&geometry(240.0, 400.0));
        let pos = model.entities()[0].pos();
        assert!((pos - Vec2::new(170.0, 200.0)).length() < 1e-4, "pos = {pos}");
    }

    #[test]
    fn resize_only_moves_projection() {
        let mut a = EntityOrbitModel::new(&catalog(6), &OrbitConfig::default(), &mut Rng::new(99));
        let mut b = EntityOrbitModel::new(&catalog(6), &OrbitConfig::default(), &mut Rng::new(99));
        let small = geometry(300.0, 200.0);
        let large = geometry(900.0, 700.0);

        for i in 0..50 {
            a.advance(1, &small);
            b.advance(1, if i % 2 == 0 { &large } else { &small });
        }
        b.project(&large);

        for (ea, eb) in a.iter().zip(b.iter()) {
            assert_eq!(ea.angle(), eb.angle());
            assert_eq!(ea.radius(), eb.radius());
            assert_ne!(ea.pos(), eb.pos());
        }
    }

    #[test]
    fn empty_catalog_is_fine() {
        let mut model = EntityOrbitModel::new(&Catalog::default(), &OrbitConfig::default(), &mut Rng::new(1));
        model.advance(1, &geometry(100.0, 100.0));
        assert!(model.is_empty());
    }
}
