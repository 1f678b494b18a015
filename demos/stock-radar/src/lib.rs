use wasm_bindgen::prelude::*;

/// Popular Japanese stocks shown on the radar, in orbit order.
pub const CATALOG_JSON: &str = include_str!("../catalog.json");

radar_web::export_radar!("stock-radar", CATALOG_JSON);

#[cfg(test)]
mod tests {
    use super::*;
    use radar_engine::{Catalog, EntityOrbitModel, OrbitConfig, Rng, SizeClass};

    #[test]
    fn bundled_catalog_parses() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.entries()[0].label, "トヨタ");
        assert_eq!(catalog.entries()[0].size_class, SizeClass::Large);
        assert_eq!(catalog.entries()[19].label, "セブン&アイ");

        let large = catalog.iter().filter(|e| e.size_class == SizeClass::Large).count();
        assert_eq!(large, 3);
    }

    #[test]
    fn entries_start_evenly_spaced() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let model = EntityOrbitModel::new(&catalog, &OrbitConfig::default(), &mut Rng::new(3));
        let step = std::f64::consts::TAU / 20.0;
        for (i, e) in model.iter().enumerate() {
            assert!((e.angle() - i as f64 * step).abs() < 1e-9);
        }
    }
}
