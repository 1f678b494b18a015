use serde::{Deserialize, Serialize};

/// Visual weight of a catalog entry. Drives the label font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    /// Label font size in CSS pixels at 1x device scale.
    pub const fn font_px(self) -> f32 {
        match self {
            SizeClass::Large => 24.0,
            SizeClass::Medium => 18.0,
            SizeClass::Small => 14.0,
        }
    }
}

/// Which reveal strategy a radar instance runs. Fixed for the instance lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealMode {
    /// Rotating angular beam.
    #[default]
    Sweep,
    /// Wandering circular probe.
    Lens,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_sizes_by_class() {
        assert_eq!(SizeClass::Large.font_px(), 24.0);
        assert_eq!(SizeClass::Medium.font_px(), 18.0);
        assert_eq!(SizeClass::Small.font_px(), 14.0);
    }

    #[test]
    fn parses_lowercase_names() {
        let size: SizeClass = serde_json::from_str("\"large\"").unwrap();
        assert_eq!(size, SizeClass::Large);
        let mode: RevealMode = serde_json::from_str("\"lens\"").unwrap();
        assert_eq!(mode, RevealMode::Lens);
    }
}
