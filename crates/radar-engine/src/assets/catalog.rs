use serde::{Deserialize, Serialize};

use crate::api::types::SizeClass;
use crate::error::RadarError;

/// One labeled entity the radar cycles through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display-ready label text.
    #[serde(alias = "name")]
    pub label: String,
    /// Visual weight (default: medium).
    #[serde(rename = "size", alias = "sizeClass", default)]
    pub size_class: SizeClass,
}

impl CatalogEntry {
    pub fn new(label: impl Into<String>, size_class: SizeClass) -> Self {
        Self {
            label: label.into(),
            size_class,
        }
    }
}

/// Ordered, immutable list of catalog entries. Order is also draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON array of `{ "label" | "name", "size" }` objects.
    /// Entries with blank labels are dropped.
    pub fn from_json(json: &str) -> Result<Self, RadarError> {
        let parsed: Vec<CatalogEntry> = serde_json::from_str(json)?;
        let total = parsed.len();
        let entries: Vec<CatalogEntry> = parsed
            .into_iter()
            .filter(|e| !e.label.trim().is_empty())
            .collect();
        if entries.len() < total {
            log::warn!("catalog: dropped {} entries with blank labels", total - entries.len());
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_name_and_size() {
        let json = r#"[
            { "name": "トヨタ", "size": "large" },
            { "label": "KDDI", "size": "medium" },
            { "name": "日産" }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[0].label, "トヨタ");
        assert_eq!(catalog.entries()[0].size_class, SizeClass::Large);
        assert_eq!(catalog.entries()[1].label, "KDDI");
        assert_eq!(catalog.entries()[2].size_class, SizeClass::Medium);
    }

    #[test]
    fn blank_labels_are_dropped() {
        let json = r#"[{ "name": "  ", "size": "small" }, { "name": "ソニー", "size": "large" }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].label, "ソニー");
    }

    #[test]
    fn unknown_size_is_an_error() {
        let json = r#"[{ "name": "任天堂", "size": "huge" }]"#;
        assert!(matches!(Catalog::from_json(json), Err(RadarError::Config(_))));
    }

    #[test]
    fn collects_from_entries() {
        let catalog: Catalog = ["A", "B"]
            .into_iter()
            .map(|l| CatalogEntry::new(l, SizeClass::Small))
            .collect();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }
}
