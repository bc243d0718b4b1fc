//! Broker catalog loading and lookup.
//!
//! A catalog is an insertion-ordered list of broker records with unique
//! ids and slugs. It comes either from the data literals compiled into
//! the binary or from a TOML/JSON file.

mod builtin;

use crate::error::CatalogError;
use crate::models::BrokerRecord;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// File layout for TOML (`[[brokers]]`) and JSON (`{"brokers": [...]}`) catalogs.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    brokers: Vec<BrokerRecord>,
}

/// JSON catalogs may also be a bare array of records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Wrapped(CatalogFile),
    Bare(Vec<BrokerRecord>),
}

/// Validated, read-only collection of broker records.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<BrokerRecord>,
    by_slug: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

/// Result of resolving a list of requested brokers.
#[derive(Debug)]
pub struct Selection<'a> {
    /// Found records, in request order.
    pub found: Vec<&'a BrokerRecord>,
    /// Requested names with no matching record.
    pub missing: Vec<String>,
}

impl Catalog {
    /// Build a catalog, deriving missing slugs and checking every invariant.
    pub fn from_records(records: Vec<BrokerRecord>) -> Result<Self, CatalogError> {
        let mut by_id: HashMap<String, usize> = HashMap::new();
        let mut by_slug = HashMap::new();
        let mut by_name = HashMap::new();
        let mut validated = Vec::with_capacity(records.len());

        for mut record in records {
            if record.slug.trim().is_empty() {
                record.slug = slugify(&record.name);
            }
            record.validate()?;

            let index = validated.len();
            if let Some(&first) = by_id.get(&record.id) {
                let first: &BrokerRecord = &validated[first];
                return Err(CatalogError::DuplicateId {
                    id: record.id.clone(),
                    first: first.name.clone(),
                    second: record.name.clone(),
                });
            }
            if let Some(&first) = by_slug.get(&record.slug) {
                let first: &BrokerRecord = &validated[first];
                return Err(CatalogError::DuplicateSlug {
                    slug: record.slug.clone(),
                    first: first.name.clone(),
                    second: record.name.clone(),
                });
            }

            by_id.insert(record.id.clone(), index);
            by_slug.insert(record.slug.clone(), index);
            by_name.entry(record.name.to_lowercase()).or_insert(index);
            validated.push(record);
        }

        Ok(Self {
            records: validated,
            by_slug,
            by_name,
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_records(builtin::records())
    }

    /// Load a catalog file; the format follows the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let catalog = match extension.as_str() {
            "toml" => Self::from_toml(&content),
            "json" => Self::from_json(&content),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
        .with_context(|| format!("Invalid catalog: {}", path.display()))?;

        info!(
            "Loaded {} broker records from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Use `path` when given, otherwise the built-in catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No catalog file given, using built-in catalog");
                Ok(Self::builtin()?)
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_records(file.brokers)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let parsed: JsonCatalog =
            serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let records = match parsed {
            JsonCatalog::Wrapped(file) => file.brokers,
            JsonCatalog::Bare(records) => records,
        };
        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[BrokerRecord] {
        &self.records
    }

    /// Look up a record by slug or display name (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&BrokerRecord> {
        let key = key.trim();
        self.by_slug
            .get(key)
            .or_else(|| self.by_name.get(&key.to_lowercase()))
            .or_else(|| self.by_slug.get(&slugify(key)))
            .map(|&index| &self.records[index])
    }

    /// Like [`Catalog::get`] but an unknown key is an error.
    pub fn require(&self, key: &str) -> Result<&BrokerRecord, CatalogError> {
        self.get(key)
            .ok_or_else(|| CatalogError::UnknownBroker(key.to_string()))
    }

    /// Resolve the requested names in request order. An empty request
    /// selects the whole catalog.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Selection<'_> {
        if names.is_empty() {
            return Selection {
                found: self.records.iter().collect(),
                missing: Vec::new(),
            };
        }

        let mut found: Vec<&BrokerRecord> = Vec::new();
        let mut missing = Vec::new();

        for name in names {
            let name = name.as_ref();
            match self.get(name) {
                Some(record) => {
                    if found.iter().any(|r| r.id == record.id) {
                        debug!("Skipping repeated request for {}", record.name);
                    } else {
                        found.push(record);
                    }
                }
                None => missing.push(name.to_string()),
            }
        }

        Selection { found, missing }
    }

    /// Other records ranked by rating (highest first, catalog order on
    /// ties), at most `limit`.
    pub fn similar_to(&self, record: &BrokerRecord, limit: usize) -> Vec<&BrokerRecord> {
        let mut others: Vec<&BrokerRecord> =
            self.records.iter().filter(|r| r.id != record.id).collect();

        // Stable sort keeps catalog order for equal ratings.
        others.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        others.truncate(limit);
        others
    }
}

/// Derive a URL slug from a display name: "BlackBull Markets" -> "blackbull-markets".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// True when `slug` is non-empty, `[a-z0-9-]` only, without leading,
/// trailing or doubled dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../fixtures/catalog.toml");

    fn record(id: &str, name: &str, rating: f64) -> BrokerRecord {
        BrokerRecord::new(id, name, rating, "https://example.com")
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("BlackBull Markets"), "blackbull-markets");
        assert_eq!(slugify("Trading 212"), "trading-212");
        assert_eq!(slugify("Capital.com"), "capital-com");
        assert_eq!(slugify("  IG  "), "ig");
        assert_eq!(slugify("Saxo -- Bank!"), "saxo-bank");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("ic-markets"));
        assert!(is_valid_slug("trading-212"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-xm"));
        assert!(!is_valid_slug("IC-Markets"));
        assert!(!is_valid_slug("ic--markets"));
        assert!(!is_valid_slug("ic markets"));
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        for record in catalog.records() {
            assert!(is_valid_slug(&record.slug), "bad slug {}", record.slug);
            assert!(!record.faqs.is_empty(), "{} has no FAQs", record.name);
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::from_records(vec![record("1", "XM", 4.7), record("1", "IG", 4.6)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = Catalog::from_records(vec![
            record("1", "IC Markets", 4.9),
            record("2", "IC-Markets", 4.8),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug { ref slug, .. } if slug == "ic-markets"));
    }

    #[test]
    fn test_missing_slug_is_derived() {
        let mut r = record("1", "Merrill Edge", 4.4);
        r.slug = String::new();
        let catalog = Catalog::from_records(vec![r]).unwrap();
        assert_eq!(catalog.records()[0].slug, "merrill-edge");
    }

    #[test]
    fn test_get_by_name_or_slug() {
        let catalog =
            Catalog::from_records(vec![record("1", "Trading 212", 4.4), record("2", "XM", 4.7)])
                .unwrap();

        assert_eq!(catalog.get("trading-212").map(|r| r.id.as_str()), Some("1"));
        assert_eq!(catalog.get("Trading 212").map(|r| r.id.as_str()), Some("1"));
        assert_eq!(catalog.get("trading 212").map(|r| r.id.as_str()), Some("1"));
        assert_eq!(catalog.get("xm").map(|r| r.id.as_str()), Some("2"));
        assert!(catalog.get("eToro").is_none());
        assert!(matches!(
            catalog.require("eToro"),
            Err(CatalogError::UnknownBroker(_))
        ));
    }

    #[test]
    fn test_select_reports_missing_in_request_order() {
        let catalog =
            Catalog::from_records(vec![record("1", "FXOpen", 4.4), record("2", "Dukascopy", 4.4)])
                .unwrap();

        let selection = catalog.select(&["Dukascopy", "Nonexistent", "FXOpen", "dukascopy"]);
        let names: Vec<_> = selection.found.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Dukascopy", "FXOpen"]);
        assert_eq!(selection.missing, vec!["Nonexistent".to_string()]);
    }

    #[test]
    fn test_empty_selection_takes_everything() {
        let catalog =
            Catalog::from_records(vec![record("1", "FXOpen", 4.4), record("2", "Dukascopy", 4.4)])
                .unwrap();
        let selection = catalog.select::<&str>(&[]);
        assert_eq!(selection.found.len(), 2);
        assert!(selection.missing.is_empty());
    }

    #[test]
    fn test_similar_to_ranks_by_rating() {
        let catalog = Catalog::from_records(vec![
            record("1", "A", 4.0),
            record("2", "B", 4.9),
            record("3", "C", 4.5),
            record("4", "D", 4.5),
        ])
        .unwrap();

        let current = catalog.get("a").unwrap();
        let similar: Vec<_> = catalog
            .similar_to(current, 3)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(similar, vec!["B", "C", "D"]);
    }

    #[test]
    fn test_load_toml_fixture() {
        let catalog = Catalog::from_toml(FIXTURE).unwrap();
        assert_eq!(catalog.len(), 3);

        let fxopen = catalog.get("FXOpen").unwrap();
        assert_eq!(fxopen.regulation, vec!["FCA", "CySEC", "ASIC"]);
        assert_eq!(fxopen.faqs.len(), 2);
        assert_eq!(fxopen.protection.segregated_accounts, Some(true));

        // Slug omitted in the fixture.
        assert!(catalog.get("blackbull-markets").is_some());
    }

    #[test]
    fn test_load_json_wrapped_and_bare() {
        let bare = r#"[{"id": "1", "name": "XM", "rating": 4.7, "url": "https://www.xm.com"}]"#;
        let wrapped = format!(r#"{{"brokers": {}}}"#, bare);

        assert_eq!(Catalog::from_json(bare).unwrap().len(), 1);
        assert_eq!(Catalog::from_json(&wrapped).unwrap().len(), 1);
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("brokers.toml");
        std::fs::write(&toml_path, FIXTURE).unwrap();
        assert_eq!(Catalog::load(&toml_path).unwrap().len(), 3);

        let yaml_path = dir.path().join("brokers.yaml");
        std::fs::write(&yaml_path, "brokers: []").unwrap();
        assert!(Catalog::load(&yaml_path).is_err());
    }
}
