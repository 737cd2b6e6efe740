//! Seed catalog: the data the directory falls back to when the backend is
//! unreachable in development.
//!
//! The catalog ships as a YAML file; a copy is embedded in the crate so a
//! deployment with no `RELOC_CATALOG_PATH` configured still has one.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::hospitals::Hospital;
use crate::vendors::Vendor;
use crate::ConfigError;

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCatalog {
    pub vendors: Vec<Vendor>,
    pub hospitals: Vec<Hospital>,
}

impl SeedCatalog {
    /// Parses the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded file fails to parse or validate,
    /// which indicates a packaging defect rather than a runtime condition.
    pub fn builtin() -> Result<Self, ConfigError> {
        let catalog: SeedCatalog = serde_yaml::from_str(EMBEDDED_CATALOG)?;
        validate_catalog(&catalog)?;
        Ok(catalog)
    }
}

/// Load and validate a seed catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<SeedCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: SeedCatalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &SeedCatalog) -> Result<(), ConfigError> {
    let mut seen_vendor_ids = HashSet::new();
    for vendor in &catalog.vendors {
        if vendor.business_name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' has an empty business name",
                vendor.id
            )));
        }
        if !seen_vendor_ids.insert(vendor.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate vendor id: '{}'",
                vendor.id
            )));
        }
    }

    let mut seen_hospital_ids = HashSet::new();
    for hospital in &catalog.hospitals {
        if hospital.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "hospital '{}' has an empty name",
                hospital.id
            )));
        }
        if !seen_hospital_ids.insert(hospital.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate hospital id: '{}'",
                hospital.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendors::Tier;

    #[test]
    fn builtin_catalog_parses_and_validates() {
        let catalog = SeedCatalog::builtin().expect("embedded catalog must be valid");
        assert!(!catalog.vendors.is_empty());
        assert_eq!(catalog.hospitals.len(), 5);
        let safestay = catalog
            .vendors
            .iter()
            .find(|v| v.id == "safestay")
            .expect("safestay seed vendor");
        assert_eq!(safestay.tier, Tier::Premium);
        assert_eq!(safestay.service_category, "Housing");
    }

    #[test]
    fn duplicate_vendor_ids_are_rejected() {
        let yaml = r"
vendors:
  - id: dup
    business_name: One
    service_category: Housing
  - id: DUP
    business_name: Two
    service_category: Banking
hospitals: []
";
        let catalog: SeedCatalog = serde_yaml::from_str(yaml).unwrap();
        let result = validate_catalog(&catalog);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate vendor id")),
            "got: {result:?}"
        );
    }

    #[test]
    fn empty_business_name_is_rejected() {
        let yaml = r"
vendors:
  - id: blank
    business_name: '  '
    service_category: Housing
hospitals: []
";
        let catalog: SeedCatalog = serde_yaml::from_str(yaml).unwrap();
        assert!(validate_catalog(&catalog).is_err());
    }
}
