//! # Catalog Files
//!
//! A catalog file holds one tenant's price list (materials, machines,
//! finishings, labor rates and costing settings) as human-readable JSON.
//! It lets the engine run without a database: the CLI and test fixtures
//! load one and serve it through an [`InMemoryCatalog`].
//!
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Version validation**: files carry a semver schema version
//! - **Record validation**: every record is checked on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::{load_catalog, save_catalog, CatalogFile};
//! use quote_core::resources::TenantId;
//! use std::path::Path;
//! use uuid::Uuid;
//!
//! let file = CatalogFile::new(TenantId::new(Uuid::new_v4()), "Drukkerij Noord");
//! save_catalog(&file, Path::new("pricelist.json"))?;
//!
//! let loaded = load_catalog(Path::new("pricelist.json"))?;
//! let catalog = loaded.into_catalog();
//! # Ok::<(), quote_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{InMemoryCatalog, TenantCatalog};
use crate::errors::{CalcError, CalcResult};
use crate::resources::TenantId;

/// Current schema version for catalog files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// On-disk price list of one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub tenant_id: TenantId,

    /// Company name, for display only
    #[serde(default)]
    pub company: String,

    /// When the file was last written
    pub modified: DateTime<Utc>,

    #[serde(flatten)]
    pub records: TenantCatalog,
}

impl CatalogFile {
    /// Empty price list for a tenant.
    pub fn new(tenant_id: TenantId, company: impl Into<String>) -> Self {
        CatalogFile {
            version: SCHEMA_VERSION.to_string(),
            tenant_id,
            company: company.into(),
            modified: Utc::now(),
            records: TenantCatalog::default(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Serve this file's records through the catalog port.
    pub fn into_catalog(self) -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert_tenant(self.tenant_id, self.records);
        catalog
    }
}

/// Save a catalog file with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_catalog(file: &CatalogFile, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(file)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), tenant = %file.tenant_id, "saved catalog");
    Ok(())
}

/// Load and validate a catalog file.
///
/// # Returns
///
/// * `Ok(CatalogFile)` - Parsed file with valid records
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::InvalidInput)` - A record fails validation
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_catalog(path: &Path) -> CalcResult<CatalogFile> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let file: CatalogFile = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&file.version)?;
    file.records.validate()?;

    info!(
        path = %path.display(),
        tenant = %file.tenant_id,
        materials = file.records.materials.len(),
        machines = file.records.machines.len(),
        "loaded catalog"
    );
    Ok(file)
}

/// Check that a file version can be read by this schema version.
///
/// Major versions must match. While the schema is 0.x, a file with a newer
/// minor version is rejected as well.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|e| CalcError::internal(e.to_string()))?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CostCatalog;
    use crate::resources::{Machine, Material};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn sample() -> CatalogFile {
        let mut file = CatalogFile::new(TenantId::new(Uuid::from_u128(0xA)), "Drukkerij Noord");
        file.records
            .materials
            .push(Material::sheet(Uuid::from_u128(1), "Silk 170g", 700.0, 1000.0, 0.5));
        file.records
            .machines
            .push(Machine::new(Uuid::from_u128(2), "Offset B2", 30.0, 500.0, 80.0));
        file
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pricelist.json");

        let file = sample();
        save_catalog(&file, &path).unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pricelist.json");

        save_catalog(&sample(), &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("pricelist.json.tmp").exists());
    }

    #[test]
    fn test_into_catalog_serves_records() {
        let file = sample();
        let tenant = file.tenant_id;
        let catalog = file.into_catalog();
        let material = catalog.material(tenant, Uuid::from_u128(1)).unwrap();
        assert_eq!(material.unwrap().name, "Silk 170g");
        assert!(catalog
            .material(TenantId::new(Uuid::nil()), Uuid::from_u128(1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_rejects_invalid_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");

        let mut file = sample();
        file.records.machines[0].run_speed_per_hour = 0.0;
        save_catalog(&file, &path).unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "runSpeedPerHour"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_catalog(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_catalog(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("banana").is_err());
    }
}
