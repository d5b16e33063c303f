//! # Catalog Records
//!
//! The tenant-owned records the costing engine reads: sheet materials,
//! presses, finishing operations and labor rates. They are owned by an
//! external data store; the engine never mutates them.
//!
//! Field names serialize in the same camelCase shape the rest of the
//! platform uses (`sheetWidth_mm`, `runSpeedPerHour`, `roleName`, ...), so a
//! record fetched from the API can be deserialized directly.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::resources::{Material, Machine};
//! use uuid::Uuid;
//!
//! let paper = Material::sheet(Uuid::new_v4(), "Silk 170g", 700.0, 1000.0, 0.50);
//! assert_eq!(paper.format_label(), "700 x 1000 mm");
//!
//! let press = Machine::new(Uuid::new_v4(), "Offset B2", 30.0, 500.0, 80.0);
//! assert!(press.validate().is_ok());
//! ```

pub mod finishing;
pub mod labor;
pub mod machine;
pub mod material;

pub use finishing::Finishing;
pub use labor::LaborRate;
pub use machine::Machine;
pub use material::Material;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

/// Identifier of the company (tenant) that owns a set of catalog records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    pub fn new(id: Uuid) -> Self {
        TenantId(id)
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TenantId {
    fn from(id: Uuid) -> Self {
        TenantId(id)
    }
}

/// Reject negative, NaN and infinite amounts.
pub(crate) fn check_amount(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Amount must be a finite, non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_serializes_as_uuid() {
        let id = Uuid::from_u128(0x42);
        let tenant = TenantId::new(id);
        let json = serde_json::to_string(&tenant).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        assert_eq!(tenant.to_string(), id.to_string());
    }

    #[test]
    fn test_check_amount() {
        assert!(check_amount("price", 0.0).is_ok());
        assert!(check_amount("price", 12.5).is_ok());
        assert!(check_amount("price", -0.01).is_err());
        assert!(check_amount("price", f64::NAN).is_err());
    }
}
