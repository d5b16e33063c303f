//! Hourly labor rates per role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_amount;
use crate::errors::CalcResult;

/// Hourly cost of a staff role. `role_name` is free text entered by the tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborRate {
    pub id: Uuid,

    pub role_name: String,

    pub cost_per_hour: f64,
}

impl LaborRate {
    pub fn new(id: Uuid, role_name: impl Into<String>, cost_per_hour: f64) -> Self {
        LaborRate {
            id,
            role_name: role_name.into(),
            cost_per_hour,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        check_amount("costPerHour", self.cost_per_hour)
    }

    /// Case-insensitive exact match on the role name.
    pub fn is_role(&self, role: &str) -> bool {
        self.role_name.trim().to_lowercase() == role.trim().to_lowercase()
    }

    /// Case-insensitive substring match on the role name.
    pub fn role_contains(&self, needle: &str) -> bool {
        self.role_name.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_matching() {
        let rate = LaborRate::new(Uuid::nil(), "Press Operator", 45.0);
        assert!(rate.role_contains("operator"));
        assert!(rate.role_contains("OPERATOR"));
        assert!(!rate.is_role("operator"));
        assert!(rate.is_role("press operator "));
    }
}
