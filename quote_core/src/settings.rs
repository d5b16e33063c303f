//! # Costing Settings
//!
//! Per-tenant policy values that shape an estimate. The defaults reproduce
//! the platform's long-standing constants: 10 % waste/makeready allowance
//! and a 50/hour operator rate when no operator labor rate is on file.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::settings::CostingSettings;
//!
//! let settings: CostingSettings = serde_json::from_str(r#"{ "wastePercent": 15 }"#).unwrap();
//! assert_eq!(settings.waste_percent, 15.0);
//! assert_eq!(settings.default_operator_rate, 50.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::resources::LaborRate;

/// Waste/makeready allowance applied to the raw sheet count, in percent.
pub const DEFAULT_WASTE_PERCENT: f64 = 10.0;

/// Operator rate used when no labor rate matches.
pub const DEFAULT_OPERATOR_RATE: f64 = 50.0;

/// Substring that identifies an operator role when no explicit role is set.
pub const OPERATOR_ROLE_KEYWORD: &str = "operator";

/// Tenant-level costing policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostingSettings {
    /// Extra sheets on top of the raw sheet count, in percent
    pub waste_percent: f64,

    /// Exact labor role (case-insensitive) to price machine time with.
    ///
    /// When `None`, the first labor rate whose role name contains
    /// "operator" is used.
    pub operator_role: Option<String>,

    /// Rate used when no labor rate matches
    pub default_operator_rate: f64,
}

impl Default for CostingSettings {
    fn default() -> Self {
        CostingSettings {
            waste_percent: DEFAULT_WASTE_PERCENT,
            operator_role: None,
            default_operator_rate: DEFAULT_OPERATOR_RATE,
        }
    }
}

impl CostingSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.waste_percent.is_finite() || self.waste_percent < 0.0 {
            return Err(CalcError::invalid_input(
                "wastePercent",
                self.waste_percent.to_string(),
                "Waste allowance must be a non-negative percentage",
            ));
        }
        if !self.default_operator_rate.is_finite() || self.default_operator_rate < 0.0 {
            return Err(CalcError::invalid_input(
                "defaultOperatorRate",
                self.default_operator_rate.to_string(),
                "Default operator rate must be non-negative",
            ));
        }
        if let Some(role) = &self.operator_role {
            if role.trim().is_empty() {
                return Err(CalcError::invalid_input(
                    "operatorRole",
                    role.clone(),
                    "Operator role must not be blank",
                ));
            }
        }
        Ok(())
    }

    /// Pick the hourly rate for machine operators from the tenant's labor rates.
    pub fn operator_rate<'a>(&self, rates: &'a [LaborRate]) -> OperatorRate<'a> {
        let found = match &self.operator_role {
            Some(role) => rates.iter().find(|r| r.is_role(role)),
            None => rates.iter().find(|r| r.role_contains(OPERATOR_ROLE_KEYWORD)),
        };
        match found {
            Some(rate) => OperatorRate::Matched(rate),
            None => OperatorRate::Default(self.default_operator_rate),
        }
    }
}

/// Outcome of the operator rate lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperatorRate<'a> {
    Matched(&'a LaborRate),
    Default(f64),
}

impl OperatorRate<'_> {
    pub fn cost_per_hour(&self) -> f64 {
        match self {
            OperatorRate::Matched(rate) => rate.cost_per_hour,
            OperatorRate::Default(rate) => *rate,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, OperatorRate::Default(_))
    }

    /// Label for the labor line item.
    pub fn label(&self) -> String {
        match self {
            OperatorRate::Matched(rate) => rate.role_name.clone(),
            OperatorRate::Default(_) => "Operator (default rate)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn rates() -> Vec<LaborRate> {
        vec![
            LaborRate::new(Uuid::from_u128(1), "Designer", 60.0),
            LaborRate::new(Uuid::from_u128(2), "Press OPERATOR", 45.0),
            LaborRate::new(Uuid::from_u128(3), "Finishing operator", 38.0),
        ]
    }

    #[test]
    fn test_defaults() {
        let s = CostingSettings::default();
        assert_eq!(s.waste_percent, 10.0);
        assert_eq!(s.default_operator_rate, 50.0);
        assert!(s.operator_role.is_none());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_keyword_match_takes_first() {
        let rates = rates();
        let rate = CostingSettings::default().operator_rate(&rates);
        assert_eq!(rate.cost_per_hour(), 45.0);
        assert_eq!(rate.label(), "Press OPERATOR");
    }

    #[test]
    fn test_explicit_role() {
        let rates = rates();
        let settings = CostingSettings {
            operator_role: Some("finishing Operator".to_string()),
            ..CostingSettings::default()
        };
        assert_eq!(settings.operator_rate(&rates).cost_per_hour(), 38.0);
    }

    #[test]
    fn test_explicit_role_missing_uses_default() {
        let rates = rates();
        let settings = CostingSettings {
            operator_role: Some("Pressman".to_string()),
            default_operator_rate: 55.0,
            ..CostingSettings::default()
        };
        let rate = settings.operator_rate(&rates);
        assert!(rate.is_default());
        assert_eq!(rate.cost_per_hour(), 55.0);
    }

    #[test]
    fn test_no_rates_uses_default() {
        let rate = CostingSettings::default().operator_rate(&[]);
        assert_eq!(rate, OperatorRate::Default(50.0));
        assert_eq!(rate.label(), "Operator (default rate)");
    }

    #[test]
    fn test_validate_rejects_negative_waste() {
        let settings = CostingSettings {
            waste_percent: -1.0,
            ..CostingSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: CostingSettings = serde_json::from_str(r#"{"operatorRole":"Operator"}"#).unwrap();
        assert_eq!(s.operator_role.as_deref(), Some("Operator"));
        assert_eq!(s.waste_percent, DEFAULT_WASTE_PERCENT);
    }
}
