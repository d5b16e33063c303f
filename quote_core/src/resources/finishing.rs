//! Finishing operations (laminating, folding, cutting, binding, ...).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_amount;
use crate::errors::CalcResult;

/// A finishing step priced per finished product, not per sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finishing {
    pub id: Uuid,

    pub name: String,

    /// Fixed cost per job
    pub setup_cost: f64,

    /// Variable cost per finished item
    pub cost_per_item: f64,
}

impl Finishing {
    pub fn new(id: Uuid, name: impl Into<String>, setup_cost: f64, cost_per_item: f64) -> Self {
        Finishing {
            id,
            name: name.into(),
            setup_cost,
            cost_per_item,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        check_amount("setupCost", self.setup_cost)?;
        check_amount("costPerItem", self.cost_per_item)
    }

    /// Cost of finishing `quantity` products.
    pub fn cost_for(&self, quantity: u64) -> f64 {
        self.setup_cost + self.cost_per_item * quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_for_quantity() {
        let lam = Finishing::new(Uuid::nil(), "Matt laminate", 10.0, 0.05);
        assert!((lam.cost_for(1000) - 60.0).abs() < 1e-9);
        assert_eq!(lam.cost_for(0), 10.0);
    }

    #[test]
    fn test_validate() {
        assert!(Finishing::new(Uuid::nil(), "Fold", 0.0, 0.0).validate().is_ok());
        assert!(Finishing::new(Uuid::nil(), "Fold", -5.0, 0.0).validate().is_err());
    }
}
