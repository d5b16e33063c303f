//! # Quote Calculations
//!
//! A [`CalculationResult`] has no identity of its own. When a caller wants
//! to keep the pricing justification for a quote, it wraps the result in a
//! [`QuoteCalculation`]: one parent record plus one child row per line item.
//!
//! ```text
//! QuoteCalculation (id, quote_id, tenant_id, created, totals)
//! └── CalculationItemRow × n (calculation_id, position, type, description, ...)
//! ```
//!
//! ## Example
//!
//! ```rust
//! # use quote_core::calculations::estimate::{calculate, EstimateInput, JobSpec};
//! # use quote_core::resources::{Machine, Material, TenantId};
//! # use quote_core::settings::CostingSettings;
//! use quote_core::quote::QuoteCalculation;
//! use uuid::Uuid;
//! # let input = EstimateInput {
//! #     material: Material::sheet(Uuid::new_v4(), "Silk", 700.0, 1000.0, 0.5),
//! #     machine: Machine::new(Uuid::new_v4(), "Press", 30.0, 500.0, 80.0),
//! #     finishings: vec![],
//! #     labor_rates: vec![],
//! #     job: JobSpec { quantity: 1000, margin_percentage: 20.0, product_width_mm: 100.0, product_height_mm: 100.0 },
//! # };
//! # let result = calculate(&input, &CostingSettings::default()).unwrap();
//!
//! let quote_id = Uuid::new_v4();
//! let record = QuoteCalculation::new(quote_id, TenantId::new(Uuid::new_v4()), result);
//! assert_eq!(record.item_rows().len(), 3);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationLineItem, CalculationResult, LineItemKind};
use crate::resources::TenantId;

/// A calculation attached to a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCalculation {
    pub id: Uuid,

    pub quote_id: Uuid,

    pub tenant_id: TenantId,

    /// When the calculation was run
    pub created: DateTime<Utc>,

    pub result: CalculationResult,
}

impl QuoteCalculation {
    /// Attach a fresh result to a quote.
    pub fn new(quote_id: Uuid, tenant_id: TenantId, result: CalculationResult) -> Self {
        QuoteCalculation {
            id: Uuid::new_v4(),
            quote_id,
            tenant_id,
            created: Utc::now(),
            result,
        }
    }

    pub fn final_price(&self) -> f64 {
        self.result.final_price
    }

    /// Sum of the line totals of one kind.
    pub fn subtotal(&self, kind: LineItemKind) -> f64 {
        self.result.subtotal(kind)
    }

    /// One child row per line item, numbered from 0 in breakdown order.
    pub fn item_rows(&self) -> Vec<CalculationItemRow> {
        self.result
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| CalculationItemRow {
                calculation_id: self.id,
                position,
                item: item.clone(),
            })
            .collect()
    }
}

/// Persisted shape of one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationItemRow {
    pub calculation_id: Uuid,

    pub position: usize,

    #[serde(flatten)]
    pub item: CalculationLineItem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, EstimateInput, JobSpec};
    use crate::resources::{Finishing, LaborRate, Machine, Material};
    use crate::settings::CostingSettings;

    fn result() -> CalculationResult {
        let input = EstimateInput {
            material: Material::sheet(Uuid::from_u128(1), "Silk 170g", 700.0, 1000.0, 0.50),
            machine: Machine::new(Uuid::from_u128(2), "Offset B2", 30.0, 500.0, 80.0),
            finishings: vec![Finishing::new(Uuid::from_u128(3), "Matt laminate", 10.0, 0.05)],
            labor_rates: vec![LaborRate::new(Uuid::from_u128(4), "Operator", 45.0)],
            job: JobSpec {
                quantity: 1000,
                margin_percentage: 20.0,
                product_width_mm: 100.0,
                product_height_mm: 100.0,
            },
        };
        calculate(&input, &CostingSettings::default()).unwrap()
    }

    #[test]
    fn test_attach_to_quote() {
        let quote_id = Uuid::from_u128(0x51);
        let tenant = TenantId::new(Uuid::from_u128(0xA));
        let record = QuoteCalculation::new(quote_id, tenant, result());

        assert_eq!(record.quote_id, quote_id);
        assert_eq!(record.tenant_id, tenant);
        assert_eq!(record.final_price(), 162.3);
        assert_eq!(record.subtotal(LineItemKind::Material), 8.5);
        assert_eq!(record.subtotal(LineItemKind::Finishing), 60.0);
    }

    #[test]
    fn test_item_rows() {
        let record = QuoteCalculation::new(Uuid::from_u128(1), TenantId::new(Uuid::nil()), result());
        let rows = record.item_rows();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.calculation_id == record.id));
        assert_eq!(rows[3].position, 3);
        assert_eq!(rows[3].item.kind, LineItemKind::Finishing);

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["type"], "MATERIAL");
        assert_eq!(json["position"], 0);
        assert_eq!(json["totalCost"], 8.5);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let record = QuoteCalculation::new(Uuid::from_u128(1), TenantId::new(Uuid::nil()), result());
        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("\"quoteId\""));
        let roundtrip: QuoteCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, record);
    }
}
