//! # Job Cost Estimate
//!
//! Prices a print run of `quantity` products of one format on one material
//! and one machine, with optional finishings, and marks the total up by a
//! margin percentage.
//!
//! ## Steps
//!
//! 1. Impose the product on the material sheet
//! 2. Sheets needed, plus the waste/makeready allowance
//! 3. Material: sheets × price per sheet
//! 4. Machine: (setup + sheets / run speed) hours × machine rate
//! 5. Labor: machine hours × operator rate
//! 6. Finishing: setup + per-item cost × products (not sheets)
//! 7. Total, margin, final price; every output rounded to 2 decimals
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::estimate::{calculate, EstimateInput, JobSpec};
//! use quote_core::resources::{LaborRate, Machine, Material};
//! use quote_core::settings::CostingSettings;
//! use uuid::Uuid;
//!
//! let input = EstimateInput {
//!     material: Material::sheet(Uuid::new_v4(), "Silk 170g", 700.0, 1000.0, 0.50),
//!     machine: Machine::new(Uuid::new_v4(), "Offset B2", 30.0, 500.0, 80.0),
//!     finishings: vec![],
//!     labor_rates: vec![LaborRate::new(Uuid::new_v4(), "Operator", 45.0)],
//!     job: JobSpec {
//!         quantity: 1000,
//!         margin_percentage: 20.0,
//!         product_width_mm: 100.0,
//!         product_height_mm: 100.0,
//!     },
//! };
//!
//! let result = calculate(&input, &CostingSettings::default()).unwrap();
//! assert_eq!(result.total_cost, 75.25);
//! assert_eq!(result.final_price, 90.30);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::imposition::{impose, SheetLayout};
use crate::errors::{CalcError, CalcResult};
use crate::resources::{Finishing, LaborRate, Machine, Material};
use crate::settings::CostingSettings;
use crate::units::{round2, Hours, Millimeters};

/// What the customer orders.
///
/// ## JSON Example
///
/// ```json
/// {
///   "quantity": 1000,
///   "marginPercentage": 20.0,
///   "productWidth_mm": 100.0,
///   "productHeight_mm": 100.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Finished products to deliver
    pub quantity: u64,

    /// Markup on cost in percent (15 means 15 %)
    pub margin_percentage: f64,

    #[serde(rename = "productWidth_mm")]
    pub product_width_mm: f64,

    #[serde(rename = "productHeight_mm")]
    pub product_height_mm: f64,
}

impl JobSpec {
    pub fn validate(&self) -> CalcResult<()> {
        if self.quantity == 0 {
            return Err(CalcError::invalid_input(
                "quantity",
                "0",
                "Quantity must be a positive whole number",
            ));
        }
        if !self.margin_percentage.is_finite() || self.margin_percentage < 0.0 {
            return Err(CalcError::invalid_input(
                "marginPercentage",
                self.margin_percentage.to_string(),
                "Margin must be a non-negative percentage",
            ));
        }
        if !Millimeters(self.product_width_mm).is_positive() {
            return Err(CalcError::invalid_input(
                "productWidth_mm",
                self.product_width_mm.to_string(),
                "Product width must be positive",
            ));
        }
        if !Millimeters(self.product_height_mm).is_positive() {
            return Err(CalcError::invalid_input(
                "productHeight_mm",
                self.product_height_mm.to_string(),
                "Product height must be positive",
            ));
        }
        Ok(())
    }

    pub fn format_label(&self) -> String {
        format!("{} x {} mm", self.product_width_mm, self.product_height_mm)
    }
}

/// Everything the estimator needs, already resolved for one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    pub material: Material,

    pub machine: Machine,

    /// Selected finishings, in the order they should be listed
    pub finishings: Vec<Finishing>,

    /// All labor rates of the tenant
    pub labor_rates: Vec<LaborRate>,

    pub job: JobSpec,
}

impl EstimateInput {
    pub fn validate(&self) -> CalcResult<()> {
        self.job.validate()?;
        self.material.validate()?;
        self.machine.validate()?;
        for finishing in &self.finishings {
            finishing.validate()?;
        }
        for rate in &self.labor_rates {
            rate.validate()?;
        }
        Ok(())
    }
}

/// Cost category of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemKind {
    Material,
    Machine,
    Labor,
    Finishing,
}

/// One priced line of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationLineItem {
    #[serde(rename = "type")]
    pub kind: LineItemKind,

    pub description: String,

    /// Sheets for material, hours for machine and labor, products for finishing
    pub quantity: f64,

    pub unit_cost: f64,

    pub total_cost: f64,
}

impl CalculationLineItem {
    fn new(kind: LineItemKind, description: String, quantity: f64, unit_cost: f64, total_cost: f64) -> Self {
        CalculationLineItem {
            kind,
            description,
            quantity,
            unit_cost,
            total_cost,
        }
    }

    fn rounded(self) -> Self {
        CalculationLineItem {
            quantity: round2(self.quantity),
            unit_cost: round2(self.unit_cost),
            total_cost: round2(self.total_cost),
            ..self
        }
    }
}

/// Sheet consumption behind the material line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetUsage {
    pub items_per_sheet: u64,

    /// Sheets before the waste allowance
    pub sheets_needed: u64,

    /// Sheets including the waste allowance
    pub sheets_with_waste: u64,

    /// Grid used on the sheet, absent when the material has no sheet format
    pub layout: Option<SheetLayout>,
}

/// Priced breakdown of a job.
///
/// ## JSON Example
///
/// ```json
/// {
///   "totalCost": 75.25,
///   "marginPercentage": 20.0,
///   "marginAmount": 15.05,
///   "finalPrice": 90.3,
///   "sheets": { "itemsPerSheet": 70, "sheetsNeeded": 15, "sheetsWithWaste": 17, "layout": { "columns": 7, "rows": 10, "rotated": false } },
///   "items": [
///     { "type": "MATERIAL", "description": "17 sheets Silk 170g (70 per sheet)", "quantity": 17.0, "unitCost": 0.5, "totalCost": 8.5 },
///     { "type": "MACHINE", "description": "Machine: Offset B2", "quantity": 0.53, "unitCost": 80.0, "totalCost": 42.72 },
///     { "type": "LABOR", "description": "Labor: Operator", "quantity": 0.53, "unitCost": 45.0, "totalCost": 24.03 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Sum of all line totals
    pub total_cost: f64,

    /// Margin percentage as requested
    pub margin_percentage: f64,

    pub margin_amount: f64,

    /// Total cost plus margin
    pub final_price: f64,

    pub sheets: SheetUsage,

    pub items: Vec<CalculationLineItem>,
}

impl CalculationResult {
    /// Line items of one kind, in breakdown order.
    pub fn items_of(&self, kind: LineItemKind) -> impl Iterator<Item = &CalculationLineItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    /// Sum of the (rounded) line totals of one kind.
    pub fn subtotal(&self, kind: LineItemKind) -> f64 {
        round2(self.items_of(kind).map(|item| item.total_cost).sum())
    }
}

/// Apply the waste allowance to a raw sheet count, rounding up.
///
/// Computed as `ceil(sheets * (100 + pct) / 100)` so exact results stay
/// exact: 10 sheets at 10 % is 11 sheets, not 12.
pub fn sheets_with_waste(sheets: u64, waste_percent: f64) -> u64 {
    (sheets as f64 * (100.0 + waste_percent) / 100.0).ceil() as u64
}

/// Price a job.
///
/// This is a pure function over its inputs.
///
/// # Returns
///
/// * `Ok(CalculationResult)` - Rounded breakdown and final price
/// * `Err(CalcError::InvalidInput)` - A job value or record is out of range,
///   or the product is too small for its per-sheet count to be represented
/// * `Err(CalcError::ProductTooLarge)` - The product does not fit the sheet
///   in either orientation
pub fn calculate(input: &EstimateInput, settings: &CostingSettings) -> CalcResult<CalculationResult> {
    input.validate()?;
    settings.validate()?;

    let EstimateInput {
        material,
        machine,
        finishings,
        labor_rates,
        job,
    } = input;

    // Imposition
    let imposition = impose(
        material.sheet_width_mm,
        material.sheet_height_mm,
        job.product_width_mm,
        job.product_height_mm,
    )?;
    if !imposition.fits() {
        return Err(CalcError::product_too_large(job.format_label(), material.format_label()));
    }
    let items_per_sheet = imposition.items_per_sheet;

    let sheets_needed = job.quantity.div_ceil(items_per_sheet);
    let sheets = sheets_with_waste(sheets_needed, settings.waste_percent);
    debug!(items_per_sheet, sheets_needed, sheets_with_waste = sheets, "imposed product on sheet");

    let mut items = Vec::with_capacity(3 + finishings.len());

    // Material
    items.push(CalculationLineItem::new(
        LineItemKind::Material,
        format!("{} sheets {} ({} per sheet)", sheets, material.name, items_per_sheet),
        sheets as f64,
        material.price,
        sheets as f64 * material.price,
    ));

    // Machine time scales with sheets, not products
    let machine_hours: Hours = machine.setup_time() + machine.run_time(sheets);
    items.push(CalculationLineItem::new(
        LineItemKind::Machine,
        format!("Machine: {}", machine.name),
        machine_hours.value(),
        machine.cost_per_hour,
        machine_hours.value() * machine.cost_per_hour,
    ));

    // Labor
    let operator = settings.operator_rate(labor_rates);
    if operator.is_default() {
        warn!(
            rate = operator.cost_per_hour(),
            "no matching operator labor rate, using default rate"
        );
    }
    items.push(CalculationLineItem::new(
        LineItemKind::Labor,
        format!("Labor: {}", operator.label()),
        machine_hours.value(),
        operator.cost_per_hour(),
        machine_hours.value() * operator.cost_per_hour(),
    ));

    // Finishing scales with products, not sheets
    for finishing in finishings {
        items.push(CalculationLineItem::new(
            LineItemKind::Finishing,
            format!("Finishing: {}", finishing.name),
            job.quantity as f64,
            finishing.cost_per_item,
            finishing.cost_for(job.quantity),
        ));
    }

    let total_cost: f64 = items.iter().map(|item| item.total_cost).sum();
    let margin_amount = total_cost * (job.margin_percentage / 100.0);
    let final_price = total_cost + margin_amount;
    debug!(total_cost, margin_amount, final_price, "priced job");

    Ok(CalculationResult {
        total_cost: round2(total_cost),
        margin_percentage: job.margin_percentage,
        margin_amount: round2(margin_amount),
        final_price: round2(final_price),
        sheets: SheetUsage {
            items_per_sheet,
            sheets_needed,
            sheets_with_waste: sheets,
            layout: imposition.layout,
        },
        items: items.into_iter().map(CalculationLineItem::rounded).collect(),
    })
}
