//! # Costing Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`imposition`] - Products per material sheet
//! - [`estimate`] - Full job cost breakdown and final price

pub mod estimate;
pub mod imposition;

// Re-export commonly used types
pub use estimate::{
    calculate, CalculationLineItem, CalculationResult, EstimateInput, JobSpec, LineItemKind,
    SheetUsage,
};
pub use imposition::{impose, items_per_sheet, Imposition, SheetLayout};
