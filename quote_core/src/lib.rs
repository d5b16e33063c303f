//! # quote_core - Print-shop Cost Calculation Engine
//!
//! `quote_core` prices print jobs: it imposes a product format on a material
//! sheet, works out how many sheets a run needs, and turns material, machine,
//! labor and finishing rates into a line-itemized cost breakdown and a
//! marked-up final price.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Tenant-scoped lookups**: Records come in through the [`catalog::CostCatalog`] port
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::calculations::items_per_sheet;
//!
//! // How many 100 x 100 mm cards fit on a 700 x 1000 mm sheet?
//! assert_eq!(items_per_sheet(Some(700.0), Some(1000.0), 100.0, 100.0), 70);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Imposition and job cost estimate
//! - [`request`] - Client payload parsing and validation
//! - [`catalog`] - Lookup port, in-memory backend and request pipeline
//! - [`resources`] - Material, machine, finishing and labor rate records
//! - [`settings`] - Per-tenant costing policy
//! - [`quote`] - Attaching results to quotes
//! - [`file_io`] - Catalog files with atomic saves
//! - [`units`] - Unit wrappers and rounding
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod quote;
pub mod request;
pub mod resources;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationLineItem, CalculationResult, LineItemKind};
pub use catalog::{run_calculation, CostCatalog, InMemoryCatalog, TenantCatalog};
pub use errors::{CalcError, CalcResult, ErrorKind};
pub use file_io::{load_catalog, save_catalog, CatalogFile};
pub use request::CalculationRequest;
pub use settings::CostingSettings;
