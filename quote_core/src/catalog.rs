//! # Catalog Lookups
//!
//! The read-only port the engine uses to resolve ids into records, and the
//! request pipeline built on top of it.
//!
//! Implementations must scope every lookup to the given tenant: a record
//! belonging to another company is reported as absent. The engine itself
//! never sees a tenant other than the caller's.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::{run_calculation, InMemoryCatalog, TenantCatalog};
//! use quote_core::calculations::JobSpec;
//! use quote_core::request::CalculationRequest;
//! use quote_core::resources::{LaborRate, Machine, Material, TenantId};
//! use uuid::Uuid;
//!
//! let tenant = TenantId::new(Uuid::new_v4());
//! let paper = Material::sheet(Uuid::new_v4(), "Silk 170g", 700.0, 1000.0, 0.50);
//! let press = Machine::new(Uuid::new_v4(), "Offset B2", 30.0, 500.0, 80.0);
//!
//! let mut catalog = InMemoryCatalog::new();
//! catalog.insert_tenant(tenant, TenantCatalog {
//!     materials: vec![paper.clone()],
//!     machines: vec![press.clone()],
//!     labor_rates: vec![LaborRate::new(Uuid::new_v4(), "Operator", 45.0)],
//!     ..TenantCatalog::default()
//! });
//!
//! let job = JobSpec { quantity: 1000, margin_percentage: 20.0, product_width_mm: 100.0, product_height_mm: 100.0 };
//! let request = CalculationRequest::new(paper.id, press.id, &[], job);
//!
//! let result = run_calculation(&catalog, tenant, &request).unwrap();
//! assert_eq!(result.final_price, 90.30);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::{calculate, CalculationResult, EstimateInput};
use crate::errors::{CalcError, CalcResult};
use crate::request::CalculationRequest;
use crate::resources::{Finishing, LaborRate, Machine, Material, TenantId};
use crate::settings::CostingSettings;

/// Tenant-scoped, read-only access to costing records.
///
/// All results for one estimate must come from a single consistent snapshot
/// of the store.
pub trait CostCatalog: Send + Sync {
    fn material(&self, tenant: TenantId, id: Uuid) -> CalcResult<Option<Material>>;

    fn machine(&self, tenant: TenantId, id: Uuid) -> CalcResult<Option<Machine>>;

    /// Finishings among `ids` that exist for the tenant, in any order.
    fn finishings(&self, tenant: TenantId, ids: &[Uuid]) -> CalcResult<Vec<Finishing>>;

    fn labor_rates(&self, tenant: TenantId) -> CalcResult<Vec<LaborRate>>;

    /// Costing policy of the tenant.
    fn costing_settings(&self, _tenant: TenantId) -> CalcResult<CostingSettings> {
        Ok(CostingSettings::default())
    }
}

/// All costing records of one tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantCatalog {
    pub settings: CostingSettings,
    pub materials: Vec<Material>,
    pub machines: Vec<Machine>,
    pub finishings: Vec<Finishing>,
    pub labor_rates: Vec<LaborRate>,
}

impl TenantCatalog {
    /// Validate every record and the settings.
    pub fn validate(&self) -> CalcResult<()> {
        self.settings.validate()?;
        for m in &self.materials {
            m.validate()?;
        }
        for m in &self.machines {
            m.validate()?;
        }
        for f in &self.finishings {
            f.validate()?;
        }
        for r in &self.labor_rates {
            r.validate()?;
        }
        Ok(())
    }
}

/// `CostCatalog` backed by per-tenant vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tenants: HashMap<TenantId, TenantCatalog>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the records of one tenant.
    pub fn insert_tenant(&mut self, tenant: TenantId, records: TenantCatalog) {
        self.tenants.insert(tenant, records);
    }

    pub fn tenant(&self, tenant: TenantId) -> Option<&TenantCatalog> {
        self.tenants.get(&tenant)
    }
}

impl CostCatalog for InMemoryCatalog {
    fn material(&self, tenant: TenantId, id: Uuid) -> CalcResult<Option<Material>> {
        Ok(self
            .tenant(tenant)
            .and_then(|t| t.materials.iter().find(|m| m.id == id))
            .cloned())
    }

    fn machine(&self, tenant: TenantId, id: Uuid) -> CalcResult<Option<Machine>> {
        Ok(self
            .tenant(tenant)
            .and_then(|t| t.machines.iter().find(|m| m.id == id))
            .cloned())
    }

    fn finishings(&self, tenant: TenantId, ids: &[Uuid]) -> CalcResult<Vec<Finishing>> {
        Ok(self
            .tenant(tenant)
            .map(|t| {
                t.finishings
                    .iter()
                    .filter(|f| ids.contains(&f.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn labor_rates(&self, tenant: TenantId) -> CalcResult<Vec<LaborRate>> {
        Ok(self
            .tenant(tenant)
            .map(|t| t.labor_rates.clone())
            .unwrap_or_default())
    }

    fn costing_settings(&self, tenant: TenantId) -> CalcResult<CostingSettings> {
        Ok(self
            .tenant(tenant)
            .map(|t| t.settings.clone())
            .unwrap_or_default())
    }
}

/// Resolve a validated request's ids into an [`EstimateInput`].
///
/// Fails with `NotFound` when the material, the machine or any requested
/// finishing is missing for the tenant. Finishings come back in request
/// order.
pub fn resolve_input(
    catalog: &dyn CostCatalog,
    tenant: TenantId,
    request: &CalculationRequest,
) -> CalcResult<EstimateInput> {
    let parsed = request.parse()?;

    let material = catalog
        .material(tenant, parsed.material_id)?
        .ok_or_else(|| CalcError::not_found("Material", parsed.material_id))?;
    let machine = catalog
        .machine(tenant, parsed.machine_id)?
        .ok_or_else(|| CalcError::not_found("Machine", parsed.machine_id))?;

    let mut found = catalog.finishings(tenant, &parsed.finishing_ids)?;
    let mut finishings = Vec::with_capacity(parsed.finishing_ids.len());
    for id in &parsed.finishing_ids {
        let pos = found
            .iter()
            .position(|f| f.id == *id)
            .ok_or_else(|| CalcError::not_found("Finishing", id))?;
        finishings.push(found.swap_remove(pos));
    }

    let labor_rates = catalog.labor_rates(tenant)?;
    debug!(
        %tenant,
        material = %material.name,
        machine = %machine.name,
        finishings = finishings.len(),
        labor_rates = labor_rates.len(),
        "resolved calculation inputs"
    );

    Ok(EstimateInput {
        material,
        machine,
        finishings,
        labor_rates,
        job: parsed.job,
    })
}

/// Parse, resolve and price one request for one tenant.
pub fn run_calculation(
    catalog: &dyn CostCatalog,
    tenant: TenantId,
    request: &CalculationRequest,
) -> CalcResult<CalculationResult> {
    let input = resolve_input(catalog, tenant, request)?;
    let settings = catalog.costing_settings(tenant)?;
    calculate(&input, &settings)
}
