//! # Calculation Requests
//!
//! The loosely typed payload a client posts to request a price, and its
//! validation into strongly typed job parameters.
//!
//! Numbers may arrive as JSON numbers or numeric strings (`"1000"`,
//! `" 20.5 "`). A field that is absent, `null` or blank is reported as
//! [`CalcError::MissingField`]; a field that is present but malformed is
//! reported as [`CalcError::InvalidInput`]. Nothing is defaulted.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::request::CalculationRequest;
//!
//! let request = CalculationRequest::from_json(r#"{
//!     "materialId": "00000000-0000-0000-0000-000000000001",
//!     "machineId": "00000000-0000-0000-0000-000000000002",
//!     "quantity": "1000",
//!     "marginPercentage": 20,
//!     "productWidth_mm": 100,
//!     "productHeight_mm": 100
//! }"#).unwrap();
//!
//! let parsed = request.parse().unwrap();
//! assert_eq!(parsed.job.quantity, 1000);
//! assert!(parsed.finishing_ids.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::calculations::JobSpec;
use crate::errors::{CalcError, CalcResult};

/// Largest integer an f64 represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Raw calculation payload as posted by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default)]
    pub material_id: Option<Value>,

    #[serde(default)]
    pub quantity: Option<Value>,

    #[serde(default)]
    pub machine_id: Option<Value>,

    /// Optional list of finishing ids
    #[serde(default)]
    pub finishing_ids: Option<Value>,

    #[serde(default)]
    pub margin_percentage: Option<Value>,

    #[serde(rename = "productWidth_mm", default)]
    pub product_width_mm: Option<Value>,

    #[serde(rename = "productHeight_mm", default)]
    pub product_height_mm: Option<Value>,
}

/// A request whose fields all parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRequest {
    pub material_id: Uuid,
    pub machine_id: Uuid,
    /// Distinct finishing ids in first-seen order
    pub finishing_ids: Vec<Uuid>,
    pub job: JobSpec,
}

impl CalculationRequest {
    /// Build a request from already typed values.
    pub fn new(material_id: Uuid, machine_id: Uuid, finishing_ids: &[Uuid], job: JobSpec) -> Self {
        CalculationRequest {
            material_id: Some(Value::from(material_id.to_string())),
            quantity: Some(Value::from(job.quantity)),
            machine_id: Some(Value::from(machine_id.to_string())),
            finishing_ids: Some(Value::from(
                finishing_ids.iter().map(|id| Value::from(id.to_string())).collect::<Vec<_>>(),
            )),
            margin_percentage: Some(Value::from(job.margin_percentage)),
            product_width_mm: Some(Value::from(job.product_width_mm)),
            product_height_mm: Some(Value::from(job.product_height_mm)),
        }
    }

    /// Deserialize a request body. Malformed JSON is a validation failure.
    pub fn from_json(body: &str) -> CalcResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| CalcError::invalid_input("body", truncate(body), e.to_string()))
    }

    /// Check presence of every required field, then parse each one.
    pub fn parse(&self) -> CalcResult<ValidatedRequest> {
        let material_id = required("materialId", &self.material_id)?;
        let quantity = required("quantity", &self.quantity)?;
        let machine_id = required("machineId", &self.machine_id)?;
        let margin = required("marginPercentage", &self.margin_percentage)?;
        let width = required("productWidth_mm", &self.product_width_mm)?;
        let height = required("productHeight_mm", &self.product_height_mm)?;

        let job = JobSpec {
            quantity: parse_quantity("quantity", quantity)?,
            margin_percentage: parse_number("marginPercentage", margin)?,
            product_width_mm: parse_number("productWidth_mm", width)?,
            product_height_mm: parse_number("productHeight_mm", height)?,
        };
        job.validate()?;

        Ok(ValidatedRequest {
            material_id: parse_id("materialId", material_id)?,
            machine_id: parse_id("machineId", machine_id)?,
            finishing_ids: parse_id_list("finishingIds", self.finishing_ids.as_ref())?,
            job,
        })
    }
}

fn required<'a>(field: &str, value: &'a Option<Value>) -> CalcResult<&'a Value> {
    match value {
        None | Some(Value::Null) => Err(CalcError::missing_field(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(CalcError::missing_field(field)),
        Some(v) => Ok(v),
    }
}

fn parse_number(field: &str, value: &Value) -> CalcResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::invalid_input(field, value.to_string(), "Expected a number")),
    }
}

fn parse_quantity(field: &str, value: &Value) -> CalcResult<u64> {
    let v = parse_number(field, value)?;
    if v.fract() != 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Expected a whole number"));
    }
    if v < 1.0 || v > MAX_EXACT_INTEGER {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Quantity must be a positive whole number",
        ));
    }
    Ok(v as u64)
}

fn parse_id(field: &str, value: &Value) -> CalcResult<Uuid> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| CalcError::invalid_input(field, value.to_string(), "Expected a UUID"))
}

fn parse_id_list(field: &str, value: Option<&Value>) -> CalcResult<Vec<Uuid>> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(CalcError::invalid_input(field, other.to_string(), "Expected a list of ids"))
        }
    };

    let mut ids = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let id = parse_id(&format!("{}[{}]", field, i), entry)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn truncate(body: &str) -> String {
    const MAX: usize = 80;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
