//! Presses and other sheet-fed machines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_amount;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Hours, Minutes};

/// A machine that runs sheets.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "1b0e6c55-3a0e-4a53-9f0e-5b2a7d6c9e11",
///   "name": "Offset B2",
///   "setupTimeMinutes": 30,
///   "runSpeedPerHour": 500,
///   "costPerHour": 80
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: Uuid,

    pub name: String,

    /// Makeready time per job, in minutes
    pub setup_time_minutes: f64,

    /// Sheets per hour once running; always > 0
    pub run_speed_per_hour: f64,

    pub cost_per_hour: f64,
}

impl Machine {
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        setup_time_minutes: f64,
        run_speed_per_hour: f64,
        cost_per_hour: f64,
    ) -> Self {
        Machine {
            id,
            name: name.into(),
            setup_time_minutes,
            run_speed_per_hour,
            cost_per_hour,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.run_speed_per_hour.is_finite() || self.run_speed_per_hour <= 0.0 {
            return Err(CalcError::invalid_input(
                "runSpeedPerHour",
                self.run_speed_per_hour.to_string(),
                "Run speed must be positive",
            ));
        }
        check_amount("setupTimeMinutes", self.setup_time_minutes)?;
        check_amount("costPerHour", self.cost_per_hour)
    }

    pub fn setup_time(&self) -> Hours {
        Minutes(self.setup_time_minutes).into()
    }

    /// Time to run `sheets` sheets, excluding setup.
    pub fn run_time(&self, sheets: u64) -> Hours {
        Hours(sheets as f64 / self.run_speed_per_hour)
    }
}
