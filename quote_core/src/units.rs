//! # Unit Types
//!
//! Lightweight newtype wrappers for the units the costing engine mixes:
//! sheet and product formats in millimeters, machine times in minutes and
//! hours. They serialize as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::units::{Hours, Minutes, round2};
//!
//! let setup = Minutes(30.0);
//! let hours: Hours = setup.into();
//! assert_eq!(hours.0, 0.5);
//!
//! assert_eq!(round2(42.7199999), 42.72);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Millimeters {
    /// True when the value is a usable physical dimension (finite and > 0)
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl From<Minutes> for Hours {
    fn from(min: Minutes) -> Self {
        Hours(min.0 / 60.0)
    }
}

impl From<Hours> for Minutes {
    fn from(h: Hours) -> Self {
        Minutes(h.0 * 60.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Minutes);
impl_arithmetic!(Hours);

// ============================================================================
// Rounding
// ============================================================================

/// Round to 2 decimal places, halves away from zero.
///
/// Applied to every number that leaves the estimator; intermediate values
/// stay unrounded.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
