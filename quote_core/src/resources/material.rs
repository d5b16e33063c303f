//! Sheet and roll stock.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_amount;
use crate::errors::{CalcError, CalcResult};
use crate::units::Millimeters;

/// A printable substrate bought per sheet.
///
/// Roll-fed stock has no sheet format; both dimensions are `None` and the
/// imposition falls back to one item per "sheet".
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "6f1c2c1e-8f57-4c1a-9d61-0d3c4b1f2a10",
///   "name": "Silk 170g",
///   "sheetWidth_mm": 700.0,
///   "sheetHeight_mm": 1000.0,
///   "price": 0.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,

    pub name: String,

    /// Sheet width in millimeters (absent for roll stock)
    #[serde(rename = "sheetWidth_mm", default)]
    pub sheet_width_mm: Option<f64>,

    /// Sheet height in millimeters (absent for roll stock)
    #[serde(rename = "sheetHeight_mm", default)]
    pub sheet_height_mm: Option<f64>,

    /// Price per sheet
    pub price: f64,
}

impl Material {
    /// Sheet stock with a known format.
    pub fn sheet(id: Uuid, name: impl Into<String>, width_mm: f64, height_mm: f64, price: f64) -> Self {
        Material {
            id,
            name: name.into(),
            sheet_width_mm: Some(width_mm),
            sheet_height_mm: Some(height_mm),
            price,
        }
    }

    /// Roll-fed stock without sheet dimensions.
    pub fn roll(id: Uuid, name: impl Into<String>, price: f64) -> Self {
        Material {
            id,
            name: name.into(),
            sheet_width_mm: None,
            sheet_height_mm: None,
            price,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("sheetWidth_mm", self.sheet_width_mm),
            ("sheetHeight_mm", self.sheet_height_mm),
        ] {
            if let Some(v) = value {
                if !Millimeters(v).is_positive() {
                    return Err(CalcError::invalid_input(
                        field,
                        v.to_string(),
                        "Sheet dimensions must be positive",
                    ));
                }
            }
        }
        check_amount("price", self.price)
    }

    /// Sheet width and height, when both are known.
    pub fn sheet_format(&self) -> Option<(Millimeters, Millimeters)> {
        match (self.sheet_width_mm, self.sheet_height_mm) {
            (Some(w), Some(h)) => Some((Millimeters(w), Millimeters(h))),
            _ => None,
        }
    }

    /// Human-readable format, e.g. `"700 x 1000 mm"`.
    pub fn format_label(&self) -> String {
        match self.sheet_format() {
            Some((w, h)) => format!("{} x {} mm", w.0, h.0),
            None => "roll".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_format() {
        let m = Material::sheet(Uuid::nil(), "Silk 170g", 700.0, 1000.0, 0.5);
        assert_eq!(m.sheet_format(), Some((Millimeters(700.0), Millimeters(1000.0))));
        assert_eq!(m.format_label(), "700 x 1000 mm");
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_roll_stock() {
        let m = Material::roll(Uuid::nil(), "Vinyl", 3.2);
        assert!(m.sheet_format().is_none());
        assert_eq!(m.format_label(), "roll");
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut m = Material::sheet(Uuid::nil(), "Bad", 0.0, 1000.0, 0.5);
        assert!(m.validate().is_err());

        m.sheet_width_mm = Some(700.0);
        m.price = -1.0;
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_deserialize_platform_shape() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Uncoated 90g",
            "sheetWidth_mm": 450,
            "sheetHeight_mm": 320,
            "price": 0.08
        }"#;
        let m: Material = serde_json::from_str(json).unwrap();
        assert_eq!(m.sheet_width_mm, Some(450.0));
        assert_eq!(m.sheet_height_mm, Some(320.0));

        let roll: Material = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000002","name":"Banner","price":4}"#,
        )
        .unwrap();
        assert!(roll.sheet_format().is_none());
    }
}
