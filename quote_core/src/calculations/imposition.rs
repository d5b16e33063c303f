//! # Sheet Imposition
//!
//! Counts how many rectangular products fit on one rectangular sheet in a
//! straight grid, trying the product as given and turned 90°.
//!
//! ## Assumptions
//!
//! - One orientation for the whole sheet (no mixed layouts)
//! - No bleed, gutter, gripper or cutting margins
//! - Upper-bound heuristic, not a bin-packing solver
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::imposition::{impose, items_per_sheet};
//!
//! // A4 sheet, A7-ish cards: 3 x 3 grid
//! assert_eq!(items_per_sheet(Some(210.0), Some(297.0), 70.0, 99.0), 9);
//!
//! let imposition = impose(Some(700.0), Some(1000.0), 100.0, 100.0)?;
//! assert_eq!(imposition.items_per_sheet, 70);
//! let layout = imposition.layout.unwrap();
//! assert_eq!((layout.columns, layout.rows), (7, 10));
//! # Ok::<(), quote_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Millimeters;

/// Items per sheet reported when a dimension is missing or unusable.
pub const FALLBACK_ITEMS_PER_SHEET: u64 = 1;

/// Grid chosen for the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLayout {
    /// Items across the sheet width
    pub columns: u64,
    /// Items down the sheet height
    pub rows: u64,
    /// True when the product is turned 90°
    pub rotated: bool,
}

impl SheetLayout {
    /// Items in the grid, `None` when the count does not fit in a `u64`.
    pub fn count(&self) -> Option<u64> {
        self.columns.checked_mul(self.rows)
    }
}

/// Result of imposing one product format on one sheet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Imposition {
    /// Whole products per sheet; 0 means the product does not fit
    pub items_per_sheet: u64,

    /// Winning grid, `None` for the missing-dimension fallback
    pub layout: Option<SheetLayout>,
}

impl Imposition {
    pub fn fits(&self) -> bool {
        self.items_per_sheet > 0
    }
}

/// Impose a product on a sheet and report the winning grid.
///
/// Any missing, zero, negative or non-finite dimension yields the fallback
/// of one item per sheet with no layout. Ties between the two orientations
/// keep the product unrotated.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - The product is so small relative to the
///   sheet that the per-sheet count cannot be represented. The error names
///   the smaller product dimension.
pub fn impose(
    sheet_width_mm: Option<f64>,
    sheet_height_mm: Option<f64>,
    item_width_mm: f64,
    item_height_mm: f64,
) -> CalcResult<Imposition> {
    let dims = (
        sheet_width_mm.map(Millimeters),
        sheet_height_mm.map(Millimeters),
        Millimeters(item_width_mm),
        Millimeters(item_height_mm),
    );
    let (sw, sh, iw, ih) = match dims {
        (Some(sw), Some(sh), iw, ih)
            if sw.is_positive() && sh.is_positive() && iw.is_positive() && ih.is_positive() =>
        {
            (sw.0, sh.0, iw.0, ih.0)
        }
        _ => {
            return Ok(Imposition {
                items_per_sheet: FALLBACK_ITEMS_PER_SHEET,
                layout: None,
            })
        }
    };

    let (normal, rotated) = match (grid(sw, sh, iw, ih, false), grid(sw, sh, ih, iw, true)) {
        (Some(normal), Some(rotated)) => (normal, rotated),
        _ => return Err(uncountable(iw, ih)),
    };
    let (layout, count) = if rotated.1 > normal.1 { rotated } else { normal };

    Ok(Imposition {
        items_per_sheet: count,
        layout: Some(layout),
    })
}

/// Maximum number of whole products per sheet.
///
/// `max(floor(sw/iw) * floor(sh/ih), floor(sw/ih) * floor(sh/iw))`, or 1
/// when any dimension is missing or not positive. Counts beyond `u64::MAX`
/// saturate.
pub fn items_per_sheet(
    sheet_width_mm: Option<f64>,
    sheet_height_mm: Option<f64>,
    item_width_mm: f64,
    item_height_mm: f64,
) -> u64 {
    impose(sheet_width_mm, sheet_height_mm, item_width_mm, item_height_mm)
        .map_or(u64::MAX, |imposition| imposition.items_per_sheet)
}

/// Grid of `iw x ih` items on a `sw x sh` sheet with its item count.
fn grid(sw: f64, sh: f64, iw: f64, ih: f64, rotated: bool) -> Option<(SheetLayout, u64)> {
    let layout = SheetLayout {
        columns: fit(sw, iw)?,
        rows: fit(sh, ih)?,
        rotated,
    };
    Some((layout, layout.count()?))
}

/// Whole items of length `item` along `span`, `None` past `u64` range.
fn fit(span: f64, item: f64) -> Option<u64> {
    let n = (span / item).floor();
    // u64::MAX as f64 rounds up to 2^64, which is itself out of range
    (n.is_finite() && n < u64::MAX as f64).then_some(n as u64)
}

fn uncountable(item_width_mm: f64, item_height_mm: f64) -> CalcError {
    let (field, value) = if item_width_mm <= item_height_mm {
        ("productWidth_mm", item_width_mm)
    } else {
        ("productHeight_mm", item_height_mm)
    };
    CalcError::invalid_input(
        field,
        value.to_string(),
        "Product is too small to count how many fit on the sheet",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_a4_grid() {
        // 210/70 = 3, 297/99 = 3; rotated: 210/99 = 2, 297/70 = 4 -> 8
        let imp = impose(Some(210.0), Some(297.0), 70.0, 99.0).unwrap();
        assert_eq!(imp.items_per_sheet, 9);
        assert_eq!(
            imp.layout,
            Some(SheetLayout {
                columns: 3,
                rows: 3,
                rotated: false
            })
        );
    }

    #[test]
    fn test_orientation_choice() {
        // sheet 1000 x 700, item 300 x 100:
        //   normal  3 x 7 = 21
        //   rotated 10 x 2 = 20
        assert_eq!(items_per_sheet(Some(1000.0), Some(700.0), 300.0, 100.0), 21);

        // sheet 320 x 450, item 200 x 100:
        //   normal  1 x 4 = 4
        //   rotated 3 x 2 = 6
        let imp = impose(Some(320.0), Some(450.0), 200.0, 100.0).unwrap();
        assert_eq!(imp.items_per_sheet, 6);
        assert!(imp.layout.unwrap().rotated);
    }

    #[test]
    fn test_too_large() {
        let imp = impose(Some(100.0), Some(100.0), 200.0, 200.0).unwrap();
        assert_eq!(imp.items_per_sheet, 0);
        assert!(!imp.fits());
    }

    #[test]
    fn test_fits_only_rotated() {
        // 300 x 100 item on a 100 x 300 sheet only fits turned
        assert_eq!(items_per_sheet(Some(100.0), Some(300.0), 300.0, 100.0), 1);
    }

    #[test]
    fn test_missing_dimensions_fall_back_to_one() {
        assert_eq!(items_per_sheet(None, Some(1000.0), 100.0, 100.0), 1);
        assert_eq!(items_per_sheet(Some(700.0), None, 100.0, 100.0), 1);
        assert_eq!(items_per_sheet(Some(0.0), Some(1000.0), 100.0, 100.0), 1);
        assert_eq!(items_per_sheet(Some(700.0), Some(1000.0), 0.0, 100.0), 1);
        assert_eq!(items_per_sheet(Some(700.0), Some(1000.0), 100.0, f64::NAN), 1);
        assert!(impose(None, None, 100.0, 100.0).unwrap().layout.is_none());
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(items_per_sheet(Some(700.0), Some(1000.0), 100.0, 100.0), 70);
        assert_eq!(items_per_sheet(Some(100.0), Some(100.0), 100.0, 100.0), 1);
    }

    #[test]
    fn test_tiny_product_count_is_rejected() {
        // 7e11 x 1e12 cells, product overflows u64
        let err = impose(Some(700.0), Some(1000.0), 1e-9, 1e-9).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "productWidth_mm"));

        let err = impose(Some(700.0), Some(1000.0), 5.0, 1e-300).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "productHeight_mm"));

        assert_eq!(items_per_sheet(Some(700.0), Some(1000.0), 1e-9, 1e-9), u64::MAX);
    }

    #[test]
    fn test_small_product_still_counts() {
        // 1/1024 mm: 716 800 x 1 024 000
        assert_eq!(
            items_per_sheet(Some(700.0), Some(1000.0), 0.0009765625, 0.0009765625),
            734_003_200_000
        );
    }

    #[test]
    fn test_fit_bounds() {
        assert_eq!(fit(10.0, 3.0), Some(3));
        assert_eq!(fit(f64::MAX, f64::MIN_POSITIVE), None);
        assert_eq!(fit(1e20, 1.0), None);
        assert_eq!(
            SheetLayout { columns: u64::MAX, rows: 2, rotated: false }.count(),
            None
        );
    }

    /// Dimensions from 1e-9 mm to 1e9 mm, log-uniform.
    fn dim() -> impl Strategy<Value = f64> {
        (-9.0f64..9.0).prop_map(|exp| 10f64.powf(exp))
    }

    proptest! {
        #[test]
        fn prop_symmetric_in_item_orientation(sw in dim(), sh in dim(), iw in dim(), ih in dim()) {
            prop_assert_eq!(
                impose(Some(sw), Some(sh), iw, ih).map(|i| i.items_per_sheet),
                impose(Some(sw), Some(sh), ih, iw).map(|i| i.items_per_sheet)
            );
        }

        #[test]
        fn prop_zero_dimension_gives_one(
            a in dim(),
            b in dim(),
            c in dim(),
            which in 0usize..4,
        ) {
            let mut dims = [a, b, c, a];
            dims[which] = 0.0;
            prop_assert_eq!(items_per_sheet(Some(dims[0]), Some(dims[1]), dims[2], dims[3]), 1);
        }

        #[test]
        fn prop_layout_area_bounded_by_sheet(sw in dim(), sh in dim(), iw in dim(), ih in dim()) {
            if let Ok(imposition) = impose(Some(sw), Some(sh), iw, ih) {
                let n = imposition.items_per_sheet as f64;
                prop_assert!(n * iw * ih <= sw * sh * (1.0 + 1e-9));
            }
        }
    }
}
