//! Plain-text rendering of results for terminal use.

use std::fmt;

use quote_core::calculations::{CalculationResult, Imposition, LineItemKind};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

fn kind_label(kind: LineItemKind) -> &'static str {
    match kind {
        LineItemKind::Material => "MATERIAL",
        LineItemKind::Machine => "MACHINE",
        LineItemKind::Labor => "LABOR",
        LineItemKind::Finishing => "FINISHING",
    }
}

/// Fixed-width table of a priced job.
pub struct EstimateReport<'a>(pub &'a CalculationResult);

impl fmt::Display for EstimateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let sheets = &result.sheets;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "  JOB ESTIMATE")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;
        writeln!(f, "Imposition:")?;
        writeln!(f, "  Per sheet:   {}", sheets.items_per_sheet)?;
        if let Some(layout) = sheets.layout {
            writeln!(
                f,
                "  Layout:      {} x {}{}",
                layout.columns,
                layout.rows,
                if layout.rotated { " (rotated)" } else { "" }
            )?;
        }
        writeln!(f, "  Sheets:      {} (+ waste: {})", sheets.sheets_needed, sheets.sheets_with_waste)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<10} {:<34} {:>10} {:>10} {:>10}",
            "TYPE", "DESCRIPTION", "QTY", "UNIT", "TOTAL"
        )?;
        for item in &result.items {
            writeln!(
                f,
                "{:<10} {:<34} {:>10.2} {:>10.2} {:>10.2}",
                kind_label(item.kind),
                item.description,
                item.quantity,
                item.unit_cost,
                item.total_cost
            )?;
        }
        writeln!(f)?;
        writeln!(f, "  Total cost:  {:>10.2}", result.total_cost)?;
        writeln!(
            f,
            "  Margin:      {:>10.2} ({}%)",
            result.margin_amount, result.margin_percentage
        )?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  FINAL PRICE: {:>10.2}", result.final_price)?;
        writeln!(f, "{}", RULE)
    }
}

/// Render an imposition check.
pub fn render_imposition(imposition: &Imposition) -> String {
    match imposition.layout {
        Some(layout) if imposition.fits() => format!(
            "{} per sheet ({} x {}{})",
            imposition.items_per_sheet,
            layout.columns,
            layout.rows,
            if layout.rotated { ", rotated" } else { "" }
        ),
        Some(_) => "0 per sheet (product does not fit in either orientation)".to_string(),
        None => format!("{} per sheet (no sheet format)", imposition.items_per_sheet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::calculations::{impose, CalculationLineItem, SheetUsage};

    #[test]
    fn test_render_imposition() {
        assert_eq!(
            render_imposition(&impose(Some(700.0), Some(1000.0), 100.0, 100.0).unwrap()),
            "70 per sheet (7 x 10)"
        );
        assert_eq!(
            render_imposition(&impose(Some(320.0), Some(450.0), 200.0, 100.0).unwrap()),
            "6 per sheet (3 x 2, rotated)"
        );
        assert_eq!(
            render_imposition(&impose(Some(100.0), Some(100.0), 200.0, 200.0).unwrap()),
            "0 per sheet (product does not fit in either orientation)"
        );
        assert_eq!(
            render_imposition(&impose(None, None, 100.0, 100.0).unwrap()),
            "1 per sheet (no sheet format)"
        );
    }

    #[test]
    fn test_estimate_report_table() {
        let result = CalculationResult {
            total_cost: 75.25,
            margin_percentage: 20.0,
            margin_amount: 15.05,
            final_price: 90.3,
            sheets: SheetUsage {
                items_per_sheet: 70,
                sheets_needed: 15,
                sheets_with_waste: 17,
                layout: None,
            },
            items: vec![CalculationLineItem {
                kind: LineItemKind::Material,
                description: "17 sheets Silk 170g (70 per sheet)".to_string(),
                quantity: 17.0,
                unit_cost: 0.5,
                total_cost: 8.5,
            }],
        };
        let text = EstimateReport(&result).to_string();
        assert!(text.contains("  Sheets:      15 (+ waste: 17)"));
        assert!(text.contains("MATERIAL   17 sheets Silk 170g (70 per sheet)"));
        assert!(text.contains("  FINAL PRICE:      90.30"));
        assert!(text.ends_with(&format!("{}\n", RULE)));
    }
}
