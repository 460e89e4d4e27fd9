//! # Bill of Materials
//!
//! Turns a [`CeilingCalculation`] into the item → quantity rows an estimator
//! hands to a supplier. Lengths are shown in the caller's display unit with
//! two decimals (`"49.00 ft"`); counts are plain integers.
//!
//! The display unit is passed in explicitly so the same result can be
//! rendered for different users without any shared state.
//!
//! ## Example
//!
//! ```rust
//! use ceiling_core::calculations::{calculate_ceiling_requirements_default, RoomDimensions};
//! use ceiling_core::report::bill_of_materials;
//! use ceiling_core::units::LengthUnit;
//!
//! let calc = calculate_ceiling_requirements_default(&RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0)).unwrap();
//! let rows = bill_of_materials(&calc, LengthUnit::Feet);
//! let total = rows.iter().find(|row| row.item == "Total Parameter Length").unwrap();
//! assert_eq!(total.quantity, "49.00 ft");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::CeilingCalculation;
use crate::units::LengthUnit;

/// One row of the bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    /// Item name
    pub item: String,
    /// Formatted quantity
    pub quantity: String,
}

impl BomLine {
    fn count(item: &str, value: u32) -> Self {
        BomLine {
            item: item.to_string(),
            quantity: value.to_string(),
        }
    }

    fn length(item: &str, feet: f64, unit: LengthUnit) -> Self {
        BomLine {
            item: item.to_string(),
            quantity: format!("{:.2} {}", unit.from_feet(feet), unit.abbreviation()),
        }
    }

    fn area(item: &str, sqft: f64, unit: LengthUnit) -> Self {
        BomLine {
            item: item.to_string(),
            quantity: format!("{:.2} {}", unit.area_from_sqft(sqft), unit.area_abbreviation()),
        }
    }
}

impl fmt::Display for BomLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<28} {}", self.item, self.quantity)
    }
}

/// Build the bill of materials, with lengths in `unit`.
pub fn bill_of_materials(calc: &CeilingCalculation, unit: LengthUnit) -> Vec<BomLine> {
    let mut rows = vec![
        BomLine::count("Parameters (Full Rods)", calc.parameters_full),
        BomLine::length("Parameter Extra Length", calc.parameters_extra, unit),
        BomLine::length("Total Parameter Length", calc.total_parameter_length, unit),
        BomLine::count("Screws", calc.screws),
        BomLine::count("Main Rods", calc.main_rods),
        BomLine::length("Main Rods Length", calc.main_rods_length, unit),
        BomLine::length("Last Main Rod Length", calc.last_main_length, unit),
    ];
    if !calc.extra_main_needed.is_empty() {
        rows.push(BomLine {
            item: "Extra Main Rods Needed".to_string(),
            quantity: calc.extra_main_needed.clone(),
        });
    }
    rows.extend([
        BomLine::count("Cross Rods", calc.cross_rods),
        BomLine::length("Cross Rods Length", calc.cross_rods_length, unit),
        BomLine::length("Last Cross Rod Length", calc.last_cross_length, unit),
        BomLine::count("Connecting Clips", calc.connecting_clips),
        BomLine::count("L-Patti (Full)", calc.l_patti_full),
        BomLine::count("L-Patti Pieces", calc.l_patti_pieces),
        BomLine::count("L-Patti Remaining Pieces", calc.l_patti_remaining),
        BomLine::count("Fasteners", calc.fasteners),
        BomLine::count("Fastener Clips", calc.fastener_clips),
        BomLine::count("Black Screws (Boxes)", calc.black_screws),
        BomLine::count("Boards", calc.board_count),
        BomLine::area("Board Extra Area", calc.board_extra_sqft, unit),
    ]);
    rows
}

/// Per-run lengths in `unit`, formatted like the table rows.
pub fn format_lengths(lengths_ft: &[f64], unit: LengthUnit) -> Vec<String> {
    lengths_ft
        .iter()
        .map(|&feet| format!("{:.2} {}", unit.from_feet(feet), unit.abbreviation()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate_ceiling_requirements_default, RoomDimensions};

    fn quantity<'a>(rows: &'a [BomLine], item: &str) -> &'a str {
        &rows.iter().find(|row| row.item == item).unwrap().quantity
    }

    #[test]
    fn test_feet_rows() {
        let calc = calculate_ceiling_requirements_default(&RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0)).unwrap();
        let rows = bill_of_materials(&calc, LengthUnit::Feet);
        assert_eq!(quantity(&rows, "Parameters (Full Rods)"), "4");
        assert_eq!(quantity(&rows, "Main Rods Length"), "36.00 ft");
        assert_eq!(quantity(&rows, "Connecting Clips"), "15");
        assert_eq!(quantity(&rows, "Board Extra Area"), "0.00 sq ft");
        assert!(rows.iter().all(|row| row.item != "Extra Main Rods Needed"));
    }

    #[test]
    fn test_splice_row_only_when_needed() {
        let calc = calculate_ceiling_requirements_default(&RoomDimensions::new(20.0, 20.0, 12.0, 12.0, 2.0)).unwrap();
        let rows = bill_of_materials(&calc, LengthUnit::Feet);
        assert_eq!(quantity(&rows, "Extra Main Rods Needed"), "3 extra rods (5\" overlap per splice)");
    }

    #[test]
    fn test_display_unit_conversion() {
        let calc = calculate_ceiling_requirements_default(&RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0)).unwrap();
        let rows = bill_of_materials(&calc, LengthUnit::Inches);
        assert_eq!(quantity(&rows, "Main Rods Length"), "432.00 in");
        // counts are unit-independent
        assert_eq!(quantity(&rows, "Screws"), calc.screws.to_string());
    }

    #[test]
    fn test_format_lengths() {
        let lengths = format_lengths(&[12.0, 6.0], LengthUnit::Yards);
        assert_eq!(lengths, vec!["4.00 yd".to_string(), "2.00 yd".to_string()]);
    }

    #[test]
    fn test_line_display() {
        let line = BomLine::count("Boards", 6);
        assert!(line.to_string().starts_with("Boards"));
        assert!(line.to_string().ends_with(" 6"));
    }
}
