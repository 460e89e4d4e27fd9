//! # Layout Configuration
//!
//! Every stock length, spacing, threshold and overlap the layout rules use.
//! Placement logic reads these values instead of literals, so a supplier
//! change (say, 10 ft rods) is a settings change and not a code change.
//!
//! The defaults are the standard 12 ft rod / 8 ft bracket / 6×4 board system.
//!
//! ## JSON Example
//!
//! Missing keys fall back to their defaults, so a config file only needs the
//! values that differ:
//!
//! ```rust
//! use ceiling_core::config::LayoutConfig;
//!
//! let config: LayoutConfig = serde_json::from_str(r#"{ "stock_rod_length_ft": 10.0 }"#).unwrap();
//! assert_eq!(config.stock_rod_length_ft, 10.0);
//! assert_eq!(config.main_rod_spacing_ft, 4.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Feet, Inches};

/// Smallest accepted main or cross rod spacing (3 in).
pub const MIN_ROD_SPACING_FT: f64 = 0.25;

/// Named constants for every layout rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Stock length of parameter, main and cross rods (ft)
    pub stock_rod_length_ft: f64,

    /// Overlap at each parameter splice (in)
    pub parameter_overlap_in: f64,

    /// Screws per foot of parameter
    pub parameter_screws_per_ft: u32,

    /// Distance from the starting wall to the first main rod (ft)
    pub main_rod_first_offset_ft: f64,

    /// Center-to-center main rod spacing (ft)
    pub main_rod_spacing_ft: f64,

    /// A remaining gap to the far wall at least this wide gets one more main rod (ft)
    pub main_rod_end_gap_ft: f64,

    /// Overlap at each main rod splice (in)
    pub main_splice_overlap_in: f64,

    /// Distance from the wall to the first cross rod (ft)
    pub cross_rod_first_offset_ft: f64,

    /// Center-to-center cross rod spacing (ft)
    pub cross_rod_spacing_ft: f64,

    /// A last cross rod this close to the far wall (or closer) is dropped (ft)
    pub cross_rod_drop_gap_ft: f64,

    /// A remaining gap wider than this gets one more cross rod (ft)
    pub cross_rod_append_gap_ft: f64,

    /// Stock length of an L-patti bracket (ft)
    pub bracket_stock_length_ft: f64,

    /// L-patti pieces per main rod run
    pub brackets_per_main_rod: u32,

    /// Room area covered by one box of black screws (sq ft)
    pub black_screw_box_coverage_sqft: f64,

    /// Ceiling board width (ft)
    pub board_width_ft: f64,

    /// Ceiling board length (ft)
    pub board_length_ft: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            stock_rod_length_ft: 12.0,
            parameter_overlap_in: 4.0,
            parameter_screws_per_ft: 12,
            main_rod_first_offset_ft: 2.0,
            main_rod_spacing_ft: 4.0,
            main_rod_end_gap_ft: 3.5,
            main_splice_overlap_in: 5.0,
            cross_rod_first_offset_ft: 2.0,
            cross_rod_spacing_ft: 2.0,
            cross_rod_drop_gap_ft: 2.0,
            cross_rod_append_gap_ft: 2.5,
            bracket_stock_length_ft: 8.0,
            brackets_per_main_rod: 3,
            black_screw_box_coverage_sqft: 1000.0,
            board_width_ft: 6.0,
            board_length_ft: 4.0,
        }
    }
}

impl LayoutConfig {
    /// Parameter splice overlap in feet
    pub fn parameter_overlap_ft(&self) -> f64 {
        Feet::from(Inches(self.parameter_overlap_in)).value()
    }

    /// Main rod splice overlap in feet
    pub fn main_splice_overlap_ft(&self) -> f64 {
        Feet::from(Inches(self.main_splice_overlap_in)).value()
    }

    /// Area of one ceiling board (sq ft)
    pub fn board_area_sqft(&self) -> f64 {
        self.board_width_ft * self.board_length_ft
    }

    /// Validate the configuration.
    ///
    /// Stock lengths and board sizes must be positive, rod spacings at least
    /// [`MIN_ROD_SPACING_FT`]; offsets, gaps and overlaps must not be negative.
    pub fn validate(&self) -> CalcResult<()> {
        let spacings = [
            ("main_rod_spacing_ft", self.main_rod_spacing_ft),
            ("cross_rod_spacing_ft", self.cross_rod_spacing_ft),
        ];
        for (field, value) in spacings {
            if !value.is_finite() || value < MIN_ROD_SPACING_FT {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Rod spacing must be at least {} ft", MIN_ROD_SPACING_FT),
                ));
            }
        }

        let positive = [
            ("stock_rod_length_ft", self.stock_rod_length_ft),
            ("bracket_stock_length_ft", self.bracket_stock_length_ft),
            ("black_screw_box_coverage_sqft", self.black_screw_box_coverage_sqft),
            ("board_width_ft", self.board_width_ft),
            ("board_length_ft", self.board_length_ft),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }

        let non_negative = [
            ("parameter_overlap_in", self.parameter_overlap_in),
            ("main_rod_first_offset_ft", self.main_rod_first_offset_ft),
            ("main_rod_end_gap_ft", self.main_rod_end_gap_ft),
            ("main_splice_overlap_in", self.main_splice_overlap_in),
            ("cross_rod_first_offset_ft", self.cross_rod_first_offset_ft),
            ("cross_rod_drop_gap_ft", self.cross_rod_drop_gap_ft),
            ("cross_rod_append_gap_ft", self.cross_rod_append_gap_ft),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
            }
        }

        if self.brackets_per_main_rod == 0 {
            return Err(CalcError::invalid_input("brackets_per_main_rod", "0", "At least one bracket per main rod is required"));
        }
        Ok(())
    }
}
