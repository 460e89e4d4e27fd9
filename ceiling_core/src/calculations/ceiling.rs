//! # Ceiling Requirements
//!
//! Entry point of the estimator: takes one room's wall measurements and
//! returns the full bill of quantities for its suspended ceiling grid.
//!
//! ## Example
//!
//! ```rust
//! use ceiling_core::calculations::{calculate_ceiling_requirements, RoomDimensions};
//! use ceiling_core::config::LayoutConfig;
//!
//! let room = RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0);
//! let calc = calculate_ceiling_requirements(&room, &LayoutConfig::default()).unwrap();
//!
//! assert_eq!(calc.parameters_full, 4);
//! assert_eq!(calc.main_lengths, vec![12.0, 12.0, 12.0]);
//! assert_eq!(calc.connecting_clips, calc.main_rod_positions * calc.cross_rod_positions);
//! ```

use serde::{Deserialize, Serialize};

use super::{boards, cross_rods, l_patti, main_rods, parameters, round2};
use crate::config::LayoutConfig;
use crate::errors::{CalcError, CalcResult};
use crate::units::LengthUnit;

/// Longest wall accepted for a single room.
pub const MAX_WALL_FT: f64 = 100_000.0;

/// Wall measurements of one room, in feet.
///
/// `length1`/`length2` are the two opposite "length" walls and
/// `width1`/`width2` the two "width" walls. They may differ, in which case
/// the room is treated as a trapezoid that tapers linearly between them.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length1": 14.0,
///   "length2": 13.5,
///   "width1": 10.0,
///   "width2": 10.25,
///   "linter_spacing": 2.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    /// First length wall (ft)
    pub length1: f64,

    /// Opposite length wall (ft)
    pub length2: f64,

    /// First width wall (ft)
    pub width1: f64,

    /// Opposite width wall (ft)
    pub width2: f64,

    /// Drop from the ceiling slab to the grid (ft)
    pub linter_spacing: f64,
}

impl RoomDimensions {
    /// Create dimensions from values already in feet.
    pub fn new(length1: f64, length2: f64, width1: f64, width2: f64, linter_spacing: f64) -> Self {
        RoomDimensions {
            length1,
            length2,
            width1,
            width2,
            linter_spacing,
        }
    }

    /// Create dimensions from values measured in `unit`, converting to feet.
    ///
    /// ```rust
    /// use ceiling_core::calculations::RoomDimensions;
    /// use ceiling_core::units::LengthUnit;
    ///
    /// let room = RoomDimensions::from_unit(3657.6, 3657.6, 3048.0, 3048.0, 609.6, LengthUnit::Millimeters);
    /// assert!((room.length1 - 12.0).abs() < 1e-9);
    /// assert!((room.linter_spacing - 2.0).abs() < 1e-9);
    /// ```
    pub fn from_unit(length1: f64, length2: f64, width1: f64, width2: f64, linter_spacing: f64, unit: LengthUnit) -> Self {
        RoomDimensions::new(
            unit.to_feet(length1),
            unit.to_feet(length2),
            unit.to_feet(width1),
            unit.to_feet(width2),
            unit.to_feet(linter_spacing),
        )
    }

    /// Longer of the two length walls
    pub fn max_length_ft(&self) -> f64 {
        self.length1.max(self.length2)
    }

    /// Longer of the two width walls
    pub fn max_width_ft(&self) -> f64 {
        self.width1.max(self.width2)
    }

    /// Sum of all four walls
    pub fn perimeter_ft(&self) -> f64 {
        self.length1 + self.length2 + self.width1 + self.width2
    }

    /// Validate input parameters.
    ///
    /// Every wall must be a positive number no longer than [`MAX_WALL_FT`];
    /// zero-length walls describe no room. The linter spacing must be
    /// positive as well.
    pub fn validate(&self) -> CalcResult<()> {
        let walls = [
            ("length1", self.length1),
            ("length2", self.length2),
            ("width1", self.width1),
            ("width2", self.width2),
        ];
        for (field, value) in walls {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Wall length must be a number"));
            }
            if value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Wall length must be positive"));
            }
            if value > MAX_WALL_FT {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Wall length must be at most {} ft", MAX_WALL_FT),
                ));
            }
        }
        if !self.linter_spacing.is_finite() || self.linter_spacing <= 0.0 {
            return Err(CalcError::invalid_input(
                "linter_spacing",
                self.linter_spacing.to_string(),
                "Linter spacing must be positive",
            ));
        }
        Ok(())
    }
}

/// Bill of quantities for one room's false ceiling.
///
/// Lengths are in feet, areas in square feet. Produced fresh by
/// [`calculate_ceiling_requirements`]; it holds no reference to its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingCalculation {
    /// Stock parameter (perimeter trim) rods
    pub parameters_full: u32,

    /// Used length of the last, partial parameter rod (ft)
    pub parameters_extra: f64,

    /// Perimeter plus parameter splice overlaps (ft)
    pub total_parameter_length: f64,

    /// Parameter screws
    pub screws: u32,

    /// Main rods including extra splice segments
    pub main_rods: u32,

    /// Physical main rod runs
    pub main_rod_positions: u32,

    /// Main rod material including splice overlaps (ft)
    pub main_rods_length: f64,

    /// Length of each main rod run, in placement order (ft)
    pub main_lengths: Vec<f64>,

    /// Length of the main rod nearest the far wall (ft)
    pub last_main_length: f64,

    /// Splice summary for over-length main rods; empty when none
    pub extra_main_needed: String,

    /// Stock cross rods (total cross rod length over stock length, rounded up)
    pub cross_rods: u32,

    /// Physical cross rod runs
    pub cross_rod_positions: u32,

    /// Total cross rod length (ft)
    pub cross_rods_length: f64,

    /// Length of each cross rod run, in placement order (ft)
    pub cross_lengths: Vec<f64>,

    /// Length of the cross rod nearest the far wall (ft)
    pub last_cross_length: f64,

    /// One clip per main/cross intersection
    pub connecting_clips: u32,

    /// Stock L-patti brackets to buy
    pub l_patti_full: u32,

    /// L-patti pieces to install
    pub l_patti_pieces: u32,

    /// Pieces cut from one stock bracket
    pub l_patti_per_stock: u32,

    /// Spare L-patti pieces
    pub l_patti_remaining: u32,

    /// Bracket fasteners
    pub fasteners: u32,

    /// Bracket fastener clips
    pub fastener_clips: u32,

    /// Boxes of black screws (not a screw count)
    pub black_screws: u32,

    /// Average room area (sq ft)
    pub room_area: f64,

    /// Full ceiling boards
    pub board_count: u32,

    /// Area beyond the full boards (sq ft)
    pub board_extra_sqft: f64,
}

/// Calculate every material quantity for one room.
///
/// # Arguments
///
/// * `dimensions` - Wall measurements in feet
/// * `config` - Stock sizes, spacings and thresholds
///
/// # Returns
///
/// * `Ok(CeilingCalculation)` - Quantities for the room
/// * `Err(CalcError::InvalidInput)` - A wall or the linter spacing is not a
///   positive number, the linter spacing exceeds the bracket stock length, or
///   `config` is invalid
pub fn calculate_ceiling_requirements(dimensions: &RoomDimensions, config: &LayoutConfig) -> CalcResult<CeilingCalculation> {
    config.validate()?;
    dimensions.validate()?;

    let params = parameters::calculate(dimensions, config);
    let main = main_rods::calculate(dimensions, config);
    let cross = cross_rods::calculate(dimensions, config);
    let brackets = l_patti::calculate(dimensions, config)?;
    let boards = boards::calculate(dimensions, config);

    tracing::debug!(
        "layout: {} main runs ({} extra segments), {} cross runs, {} stock cross rods",
        main.position_count(),
        main.extra_segments,
        cross.position_count(),
        cross.stock_rods
    );

    let connecting_clips = main
        .position_count()
        .checked_mul(cross.position_count())
        .ok_or_else(|| CalcError::invalid_input("length1", dimensions.length1.to_string(), "Room is too large to count clips"))?;

    Ok(CeilingCalculation {
        parameters_full: params.full_rods,
        parameters_extra: params.extra_length_ft,
        total_parameter_length: params.total_length_ft,
        screws: params.screws,
        main_rods: main.rod_count,
        main_rod_positions: main.position_count(),
        main_rods_length: main.total_length_ft,
        last_main_length: main.last_length_ft(),
        main_lengths: main.lengths_ft,
        extra_main_needed: main.extra_needed,
        cross_rods: cross.stock_rods,
        cross_rod_positions: cross.position_count(),
        cross_rods_length: cross.total_length_ft,
        last_cross_length: cross.last_length_ft(),
        cross_lengths: cross.lengths_ft,
        connecting_clips,
        l_patti_full: brackets.full_stock,
        l_patti_pieces: brackets.pieces_needed,
        l_patti_per_stock: brackets.pieces_per_stock,
        l_patti_remaining: brackets.remaining_pieces,
        fasteners: brackets.fasteners,
        fastener_clips: brackets.fastener_clips,
        black_screws: brackets.black_screw_boxes,
        room_area: round2(boards.room_area_sqft),
        board_count: boards.full_boards,
        board_extra_sqft: boards.extra_area_sqft,
    })
}

/// [`calculate_ceiling_requirements`] with the standard stock sizes.
pub fn calculate_ceiling_requirements_default(dimensions: &RoomDimensions) -> CalcResult<CeilingCalculation> {
    calculate_ceiling_requirements(dimensions, &LayoutConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(l1: f64, l2: f64, w1: f64, w2: f64) -> CeilingCalculation {
        calculate_ceiling_requirements_default(&RoomDimensions::new(l1, l2, w1, w2, 2.0)).unwrap()
    }

    #[test]
    fn test_square_room_scenario() {
        let c = calc(12.0, 12.0, 12.0, 12.0);
        assert_eq!(c.parameters_full, 4);
        assert_eq!(c.parameters_extra, 0.0);
        assert_eq!(c.main_rod_positions, 3);
        assert_eq!(c.main_rods, 3);
        assert_eq!(c.main_lengths, vec![12.0, 12.0, 12.0]);
        assert!(c.extra_main_needed.is_empty());
        assert_eq!(c.cross_rod_positions, 5);
        assert_eq!(c.connecting_clips, 15);
        assert_eq!(c.board_count, 6);
        assert_eq!(c.room_area, 144.0);
        assert_eq!(c.black_screws, 1);
    }

    #[test]
    fn test_long_room_needs_splices() {
        let c = calc(20.0, 20.0, 12.0, 12.0);
        assert!(!c.extra_main_needed.is_empty());
        assert_eq!(c.main_rod_positions, 3);
        assert_eq!(c.main_rods, 6);
        assert!(c.main_lengths.iter().all(|&l| l == 20.0));
    }

    #[test]
    fn test_connecting_clips_identity() {
        let mut l = 3.0;
        while l < 45.0 {
            let c = calc(l, l * 0.9, l * 0.6, l * 0.7);
            assert_eq!(c.connecting_clips, c.main_rod_positions * c.cross_rod_positions);
            assert_eq!(c.main_lengths.len() as u32, c.main_rod_positions);
            assert_eq!(c.cross_lengths.len() as u32, c.cross_rod_positions);
            l += 1.3;
        }
    }

    #[test]
    fn test_idempotent() {
        let room = RoomDimensions::new(17.3, 15.9, 11.2, 12.8, 1.75);
        let first = calculate_ceiling_requirements_default(&room).unwrap();
        let second = calculate_ceiling_requirements_default(&room).unwrap();
        assert_eq!(first, second);
        assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
    }

    #[test]
    fn test_growing_any_wall_never_reduces_quantities() {
        // Rod counts are only monotone while the walls they taper between
        // are equal: main rods need equal length walls, cross rods equal
        // width walls.
        let base = [10.0, 10.0, 8.0, 8.0];
        for wall in 0..4 {
            let mut previous = calc(base[0], base[1], base[2], base[3]);
            for step in 1..300 {
                let mut walls = base;
                walls[wall] += f64::from(step) * 0.1;
                let current = calc(walls[0], walls[1], walls[2], walls[3]);
                if walls[0] == walls[1] {
                    assert!(current.main_rods >= previous.main_rods, "main_rods fell, wall {wall} step {step}");
                }
                if walls[2] == walls[3] {
                    assert!(current.cross_rods >= previous.cross_rods, "cross_rods fell, wall {wall} step {step}");
                }
                assert!(current.board_count >= previous.board_count, "board_count fell, wall {wall} step {step}");
                assert!(
                    current.total_parameter_length >= previous.total_parameter_length,
                    "parameter length fell, wall {wall} step {step}"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_longer_run_shortens_tapered_cross_rods() {
        // Widths taper over position / run, so a longer run pulls every
        // interpolated width towards width1.
        let short = calc(10.6, 10.6, 1.0, 12.0);
        assert_eq!(short.cross_rod_positions, 5);
        assert!((short.cross_rods_length - 36.13).abs() < 0.011);
        assert_eq!(short.cross_rods, 4);

        let long = calc(12.5, 10.6, 1.0, 12.0);
        assert_eq!(long.cross_rod_positions, 5);
        assert!((long.cross_rods_length - 31.4).abs() < 0.011);
        assert_eq!(long.cross_rods, 3);
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let config = LayoutConfig::default();
        let zero_wall = RoomDimensions::new(0.0, 12.0, 10.0, 10.0, 2.0);
        assert!(matches!(
            calculate_ceiling_requirements(&zero_wall, &config),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "length1"
        ));

        let nan_wall = RoomDimensions::new(12.0, 12.0, f64::NAN, 10.0, 2.0);
        assert!(calculate_ceiling_requirements(&nan_wall, &config).is_err());

        let huge_wall = RoomDimensions::new(12.0, 12.0, 10.0, MAX_WALL_FT * 2.0, 2.0);
        assert!(matches!(
            calculate_ceiling_requirements(&huge_wall, &config),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "width2"
        ));

        let no_drop = RoomDimensions::new(12.0, 12.0, 10.0, 10.0, 0.0);
        assert!(matches!(
            calculate_ceiling_requirements(&no_drop, &config),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "linter_spacing"
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LayoutConfig {
            main_rod_spacing_ft: 0.0,
            ..LayoutConfig::default()
        };
        let room = RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0);
        assert!(calculate_ceiling_requirements(&room, &config).is_err());
    }

    #[test]
    fn test_metric_input_matches_feet() {
        let metric = RoomDimensions::from_unit(3.6576, 3.6576, 3.6576, 3.6576, 0.6096, LengthUnit::Meters);
        let c = calculate_ceiling_requirements_default(&metric).unwrap();
        assert_eq!(c.parameters_full, 4);
        assert_eq!(c.parameters_extra, 0.0);
        assert_eq!(c.main_rod_positions, 3);
        assert_eq!(c.board_count, 6);
    }

    #[test]
    fn test_result_serialization() {
        let c = calc(14.0, 13.0, 10.0, 11.0);
        let json = serde_json::to_string_pretty(&c).unwrap();
        for field in ["main_rods", "cross_rods", "connecting_clips", "l_patti_full", "black_screws", "main_lengths", "board_extra_sqft"] {
            assert!(json.contains(field), "missing {field}");
        }
        let roundtrip: CeilingCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.connecting_clips, c.connecting_clips);
    }
}
