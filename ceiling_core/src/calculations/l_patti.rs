//! # L-Patti (Wall Bracket) Sizing
//!
//! L-patti are the L-shaped brackets that hang the main rod grid at the
//! required drop (the linter spacing). They are cut from 8 ft stock, so the
//! drop decides how many pieces one stock bracket yields.
//!
//! The main rod count used here is an estimate,
//! `ceil((span - 2 × first_offset) / spacing) + 1`, and is deliberately not
//! taken from [`main_rods::positions`](super::main_rods::positions). The two
//! can differ by one when the last main rod is added for a wide end gap.
//!
//! ## Example
//!
//! ```rust
//! use ceiling_core::calculations::{l_patti, RoomDimensions};
//! use ceiling_core::config::LayoutConfig;
//!
//! let room = RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0);
//! let brackets = l_patti::calculate(&room, &LayoutConfig::default()).unwrap();
//! assert_eq!(brackets.pieces_needed, 9);
//! assert_eq!(brackets.full_stock, 3);
//! assert_eq!(brackets.remaining_pieces, 3);
//! ```

use serde::{Deserialize, Serialize};

use super::{boards, ceil_count, floor_count, RoomDimensions};
use crate::config::LayoutConfig;
use crate::errors::{CalcError, CalcResult};

/// Bracket stock, pieces and the hardware that goes with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LPattiSizing {
    /// Main rod runs assumed for bracket counting
    pub main_rods_estimate: u32,

    /// Bracket pieces to install
    pub pieces_needed: u32,

    /// Pieces cut from one stock bracket at this drop
    pub pieces_per_stock: u32,

    /// Stock brackets to buy
    pub full_stock: u32,

    /// Pieces left over from the last stock bracket
    pub remaining_pieces: u32,

    /// One fastener per bracket piece
    pub fasteners: u32,

    /// One fastener clip per bracket piece
    pub fastener_clips: u32,

    /// Boxes of black screws, one per `black_screw_box_coverage_sqft` of room
    /// area. Counts boxes, not individual screws.
    pub black_screw_boxes: u32,
}

/// Size the L-patti brackets.
///
/// # Errors
///
/// `CalcError::InvalidInput` on `linter_spacing` when it is not positive, or
/// when it is longer than one stock bracket (no piece could be cut).
pub fn calculate(dimensions: &RoomDimensions, config: &LayoutConfig) -> CalcResult<LPattiSizing> {
    let linter = dimensions.linter_spacing;
    if !linter.is_finite() || linter <= 0.0 {
        return Err(CalcError::invalid_input(
            "linter_spacing",
            linter.to_string(),
            "Linter spacing must be positive",
        ));
    }

    let pieces_per_stock = floor_count(config.bracket_stock_length_ft / linter);
    if pieces_per_stock == 0 {
        return Err(CalcError::invalid_input(
            "linter_spacing",
            linter.to_string(),
            format!("Linter spacing exceeds the {} ft bracket stock length", config.bracket_stock_length_ft),
        ));
    }

    let spacing = config.main_rod_spacing_ft;
    let usable = dimensions.max_width_ft() - 2.0 * config.main_rod_first_offset_ft;
    let main_rods_estimate = ceil_count((usable + spacing) / spacing);

    let pieces_needed = main_rods_estimate
        .checked_mul(config.brackets_per_main_rod)
        .ok_or_else(|| {
            CalcError::invalid_input(
                "width",
                dimensions.max_width_ft().to_string(),
                "Room is too wide to count brackets",
            )
        })?;
    let full_stock = pieces_needed.div_ceil(pieces_per_stock);
    let remaining_pieces = (pieces_per_stock - pieces_needed % pieces_per_stock) % pieces_per_stock;

    let area = boards::room_area(dimensions).value();
    let black_screw_boxes = ceil_count(area / config.black_screw_box_coverage_sqft);

    Ok(LPattiSizing {
        main_rods_estimate,
        pieces_needed,
        pieces_per_stock,
        full_stock,
        remaining_pieces,
        fasteners: pieces_needed,
        fastener_clips: pieces_needed,
        black_screw_boxes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(width: f64, linter: f64) -> RoomDimensions {
        RoomDimensions::new(12.0, 12.0, width, width, linter)
    }

    #[test]
    fn test_square_room() {
        let sizing = calculate(&room(12.0, 2.0), &LayoutConfig::default()).unwrap();
        assert_eq!(sizing.main_rods_estimate, 3);
        assert_eq!(sizing.pieces_needed, 9);
        assert_eq!(sizing.pieces_per_stock, 4);
        assert_eq!(sizing.full_stock, 3);
        assert_eq!(sizing.remaining_pieces, 3);
        assert_eq!(sizing.fasteners, 9);
        assert_eq!(sizing.fastener_clips, 9);
        assert_eq!(sizing.black_screw_boxes, 1);
    }

    #[test]
    fn test_deeper_drop_yields_fewer_pieces_per_stock() {
        let sizing = calculate(&room(12.0, 3.0), &LayoutConfig::default()).unwrap();
        assert_eq!(sizing.pieces_per_stock, 2);
        assert_eq!(sizing.full_stock, 5);
        assert_eq!(sizing.remaining_pieces, 1);
    }

    #[test]
    fn test_fractional_drop_snaps() {
        let sizing = calculate(&room(12.0, 8.0 / 3.0), &LayoutConfig::default()).unwrap();
        assert_eq!(sizing.pieces_per_stock, 3);
    }

    #[test]
    fn test_estimate_uses_wider_wall() {
        let dims = RoomDimensions::new(12.0, 12.0, 10.0, 21.0, 2.0);
        let sizing = calculate(&dims, &LayoutConfig::default()).unwrap();
        // ceil(17 / 4) + 1
        assert_eq!(sizing.main_rods_estimate, 6);
    }

    #[test]
    fn test_narrow_rooms() {
        let config = LayoutConfig::default();
        assert_eq!(calculate(&room(2.0, 2.0), &config).unwrap().main_rods_estimate, 1);
        assert_eq!(calculate(&room(0.0, 2.0), &config).unwrap().main_rods_estimate, 0);
    }

    #[test]
    fn test_black_screws_are_boxes_per_area() {
        // 12 × 90 = 1080 sq ft -> 2 boxes
        let dims = RoomDimensions::new(90.0, 90.0, 12.0, 12.0, 2.0);
        let sizing = calculate(&dims, &LayoutConfig::default()).unwrap();
        assert_eq!(sizing.black_screw_boxes, 2);
    }

    #[test]
    fn test_bracket_count_overflow_rejected() {
        let err = calculate(&room(1e10, 2.0), &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "width"));
    }

    #[test]
    fn test_zero_linter_spacing_rejected() {
        let err = calculate(&room(12.0, 0.0), &LayoutConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(calculate(&room(12.0, -1.0), &LayoutConfig::default()).is_err());
    }

    #[test]
    fn test_drop_longer_than_stock_rejected() {
        let err = calculate(&room(12.0, 9.0), &LayoutConfig::default()).unwrap_err();
        assert!(err.to_string().contains("bracket stock length"));
    }
}
