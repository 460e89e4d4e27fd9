//! # Board Sizing
//!
//! Ceiling boards are counted from the room's average area: the mean of the
//! two length walls times the mean of the two width walls.

use serde::{Deserialize, Serialize};

use super::{floor_count, round2, RoomDimensions};
use crate::config::LayoutConfig;
use crate::units::{Feet, SqFt};

/// Full boards and the leftover area still to be covered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSizing {
    /// Average room area (sq ft)
    pub room_area_sqft: f64,

    /// Whole boards that fit in the room area
    pub full_boards: u32,

    /// Area beyond the whole boards (sq ft, 2 dp)
    pub extra_area_sqft: f64,
}

/// Average area of a (possibly trapezoidal) room.
pub fn room_area(dimensions: &RoomDimensions) -> SqFt {
    let avg_length = Feet((dimensions.length1 + dimensions.length2) / 2.0);
    let avg_width = Feet((dimensions.width1 + dimensions.width2) / 2.0);
    avg_length.area_with(avg_width)
}

/// Size the ceiling boards.
pub fn calculate(dimensions: &RoomDimensions, config: &LayoutConfig) -> BoardSizing {
    let area = room_area(dimensions).value();
    let board_area = config.board_area_sqft();

    let boards = area / board_area;
    let mut full_boards = floor_count(boards);
    let mut extra_area_sqft = round2(((boards - f64::from(full_boards)) * board_area).max(0.0));
    // A remainder that rounds up to a whole board is that board.
    if extra_area_sqft >= board_area {
        full_boards += 1;
        extra_area_sqft = 0.0;
    }

    BoardSizing {
        room_area_sqft: area,
        full_boards,
        extra_area_sqft,
    }
}
