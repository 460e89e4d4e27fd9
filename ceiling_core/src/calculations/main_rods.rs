//! # Main Rod Layout
//!
//! Main rods are the primary grid members. They are laid out across the
//! room's width and each one spans the room's length, which may taper from
//! `length1` at one wall to `length2` at the opposite wall.
//!
//! ## Placement
//!
//! - First rod at `main_rod_first_offset_ft` (2 ft) from the starting wall
//! - Then every `main_rod_spacing_ft` (4 ft) while still inside the room
//! - If the gap left before the far wall is at least `main_rod_end_gap_ft`
//!   (3.5 ft), one more rod goes in at `min(width, last + spacing)`
//!
//! ## Splicing
//!
//! A rod longer than one stock length needs
//! `ceil((length - stock) / stock)` extra segments, each joined with a
//! `main_splice_overlap_in` (5") overlap.

use serde::{Deserialize, Serialize};

use super::{ceil_count, interpolate, round2, RoomDimensions};
use crate::config::LayoutConfig;

/// Main rod positions, tapered lengths and splice accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainRodLayout {
    /// Distance of each rod from the starting wall (ft)
    pub positions_ft: Vec<f64>,

    /// Interpolated rod length at each position (ft)
    pub lengths_ft: Vec<f64>,

    /// Extra stock segments spliced on across all positions
    pub extra_segments: u32,

    /// Positions plus extra segments
    pub rod_count: u32,

    /// Rod material including splice overlaps (ft, 2 dp)
    pub total_length_ft: f64,

    /// Human-readable splice summary; empty when nothing needed splicing
    pub extra_needed: String,
}

impl MainRodLayout {
    /// Number of physical main rod runs
    pub fn position_count(&self) -> u32 {
        self.positions_ft.len() as u32
    }

    /// Length of the rod nearest the far wall (0 when no rod fits)
    pub fn last_length_ft(&self) -> f64 {
        self.lengths_ft.last().copied().unwrap_or(0.0)
    }
}

/// Rod positions across a run of `width_ft`.
pub fn positions(width_ft: f64, config: &LayoutConfig) -> Vec<f64> {
    let first = config.main_rod_first_offset_ft;
    let spacing = config.main_rod_spacing_ft;

    let mut positions: Vec<f64> = (0u32..)
        .map(|i| first + f64::from(i) * spacing)
        .take_while(|&pos| pos < width_ft)
        .collect();

    let last = positions.last().copied().unwrap_or(0.0);
    let gap = width_ft - last;
    if width_ft > last && gap >= config.main_rod_end_gap_ft {
        positions.push(width_ft.min(last + spacing));
    }
    positions
}

/// Lay out the main rods for a room.
pub fn calculate(dimensions: &RoomDimensions, config: &LayoutConfig) -> MainRodLayout {
    let width = dimensions.max_width_ft();
    let stock = config.stock_rod_length_ft;

    let positions_ft = positions(width, config);
    let lengths_ft: Vec<f64> = positions_ft
        .iter()
        .map(|&pos| interpolate(dimensions.length1, dimensions.length2, pos, width))
        .collect();

    let extra_segments: u32 = lengths_ft
        .iter()
        .filter(|&&length| length > stock)
        .map(|&length| ceil_count((length - stock) / stock))
        .sum();

    let rod_length: f64 = lengths_ft.iter().sum();
    let overlap = f64::from(extra_segments) * config.main_splice_overlap_ft();

    let extra_needed = match extra_segments {
        0 => String::new(),
        1 => format!("1 extra rod ({}\" overlap per splice)", config.main_splice_overlap_in),
        n => format!("{} extra rods ({}\" overlap per splice)", n, config.main_splice_overlap_in),
    };

    MainRodLayout {
        rod_count: positions_ft.len() as u32 + extra_segments,
        positions_ft,
        lengths_ft,
        extra_segments,
        total_length_ft: round2(rod_length + overlap),
        extra_needed,
    }
}
