//! # Cross Rod Layout
//!
//! Cross rods run perpendicular to the main rods. They are placed along the
//! room's longer length wall and each spans the room's width, tapering from
//! `width1` to `width2`.
//!
//! Placement starts `cross_rod_first_offset_ft` from the wall and repeats every
//! `cross_rod_spacing_ft` up to and including the far wall. The run is then
//! trimmed once: a last rod within `cross_rod_drop_gap_ft` of the far wall is
//! redundant with the perimeter trim and is dropped; if that leaves more than
//! `cross_rod_append_gap_ft` uncovered, one rod is added back one spacing on.
//!
//! Cross rods are bought by total length, so the stock count is
//! `ceil(sum(widths) / stock)` while the number of physical runs is what
//! determines the connecting clips.

use serde::{Deserialize, Serialize};

use super::{ceil_count, interpolate, round2, RoomDimensions};
use crate::config::LayoutConfig;

/// Cross rod positions, tapered widths and stock count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRodLayout {
    /// Distance of each rod from the starting wall (ft)
    pub positions_ft: Vec<f64>,

    /// Interpolated rod length at each position (ft)
    pub lengths_ft: Vec<f64>,

    /// Stock rods needed to cut every run
    pub stock_rods: u32,

    /// Sum of all run lengths (ft, 2 dp)
    pub total_length_ft: f64,
}

impl CrossRodLayout {
    /// Number of physical cross rod runs
    pub fn position_count(&self) -> u32 {
        self.positions_ft.len() as u32
    }

    /// Length of the run nearest the far wall (0 when no rod fits)
    pub fn last_length_ft(&self) -> f64 {
        self.lengths_ft.last().copied().unwrap_or(0.0)
    }
}

/// Cross rod positions along a run of `run_ft`.
pub fn positions(run_ft: f64, config: &LayoutConfig) -> Vec<f64> {
    let first = config.cross_rod_first_offset_ft;
    let spacing = config.cross_rod_spacing_ft;

    let mut positions: Vec<f64> = (0u32..)
        .map(|i| first + f64::from(i) * spacing)
        .take_while(|&pos| pos <= run_ft)
        .collect();

    if let Some(&last) = positions.last() {
        if run_ft - last <= config.cross_rod_drop_gap_ft {
            positions.pop();
        }
    }

    let last = positions.last().copied();
    let gap = run_ft - last.unwrap_or(0.0);
    if gap > config.cross_rod_append_gap_ft {
        positions.push(last.map_or(first, |pos| pos + spacing));
    }
    positions
}

/// Lay out the cross rods for a room.
pub fn calculate(dimensions: &RoomDimensions, config: &LayoutConfig) -> CrossRodLayout {
    let run = dimensions.max_length_ft();

    let positions_ft = positions(run, config);
    let lengths_ft: Vec<f64> = positions_ft
        .iter()
        .map(|&pos| interpolate(dimensions.width1, dimensions.width2, pos, run))
        .collect();

    let total: f64 = lengths_ft.iter().sum();

    CrossRodLayout {
        stock_rods: ceil_count(total / config.stock_rod_length_ft),
        total_length_ft: round2(total),
        positions_ft,
        lengths_ft,
    }
}
