//! # Parameter (Perimeter Trim) Sizing
//!
//! The parameter is the trim rod run along all four walls. It is bought in
//! stock lengths and spliced end to end, losing an overlap at every joint.
//!
//! ## Example
//!
//! ```rust
//! use ceiling_core::calculations::{parameters, RoomDimensions};
//! use ceiling_core::config::LayoutConfig;
//!
//! let room = RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0);
//! let sizing = parameters::calculate(&room, &LayoutConfig::default());
//! assert_eq!(sizing.full_rods, 4);
//! assert_eq!(sizing.extra_length_ft, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use super::{ceil_count, floor_count, round2, RoomDimensions};
use crate::config::LayoutConfig;

/// Stock rods and screws for the perimeter trim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSizing {
    /// Sum of all four walls (ft)
    pub perimeter_ft: f64,

    /// Stock rods to buy (always at least one)
    pub full_rods: u32,

    /// Used length of the last, partial stock rod (ft, 2 dp). Zero when the
    /// perimeter is an exact multiple of the stock length.
    pub extra_length_ft: f64,

    /// Perimeter plus the overlap lost at each of the `full_rods - 1` splices (ft, 2 dp)
    pub total_length_ft: f64,

    /// Trim screws
    pub screws: u32,
}

/// Size the perimeter trim.
pub fn calculate(dimensions: &RoomDimensions, config: &LayoutConfig) -> ParameterSizing {
    let stock = config.stock_rod_length_ft;
    let perimeter_ft = dimensions.perimeter_ft();

    let full_rods = ceil_count(perimeter_ft / stock).max(1);
    let whole_pieces = floor_count(perimeter_ft / stock);
    let extra_length_ft = round2((perimeter_ft - f64::from(whole_pieces) * stock).max(0.0));

    let splices = f64::from(full_rods - 1);
    let total_length_ft = round2(perimeter_ft + splices * config.parameter_overlap_ft());
    let screws = ceil_count(total_length_ft) * config.parameter_screws_per_ft;

    ParameterSizing {
        perimeter_ft,
        full_rods,
        extra_length_ft,
        total_length_ft,
        screws,
    }
}
