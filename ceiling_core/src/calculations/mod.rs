//! # Ceiling Calculations
//!
//! The five sizing stages of a false-ceiling takeoff. Each stage is a pure
//! function of the same [`RoomDimensions`] and [`LayoutConfig`]:
//!
//! - [`parameters`] - perimeter trim rods, splice overlaps and trim screws
//! - [`main_rods`] - main rod positions across the width, tapered lengths, splices
//! - [`cross_rods`] - cross rod positions across the length, tapered widths
//! - [`l_patti`] - wall brackets, fasteners and black screw boxes
//! - [`boards`] - ceiling board count from average room area
//!
//! [`ceiling::calculate_ceiling_requirements`] validates the input, runs every
//! stage and combines the results into one [`CeilingCalculation`].
//!
//! [`LayoutConfig`]: crate::config::LayoutConfig

pub mod boards;
pub mod ceiling;
pub mod cross_rods;
pub mod l_patti;
pub mod main_rods;
pub mod parameters;

// Re-export commonly used types
pub use ceiling::{calculate_ceiling_requirements, calculate_ceiling_requirements_default, CeilingCalculation, RoomDimensions};

/// Tolerance for snapping nearly-integral quotients. Metric input converted to
/// feet lands a hair off whole numbers (3657.6 mm is not exactly 12 ft in f64).
const SNAP_EPSILON: f64 = 1e-9;

/// Round half away from zero to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `ceil` that treats values within [`SNAP_EPSILON`] of an integer as that integer.
/// Negative results clamp to zero.
pub(crate) fn ceil_count(value: f64) -> u32 {
    let nearest = value.round();
    let snapped = if (value - nearest).abs() < SNAP_EPSILON { nearest } else { value.ceil() };
    snapped.max(0.0) as u32
}

/// `floor` with the same snapping as [`ceil_count`].
pub(crate) fn floor_count(value: f64) -> u32 {
    let nearest = value.round();
    let snapped = if (value - nearest).abs() < SNAP_EPSILON { nearest } else { value.floor() };
    snapped.max(0.0) as u32
}

/// Linear taper between the value at one wall (`start`) and the value at the
/// opposite wall (`end`), evaluated `position` feet along a run of `span` feet.
pub(crate) fn interpolate(start: f64, end: f64, position: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return start;
    }
    start + (end - start) * (position / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_counts_snap_conversion_noise() {
        assert_eq!(ceil_count(4.000_000_000_01), 4);
        assert_eq!(ceil_count(4.01), 5);
        assert_eq!(floor_count(3.999_999_999_99), 4);
        assert_eq!(floor_count(3.99), 3);
        assert_eq!(ceil_count(-0.5), 0);
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(interpolate(10.0, 20.0, 0.0, 10.0), 10.0);
        assert_eq!(interpolate(10.0, 20.0, 5.0, 10.0), 15.0);
        assert_eq!(interpolate(10.0, 20.0, 10.0, 10.0), 20.0);
        assert_eq!(interpolate(10.0, 20.0, 3.0, 0.0), 10.0);
    }
}
