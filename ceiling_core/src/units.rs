//! # Unit Types
//!
//! Lightweight wrappers for the units the estimator works in, plus the
//! [`LengthUnit`] selector used at the input/output boundary.
//!
//! All layout arithmetic happens in feet: stock rods are sold in 12 ft
//! lengths, boards are 6 ft × 4 ft and splice overlaps are quoted in inches.
//! Measurements entered in any other unit are converted to feet before a
//! [`RoomDimensions`](crate::calculations::RoomDimensions) is built, and
//! converted back only for display.
//!
//! ## Example
//!
//! ```rust
//! use ceiling_core::units::{Feet, Inches, LengthUnit};
//!
//! let overlap = Inches(5.0);
//! let overlap_ft: Feet = overlap.into();
//! assert!((overlap_ft.0 - 5.0 / 12.0).abs() < 1e-12);
//!
//! let unit: LengthUnit = "m".parse().unwrap();
//! assert!((unit.to_feet(1.0) - 3.28084).abs() < 1e-5);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl Feet {
    /// Area of a rectangle with sides `self` and `other`
    pub fn area_with(self, other: Feet) -> SqFt {
        SqFt(self.0 * other.0)
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqFt);

// ============================================================================
// Measurement unit selector
// ============================================================================

/// Unit a user enters measurements in (and wants results shown in).
///
/// Serializes as the short abbreviation (`"ft"`, `"mm"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "yd")]
    Yards,
}

impl LengthUnit {
    /// Every supported unit, in menu order.
    pub const ALL: [LengthUnit; 6] = [
        LengthUnit::Feet,
        LengthUnit::Millimeters,
        LengthUnit::Centimeters,
        LengthUnit::Inches,
        LengthUnit::Meters,
        LengthUnit::Yards,
    ];

    /// Feet per one of this unit. Based on the international foot (0.3048 m).
    pub fn feet_per_unit(self) -> f64 {
        match self {
            LengthUnit::Feet => 1.0,
            LengthUnit::Millimeters => 1.0 / 304.8,
            LengthUnit::Centimeters => 1.0 / 30.48,
            LengthUnit::Inches => 1.0 / 12.0,
            LengthUnit::Meters => 1.0 / 0.3048,
            LengthUnit::Yards => 3.0,
        }
    }

    /// Convert a length in this unit to feet.
    pub fn to_feet(self, value: f64) -> f64 {
        value * self.feet_per_unit()
    }

    /// Convert a length in feet to this unit.
    pub fn from_feet(self, feet: f64) -> f64 {
        feet / self.feet_per_unit()
    }

    /// Convert an area in square feet to this unit squared.
    pub fn area_from_sqft(self, sqft: f64) -> f64 {
        let f = self.feet_per_unit();
        sqft / (f * f)
    }

    /// Short label used in reports ("ft", "mm", ...)
    pub fn abbreviation(self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Inches => "in",
            LengthUnit::Meters => "m",
            LengthUnit::Yards => "yd",
        }
    }

    /// Area label ("sq ft", "sq m", ...)
    pub fn area_abbreviation(self) -> String {
        format!("sq {}", self.abbreviation())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for LengthUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ft" | "feet" | "foot" => Ok(LengthUnit::Feet),
            "mm" | "millimeters" | "millimetres" => Ok(LengthUnit::Millimeters),
            "cm" | "centimeters" | "centimetres" => Ok(LengthUnit::Centimeters),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            "m" | "meters" | "metres" => Ok(LengthUnit::Meters),
            "yd" | "yard" | "yards" => Ok(LengthUnit::Yards),
            _ => Err(CalcError::unknown_unit(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(10.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 120.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Feet(10.0);
        let b = Feet(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
        assert_eq!(a.area_with(b).0, 50.0);
    }

    #[test]
    fn test_unit_conversions() {
        assert!((LengthUnit::Meters.to_feet(1.0) - 3.280_839_895).abs() < 1e-6);
        assert!((LengthUnit::Millimeters.to_feet(304.8) - 1.0).abs() < 1e-12);
        assert!((LengthUnit::Centimeters.to_feet(30.48) - 1.0).abs() < 1e-12);
        assert!((LengthUnit::Inches.to_feet(18.0) - 1.5).abs() < 1e-12);
        assert_eq!(LengthUnit::Yards.to_feet(2.0), 6.0);
        assert_eq!(LengthUnit::Feet.to_feet(7.5), 7.5);
    }

    #[test]
    fn test_conversion_inverse() {
        for unit in LengthUnit::ALL {
            let back = unit.from_feet(unit.to_feet(123.4));
            assert!((back - 123.4).abs() < 1e-9, "{unit} did not round trip");
        }
    }

    #[test]
    fn test_area_conversion() {
        assert!((LengthUnit::Inches.area_from_sqft(1.0) - 144.0).abs() < 1e-9);
        assert!((LengthUnit::Yards.area_from_sqft(9.0) - 1.0).abs() < 1e-12);
        assert_eq!(LengthUnit::Meters.area_abbreviation(), "sq m");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("FT".parse::<LengthUnit>().unwrap(), LengthUnit::Feet);
        assert_eq!("inches".parse::<LengthUnit>().unwrap(), LengthUnit::Inches);
        assert_eq!(" yd ".parse::<LengthUnit>().unwrap(), LengthUnit::Yards);
        let err = "furlong".parse::<LengthUnit>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");

        let unit_json = serde_json::to_string(&LengthUnit::Centimeters).unwrap();
        assert_eq!(unit_json, "\"cm\"");
        let roundtrip: LengthUnit = serde_json::from_str(&unit_json).unwrap();
        assert_eq!(roundtrip, LengthUnit::Centimeters);
    }
}
