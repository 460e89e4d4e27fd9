//! # ceiling_core - False-Ceiling Material Estimator
//!
//! `ceiling_core` computes the bill of materials for a suspended ceiling grid
//! from a room's four wall measurements: perimeter trim, main and cross rods
//! (with taper and splice handling), connecting clips, wall brackets,
//! fasteners, screws and boards. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Configurable**: Every stock size and threshold lives in [`LayoutConfig`]
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use ceiling_core::{calculate_ceiling_requirements, LayoutConfig, RoomDimensions};
//!
//! let room = RoomDimensions::new(20.0, 20.0, 12.0, 12.0, 2.0);
//! let calc = calculate_ceiling_requirements(&room, &LayoutConfig::default()).unwrap();
//!
//! assert_eq!(calc.main_rod_positions, 3);
//! assert_eq!(calc.main_rods, 6); // every 20 ft run needs one spliced segment
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The five sizing stages and their aggregate
//! - [`config`] - Layout constants
//! - [`units`] - Unit wrappers and input/display unit conversion
//! - [`report`] - Bill of materials rows
//! - [`project`] - Multi-room estimates
//! - [`file_io`] - Estimate files with atomic saves and locking
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod project;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_ceiling_requirements, calculate_ceiling_requirements_default, CeilingCalculation, RoomDimensions};
pub use config::LayoutConfig;
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_estimate, save_estimate, FileLock};
pub use project::{Estimate, EstimateMetadata, Room};
pub use units::LengthUnit;
