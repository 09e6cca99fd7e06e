//! Centralized default values for record-progression.
//!
//! This module defines the constants used throughout the application to avoid
//! magic numbers scattered in the codebase. The configurable ones are used as
//! fallback values when neither the command line nor a configuration file
//! provides a value.

// ============================================================================
// Input Defaults
// ============================================================================

/// Default world record table read when no input file is given.
pub const DEFAULT_INPUT_PATH: &str = "Marathon_world_record_times.csv";

// ============================================================================
// Parsing Constants
// ============================================================================

/// Length of the year used to spread dates over a continuous time axis.
pub const DAYS_PER_YEAR: f64 = 365.24;

/// Parsed times above this many minutes are reported as likely unit or
/// format mistakes in the source table. They are not rejected.
pub const SUSPICIOUS_MINUTES: f64 = 1000.0;

// ============================================================================
// Plot Defaults
// ============================================================================

/// Default gender whose records are plotted.
pub const DEFAULT_GENDER: &str = "male";

/// Default directory charts are written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Default year up to which the current record is drawn in the speed chart.
pub const DEFAULT_PRESENT_YEAR: f64 = 2011.4;

/// Distance left out of the speed chart to fit the remaining ones on the grid.
pub const SPEED_CHART_EXCLUDED_DISTANCE: &str = "200m";

/// Rows of the speed chart grid.
pub const SPEED_CHART_ROWS: usize = 6;

/// Columns of the speed chart grid.
pub const SPEED_CHART_COLUMNS: usize = 2;

