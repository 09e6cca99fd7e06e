pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod miles;
pub mod parsers;
pub mod reporting;
pub mod rows;
pub mod series;
pub mod simulation;

// Test helpers module - made public for use in unit tests, integration tests, and benchmarks
// This is conditionally compiled to avoid including test code in release builds
#[doc(hidden)]
#[cfg(any(test, doctest, feature = "test-helpers"))]
pub mod test_helpers;
