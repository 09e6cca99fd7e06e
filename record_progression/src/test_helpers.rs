//! Centralized test helpers for record-progression
//!
//! This module provides world record tables used across unit tests
//! and benchmarks. The sample table is shared with the integration tests
//! as `tests/data/world_records.csv`.

use std::fmt::Write as _;

use crate::miles::MILES_TABLE;

/// A small world record table in the published layout: a column header line,
/// then one block per distance and gender separated by blank lines.
pub const SAMPLE_TABLE: &str = include_str!("../tests/data/world_records.csv");

/// Generates a table with one block per distance of the miles table and
/// gender, each holding `rows_per_block` records in reverse chronological order.
pub fn synthetic_table(rows_per_block: usize) -> String {
    let mut table = String::from("Time,Athlete,Nationality,Date\n");
    for (distance, _) in MILES_TABLE.iter() {
        for gender in ["male", "female"] {
            writeln!(table, "{},{}", distance, gender).expect("writing to a String");
            for i in 0..rows_per_block {
                let year = 2010 - (i % 100);
                let minutes = 10 + i % 50;
                writeln!(
                    table,
                    "1:{:02}:{:02}.5,Runner {},Nowhere,\"June {}, {}\"",
                    minutes,
                    i % 60,
                    i,
                    1 + i % 28,
                    year
                )
                .expect("writing to a String");
            }
            table.push('\n');
        }
    }
    table
}
