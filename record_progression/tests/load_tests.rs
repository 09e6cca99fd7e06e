use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use record_progression::data::{DistanceKey, ValueMode};
use record_progression::error::RecordError;
use record_progression::loader::{load_dataset, ErrorPolicy, LoadOptions};
use record_progression::miles::MILES_TABLE;
use tempfile::TempDir;

fn sample_table() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("world_records.csv")
}

/// One block per known distance and gender, records listed newest first.
fn reversed_table(rows_per_block: usize) -> String {
    let mut table = String::from("Time,Athlete,Nationality,Date\n");
    for (distance, _) in MILES_TABLE.iter() {
        for gender in ["male", "female"] {
            writeln!(table, "{},{}", distance, gender).unwrap();
            for i in 0..rows_per_block {
                writeln!(
                    table,
                    "1:{:02}:30,Runner {},Nowhere,{}-06-01",
                    10 + i % 50,
                    i,
                    2010 - i
                )
                .unwrap();
            }
            table.push('\n');
        }
    }
    table
}

#[test]
fn test_load_sample_table_times() {
    let dataset = load_dataset(&sample_table(), &LoadOptions::default()).unwrap();

    assert_eq!(dataset.len(), 4);
    let marathon = dataset
        .get(&DistanceKey::new("marathon", "male"))
        .unwrap();
    assert_eq!(marathon.len(), 4);
    assert!((marathon[0].val - (175.0 + 18.4 / 60.0)).abs() < 1e-9);
    assert!((marathon[3].val - (123.0 + 59.0 / 60.0)).abs() < 1e-9);

    // "[1]" footnote markers are ignored and records are sorted by year.
    let sprint = dataset.get(&DistanceKey::new("100m", "male")).unwrap();
    assert_eq!(sprint[0].year.floor(), 2008.0);
    assert_eq!(sprint[1].year.floor(), 2009.0);
}

#[test]
fn test_load_sample_table_speeds() {
    let path = sample_table();
    let options = LoadOptions {
        mode: ValueMode::MilesPerHour,
        policy: ErrorPolicy::Abort,
    };
    let dataset = load_dataset(&path, &options).unwrap();

    let mile = dataset.get(&DistanceKey::new("mile", "male")).unwrap();
    let minutes = 3.0 + 43.13 / 60.0;
    assert!((mile[2].val - 60.0 / minutes).abs() < 1e-9);
    assert!(mile.windows(2).all(|w| w[0].year <= w[1].year));
}

#[test]
fn test_every_series_is_sorted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("synthetic.csv");
    fs::write(&path, reversed_table(50)).unwrap();

    let dataset = load_dataset(&path, &LoadOptions::default()).unwrap();
    assert_eq!(dataset.len(), 22);
    for (key, series) in dataset.iter() {
        assert_eq!(series.len(), 50, "{}", key);
        assert_eq!(series[0].year.floor(), 1961.0, "{}", key);
        assert!(series.windows(2).all(|w| w[0].year <= w[1].year), "{}", key);
    }
}

#[test]
fn test_bad_row_reports_its_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "Time,Athlete,Nationality,Date\n\
         mile,male\n\
         3:59.4,Roger Bannister,United Kingdom,6 May 1954\n\
         \n\
         marathon,male\n\
         two hours,Nobody,Nowhere,2001-01-01\n",
    )
    .unwrap();

    let err = load_dataset(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, RecordError::Row { line: 6, .. }));
    assert!(err.to_string().contains("line 6"));

    let skipped = load_dataset(
        &path,
        &LoadOptions {
            mode: ValueMode::Minutes,
            policy: ErrorPolicy::Skip,
        },
    )
    .unwrap();
    assert_eq!(skipped.len(), 2);
    assert!(skipped
        .get(&DistanceKey::new("marathon", "male"))
        .unwrap()
        .is_empty());
}
