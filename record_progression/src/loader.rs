use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use record_progression_cli_types as cli_types;

use crate::data::{Dataset, DistanceKey, ValueMode};
use crate::error::RecordError;
use crate::rows::{split_fields, RowSource};
use crate::series::build_series;

/// What to do when a header, row or block cannot be turned into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the whole load with the first error.
    Abort,
    /// Log the error and continue with the next row or block.
    Skip,
}

impl From<cli_types::ErrorPolicy> for ErrorPolicy {
    fn from(value: cli_types::ErrorPolicy) -> Self {
        match value {
            cli_types::ErrorPolicy::Abort => ErrorPolicy::Abort,
            cli_types::ErrorPolicy::Skip => ErrorPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub mode: ValueMode,
    pub policy: ErrorPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            mode: ValueMode::Minutes,
            policy: ErrorPolicy::Abort,
        }
    }
}

/// Load all record series from a world record table on disk.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, RecordError> {
    let file = File::open(path)?;
    load_dataset_from_reader(BufReader::new(file), options)
}

pub fn load_dataset_from_reader<R: Read>(
    mut reader: R,
    options: &LoadOptions,
) -> Result<Dataset, RecordError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    load_dataset_from_str(&text, options)
}

/// Load all record series from the text of a world record table.
///
/// The first line holds column names and is ignored. Every following block
/// starts with a `<distance>,<gender>` header row and ends at a blank line or
/// at the end of input. A malformed header row fails the load under
/// [`ErrorPolicy::Abort`]; under [`ErrorPolicy::Skip`] its whole block is
/// skipped and loading resumes after the next blank line.
pub fn load_dataset_from_str(text: &str, options: &LoadOptions) -> Result<Dataset, RecordError> {
    let mut source = RowSource::new(text);
    let mut dataset = Dataset::default();

    // Column names
    if source.next_line().is_none() {
        log::warn!("World record table is empty");
        return Ok(dataset);
    }

    while let Some((line, raw)) = source.next_header() {
        let key = match header_key(line, raw) {
            Ok(key) => key,
            Err(e) => match options.policy {
                ErrorPolicy::Abort => return Err(e),
                ErrorPolicy::Skip => {
                    let skipped = source.block().drain();
                    log::warn!("{}. Skipping the block and its {} rows", e, skipped);
                    continue;
                }
            },
        };

        let mut rows = source.block();
        let result = build_series(&key, &mut rows, options);
        rows.drain();

        match result {
            Ok(series) => {
                log::info!("Loaded {} records for {}", series.len(), key);
                if dataset.insert(key.clone(), series).is_some() {
                    log::warn!(
                        "Block for {} on line {} replaces an earlier block of the same distance and gender",
                        key,
                        line
                    );
                }
            }
            Err(e) => match options.policy {
                ErrorPolicy::Abort => return Err(e.at_line(line)),
                ErrorPolicy::Skip => {
                    log::warn!("Skipping the block of {} on line {}: {}", key, line, e)
                }
            },
        }
    }

    Ok(dataset)
}

fn header_key(line: usize, raw: &str) -> Result<DistanceKey, RecordError> {
    let fields = split_fields(raw)?;
    match (fields.len(), fields.get(0), fields.get(1)) {
        (2, Some(distance), Some(gender)) => Ok(DistanceKey::new(distance, gender)),
        _ => Err(RecordError::MalformedHeaderRow {
            line,
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = "Time,Athlete,Nationality,Date,Venue\n\
                              marathon,male\n\
                              2:55:18,Johnny Hayes,United States,\"July 24, 1908\",London\n\
                              2:52:45,Robert Fowler,United States,\"January 1, 1909\",Yonkers\n\
                              \n\
                              marathon,female\n\
                              3:40:22,Violet Piercy,United Kingdom,\"October 3, 1926\",London\n";

    fn skip(mode: ValueMode) -> LoadOptions {
        LoadOptions {
            mode,
            policy: ErrorPolicy::Skip,
        }
    }

    #[test]
    fn test_two_blocks_give_two_keys() {
        let dataset = load_dataset_from_str(TWO_BLOCKS, &LoadOptions::default()).unwrap();
        assert_eq!(dataset.len(), 2);

        let male = dataset.get(&DistanceKey::new("marathon", "male")).unwrap();
        assert_eq!(male.len(), 2);
        let female = dataset
            .get(&DistanceKey::new("marathon", "female"))
            .unwrap();
        assert_eq!(female.len(), 1);
        assert_eq!(female[0].year.floor(), 1926.0);
    }

    #[test]
    fn test_empty_and_header_only_tables() {
        assert!(load_dataset_from_str("", &LoadOptions::default())
            .unwrap()
            .is_empty());
        assert!(load_dataset_from_str("Time,Athlete,Nationality,Date\n", &LoadOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_trailing_blank_lines() {
        let text = format!("{}\n\n\n", TWO_BLOCKS);
        let dataset = load_dataset_from_str(&text, &LoadOptions::default()).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_malformed_header_aborts() {
        let text = "Time,Athlete,Nationality,Date\n\
                    marathon\n\
                    2:55:18,Johnny Hayes,United States,1908-07-24\n";
        match load_dataset_from_str(text, &LoadOptions::default()) {
            Err(RecordError::MalformedHeaderRow { line, raw }) => {
                assert_eq!(line, 2);
                assert_eq!(raw, "marathon");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_malformed_header_skips_block() {
        let text = "Time,Athlete,Nationality,Date\n\
                    mile,male,extra\n\
                    3:59.4,Roger Bannister,United Kingdom,1954-05-06\n\
                    \n\
                    mile,female\n\
                    4:17.3,Anne Smith,United Kingdom,1967-06-03\n";
        let dataset = load_dataset_from_str(text, &skip(ValueMode::Minutes)).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.get(&DistanceKey::new("mile", "female")).is_some());
    }

    #[test]
    fn test_unknown_distance_in_speed_mode() {
        let text = "Time,Athlete,Nationality,Date\n\
                    50km walk,male\n\
                    3:35:47,Yohann Diniz,France,2008-12-12\n\
                    \n\
                    mile,male\n\
                    3:43.13,Hicham El Guerrouj,Morocco,1999-07-07\n";

        let aborted = load_dataset_from_str(
            text,
            &LoadOptions {
                mode: ValueMode::MilesPerHour,
                policy: ErrorPolicy::Abort,
            },
        );
        match aborted {
            Err(RecordError::Row { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(*source, RecordError::UnknownDistance(_)));
            }
            other => panic!("unexpected result {other:?}"),
        }

        let dataset = load_dataset_from_str(text, &skip(ValueMode::MilesPerHour)).unwrap();
        assert_eq!(dataset.len(), 1);
        let mile = dataset.get(&DistanceKey::new("mile", "male")).unwrap();
        assert!((mile[0].val - 60.0 / (3.0 + 43.13 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_bad_row_line_number_is_reported() {
        let text = "Time,Athlete,Nationality,Date\n\
                    mile,male\n\
                    3:59.4,Roger Bannister,United Kingdom,1954-05-06\n\
                    3:58.0,John Landy,Australia,in June\n";
        match load_dataset_from_str(text, &LoadOptions::default()) {
            Err(RecordError::Row { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_block_replaces_earlier() {
        let text = "Time,Athlete,Nationality,Date\n\
                    mile,male\n\
                    3:59.4,Roger Bannister,United Kingdom,1954-05-06\n\
                    \n\
                    mile,male\n\
                    3:43.13,Hicham El Guerrouj,Morocco,1999-07-07\n";
        let dataset = load_dataset_from_str(text, &LoadOptions::default()).unwrap();
        let mile = dataset.get(&DistanceKey::new("mile", "male")).unwrap();
        assert_eq!(mile.len(), 1);
        assert_eq!(mile[0].year.floor(), 1999.0);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = load_dataset(
            Path::new("/nonexistent/world_records.csv"),
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(RecordError::Io(_))));
    }

    #[test]
    fn test_sample_table_blocks() {
        let dataset =
            load_dataset_from_str(crate::test_helpers::SAMPLE_TABLE, &LoadOptions::default())
                .unwrap();
        let keys: Vec<String> = dataset.iter().map(|(key, _)| key.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "100m (male)",
                "marathon (female)",
                "marathon (male)",
                "mile (male)"
            ]
        );
    }

    #[test]
    fn test_synthetic_table_in_speed_mode() {
        let options = LoadOptions {
            mode: ValueMode::MilesPerHour,
            policy: ErrorPolicy::Abort,
        };
        let dataset =
            load_dataset_from_str(&crate::test_helpers::synthetic_table(3), &options).unwrap();
        assert_eq!(dataset.len(), 22);
        assert!(dataset.iter().all(|(_, series)| series.len() == 3));
    }

    #[test]
    fn test_policy_from_cli() {
        assert_eq!(
            ErrorPolicy::from(cli_types::ErrorPolicy::Skip),
            ErrorPolicy::Skip
        );
        assert_eq!(
            ErrorPolicy::from(cli_types::ErrorPolicy::Abort),
            ErrorPolicy::Abort
        );
    }
}
