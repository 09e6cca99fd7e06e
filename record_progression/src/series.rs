use crate::data::{DistanceKey, RecordPoint, RecordSeries, ValueMode};
use crate::error::RecordError;
use crate::loader::{ErrorPolicy, LoadOptions};
use crate::miles::{miles_for, miles_per_hour};
use crate::parsers::{parse_date, parse_time, year_fraction};
use crate::rows::{split_fields, SourceLine};

/// Column holding the record time.
const TIME_FIELD: usize = 0;
/// Column holding the date the record was set.
const DATE_FIELD: usize = 3;

/// Build the chronologically sorted series of one block.
///
/// In [`ValueMode::MilesPerHour`] the distance must be listed in the miles
/// table, otherwise [`RecordError::UnknownDistance`] is returned before any row
/// is consumed. Invalid rows either abort the series or are skipped, as the
/// [`ErrorPolicy`] in `options` dictates.
pub fn build_series<'a>(
    key: &DistanceKey,
    rows: impl Iterator<Item = SourceLine<'a>>,
    options: &LoadOptions,
) -> Result<RecordSeries, RecordError> {
    let miles = match options.mode {
        ValueMode::Minutes => None,
        ValueMode::MilesPerHour => Some(miles_for(&key.distance)?),
    };

    let mut series = RecordSeries::new();
    for (line, raw) in rows {
        match parse_record(line, raw, miles) {
            Ok(point) => series.push(point),
            Err(e) => match options.policy {
                ErrorPolicy::Abort => return Err(e.at_line(line)),
                ErrorPolicy::Skip => {
                    log::warn!("Skipping line {} of {}: {}: {}", line, key, e, raw)
                }
            },
        }
    }

    series.sort_by(|a, b| a.year.total_cmp(&b.year).then(a.val.total_cmp(&b.val)));
    log::debug!("{}: {} records", key, series.len());

    Ok(series)
}

fn parse_record(line: usize, raw: &str, miles: Option<f64>) -> Result<RecordPoint, RecordError> {
    let fields = split_fields(raw)?;
    let (Some(time), Some(date)) = (fields.get(TIME_FIELD), fields.get(DATE_FIELD)) else {
        return Err(RecordError::ShortRow {
            line,
            raw: raw.to_string(),
        });
    };

    let minutes = parse_time(time)?;
    let date = parse_date(date)?;

    let val = match miles {
        None => minutes,
        // A zero time has no finite speed.
        Some(_) if minutes <= 0.0 => return Err(RecordError::UnparseableTime(time.to_string())),
        Some(miles) => miles_per_hour(miles, minutes),
    };

    Ok(RecordPoint {
        year: year_fraction(date),
        val,
    })
}
