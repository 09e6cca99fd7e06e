use itertools::Itertools;

use crate::error::RecordError;

/// Race distances with their length in miles.
pub const MILES_TABLE: [(&str, f64); 11] = [
    ("marathon", 26.21875),
    ("half marathon", 13.109375),
    ("10000m", 6.21371192),
    ("5000m", 3.10685596),
    ("3000m", 1.86411358),
    ("mile", 1.0),
    ("1500m", 0.932056788),
    ("800m", 0.497096954),
    ("400m", 0.248548477),
    ("200m", 0.124274238),
    ("100m", 0.0621371192),
];

/// Length of a race distance in miles.
pub fn miles_for(distance: &str) -> Result<f64, RecordError> {
    MILES_TABLE
        .iter()
        .find(|(label, _)| *label == distance)
        .map(|(_, miles)| *miles)
        .ok_or_else(|| RecordError::UnknownDistance(distance.to_string()))
}

/// Distance labels from the shortest to the longest race.
pub fn distances_by_length() -> Vec<&'static str> {
    MILES_TABLE
        .iter()
        .sorted_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, _)| *label)
        .collect()
}

/// Average speed in miles per hour for covering `miles` in `minutes`.
pub fn miles_per_hour(miles: f64, minutes: f64) -> f64 {
    miles / (minutes / 60.0)
}
