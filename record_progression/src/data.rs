use std::collections::BTreeMap;
use std::fmt::Display;

use record_progression_cli_types as cli_types;

/// Identifies one record progression, e.g. the men's marathon.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistanceKey {
    pub distance: String,
    pub gender: String,
}

impl DistanceKey {
    pub fn new(distance: impl Into<String>, gender: impl Into<String>) -> DistanceKey {
        DistanceKey {
            distance: distance.into(),
            gender: gender.into(),
        }
    }
}

impl Display for DistanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.distance, self.gender)
    }
}

/// A single record: when it was set and how fast it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordPoint {
    /// Calendar year plus the elapsed share of that year.
    pub year: f64,
    /// Minutes or miles per hour, depending on the [`ValueMode`] used to load.
    pub val: f64,
}

/// Records of one distance, ordered by year (ties ordered by value).
pub type RecordSeries = Vec<RecordPoint>;

/// What the value of each [`RecordPoint`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    Minutes,
    MilesPerHour,
}

impl From<cli_types::ValueMode> for ValueMode {
    fn from(value: cli_types::ValueMode) -> Self {
        match value {
            cli_types::ValueMode::Times => ValueMode::Minutes,
            cli_types::ValueMode::Speed => ValueMode::MilesPerHour,
        }
    }
}

impl ValueMode {
    /// Axis label for charts of this value.
    pub fn unit(&self) -> &'static str {
        match self {
            ValueMode::Minutes => "minutes",
            ValueMode::MilesPerHour => "mph",
        }
    }
}

/// All record series of one input table.
#[derive(Debug, Default, PartialEq)]
pub struct Dataset {
    series: BTreeMap<DistanceKey, RecordSeries>,
}

impl Dataset {
    /// Store a series, returning the one it replaces if the key was seen before.
    pub(crate) fn insert(&mut self, key: DistanceKey, series: RecordSeries) -> Option<RecordSeries> {
        self.series.insert(key, series)
    }

    pub fn get(&self, key: &DistanceKey) -> Option<&RecordSeries> {
        self.series.get(key)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Iterate all series ordered by distance, then gender.
    pub fn iter(&self) -> impl Iterator<Item = (&DistanceKey, &RecordSeries)> {
        self.series.iter()
    }

    /// Iterate the series of a single gender ordered by distance.
    pub fn for_gender<'a>(
        &'a self,
        gender: &'a str,
    ) -> impl Iterator<Item = (&'a DistanceKey, &'a RecordSeries)> + 'a {
        self.series.iter().filter(move |(k, _)| k.gender == gender)
    }
}
