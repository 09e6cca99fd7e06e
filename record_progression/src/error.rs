use std::io;

/// Failures while turning world record rows into record series.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Unparsed date: '{0}'")]
    UnparseableDate(String),

    #[error("Unparsed time: '{0}'")]
    UnparseableTime(String),

    #[error("Unknown distance '{0}': no conversion to miles available")]
    UnknownDistance(String),

    #[error("Malformed header row on line {line}, expected <distance>,<gender>: {raw}")]
    MalformedHeaderRow { line: usize, raw: String },

    #[error("Row on line {line} has fewer than 4 fields: {raw}")]
    ShortRow { line: usize, raw: String },

    #[error("Invalid row on line {line}")]
    Row {
        line: usize,
        #[source]
        source: Box<RecordError>,
    },

    #[error("Failed to split CSV row")]
    Csv(#[from] csv::Error),

    #[error("Failed to read world record data")]
    Io(#[from] io::Error),
}

impl RecordError {
    /// Attach the 1-based line number of the offending row.
    pub(crate) fn at_line(self, line: usize) -> RecordError {
        match self {
            // Already carry their line.
            RecordError::MalformedHeaderRow { .. }
            | RecordError::ShortRow { .. }
            | RecordError::Row { .. } => self,
            other => RecordError::Row {
                line,
                source: Box::new(other),
            },
        }
    }
}
