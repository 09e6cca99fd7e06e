//! Line-oriented access to a world record table.
//!
//! The table is a sequence of blocks separated by blank lines. Each block
//! starts with a `<distance>,<gender>` header row followed by record rows.
//! The CSV reader used for splitting fields skips blank lines, so the block
//! structure is tracked here on raw lines and every line is split on its own.

use std::iter::Enumerate;
use std::str::Lines;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::RecordError;

/// A raw row together with its 1-based line number.
pub type SourceLine<'a> = (usize, &'a str);

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split one comma separated line into trimmed fields.
pub fn split_fields(raw: &str) -> Result<StringRecord, RecordError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(raw.as_bytes());

    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

pub struct RowSource<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> RowSource<'a> {
    pub fn new(text: &'a str) -> RowSource<'a> {
        RowSource {
            lines: text.lines().enumerate(),
        }
    }

    pub fn next_line(&mut self) -> Option<SourceLine<'a>> {
        self.lines.next().map(|(i, line)| (i + 1, line))
    }

    /// The next non-blank line. `None` signals that no more blocks follow.
    pub fn next_header(&mut self) -> Option<SourceLine<'a>> {
        while let Some((line, raw)) = self.next_line() {
            if !is_blank(raw) {
                return Some((line, raw));
            }
        }
        None
    }

    /// The rows of the current block, up to and including the next blank line.
    pub fn block(&mut self) -> BlockRows<'_, 'a> {
        BlockRows {
            source: self,
            finished: false,
        }
    }
}

/// Rows of a single block. Consuming the terminating blank line ends the block.
pub struct BlockRows<'s, 'a> {
    source: &'s mut RowSource<'a>,
    finished: bool,
}

impl<'a> Iterator for BlockRows<'_, 'a> {
    type Item = SourceLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.source.next_line() {
            Some((_, raw)) if is_blank(raw) => {
                self.finished = true;
                None
            }
            None => {
                self.finished = true;
                None
            }
            row => row,
        }
    }
}

impl BlockRows<'_, '_> {
    /// Skip whatever is left of the block, returning the number of skipped rows.
    pub fn drain(&mut self) -> usize {
        self.by_ref().count()
    }
}
