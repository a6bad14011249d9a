//! Row source over a reader from the `csv` crate.
//!
//! _Requires Cargo feature `std`._

use alloc::{string::String, vec::Vec};
use std::io::Read;

use ::csv::{Reader, StringRecord};

use super::RowSource;

extern crate std;

/// Rows from a [`csv::Reader`](Reader).
///
/// The header row is yielded first whether or not the reader was built to
/// expect headers. Delimiters, quoting and flexible row lengths are configured
/// on the reader.
pub struct Csv<R> {
    reader: Reader<R>,
    record: StringRecord,
    header_pending: bool,
}

impl<R: Read> Csv<R> {
    /// Wrap a reader, starting at its header row.
    pub fn new(reader: Reader<R>) -> Self {
        Self {
            header_pending: reader.has_headers(),
            reader,
            record: StringRecord::new(),
        }
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> Reader<R> {
        self.reader
    }
}

impl<R: Read> From<Reader<R>> for Csv<R> {
    fn from(reader: Reader<R>) -> Self {
        Self::new(reader)
    }
}

impl<R: Read> RowSource for Csv<R> {
    type Error = ::csv::Error;

    fn read_row(&mut self) -> Result<Option<Vec<String>>, Self::Error> {
        if self.header_pending {
            self.header_pending = false;

            // The reader returns an empty header for empty input.
            let header = self.reader.headers()?;
            return Ok((!header.is_empty()).then(|| header.iter().map(String::from).collect()));
        }

        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }

        Ok(Some(self.record.iter().map(String::from).collect()))
    }
}
