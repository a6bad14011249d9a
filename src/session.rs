//! Row-by-row decoding into a borrowed record.

use alloc::{string::String, vec::Vec};

use thiserror::Error;

use crate::{
    field::{ConvertError, Kind, Record, Slot},
    plan::{Binding, Plan, PlanError},
    source::RowSource,
};

/// Errors occurring while starting or advancing a session.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// An error from the row source.
    #[error("Failed to read a row: {0}.")]
    Source(#[source] E),
    /// The row source ended before a header was read.
    #[error("Found no header row.")]
    NoHeader,
    /// The record cannot be bound to the header.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// The text of a column could not be converted into its field.
    #[error("Failed to convert column {column} on line {line}: {source}")]
    Convert {
        line: usize,
        column: usize,
        #[source]
        source: ConvertError,
    },
}

/// A decoding session over a row source, writing into a borrowed record.
///
/// Each call to [`Session::advance`] reads one row and writes the bound
/// columns into the record. Once it returns `false`, check [`Session::error`]
/// (or call [`Session::finish`]) to tell the end of the rows apart from a
/// fault.
pub struct Session<'r, S: RowSource, T> {
    source: S,
    record: &'r mut T,
    header: Vec<String>,
    plan: Plan<T>,
    line: usize,
    column: usize,
    error: Option<Error<S::Error>>,
    done: bool,
}

impl<'r, S: RowSource, T: Record> Session<'r, S, T> {
    /// Read the header row from a source and bind the fields of a record to it.
    ///
    /// Fields with no matching column are left untouched by the session.
    pub fn new(mut source: S, record: &'r mut T) -> Result<Self, Error<S::Error>> {
        let header = source.read_row().map_err(Error::Source)?.ok_or(Error::NoHeader)?;
        let plan = Plan::new(&header)?;

        tracing::debug!(columns = header.len(), bound = plan.len(), "bound record to header");

        Ok(Self {
            source,
            record,
            header,
            plan,
            line: 1,
            column: 0,
            error: None,
            done: false,
        })
    }
}

impl<'r, S: RowSource, T> Session<'r, S, T> {
    /// Read the next row into the record.
    ///
    /// Returns `false` at the end of the rows, or on the first fault. Faults
    /// are kept in [`Session::error`], and no further rows are read.
    pub fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }

        let row = self.source.read_row();
        self.line += 1;

        let result = match row {
            Ok(Some(row)) => self.decode(&row),
            Ok(None) => {
                self.done = true;
                return false;
            }
            Err(err) => Err(Error::Source(err)),
        };

        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(line = self.line, column = self.column, "session ended on fault");
                self.error = Some(err);
                self.done = true;
                false
            }
        }
    }

    /// Read the next row, returning the record, `None` at the end of the rows,
    /// or the fault that ended the session.
    pub fn try_next(&mut self) -> Result<Option<&T>, &Error<S::Error>> {
        if self.advance() {
            return Ok(Some(&*self.record));
        }

        match &self.error {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    /// End the session, returning the fault that ended it, if any.
    pub fn finish(self) -> Result<(), Error<S::Error>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn decode(&mut self, row: &[String]) -> Result<(), Error<S::Error>> {
        for binding in self.plan.bindings() {
            if let Err(source) = apply(binding, &mut *self.record, row) {
                self.column = binding.column() + 1;

                return Err(Error::Convert {
                    line: self.line,
                    column: self.column,
                    source,
                });
            }
        }

        Ok(())
    }

    /// The record, holding the values of the last row decoded.
    pub fn record(&self) -> &T {
        &*self.record
    }

    /// Mutable access to the record between rows.
    pub fn record_mut(&mut self) -> &mut T {
        &mut *self.record
    }

    /// The header row read when the session started.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The bindings of the record's fields to header columns.
    pub fn plan(&self) -> &Plan<T> {
        &self.plan
    }

    /// The line of the last row read, counting the header as line 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 1-based column of the last conversion fault, or 0 if there was none.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The fault that ended the session, if any.
    pub fn error(&self) -> Option<&Error<S::Error>> {
        self.error.as_ref()
    }

    /// Give back the row source, positioned after the last row read.
    pub fn into_source(self) -> S {
        self.source
    }
}

/// Write the text of a binding's column into its field.
fn apply<T>(binding: &Binding<T>, record: &mut T, row: &[String]) -> Result<(), ConvertError> {
    let text = row
        .get(binding.column())
        .ok_or(ConvertError::ShortRow { len: row.len() })?;

    match (binding.kind(), (binding.slot())(record)) {
        (Kind::String, Some(Slot::String(s))) => {
            s.clear();
            s.push_str(text);
        }
        (Kind::Signed, Some(Slot::Signed(n))) => {
            // An empty signed field reads as zero.
            n.parse_into(if text.is_empty() { "0" } else { text })?
        }
        (Kind::Unsigned, Some(Slot::Unsigned(n))) | (Kind::Float, Some(Slot::Float(n))) => {
            n.parse_into(text)?
        }
        (Kind::Custom, Some(Slot::Custom(v))) => v.set(text)?,
        _ => Err(ConvertError::NotSettable)?,
    }

    Ok(())
}
