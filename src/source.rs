//! Sources of rows of text fields.
//!
//! A [`RowSource`] yields one row at a time, the header row first. The crate
//! implements it for iterators of rows and, with the `std` feature, for
//! readers from the `csv` crate.

use alloc::{string::String, vec::Vec};
use core::convert::Infallible;

#[cfg(feature = "std")]
pub mod csv;

/// A source of rows of text fields.
pub trait RowSource {
    /// A fault reading a row. The end of the rows is not a fault.
    type Error: core::error::Error + 'static;

    /// Read the next row, or `None` at the end of the rows.
    fn read_row(&mut self) -> Result<Option<Vec<String>>, Self::Error>;
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    type Error = S::Error;

    fn read_row(&mut self) -> Result<Option<Vec<String>>, Self::Error> {
        (**self).read_row()
    }
}

/// Rows from an iterator which cannot fail.
///
/// Built with [`from_iter`].
#[derive(Debug, Clone)]
pub struct FromIter<I>(I);

/// Read rows from an iterator of rows of text fields.
///
/// ```
/// let rows = colbind::source::from_iter([["Name", "Age"], ["Ada", "36"]]);
/// ```
pub fn from_iter<I>(rows: I) -> FromIter<I::IntoIter>
where
    I: IntoIterator,
{
    FromIter(rows.into_iter())
}

impl<I> RowSource for FromIter<I>
where
    I: Iterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: Into<String>,
{
    type Error = Infallible;

    fn read_row(&mut self) -> Result<Option<Vec<String>>, Infallible> {
        Ok(self.0.next().map(collect_row))
    }
}

/// Rows from an iterator of results.
///
/// Built with [`from_try_iter`].
#[derive(Debug, Clone)]
pub struct FromTryIter<I>(I);

/// Read rows from an iterator of results, each a row of text fields or a fault.
pub fn from_try_iter<I>(rows: I) -> FromTryIter<I::IntoIter>
where
    I: IntoIterator,
{
    FromTryIter(rows.into_iter())
}

impl<I, R, E> RowSource for FromTryIter<I>
where
    I: Iterator<Item = Result<R, E>>,
    R: IntoIterator,
    R::Item: Into<String>,
    E: core::error::Error + 'static,
{
    type Error = E;

    fn read_row(&mut self) -> Result<Option<Vec<String>>, E> {
        self.0.next().transpose().map(|row| row.map(collect_row))
    }
}

fn collect_row<R>(row: R) -> Vec<String>
where
    R: IntoIterator,
    R::Item: Into<String>,
{
    row.into_iter().map(Into::into).collect()
}
