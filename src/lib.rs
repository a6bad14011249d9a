#![no_std]

//! Bind rows of delimited text with a header to the fields of typed records.
//!
//! Colbind reads a header row from a [`RowSource`], matches each field of a
//! [`Record`] to a header column by name, and works out once how each field is
//! written. Every following row is then decoded in place into a single record
//! owned by the caller.
//!
//! ```
//! #[derive(Debug, Default, Record)]
//! struct Person {
//!     #[field("First Name")]
//!     first_name: String,
//!     second_name: String,
//!     age: i32,
//! }
//!
//! let reader = csv::ReaderBuilder::new().from_path("people.csv")?;
//! let mut person = Person::default();
//! let mut rows = Session::new(Csv::new(reader), &mut person)?;
//!
//! while rows.advance() {
//!     println!("{:?}", rows.record());
//! }
//!
//! rows.finish()?;
//! ```
//!
//! Most users should begin with the [`Record`](macro@Record) derive macro and
//! [`Session`]. The [`plan`] module exposes the binding plan for applications
//! that only need the header resolution.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable the `csv` row source and `std` error integration (default).

extern crate alloc;

pub mod field;
pub mod plan;
pub mod session;
pub mod source;

pub use field::{
    ConvertError, Descriptor, Kind, Numeric, Primitive, Record, Rejected, Slot, Value,
};
pub use plan::{Binding, Plan, PlanError};
pub use session::{Error, Session};
pub use source::RowSource;

#[cfg(feature = "std")]
pub use source::csv::Csv;

#[doc(hidden)]
pub mod __private {
    pub use crate::field::probe::{Probe, ViaNothing, ViaPrimitive, ViaValue};
    pub use alloc::vec::Vec;
}
