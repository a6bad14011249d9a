//! Record fields and the ways their values are written.
//!
//! A [`Record`] lists a [`Descriptor`] for each of its fields. The descriptor
//! names the field, optionally overrides the header column it is looked up
//! under, and carries the field's decode [`Kind`] along with a handle to write
//! into the field of a live record.
//!
//! In most cases these descriptors can be derived. See the
//! [`Record`](macro@Record) macro for details.

use alloc::{borrow::Cow, string::String};
use core::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

#[doc(hidden)]
pub mod probe;

/// Derive [`Record`] for a struct with named fields.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// Each field is looked up in the header under its own name, with underscores
/// read as spaces and ignoring case. Add the `field("...")` attribute to look a
/// field up under an exact column name instead.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// struct Person {
///     #[field("First Name")]
///     first_name: String,
///     second_name: String,
///     age: i32,
/// }
/// ```
///
/// Fields may be strings, integers, floats, or any type implementing
/// [`Value`] or [`Primitive`]. Fields of other types are accepted by the macro,
/// but a session fails to start if such a field matches a header column.
#[cfg(feature = "derive")]
pub use colbind_derive::Record;

/// Describe the fields of a record type.
///
/// See the [`Record`](macro@Record) derive macro for an automatic
/// implementation of this trait.
pub trait Record: Sized {
    /// List the descriptors of this record's fields, in declaration order.
    fn fields() -> alloc::vec::Vec<Descriptor<Self>>;
}

/// Write handle into one field of a record.
pub type SlotFn<T> = for<'a> fn(&'a mut T) -> Option<Slot<'a>>;

/// Description of a single record field.
pub struct Descriptor<T> {
    name: &'static str,
    ty: &'static str,
    column: Option<&'static str>,
    kind: Option<Kind>,
    slot: SlotFn<T>,
}

impl<T> Descriptor<T> {
    /// Describe a field by its declared name, the name of its type, its decode
    /// kind and a write handle.
    ///
    /// A kind of `None` marks a field that cannot be decoded. This only becomes
    /// an error if the field matches a header column.
    pub fn new(name: &'static str, ty: &'static str, kind: Option<Kind>, slot: SlotFn<T>) -> Self {
        Self {
            name,
            ty,
            column: None,
            kind,
            slot,
        }
    }

    /// Look this field up under an exact column name.
    pub fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    /// The declared name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The name of the field's type.
    pub fn type_name(&self) -> &'static str {
        self.ty
    }

    /// The decode kind of the field, or `None` if its type cannot be decoded.
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    pub(crate) fn slot(&self) -> SlotFn<T> {
        self.slot
    }

    /// The header column name this field is looked up under.
    ///
    /// This is the column override if one is set, otherwise the declared name
    /// with underscores replaced by spaces.
    pub fn lookup_key(&self) -> Cow<'static, str> {
        match self.column {
            Some(column) => Cow::Borrowed(column),
            None if self.name.contains('_') => Cow::Owned(self.name.replace('_', " ")),
            None => Cow::Borrowed(self.name),
        }
    }
}

/// How the text of a column is written into a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Copied verbatim.
    String,
    /// Parsed as a base-10 signed integer. Empty text is zero.
    Signed,
    /// Parsed as a base-10 unsigned integer, without a sign.
    Unsigned,
    /// Parsed as a base-10 floating point number.
    Float,
    /// Handed to [`Value::set`].
    Custom,
}

/// Mutable access to a field of a live record, tagged by how it is written.
pub enum Slot<'a> {
    /// A field of [`Kind::String`].
    String(&'a mut String),
    /// A field of [`Kind::Signed`].
    Signed(&'a mut dyn Numeric),
    /// A field of [`Kind::Unsigned`].
    Unsigned(&'a mut dyn Numeric),
    /// A field of [`Kind::Float`].
    Float(&'a mut dyn Numeric),
    /// A field of [`Kind::Custom`].
    Custom(&'a mut dyn Value),
}

/// A field type that sets itself from text, bypassing primitive coercion.
///
/// A type implementing both this trait and [`Primitive`] is always bound as a
/// [`Kind::Custom`] field.
pub trait Value {
    /// Render the current value as text.
    fn render(&self) -> String;
    /// Set the value from text, or reject the text.
    fn set(&mut self, text: &str) -> Result<(), Rejected>;
}

/// Text refused by [`Value::set`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value rejected: {0}.")]
pub struct Rejected(pub String);

/// A field type written by one of the primitive decode kinds.
pub trait Primitive {
    /// The decode kind of this type.
    const KIND: Kind;
    /// Borrow this field as a slot matching [`Self::KIND`].
    fn slot(&mut self) -> Slot<'_>;
}

impl Primitive for String {
    const KIND: Kind = Kind::String;

    fn slot(&mut self) -> Slot<'_> {
        Slot::String(self)
    }
}

/// A number parsed in place from base-10 text.
pub trait Numeric {
    /// Parse text and store the result.
    ///
    /// Unsigned integers reject a leading `+`.
    fn parse_into(&mut self, text: &str) -> Result<(), ConvertError>;
}

macro_rules! numeric {
    ($kind:ident, $err:ident, $($t:ty),+) => {$(
        impl Numeric for $t {
            fn parse_into(&mut self, text: &str) -> Result<(), ConvertError> {
                if Kind::$kind == Kind::Unsigned && text.starts_with('+') {
                    Err(ConvertError::Sign)?;
                }

                *self = text.parse().map_err(ConvertError::$err)?;
                Ok(())
            }
        }

        impl Primitive for $t {
            const KIND: Kind = Kind::$kind;

            fn slot(&mut self) -> Slot<'_> {
                Slot::$kind(self)
            }
        }
    )+};
}

numeric!(Signed, Int, i8, i16, i32, i64, i128, isize);
numeric!(Unsigned, Int, u8, u16, u32, u64, u128, usize);
numeric!(Float, Float, f32, f64);

/// An error converting the text of a column into a field.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Text is not an integer in range of the field.
    #[error("Invalid integer: {0}.")]
    Int(#[from] ParseIntError),
    /// Text is not a floating point number.
    #[error("Invalid float: {0}.")]
    Float(#[from] ParseFloatError),
    /// Text of an unsigned integer carries a sign.
    #[error("Unsigned integer has a sign.")]
    Sign,
    /// A custom value rejected the text.
    #[error(transparent)]
    Rejected(#[from] Rejected),
    /// The row ended before the column.
    #[error("Row has only {len} columns.")]
    ShortRow { len: usize },
    /// The field's write handle does not match its decode kind.
    #[error("Field cannot be set as its decode kind.")]
    NotSettable,
}
