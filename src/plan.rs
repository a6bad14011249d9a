//! Resolution of record fields to header columns.

use alloc::{string::String, vec::Vec};

use thiserror::Error;

use crate::field::{Descriptor, Kind, Record, SlotFn};

/// An error building a binding plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A field matched a header column, but its type cannot be decoded.
    #[error("Field `{field}` matched a column, but its type ({ty}) cannot be decoded.")]
    Unsupported { field: &'static str, ty: &'static str },
}

/// A field resolved to a header column.
pub struct Binding<T> {
    field: &'static str,
    column: usize,
    kind: Kind,
    slot: SlotFn<T>,
}

impl<T> Binding<T> {
    /// The declared name of the bound field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The zero-based index of the column bound to the field.
    pub fn column(&self) -> usize {
        self.column
    }

    /// How the column's text is written into the field.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub(crate) fn slot(&self) -> SlotFn<T> {
        self.slot
    }
}

/// The ordered bindings of a record type's fields to the columns of a header.
pub struct Plan<T> {
    bindings: Vec<Binding<T>>,
}

impl<T: Record> Plan<T> {
    /// Resolve the fields of `T` against a header.
    ///
    /// Fields with no matching column are left out of the plan. A matching
    /// field whose type cannot be decoded fails the whole plan.
    pub fn new(header: &[String]) -> Result<Self, PlanError> {
        let mut bindings = Vec::new();

        for descriptor in T::fields() {
            let key = descriptor.lookup_key();

            let Some(column) = find_column(header, &key) else {
                tracing::trace!(field = descriptor.name(), key = &*key, "no column for field");
                continue;
            };

            let Some(kind) = descriptor.kind() else {
                Err(unsupported(&descriptor))?
            };

            bindings.push(Binding {
                field: descriptor.name(),
                column,
                kind,
                slot: descriptor.slot(),
            });
        }

        Ok(Self { bindings })
    }
}

impl<T> Plan<T> {
    /// The bindings, in field declaration order.
    pub fn bindings(&self) -> &[Binding<T>] {
        &self.bindings
    }

    /// The number of bound fields.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no field matched a column.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn unsupported<T>(descriptor: &Descriptor<T>) -> PlanError {
    PlanError::Unsupported {
        field: descriptor.name(),
        ty: descriptor.type_name(),
    }
}

/// Find the first column whose name matches `key`, ignoring case.
fn find_column(header: &[String], key: &str) -> Option<usize> {
    header.iter().position(|name| eq_ignore_case(name, key))
}

/// Compare two strings character by character under simple case folding.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    let (mut a, mut b) = (a.chars(), b.chars());

    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if fold_eq(x, y) => {}
            _ => return false,
        }
    }
}

/// Characters are equal if identical, or if their single-character lower or
/// upper case forms are.
fn fold_eq(a: char, b: char) -> bool {
    fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
        let c = chars.next()?;
        chars.next().is_none().then_some(c)
    }

    let same = |x: Option<char>, y: Option<char>| x.is_some() && x == y;

    a == b
        || same(single(a.to_lowercase()), single(b.to_lowercase()))
        || same(single(a.to_uppercase()), single(b.to_uppercase()))
}
