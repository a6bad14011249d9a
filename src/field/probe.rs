//! Decode kind classification for derived records.
//!
//! Derived code calls `(&&&Probe::<F>::new()).kind()` for a concrete field
//! type `F`. Method resolution tries the receiver with the most references
//! first, so [`ViaValue`] is picked when `F: Value`, then [`ViaPrimitive`] when
//! `F: Primitive`, and [`ViaNothing`] otherwise.

use core::marker::PhantomData;

use super::{Kind, Primitive, Slot, Value};

pub struct Probe<T>(PhantomData<fn(T)>);

impl<T> Probe<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

pub trait ViaValue<T> {
    fn kind(&self) -> Option<Kind>;
    fn slot<'a>(&self, field: &'a mut T) -> Option<Slot<'a>>;
}

impl<T: Value> ViaValue<T> for &&Probe<T> {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::Custom)
    }

    fn slot<'a>(&self, field: &'a mut T) -> Option<Slot<'a>> {
        Some(Slot::Custom(field))
    }
}

pub trait ViaPrimitive<T> {
    fn kind(&self) -> Option<Kind>;
    fn slot<'a>(&self, field: &'a mut T) -> Option<Slot<'a>>;
}

impl<T: Primitive> ViaPrimitive<T> for &Probe<T> {
    fn kind(&self) -> Option<Kind> {
        Some(T::KIND)
    }

    fn slot<'a>(&self, field: &'a mut T) -> Option<Slot<'a>> {
        Some(field.slot())
    }
}

pub trait ViaNothing<T> {
    fn kind(&self) -> Option<Kind>;
    fn slot<'a>(&self, field: &'a mut T) -> Option<Slot<'a>>;
}

impl<T> ViaNothing<T> for Probe<T> {
    fn kind(&self) -> Option<Kind> {
        None
    }

    fn slot<'a>(&self, _: &'a mut T) -> Option<Slot<'a>> {
        None
    }
}
