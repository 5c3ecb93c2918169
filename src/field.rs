// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Per-field state for partial updates.
//!
//! A `Field` records whether the operator mentioned a property at all. Zero values (an empty
//! string, 0, false) only count as provided when the option was registered to accept zero and
//! the flag layer reported it as explicitly changed; otherwise "set to zero" would be
//! indistinguishable from "not mentioned".
//!
//! `UnsetField` is the independent companion used only by the unset path.

use std::collections::BTreeMap;

use crate::api::{Property, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState<T> {
    Unspecified,
    Specified(T),
}

/// The state of one named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<T> {
    property: Property,
    state: FieldState<T>,
}

impl<T: Default + PartialEq> Field<T> {
    pub fn unspecified(property: Property) -> Self {
        Field {
            property,
            state: FieldState::Unspecified,
        }
    }

    /// Build a field from the value the flag layer reported, where `None` means the option was
    /// never given. A zero value is kept only when `accept_zero` is set.
    pub fn from_flag(property: Property, value: Option<T>, accept_zero: bool) -> Self {
        let state = match value {
            Some(v) if accept_zero || v != T::default() => FieldState::Specified(v),
            _ => FieldState::Unspecified,
        };
        Field { property, state }
    }

    /// Shorthand for a field that was given `value` on the command line.
    pub fn given(property: Property, value: T) -> Self {
        Self::from_flag(property, Some(value), false)
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn state(&self) -> &FieldState<T> {
        &self.state
    }

    pub fn is_provided(&self) -> bool {
        matches!(self.state, FieldState::Specified(_))
    }

    /// The current value, or the zero value when not provided.
    pub fn value(&self) -> T
    where
        T: Clone,
    {
        match &self.state {
            FieldState::Specified(v) => v.clone(),
            FieldState::Unspecified => T::default(),
        }
    }

    /// The only accessor request builders use.
    pub fn as_optional(&self) -> Option<&T> {
        match &self.state {
            FieldState::Specified(v) => Some(v),
            FieldState::Unspecified => None,
        }
    }
}

/// A request to clear one property. Absence means "leave it alone", never "set to false".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsetField {
    property: Property,
    requested: bool,
}

impl UnsetField {
    pub fn new(property: Property, requested: bool) -> Self {
        UnsetField {
            property,
            requested,
        }
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn as_clear_signal(&self) -> Option<bool> {
        self.requested.then_some(true)
    }
}

/// The set-fields of one invocation: every registered property mapped to its optional value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(BTreeMap<Property, Option<Value>>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T>(&mut self, field: &Field<T>)
    where
        T: Clone + Default + PartialEq + Into<Value>,
    {
        self.0
            .insert(field.property(), field.as_optional().cloned().map(Into::into));
    }

    pub fn with<T>(mut self, field: Field<T>) -> Self
    where
        T: Clone + Default + PartialEq + Into<Value>,
    {
        self.insert(&field);
        self
    }

    pub fn get(&self, property: Property) -> Option<&Value> {
        self.0.get(&property).and_then(Option::as_ref)
    }

    pub fn is_provided(&self, property: Property) -> bool {
        self.get(property).is_some()
    }

    pub fn provided(&self) -> impl Iterator<Item = (Property, &Value)> {
        self.0
            .iter()
            .filter_map(|(p, v)| v.as_ref().map(|v| (*p, v)))
    }
}

/// The unset-fields of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clears(BTreeMap<Property, Option<bool>>);

impl Clears {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &UnsetField) {
        self.0.insert(field.property(), field.as_clear_signal());
    }

    pub fn with(mut self, field: UnsetField) -> Self {
        self.insert(&field);
        self
    }

    pub fn is_requested(&self, property: Property) -> bool {
        matches!(self.0.get(&property), Some(Some(true)))
    }

    /// Treat `a` and `b` as one atomic pair: requesting either clears both.
    pub fn join(&mut self, a: Property, b: Property) {
        if self.is_requested(a) || self.is_requested(b) {
            self.0.insert(a, Some(true));
            self.0.insert(b, Some(true));
        }
    }

    pub fn requested(&self) -> impl Iterator<Item = Property> + '_ {
        self.0
            .iter()
            .filter_map(|(p, v)| v.filter(|clear| *clear).map(|_| *p))
    }
}
