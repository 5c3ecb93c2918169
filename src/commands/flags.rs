// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::any::Any;

use clap::{parser::ValueSource, ArgMatches};

use crate::{
    api::{Scope, ScopeField},
    field::{Clears, Field, Properties, UnsetField},
    kind::{PropertySpec, ValueKind},
};

/// Reads fields out of parsed command line matches.
///
/// Lookups go through `try_get_one` so that asking for an option a command does not register
/// reads as "not given" instead of panicking.
pub struct Flags<'a> {
    matches: &'a ArgMatches,
}

impl<'a> Flags<'a> {
    pub fn new(matches: &'a ArgMatches) -> Self {
        Flags { matches }
    }

    fn get<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<T> {
        self.matches.try_get_one::<T>(id).ok().flatten().cloned()
    }

    /// The value of `id` if it was given on the command line, as opposed to defaulted.
    pub fn explicit<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<T> {
        let value = self.get::<T>(id)?;
        (self.matches.value_source(id) == Some(ValueSource::CommandLine)).then_some(value)
    }

    pub fn string(&self, id: &str) -> Option<String> {
        self.get(id)
    }

    pub fn switch(&self, id: &str) -> bool {
        self.get::<bool>(id).unwrap_or(false)
    }

    /// Scope fields from their flags; `zone` falls back to `default_zone`.
    pub fn scope(&self, fields: &[ScopeField], default_zone: Option<&str>) -> Scope {
        let mut scope = Scope::default();
        for field in fields {
            let value = self.string(field.flag()).or_else(|| match field {
                ScopeField::Zone => default_zone.map(str::to_string),
                _ => None,
            });
            scope.set(*field, value);
        }
        scope
    }

    fn field<T>(&self, spec: &PropertySpec) -> Field<T>
    where
        T: Any + Clone + Default + PartialEq + Send + Sync + 'static,
    {
        Field::from_flag(
            spec.property,
            self.explicit(spec.property.flag()),
            spec.accept_zero,
        )
    }

    pub fn properties(&self, specs: &[PropertySpec]) -> Properties {
        let mut properties = Properties::new();
        for spec in specs {
            match spec.value {
                ValueKind::Text => properties.insert(&self.field::<String>(spec)),
                ValueKind::Number => properties.insert(&self.field::<u32>(spec)),
                ValueKind::Flag => properties.insert(&self.field::<bool>(spec)),
            }
        }
        properties
    }

    pub fn clears(&self, specs: &[PropertySpec]) -> Clears {
        let mut clears = Clears::new();
        for spec in specs.iter().filter(|s| s.clearable) {
            clears.insert(&UnsetField::new(
                spec.property,
                self.switch(spec.property.flag()),
            ));
        }
        clears
    }
}
