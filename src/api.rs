// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Wire types shared by the CLI and the inventory service.
//!
//! Requests carry only identity plus the fields an operator explicitly provided. A property that
//! does not appear in `UpdateRequest::set` or `UpdateRequest::unset` is left untouched by the
//! service.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The entity kinds managed by the inventory.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Zone,
    Cluster,
    Rack,
    Host,
    Model,
    Appliance,
    Environment,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::Zone,
        Kind::Cluster,
        Kind::Rack,
        Kind::Appliance,
        Kind::Environment,
        Kind::Model,
        Kind::Host,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Zone => "zone",
            Kind::Cluster => "cluster",
            Kind::Rack => "rack",
            Kind::Host => "host",
            Kind::Model => "model",
            Kind::Appliance => "appliance",
            Kind::Environment => "environment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a request addresses: an entity of some kind, or the attributes of an entity kind.
/// `Attr(None)` addresses the parentless global attributes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Entity(Kind),
    Attr(Option<Kind>),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Entity(kind) => write!(f, "{kind}"),
            Resource::Attr(Some(kind)) => write!(f, "{kind} attr"),
            Resource::Attr(None) => write!(f, "global attr"),
        }
    }
}

/// One component of the hierarchical context that scopes a selection or names a parent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ScopeField {
    Zone,
    Cluster,
    Rack,
    Appliance,
    Environment,
    Host,
    Make,
    Model,
}

impl ScopeField {
    pub fn flag(self) -> &'static str {
        match self {
            ScopeField::Zone => "zone",
            ScopeField::Cluster => "cluster",
            ScopeField::Rack => "rack",
            ScopeField::Appliance => "appliance",
            ScopeField::Environment => "environment",
            ScopeField::Host => "host",
            ScopeField::Make => "make",
            ScopeField::Model => "model",
        }
    }
}

impl fmt::Display for ScopeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Scope {
    pub fn get(&self, field: ScopeField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: ScopeField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    pub fn with(mut self, field: ScopeField, value: &str) -> Self {
        self.set(field, Some(value.to_string()));
        self
    }

    /// Returns a copy holding only the given fields.
    pub fn restrict(&self, fields: &[ScopeField]) -> Scope {
        let mut scope = Scope::default();
        for field in fields {
            scope.set(*field, self.slot(*field).clone());
        }
        scope
    }

    fn slot(&self, field: ScopeField) -> &Option<String> {
        match field {
            ScopeField::Zone => &self.zone,
            ScopeField::Cluster => &self.cluster,
            ScopeField::Rack => &self.rack,
            ScopeField::Appliance => &self.appliance,
            ScopeField::Environment => &self.environment,
            ScopeField::Host => &self.host,
            ScopeField::Make => &self.make,
            ScopeField::Model => &self.model,
        }
    }

    fn slot_mut(&mut self, field: ScopeField) -> &mut Option<String> {
        match field {
            ScopeField::Zone => &mut self.zone,
            ScopeField::Cluster => &mut self.cluster,
            ScopeField::Rack => &mut self.rack,
            ScopeField::Appliance => &mut self.appliance,
            ScopeField::Environment => &mut self.environment,
            ScopeField::Host => &mut self.host,
            ScopeField::Make => &mut self.make,
            ScopeField::Model => &mut self.model,
        }
    }
}

/// A mutable property of an entity or attribute. `Name` in an update means "rename to".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Name,
    TimeZone,
    Arch,
    Make,
    Model,
    Environment,
    Appliance,
    Location,
    Rack,
    Rank,
    Slot,
    Type,
    Value,
    Protected,
}

impl Property {
    /// The command line flag registered for this property.
    pub fn flag(self) -> &'static str {
        match self {
            Property::Name => "name",
            Property::TimeZone => "timezone",
            Property::Arch => "arch",
            Property::Make => "make",
            Property::Model => "model",
            Property::Environment => "environment",
            Property::Appliance => "appliance",
            Property::Location => "location",
            Property::Rack => "rack",
            Property::Rank => "rank",
            Property::Slot => "slot",
            Property::Type => "type",
            Property::Value => "value",
            Property::Protected => "protected",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(u32),
    Flag(bool),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HostType {
    Metal,
    Virtual,
    Container,
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HostType::Metal => "metal",
                HostType::Virtual => "virtual",
                HostType::Container => "container",
            }
        )
    }
}

impl FromStr for HostType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "metal" => HostType::Metal,
            "virtual" => HostType::Virtual,
            "container" => HostType::Container,
            _ => return Err(()),
        })
    }
}

/// Names exactly one entity or attribute: the resource, the scope that locates its parent, and
/// its name (or attribute key).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub resource: Resource,
    #[serde(default)]
    pub scope: Scope,
    pub name: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.resource, self.name)
    }
}

/// A sparse update. Only the properties present in `set` or `unset` are changed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub identity: Identity,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<Property, Value>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unset: BTreeSet<Property>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub resource: Resource,
    #[serde(default)]
    pub scope: Scope,
    /// Shell-style pattern over names; empty matches everything in scope.
    #[serde(default)]
    pub glob: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub resource: Resource,
    #[serde(default)]
    pub scope: Scope,
    pub glob: String,
}

/// One entity or attribute as returned by a list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub resource: Resource,
    #[serde(default)]
    pub scope: Scope,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<Property, Value>,
}

impl Item {
    pub fn property(&self, property: Property) -> Option<&Value> {
        self.properties.get(&property)
    }
}
