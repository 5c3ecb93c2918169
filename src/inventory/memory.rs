// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! An in-memory inventory store.
//!
//! Every mutation is applied to a copy of the store, which replaces the original only if the
//! whole operation succeeded, so a failed request never leaves a partial change behind.

use std::{collections::BTreeMap, sync::Mutex};

use log::debug;

use crate::{
    api::{
        DeleteRequest, HostType, Identity, Item, Kind, ListRequest, Property, Resource, Scope,
        ScopeField, UpdateRequest, Value,
    },
    document::{self, Document},
    kind::{PropertySpec, ValueKind, ATTR_PROPERTIES},
};

use super::{Inventory, ListStream, ServiceError};

/// Entities are keyed by kind, the values of the kind's required scope fields, and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Key {
    kind: Kind,
    path: Vec<String>,
    name: String,
}

impl Key {
    fn new(kind: Kind, scope: &Scope, name: &str) -> Result<Self, ServiceError> {
        let path = kind
            .spec()
            .parents
            .iter()
            .map(|f| required(scope, *f).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Key {
            kind,
            path,
            name: name.to_string(),
        })
    }

    /// The key of the `kind` instance that `scope` names, i.e. the parent of an attribute.
    fn parent(kind: Kind, scope: &Scope) -> Result<Self, ServiceError> {
        Self::new(kind, scope, required(scope, kind.spec().field)?)
    }

    fn zone(&self) -> Option<&str> {
        match self.kind.spec().parents.first() {
            Some(ScopeField::Zone) => self.path.first().map(String::as_str),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self.zone() {
            Some(zone) => format!("{} {:?} in zone {zone:?}", self.kind, self.name),
            None if self.kind == Kind::Model => {
                format!("model {:?} of make {:?}", self.name, self.path[0])
            }
            None => format!("{} {:?}", self.kind, self.name),
        }
    }
}

fn required(scope: &Scope, field: ScopeField) -> Result<&str, ServiceError> {
    scope
        .get(field)
        .ok_or_else(|| ServiceError::invalid(format!("{field} is required")))
}

#[derive(Debug, Clone, Default)]
struct Entry {
    scope: Scope,
    properties: BTreeMap<Property, Value>,
    attrs: BTreeMap<String, Attr>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Attr {
    value: String,
    protected: bool,
}

impl Attr {
    fn properties(&self) -> BTreeMap<Property, Value> {
        let mut properties = BTreeMap::from([(Property::Value, Value::Text(self.value.clone()))]);
        if self.protected {
            properties.insert(Property::Protected, Value::Flag(true));
        }
        properties
    }

    fn to_document(key: &str, attr: &Attr) -> document::Attribute {
        document::Attribute {
            key: key.to_string(),
            value: attr.value.clone(),
            protected: attr.protected,
        }
    }
}

fn check_value(spec: &PropertySpec, value: &Value) -> Result<(), ServiceError> {
    let ok = matches!(
        (spec.value, value),
        (ValueKind::Text, Value::Text(_))
            | (ValueKind::Number, Value::Number(_))
            | (ValueKind::Flag, Value::Flag(_))
    );
    if ok {
        Ok(())
    } else {
        Err(ServiceError::invalid(format!(
            "wrong value type for {}: {value:?}",
            spec.property
        )))
    }
}

fn compile(glob: &str) -> Result<Option<glob::Pattern>, ServiceError> {
    if glob.is_empty() {
        return Ok(None);
    }
    glob::Pattern::new(glob)
        .map(Some)
        .map_err(|e| ServiceError::invalid(format!("bad glob {glob:?}: {e}")))
}

fn matches(pattern: &Option<glob::Pattern>, name: &str) -> bool {
    pattern.as_ref().map_or(true, |p| p.matches(name))
}

/// Whether every field of `wanted` that is set agrees with `have`.
fn in_scope(have: &Scope, wanted: &Scope, fields: &[ScopeField]) -> bool {
    fields
        .iter()
        .all(|f| wanted.get(*f).map_or(true, |v| have.get(*f) == Some(v)))
}

#[derive(Debug, Clone, Default)]
struct Store {
    entities: BTreeMap<Key, Entry>,
    globals: BTreeMap<String, Attr>,
}

impl Store {
    fn entry_mut(&mut self, key: &Key, scope: &Scope) -> Result<&mut Entry, ServiceError> {
        let fields = key.kind.spec().optional_parents;
        match self.entities.get_mut(key) {
            Some(entry) if in_scope(&entry.scope, scope, fields) => Ok(entry),
            _ => Err(ServiceError::not_found(format!("{} not found", key.describe()))),
        }
    }

    fn attrs_mut(
        &mut self,
        parent: Option<Kind>,
        scope: &Scope,
    ) -> Result<&mut BTreeMap<String, Attr>, ServiceError> {
        match parent {
            None => Ok(&mut self.globals),
            Some(kind) => {
                let key = Key::parent(kind, scope)?;
                Ok(&mut self.entry_mut(&key, scope)?.attrs)
            }
        }
    }

    /// Every entity named by a scope field of `kind` must already exist.
    fn check_parents(&self, kind: Kind, scope: &Scope) -> Result<(), ServiceError> {
        for field in kind.spec().scope_fields() {
            let (Some(parent), Some(name)) = (Kind::from_field(field), scope.get(field)) else {
                continue;
            };
            let key = Key::new(parent, scope, name)?;
            if !self.entities.contains_key(&key) {
                return Err(ServiceError::not_found(format!("{} not found", key.describe())));
            }
        }
        Ok(())
    }

    fn create(&mut self, identity: &Identity) -> Result<(), ServiceError> {
        if identity.name.is_empty() {
            return Err(ServiceError::invalid("name must not be empty"));
        }

        match identity.resource {
            Resource::Entity(kind) => {
                let key = Key::new(kind, &identity.scope, &identity.name)?;
                self.check_parents(kind, &identity.scope)?;
                if self.entities.contains_key(&key) {
                    return Err(ServiceError::already_exists(format!(
                        "{} already exists",
                        key.describe()
                    )));
                }
                let entry = Entry {
                    scope: identity.scope.restrict(&kind.spec().scope_fields()),
                    ..Default::default()
                };
                self.entities.insert(key, entry);
            }
            Resource::Attr(parent) => {
                let attrs = self.attrs_mut(parent, &identity.scope)?;
                if attrs.contains_key(&identity.name) {
                    return Err(ServiceError::already_exists(format!(
                        "attribute {:?} already exists",
                        identity.name
                    )));
                }
                attrs.insert(identity.name.clone(), Attr::default());
            }
        }
        Ok(())
    }

    fn update(&mut self, request: &UpdateRequest) -> Result<(), ServiceError> {
        let identity = &request.identity;
        match identity.resource {
            Resource::Entity(kind) => {
                let spec = kind.spec();
                let key = Key::new(kind, &identity.scope, &identity.name)?;
                let entry = self.entry_mut(&key, &identity.scope)?;

                for property in &request.unset {
                    match spec.property(*property) {
                        Some(p) if p.clearable => {
                            entry.properties.remove(property);
                        }
                        _ => {
                            return Err(ServiceError::invalid(format!(
                                "{kind} property {property} cannot be unset"
                            )))
                        }
                    }
                }
                for (property, value) in &request.set {
                    let Some(p) = spec.property(*property) else {
                        return Err(ServiceError::invalid(format!(
                            "{kind} has no property {property}"
                        )));
                    };
                    check_value(p, value)?;
                    if *property != Property::Name {
                        entry.properties.insert(*property, value.clone());
                    }
                }

                if kind == Kind::Host {
                    self.check_host(&key)?;
                }
                if let Some(Value::Text(name)) = request.set.get(&Property::Name) {
                    self.rename(&key, name)?;
                }
            }
            Resource::Attr(parent) => {
                let attrs = self.attrs_mut(parent, &identity.scope)?;
                let Some(attr) = attrs.get_mut(&identity.name) else {
                    return Err(ServiceError::not_found(format!(
                        "attribute {:?} not found",
                        identity.name
                    )));
                };

                for property in &request.unset {
                    match property {
                        Property::Value => attr.value.clear(),
                        Property::Protected => attr.protected = false,
                        _ => {
                            return Err(ServiceError::invalid(format!(
                                "attribute property {property} cannot be unset"
                            )))
                        }
                    }
                }
                for (property, value) in &request.set {
                    let Some(p) = ATTR_PROPERTIES.iter().find(|p| p.property == *property) else {
                        return Err(ServiceError::invalid(format!(
                            "attributes have no property {property}"
                        )));
                    };
                    check_value(p, value)?;
                    match value {
                        Value::Text(v) if *property == Property::Value => attr.value = v.clone(),
                        Value::Flag(b) => attr.protected = *b,
                        _ => {}
                    }
                }

                if let Some(Value::Text(name)) = request.set.get(&Property::Name) {
                    if name.is_empty() {
                        return Err(ServiceError::invalid("name must not be empty"));
                    }
                    if *name != identity.name {
                        if attrs.contains_key(name) {
                            return Err(ServiceError::already_exists(format!(
                                "attribute {name:?} already exists"
                            )));
                        }
                        if let Some(attr) = attrs.remove(&identity.name) {
                            attrs.insert(name.clone(), attr);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// A host may only reference entities that exist, and make/model only as a pair.
    fn check_host(&self, key: &Key) -> Result<(), ServiceError> {
        let Some(entry) = self.entities.get(key) else {
            return Ok(());
        };
        let zone = key.path[0].clone();

        for (property, kind) in [
            (Property::Appliance, Kind::Appliance),
            (Property::Environment, Kind::Environment),
            (Property::Rack, Kind::Rack),
        ] {
            if let Some(value) = entry.properties.get(&property) {
                let target = Key {
                    kind,
                    path: vec![zone.clone()],
                    name: value.to_string(),
                };
                if !self.entities.contains_key(&target) {
                    return Err(ServiceError::not_found(format!(
                        "{} not found",
                        target.describe()
                    )));
                }
            }
        }

        match (
            entry.properties.get(&Property::Make),
            entry.properties.get(&Property::Model),
        ) {
            (Some(make), Some(model)) => {
                let target = Key {
                    kind: Kind::Model,
                    path: vec![make.to_string()],
                    name: model.to_string(),
                };
                if !self.entities.contains_key(&target) {
                    return Err(ServiceError::not_found(format!(
                        "{} not found",
                        target.describe()
                    )));
                }
            }
            (None, None) => {}
            _ => return Err(ServiceError::invalid("make and model must be set together")),
        }

        if let Some(value) = entry.properties.get(&Property::Type) {
            if value.as_text().and_then(|t| t.parse::<HostType>().ok()).is_none() {
                return Err(ServiceError::invalid(format!("invalid host type {value}")));
            }
        }
        Ok(())
    }

    fn rename(&mut self, key: &Key, name: &str) -> Result<(), ServiceError> {
        if name.is_empty() {
            return Err(ServiceError::invalid("name must not be empty"));
        }
        if name == key.name {
            return Ok(());
        }
        let new_key = Key {
            name: name.to_string(),
            ..key.clone()
        };
        if self.entities.contains_key(&new_key) {
            return Err(ServiceError::already_exists(format!(
                "{} already exists",
                new_key.describe()
            )));
        }
        if let Some(entry) = self.entities.remove(key) {
            self.entities.insert(new_key, entry);
        }

        match key.kind {
            Kind::Zone => {
                let moved: Vec<Key> = self
                    .entities
                    .keys()
                    .filter(|k| k.zone() == Some(key.name.as_str()))
                    .cloned()
                    .collect();
                for old in moved {
                    if let Some(mut entry) = self.entities.remove(&old) {
                        entry.scope.zone = Some(name.to_string());
                        let mut path = old.path.clone();
                        path[0] = name.to_string();
                        self.entities.insert(Key { path, ..old }, entry);
                    }
                }
            }
            Kind::Cluster => {
                for (k, entry) in self.entities.iter_mut() {
                    if k.kind == Kind::Host
                        && k.path == key.path
                        && entry.scope.cluster.as_deref() == Some(key.name.as_str())
                    {
                        entry.scope.cluster = Some(name.to_string());
                    }
                }
            }
            Kind::Appliance => {
                self.retarget(&key.path[0], Property::Appliance, &key.name, Some(name))
            }
            Kind::Environment => {
                self.retarget(&key.path[0], Property::Environment, &key.name, Some(name))
            }
            Kind::Rack => self.retarget(&key.path[0], Property::Rack, &key.name, Some(name)),
            Kind::Model => self.retarget_model(&key.path[0], &key.name, Some(name)),
            Kind::Host => {}
        }
        Ok(())
    }

    /// Point hosts in `zone` whose `property` is `old` at `new`, or drop the reference.
    fn retarget(&mut self, zone: &str, property: Property, old: &str, new: Option<&str>) {
        for (k, entry) in self.entities.iter_mut() {
            if k.kind != Kind::Host || k.zone() != Some(zone) {
                continue;
            }
            if entry.properties.get(&property).and_then(Value::as_text) == Some(old) {
                match new {
                    Some(new) => entry.properties.insert(property, Value::from(new)),
                    None => entry.properties.remove(&property),
                };
            }
        }
    }

    fn retarget_model(&mut self, make: &str, old: &str, new: Option<&str>) {
        for (k, entry) in self.entities.iter_mut() {
            if k.kind != Kind::Host {
                continue;
            }
            let props = &mut entry.properties;
            let same_make = props.get(&Property::Make).and_then(Value::as_text) == Some(make);
            let same_model = props.get(&Property::Model).and_then(Value::as_text) == Some(old);
            if same_make && same_model {
                match new {
                    Some(new) => {
                        props.insert(Property::Model, Value::from(new));
                    }
                    None => {
                        props.remove(&Property::Make);
                        props.remove(&Property::Model);
                    }
                }
            }
        }
    }

    fn remove_entity(&mut self, key: &Key) {
        if self.entities.remove(key).is_none() {
            return;
        }
        match key.kind {
            Kind::Zone => self.entities.retain(|k, _| k.zone() != Some(key.name.as_str())),
            Kind::Cluster => self.entities.retain(|k, entry| {
                !(k.kind == Kind::Host
                    && k.path == key.path
                    && entry.scope.cluster.as_deref() == Some(key.name.as_str()))
            }),
            Kind::Appliance => {
                self.retarget(&key.path[0], Property::Appliance, &key.name, None)
            }
            Kind::Environment => {
                self.retarget(&key.path[0], Property::Environment, &key.name, None)
            }
            Kind::Rack => self.retarget(&key.path[0], Property::Rack, &key.name, None),
            Kind::Model => self.retarget_model(&key.path[0], &key.name, None),
            Kind::Host => {}
        }
    }

    fn list(&self, request: &ListRequest) -> Result<Vec<Item>, ServiceError> {
        let pattern = compile(&request.glob)?;
        let pattern = &pattern;

        let items = match request.resource {
            Resource::Entity(kind) => {
                let fields = kind.spec().scope_fields();
                self.entities
                    .iter()
                    .filter(|(k, e)| {
                        k.kind == kind
                            && in_scope(&e.scope, &request.scope, &fields)
                            && matches(pattern, &k.name)
                    })
                    .map(|(k, e)| Item {
                        resource: request.resource,
                        scope: e.scope.clone(),
                        name: k.name.clone(),
                        properties: e.properties.clone(),
                    })
                    .collect()
            }
            Resource::Attr(None) => self
                .globals
                .iter()
                .filter(|(name, _)| matches(pattern, name))
                .map(|(name, attr)| Item {
                    resource: request.resource,
                    scope: Scope::default(),
                    name: name.clone(),
                    properties: attr.properties(),
                })
                .collect(),
            Resource::Attr(Some(kind)) => self
                .parents(kind, &request.scope)
                .flat_map(|(scope, entry)| {
                    entry
                        .attrs
                        .iter()
                        .filter(move |(name, _)| matches(pattern, name))
                        .map(move |(name, attr)| Item {
                            resource: request.resource,
                            scope: scope.clone(),
                            name: name.clone(),
                            properties: attr.properties(),
                        })
                })
                .collect(),
        };

        Ok(items)
    }

    /// Instances of `kind` selected by `scope`, each with its full scope (including itself).
    fn parents<'a>(
        &'a self,
        kind: Kind,
        scope: &'a Scope,
    ) -> impl Iterator<Item = (Scope, &'a Entry)> + 'a {
        let spec = kind.spec();
        let fields = spec.scope_fields();
        self.entities
            .iter()
            .filter(move |(k, e)| {
                k.kind == kind
                    && in_scope(&e.scope, scope, &fields)
                    && scope.get(spec.field).map_or(true, |n| n == k.name)
            })
            .map(move |(k, e)| (e.scope.clone().with(spec.field, &k.name), e))
    }

    fn delete(&mut self, request: &DeleteRequest) -> Result<(), ServiceError> {
        if request.glob.is_empty() {
            return Err(ServiceError::invalid("a glob is required"));
        }
        let pattern = compile(&request.glob)?;
        let pattern = &pattern;

        match request.resource {
            Resource::Entity(kind) => {
                let fields = kind.spec().scope_fields();
                let victims: Vec<Key> = self
                    .entities
                    .iter()
                    .filter(|(k, e)| {
                        k.kind == kind
                            && in_scope(&e.scope, &request.scope, &fields)
                            && matches(pattern, &k.name)
                    })
                    .map(|(k, _)| k.clone())
                    .collect();
                debug!("removing {} {kind}(s)", victims.len());
                for key in victims {
                    self.remove_entity(&key);
                }
            }
            Resource::Attr(parent) => {
                let parents: Vec<Key> = match parent {
                    None => vec![],
                    Some(kind) => self
                        .parents(kind, &request.scope)
                        .map(|(scope, _)| Key::parent(kind, &scope))
                        .collect::<Result<_, _>>()?,
                };
                let mut sets: Vec<&mut BTreeMap<String, Attr>> = match parent {
                    None => vec![&mut self.globals],
                    Some(_) => self
                        .entities
                        .iter_mut()
                        .filter(|(k, _)| parents.contains(k))
                        .map(|(_, e)| &mut e.attrs)
                        .collect(),
                };

                for attrs in sets.iter() {
                    if let Some((name, _)) = attrs
                        .iter()
                        .find(|(name, a)| a.protected && matches(pattern, name))
                    {
                        return Err(ServiceError::precondition(format!(
                            "attribute {name:?} is protected"
                        )));
                    }
                }
                for attrs in sets.iter_mut() {
                    attrs.retain(|name, _| !matches(pattern, name));
                }
            }
        }
        Ok(())
    }

    fn host_document(key: &Key, entry: &Entry) -> document::Host {
        let text = |p: Property| {
            entry
                .properties
                .get(&p)
                .and_then(Value::as_text)
                .map(str::to_string)
        };
        let number = |p: Property| match entry.properties.get(&p) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        };

        document::Host {
            name: key.name.clone(),
            attributes: entry
                .attrs
                .iter()
                .map(|(k, a)| Attr::to_document(k, a))
                .collect(),
            appliance: text(Property::Appliance),
            environment: text(Property::Environment),
            make: text(Property::Make),
            model: text(Property::Model),
            location: text(Property::Location),
            rack: text(Property::Rack),
            rank: number(Property::Rank),
            slot: number(Property::Slot),
            kind: text(Property::Type).and_then(|t| t.parse().ok()),
        }
    }

    fn named_documents(&self, kind: Kind, zone: &str) -> Vec<document::Named> {
        self.entities
            .iter()
            .filter(|(k, _)| k.kind == kind && k.zone() == Some(zone))
            .map(|(k, e)| document::Named {
                name: k.name.clone(),
                attributes: e
                    .attrs
                    .iter()
                    .map(|(k, a)| Attr::to_document(k, a))
                    .collect(),
            })
            .collect()
    }

    fn read_schema(&self, scope: &Scope) -> Document {
        let narrowed = scope.cluster.is_some() || scope.host.is_some();
        let mut document = Document::default();

        if scope.zone.is_none() && !narrowed {
            document.attributes = self
                .globals
                .iter()
                .map(|(k, a)| Attr::to_document(k, a))
                .collect();
            document.models = self
                .entities
                .iter()
                .filter(|(k, _)| k.kind == Kind::Model)
                .map(|(k, e)| document::Model {
                    make: k.path[0].clone(),
                    name: k.name.clone(),
                    arch: e
                        .properties
                        .get(&Property::Arch)
                        .map(|a| a.to_string()),
                    attributes: e
                        .attrs
                        .iter()
                        .map(|(k, a)| Attr::to_document(k, a))
                        .collect(),
                })
                .collect();
        }

        let wanted_host = |k: &Key| scope.host.as_deref().map_or(true, |h| h == k.name);
        let zones = self.entities.iter().filter(|(k, _)| {
            k.kind == Kind::Zone && scope.zone.as_deref().map_or(true, |z| z == k.name)
        });

        for (zone_key, zone_entry) in zones {
            let zone = zone_key.name.as_str();
            let hosts_in = |cluster: Option<&str>| -> Vec<document::Host> {
                self.entities
                    .iter()
                    .filter(|(k, e)| {
                        k.kind == Kind::Host
                            && k.zone() == Some(zone)
                            && e.scope.cluster.as_deref() == cluster
                            && wanted_host(*k)
                    })
                    .map(|(k, e)| Self::host_document(k, e))
                    .collect()
            };

            let clusters: Vec<document::Cluster> = self
                .entities
                .iter()
                .filter(|(k, _)| {
                    k.kind == Kind::Cluster
                        && k.zone() == Some(zone)
                        && scope.cluster.as_deref().map_or(true, |c| c == k.name)
                })
                .map(|(k, e)| document::Cluster {
                    name: k.name.clone(),
                    attributes: if narrowed {
                        vec![]
                    } else {
                        e.attrs
                            .iter()
                            .map(|(k, a)| Attr::to_document(k, a))
                            .collect()
                    },
                    hosts: hosts_in(Some(k.name.as_str())),
                })
                .filter(|c| scope.host.is_none() || !c.hosts.is_empty())
                .collect();

            let mut doc = document::Zone {
                name: zone.to_string(),
                clusters,
                hosts: if scope.cluster.is_none() {
                    hosts_in(None)
                } else {
                    vec![]
                },
                ..Default::default()
            };

            if narrowed {
                if doc.clusters.is_empty() && doc.hosts.is_empty() {
                    continue;
                }
            } else {
                doc.time_zone = zone_entry
                    .properties
                    .get(&Property::TimeZone)
                    .map(|t| t.to_string());
                doc.attributes = zone_entry
                    .attrs
                    .iter()
                    .map(|(k, a)| Attr::to_document(k, a))
                    .collect();
                doc.appliances = self.named_documents(Kind::Appliance, zone);
                doc.environments = self.named_documents(Kind::Environment, zone);
                doc.racks = self.named_documents(Kind::Rack, zone);
            }

            document.zones.push(doc);
        }

        document
    }
}

/// The inventory store served by `stackd`.
#[derive(Debug, Default)]
pub struct MemoryInventory {
    store: Mutex<Store>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` against a copy of the store and keep the copy only if `op` succeeded.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut Store) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| ServiceError::new(super::Code::Internal, "inventory lock poisoned"))?;
        let mut next = store.clone();
        let out = op(&mut next)?;
        *store = next;
        Ok(out)
    }

    fn read<T>(&self, op: impl FnOnce(&Store) -> T) -> Result<T, ServiceError> {
        let store = self
            .store
            .lock()
            .map_err(|_| ServiceError::new(super::Code::Internal, "inventory lock poisoned"))?;
        Ok(op(&store))
    }
}

impl Inventory for MemoryInventory {
    fn create(&self, identity: &Identity) -> Result<(), ServiceError> {
        debug!("create {identity}");
        self.transact(|store| store.create(identity))
    }

    fn update(&self, request: &UpdateRequest) -> Result<(), ServiceError> {
        debug!("update {}", request.identity);
        self.transact(|store| store.update(request))
    }

    fn list(&self, request: &ListRequest) -> Result<ListStream, ServiceError> {
        let items = self.read(|store| store.list(request))??;
        Ok(ListStream::from_items(items))
    }

    fn delete(&self, request: &DeleteRequest) -> Result<(), ServiceError> {
        debug!("delete {} {:?}", request.resource, request.glob);
        self.transact(|store| store.delete(request))
    }

    fn read_schema(&self, scope: &Scope) -> Result<Document, ServiceError> {
        self.read(|store| store.read_schema(scope))
    }

    fn create_schema(&self, document: &Document) -> Result<(), ServiceError> {
        self.transact(|store| {
            for step in document.steps() {
                let context = |e: ServiceError| {
                    ServiceError::new(e.code, format!("{}: {}", step.create, e.message))
                };
                store.create(&step.create).map_err(context)?;
                store.update(&step.update).map_err(context)?;
            }
            Ok(())
        })
    }
}
