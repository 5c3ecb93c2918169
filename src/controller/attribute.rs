// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use log::debug;

use crate::{
    api::{Identity, Kind, Property, Resource, Scope, ScopeField},
    error::{Error, Result},
    field::{Field, Properties},
    inventory::{Inventory, ListStream},
    request::RequestBuilder,
    selector::{require_scope, Selector},
};

/// Key/value attributes of one parent kind, or the global attributes when `parent` is `None`.
///
/// The identity of an attribute is the parent's identity plus the attribute key.
pub struct AttributeController<'a, S: Inventory + ?Sized> {
    service: &'a S,
    parent: Option<Kind>,
    scope: Scope,
}

impl<'a, S: Inventory + ?Sized> AttributeController<'a, S> {
    pub fn new(service: &'a S, parent: Option<Kind>, scope: Scope) -> Self {
        AttributeController {
            service,
            parent,
            scope,
        }
    }

    fn resource(&self) -> Resource {
        Resource::Attr(self.parent)
    }

    /// Scope fields that name exactly one parent.
    fn parent_fields(&self) -> Vec<ScopeField> {
        self.parent
            .map(|k| k.spec().attr_parents())
            .unwrap_or_default()
    }

    fn scoped(&self) -> Scope {
        let fields = self
            .parent
            .map(|k| k.spec().attr_scope_fields())
            .unwrap_or_default();
        self.scope.restrict(&fields)
    }

    fn builder(&self, key: &str) -> Result<RequestBuilder> {
        require_scope(&self.scope, &self.parent_fields(), self.resource())?;

        Ok(RequestBuilder::new(Identity {
            resource: self.resource(),
            scope: self.scoped(),
            name: key.to_string(),
        }))
    }

    pub fn add(&self, key: &str, value: &str, protected: bool) -> Result<()> {
        let builder = self.builder(key)?;
        let properties = Properties::new()
            .with(Field::given(Property::Value, value.to_string()))
            .with(Field::given(Property::Protected, protected));
        let request = builder.assign(&properties);

        debug!("create {}", builder.identity());
        self.service
            .create(builder.identity())
            .map_err(Error::remote(format!("create {}", builder.identity())))?;

        self.service
            .update(&request)
            .map_err(|source| Error::PartialAdd {
                resource: self.resource(),
                name: key.to_string(),
                source,
            })
    }

    /// Change the value, the key (`Property::Name`), the protected flag, or any combination.
    pub fn set(&self, key: &str, properties: &Properties) -> Result<()> {
        let builder = self.builder(key)?;
        let request = builder.assign(properties);

        debug!("update {} {:?}", builder.identity(), request.set);
        self.service
            .update(&request)
            .map_err(Error::remote(format!("update {}", builder.identity())))
    }

    /// List attributes. Without the parent's own scope field every parent in scope is listed.
    pub fn list(&self, glob: &str) -> Result<ListStream> {
        if let Some(kind) = self.parent {
            require_scope(&self.scope, kind.spec().parents, self.resource())?;
        }
        let request = Selector::new(self.scoped(), glob).list(self.resource(), None)?;

        self.service
            .list(&request)
            .map_err(Error::remote(format!("list {}s", self.resource())))
    }

    pub fn remove(&self, glob: &str) -> Result<()> {
        let selector = Selector::new(self.scoped(), glob);
        selector.require(&self.parent_fields(), self.resource())?;
        let request = selector.delete(self.resource())?;

        debug!("delete {} {:?}", self.resource(), request.glob);
        self.service
            .delete(&request)
            .map_err(Error::remote(format!("remove {}s", self.resource())))
    }
}
