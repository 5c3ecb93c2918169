// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use log::debug;

use crate::{
    api::{HostType, Identity, Kind, Property, Resource, Scope, Value},
    error::{Error, Result},
    field::{Clears, Properties},
    inventory::{Inventory, ListStream},
    kind::KindSpec,
    request::RequestBuilder,
    selector::{require_scope, Selector},
};

/// Add/Set/Unset/List/Remove for one entity kind, driven by the kind's metadata.
pub struct ResourceController<'a, S: Inventory + ?Sized> {
    service: &'a S,
    kind: Kind,
    scope: Scope,
}

impl<'a, S: Inventory + ?Sized> ResourceController<'a, S> {
    pub fn new(service: &'a S, kind: Kind, scope: Scope) -> Self {
        ResourceController {
            service,
            kind,
            scope,
        }
    }

    fn spec(&self) -> &'static KindSpec {
        self.kind.spec()
    }

    fn resource(&self) -> Resource {
        Resource::Entity(self.kind)
    }

    fn builder(&self, name: &str) -> Result<RequestBuilder> {
        let spec = self.spec();
        require_scope(&self.scope, spec.parents, self.resource())?;

        Ok(RequestBuilder::new(Identity {
            resource: self.resource(),
            scope: self.scope.restrict(&spec.scope_fields()),
            name: name.to_string(),
        }))
    }

    /// Cross-field checks on the set-fields of one invocation.
    pub fn validate(&self, properties: &Properties) -> Result<()> {
        for (a, b) in self.spec().paired {
            if properties.is_provided(*a) != properties.is_provided(*b) {
                return Err(Error::Unpaired(*a, *b));
            }
        }

        if let Some(value) = properties.get(Property::Type) {
            let valid = match value {
                Value::Text(t) => t.parse::<HostType>().is_ok(),
                _ => false,
            };
            if !valid {
                return Err(Error::InvalidHostType(value.to_string()));
            }
        }

        Ok(())
    }

    /// Create `name`, then apply `properties` to it.
    ///
    /// If the update fails the entity is left in place with default properties and the failure
    /// is returned as `Error::PartialAdd`.
    pub fn add(&self, name: &str, properties: &Properties) -> Result<()> {
        let builder = self.builder(name)?;
        self.validate(properties)?;
        let request = builder.assign(properties);

        debug!("create {}", builder.identity());
        self.service
            .create(builder.identity())
            .map_err(Error::remote(format!("create {}", builder.identity())))?;

        debug!("update {} {:?}", builder.identity(), request.set);
        self.service
            .update(&request)
            .map_err(|source| Error::PartialAdd {
                resource: self.resource(),
                name: name.to_string(),
                source,
            })
    }

    pub fn set(&self, name: &str, properties: &Properties) -> Result<()> {
        let builder = self.builder(name)?;
        self.validate(properties)?;
        let request = builder.assign(properties);

        debug!("update {} {:?}", builder.identity(), request.set);
        self.service
            .update(&request)
            .map_err(Error::remote(format!("update {}", builder.identity())))
    }

    /// Clear properties. Clearing one half of a pair clears both.
    pub fn unset(&self, name: &str, clears: &Clears) -> Result<()> {
        let builder = self.builder(name)?;
        let mut clears = clears.clone();
        for (a, b) in self.spec().paired {
            clears.join(*a, *b);
        }
        let request = builder.clear(&clears);

        debug!("unset {} {:?}", builder.identity(), request.unset);
        self.service
            .update(&request)
            .map_err(Error::remote(format!("unset {}", builder.identity())))
    }

    pub fn list(&self, glob: &str) -> Result<ListStream> {
        let spec = self.spec();
        let selector = Selector::new(self.scope.restrict(&spec.scope_fields()), glob);
        let request = selector.list(self.resource(), spec.glob_requires)?;

        debug!("list {} {:?}", self.kind, request.glob);
        self.service
            .list(&request)
            .map_err(Error::remote(format!("list {}", self.kind)))
    }

    /// Remove every instance matching `glob` within scope. Matching nothing is not an error.
    pub fn remove(&self, glob: &str) -> Result<()> {
        let spec = self.spec();
        let selector = Selector::new(self.scope.restrict(&spec.scope_fields()), glob);
        selector.require(spec.parents, self.resource())?;
        let request = selector.delete(self.resource())?;

        debug!("delete {} {:?}", self.kind, request.glob);
        self.service
            .delete(&request)
            .map_err(Error::remote(format!("remove {}", self.kind)))
    }
}
