// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::{
    api::{DeleteRequest, ListRequest, Resource, Scope, ScopeField},
    error::{Error, Result},
};

/// A glob together with the hierarchical scope it applies to.
///
/// Matching is done by the inventory service; the selector only carries scope and glob to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub scope: Scope,
    pub glob: String,
}

impl Selector {
    pub fn new(scope: Scope, glob: &str) -> Self {
        Selector {
            scope,
            glob: glob.to_string(),
        }
    }

    pub fn matches_all(&self) -> bool {
        self.glob.is_empty()
    }

    /// Fail fast if any of `fields` is absent from the scope.
    pub fn require(&self, fields: &[ScopeField], resource: Resource) -> Result<()> {
        require_scope(&self.scope, fields, resource)
    }

    /// Build a list request; an empty glob lists everything within scope.
    pub fn list(&self, resource: Resource, glob_requires: Option<ScopeField>) -> Result<ListRequest> {
        if let Some(field) = glob_requires {
            if !self.matches_all() && self.scope.get(field).is_none() {
                return Err(Error::GlobRequiresScope(field));
            }
        }

        Ok(ListRequest {
            resource,
            scope: self.scope.clone(),
            glob: self.glob.clone(),
        })
    }

    /// Build a delete request. Unlike list, a glob is mandatory.
    pub fn delete(&self, resource: Resource) -> Result<DeleteRequest> {
        if self.matches_all() {
            return Err(Error::MissingGlob(resource));
        }

        Ok(DeleteRequest {
            resource,
            scope: self.scope.clone(),
            glob: self.glob.clone(),
        })
    }
}

pub fn require_scope(scope: &Scope, fields: &[ScopeField], resource: Resource) -> Result<()> {
    match fields.iter().find(|f| scope.get(**f).is_none()) {
        Some(field) => Err(Error::MissingScope {
            field: *field,
            resource,
        }),
        None => Ok(()),
    }
}
