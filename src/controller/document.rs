// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::path::Path;

use log::debug;

use crate::{
    api::{Scope, ScopeField},
    document::{self, Document, Format},
    error::{Error, Result},
    inventory::Inventory,
};

/// Whole-inventory dump and load.
pub struct DocumentController<'a, S: Inventory + ?Sized> {
    service: &'a S,
}

impl<'a, S: Inventory + ?Sized> DocumentController<'a, S> {
    pub fn new(service: &'a S) -> Self {
        DocumentController { service }
    }

    /// Read the inventory, narrowed by the zone, cluster and host in `scope`.
    pub fn dump(&self, scope: &Scope) -> Result<Document> {
        let scope = scope.restrict(&[ScopeField::Zone, ScopeField::Cluster, ScopeField::Host]);
        self.service
            .read_schema(&scope)
            .map_err(Error::remote("dump"))
    }

    /// Read a document from `path` and submit it in one request. The file is fully decoded
    /// before the service is contacted.
    pub fn load(&self, path: &Path) -> Result<()> {
        let format = Format::from_path(path)?;
        let data = std::fs::read(path)?;
        let doc = document::decode(format, &data)?;

        debug!(
            "loading {} models, {} zones from '{}'",
            doc.models.len(),
            doc.zones.len(),
            path.display()
        );
        self.service
            .create_schema(&doc)
            .map_err(Error::remote(format!("load {}", path.display())))
    }
}
