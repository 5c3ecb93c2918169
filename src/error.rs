// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::{
    api::{Property, Resource, ScopeField},
    inventory::ServiceError,
};

/// Errors raised by the controllers.
///
/// Validation variants are always produced before any request is sent to the inventory service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{field} must be specified for {resource}")]
    MissingScope {
        field: ScopeField,
        resource: Resource,
    },

    #[error("{0} must be specified when using glob pattern")]
    GlobRequiresScope(ScopeField),

    #[error("a glob pattern is required to remove {0}s")]
    MissingGlob(Resource),

    #[error("{0}/{1} must be set together")]
    Unpaired(Property, Property),

    #[error("invalid host type {0:?}: must be one of metal, virtual, container")]
    InvalidHostType(String),

    #[error("unknown document format for {0:?}: expected .json, .yaml or .yml")]
    UnknownFormat(String),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("could not read config file {path:?}: {reason}")]
    Config { path: String, reason: String },

    /// A remote call failed. `step` names the operation that was attempted.
    #[error("{step}: {source}")]
    Remote {
        step: String,
        #[source]
        source: ServiceError,
    },

    /// The create half of an add succeeded but the update half did not. The entity exists with
    /// default properties; re-running `set` is the way to finish configuring it.
    #[error("{resource} {name:?} was created but setting its properties failed: {source}")]
    PartialAdd {
        resource: Resource,
        name: String,
        #[source]
        source: ServiceError,
    },

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn remote(step: impl Into<String>) -> impl FnOnce(ServiceError) -> Error {
        let step = step.into();
        move |source| Error::Remote { step, source }
    }

    /// True when the error was raised locally, before contacting the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingScope { .. }
                | Error::GlobRequiresScope(_)
                | Error::MissingGlob(_)
                | Error::Unpaired(..)
                | Error::InvalidHostType(_)
                | Error::UnknownFormat(_)
                | Error::MalformedDocument(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
