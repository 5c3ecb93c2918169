// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The remote inventory contract and its implementations.
//!
//! `HttpInventory` talks to a running `stackd`. `MemoryInventory` is the store `stackd` serves,
//! and can be used in-process directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    api::{DeleteRequest, Identity, Item, ListRequest, Scope, UpdateRequest},
    document::Document,
};

pub mod client;
pub mod memory;

pub use client::HttpInventory;
pub use memory::MemoryInventory;

/// The operations the controllers need from an inventory service.
pub trait Inventory {
    fn create(&self, identity: &Identity) -> Result<(), ServiceError>;

    fn update(&self, request: &UpdateRequest) -> Result<(), ServiceError>;

    /// Items are produced incrementally. The stream ends after the first error.
    fn list(&self, request: &ListRequest) -> Result<ListStream, ServiceError>;

    /// Deleting a glob that matches nothing succeeds.
    fn delete(&self, request: &DeleteRequest) -> Result<(), ServiceError>;

    fn read_schema(&self, scope: &Scope) -> Result<Document, ServiceError>;

    fn create_schema(&self, document: &Document) -> Result<(), ServiceError>;
}

impl<T: Inventory + ?Sized> Inventory for &T {
    fn create(&self, identity: &Identity) -> Result<(), ServiceError> {
        (**self).create(identity)
    }

    fn update(&self, request: &UpdateRequest) -> Result<(), ServiceError> {
        (**self).update(request)
    }

    fn list(&self, request: &ListRequest) -> Result<ListStream, ServiceError> {
        (**self).list(request)
    }

    fn delete(&self, request: &DeleteRequest) -> Result<(), ServiceError> {
        (**self).delete(request)
    }

    fn read_schema(&self, scope: &Scope) -> Result<Document, ServiceError> {
        (**self).read_schema(scope)
    }

    fn create_schema(&self, document: &Document) -> Result<(), ServiceError> {
        (**self).create_schema(document)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    NotFound,
    AlreadyExists,
    InvalidArgument,
    FailedPrecondition,
    Unavailable,
    Internal,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Code::NotFound => "not found",
                Code::AlreadyExists => "already exists",
                Code::InvalidArgument => "invalid argument",
                Code::FailedPrecondition => "failed precondition",
                Code::Unavailable => "unavailable",
                Code::Internal => "internal error",
            }
        )
    }
}

/// An error reported by (or while reaching) the inventory service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub code: Code,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(Code::AlreadyExists, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(Code::FailedPrecondition, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(Code::Unavailable, message)
    }
}

/// One line of a streamed list reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    Item(Item),
    Error(ServiceError),
}

/// A lazily produced sequence of list results.
///
/// Once an error has been yielded the stream is finished; no further reads are attempted.
pub struct ListStream {
    inner: Box<dyn Iterator<Item = Result<Item, ServiceError>>>,
    done: bool,
}

impl ListStream {
    pub fn new(inner: impl Iterator<Item = Result<Item, ServiceError>> + 'static) -> Self {
        ListStream {
            inner: Box::new(inner),
            done: false,
        }
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self::new(items.into_iter().map(Ok))
    }
}

impl Iterator for ListStream {
    type Item = Result<Item, ServiceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.inner.next();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

impl fmt::Debug for ListStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListStream")
            .field("done", &self.done)
            .finish()
    }
}
