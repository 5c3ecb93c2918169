// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::{
    api::{Identity, UpdateRequest},
    field::{Clears, Properties},
};

/// Builds sparse update requests for one identity.
///
/// A property lands in the payload if and only if it was provided (for `assign`) or its clear was
/// requested (for `clear`). The two payload kinds come from separate methods so a single request
/// never carries both a set and an unset. Building is pure: the same inputs always produce the same
/// request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    identity: Identity,
}

impl RequestBuilder {
    pub fn new(identity: Identity) -> Self {
        RequestBuilder { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn assign(&self, properties: &Properties) -> UpdateRequest {
        UpdateRequest {
            identity: self.identity.clone(),
            set: properties
                .provided()
                .map(|(p, v)| (p, v.clone()))
                .collect(),
            unset: Default::default(),
        }
    }

    pub fn clear(&self, clears: &Clears) -> UpdateRequest {
        UpdateRequest {
            identity: self.identity.clone(),
            set: Default::default(),
            unset: clears.requested().collect(),
        }
    }
}
