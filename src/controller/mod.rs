// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Controllers turn operator input into inventory requests.
//!
//! Each controller is handed the inventory service and the ambient scope when it is built. All
//! local validation happens before the first remote call.

pub mod attribute;
pub mod document;
pub mod resource;

pub use {attribute::AttributeController, document::DocumentController, resource::ResourceController};
