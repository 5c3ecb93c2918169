// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::sync::{Arc, Mutex};

use crate::{
    api::{DeleteRequest, Identity, ListRequest, Scope, UpdateRequest},
    commands::{self, Defaults},
    document::Document,
    error::Result,
    inventory::{HttpInventory, Inventory, ListStream, MemoryInventory, ServiceError},
};

/// A TestEnvironment runs a `stackd` server in a background thread on an ephemeral local port.
///
/// The listener is bound before the server thread starts, so requests made right after `start()`
/// returns are queued rather than refused.
pub struct TestEnvironment {
    server: String,
    inventory: Arc<MemoryInventory>,
}

impl TestEnvironment {
    /// Start a server over an empty inventory.
    pub fn new() -> Self {
        Self::start(MemoryInventory::new())
    }

    pub fn start(inventory: MemoryInventory) -> Self {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("could not bind test listener");
        listener
            .set_nonblocking(true)
            .expect("could not make test listener nonblocking");
        let addr = listener.local_addr().expect("listener has no address");

        let inventory = Arc::new(inventory);
        let shared = Arc::clone(&inventory);
        std::thread::spawn(move || {
            if crate::daemon::run(listener, shared).is_err() {
                std::process::exit(1);
            }
        });

        Self {
            server: format!("http://{addr}"),
            inventory,
        }
    }

    /// A client connected to this environment's server.
    pub fn client(&self) -> HttpInventory {
        HttpInventory::new(&self.server).expect("could not build client")
    }

    /// The server's store, for checking state without going through HTTP.
    pub fn inventory(&self) -> &MemoryInventory {
        &self.inventory
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `args` as a `stack` command line and run it against `service`.
///
/// Returns the outcome together with everything the command printed.
pub fn run_cli<S: Inventory + ?Sized>(
    service: &S,
    defaults: &Defaults,
    args: &[&str],
) -> (Result<()>, String) {
    let matches = commands::command()
        .try_get_matches_from(std::iter::once("stack").chain(args.iter().copied()))
        .unwrap_or_else(|e| panic!("could not parse {args:?}: {e}"));

    let mut out = Vec::new();
    let result = commands::run(service, defaults, &matches, &mut out);
    (result, String::from_utf8(out).expect("output is not UTF-8"))
}

/// One call made through a `RecordingInventory`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(Identity),
    Update(UpdateRequest),
    List(ListRequest),
    Delete(DeleteRequest),
    ReadSchema(Scope),
    CreateSchema(Document),
}

/// Wraps an inventory and records every call made to it, in order.
pub struct RecordingInventory<S> {
    inner: S,
    calls: Mutex<Vec<Call>>,
}

impl<S: Inventory> RecordingInventory<S> {
    pub fn new(inner: S) -> Self {
        RecordingInventory {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl<S: Inventory> Inventory for RecordingInventory<S> {
    fn create(&self, identity: &Identity) -> std::result::Result<(), ServiceError> {
        self.record(Call::Create(identity.clone()));
        self.inner.create(identity)
    }

    fn update(&self, request: &UpdateRequest) -> std::result::Result<(), ServiceError> {
        self.record(Call::Update(request.clone()));
        self.inner.update(request)
    }

    fn list(&self, request: &ListRequest) -> std::result::Result<ListStream, ServiceError> {
        self.record(Call::List(request.clone()));
        self.inner.list(request)
    }

    fn delete(&self, request: &DeleteRequest) -> std::result::Result<(), ServiceError> {
        self.record(Call::Delete(request.clone()));
        self.inner.delete(request)
    }

    fn read_schema(&self, scope: &Scope) -> std::result::Result<Document, ServiceError> {
        self.record(Call::ReadSchema(scope.clone()));
        self.inner.read_schema(scope)
    }

    fn create_schema(&self, document: &Document) -> std::result::Result<(), ServiceError> {
        self.record(Call::CreateSchema(document.clone()));
        self.inner.create_schema(document)
    }
}
