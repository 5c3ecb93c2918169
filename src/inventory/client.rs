// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::io::{BufRead, BufReader};

use {
    log::debug,
    reqwest::{blocking::Response, StatusCode},
    serde::{de::DeserializeOwned, Serialize},
};

use crate::{
    api::{DeleteRequest, Identity, ListRequest, Scope, UpdateRequest},
    document::Document,
};

use super::{Code, Frame, Inventory, ListStream, ServiceError};

/// A blocking client for the `stackd` HTTP API.
#[derive(Debug, Clone)]
pub struct HttpInventory {
    base: String,
    client: reqwest::blocking::Client,
}

impl HttpInventory {
    pub fn new(server: &str) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::ClientBuilder::new()
            .build()
            .map_err(|e| ServiceError::unavailable(format!("could not build HTTP client: {e}")))?;

        Ok(HttpInventory {
            base: server.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn post<B: Serialize>(&self, route: &str, body: &B) -> Result<Response, ServiceError> {
        let url = format!("{}/v1/{route}", self.base);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ServiceError::unavailable(format!("error contacting {url}: {e}")))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        match response.json::<ServiceError>() {
            Ok(e) => Err(e),
            Err(_) => Err(ServiceError::new(
                code_for(status),
                format!("server replied {status}"),
            )),
        }
    }

    fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<R, ServiceError> {
        self.post(route, body)?
            .json()
            .map_err(|e| ServiceError::unavailable(format!("malformed reply: {e}")))
    }
}

fn code_for(status: StatusCode) -> Code {
    match status {
        StatusCode::NOT_FOUND => Code::NotFound,
        StatusCode::CONFLICT => Code::AlreadyExists,
        StatusCode::BAD_REQUEST => Code::InvalidArgument,
        StatusCode::PRECONDITION_FAILED => Code::FailedPrecondition,
        StatusCode::SERVICE_UNAVAILABLE => Code::Unavailable,
        _ => Code::Internal,
    }
}

/// Parse one NDJSON line of a list reply.
fn frame(line: std::io::Result<String>) -> Option<Result<crate::api::Item, ServiceError>> {
    let line = match line {
        Ok(line) => line,
        Err(e) => return Some(Err(ServiceError::unavailable(format!("read error: {e}")))),
    };
    if line.trim().is_empty() {
        return None;
    }
    Some(match serde_json::from_str::<Frame>(&line) {
        Ok(Frame::Item(item)) => Ok(item),
        Ok(Frame::Error(e)) => Err(e),
        Err(e) => Err(ServiceError::unavailable(format!("malformed list frame: {e}"))),
    })
}

impl Inventory for HttpInventory {
    fn create(&self, identity: &Identity) -> Result<(), ServiceError> {
        self.post("create", identity).map(|_| ())
    }

    fn update(&self, request: &UpdateRequest) -> Result<(), ServiceError> {
        self.post("update", request).map(|_| ())
    }

    fn list(&self, request: &ListRequest) -> Result<ListStream, ServiceError> {
        let response = self.post("list", request)?;
        let lines = BufReader::new(response).lines();
        Ok(ListStream::new(lines.filter_map(frame)))
    }

    fn delete(&self, request: &DeleteRequest) -> Result<(), ServiceError> {
        self.post("delete", request).map(|_| ())
    }

    fn read_schema(&self, scope: &Scope) -> Result<Document, ServiceError> {
        self.call("schema/read", scope)
    }

    fn create_schema(&self, document: &Document) -> Result<(), ServiceError> {
        self.post("schema/create", document).map(|_| ())
    }
}
