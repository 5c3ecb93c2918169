// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::sync::Arc;

use {
    axum::{
        body::Body,
        extract::State,
        http::{header, StatusCode},
        response::{IntoResponse, Response},
        routing::post,
        Json, Router,
    },
    log::{debug, warn},
};

use crate::{
    api::{DeleteRequest, Identity, ListRequest, Scope, UpdateRequest},
    document::Document,
    inventory::{Code, Frame, Inventory, MemoryInventory, ServiceError},
};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self.code {
            Code::NotFound => StatusCode::NOT_FOUND,
            Code::AlreadyExists => StatusCode::CONFLICT,
            Code::InvalidArgument => StatusCode::BAD_REQUEST,
            Code::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
            Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

type Shared = State<Arc<MemoryInventory>>;

pub fn router(inventory: Arc<MemoryInventory>) -> Router {
    Router::new()
        .route("/v1/create", post(create))
        .route("/v1/update", post(update))
        .route("/v1/list", post(list))
        .route("/v1/delete", post(delete))
        .route("/v1/schema/read", post(read_schema))
        .route("/v1/schema/create", post(create_schema))
        .with_state(inventory)
}

/// Serve the inventory API on `listener` until the process exits.
pub async fn serve(listener: tokio::net::TcpListener, inventory: Arc<MemoryInventory>) {
    if let Err(e) = axum::serve(listener, router(inventory)).await {
        warn!("server stopped: {e}");
    }
}

fn logged<T>(op: &str, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
    match &result {
        Ok(_) => debug!("{op}: ok"),
        Err(e) => warn!("{op} failed: {e}"),
    }
    result
}

async fn create(
    State(inventory): Shared,
    Json(identity): Json<Identity>,
) -> Result<StatusCode, ServiceError> {
    logged("create", inventory.create(&identity)).map(|_| StatusCode::NO_CONTENT)
}

async fn update(
    State(inventory): Shared,
    Json(request): Json<UpdateRequest>,
) -> Result<StatusCode, ServiceError> {
    logged("update", inventory.update(&request)).map(|_| StatusCode::NO_CONTENT)
}

/// Replies with one JSON frame per line. A failure after the first item is reported as a final
/// error frame, since the status line has already been sent.
async fn list(
    State(inventory): Shared,
    Json(request): Json<ListRequest>,
) -> Result<Response, ServiceError> {
    let items = logged("list", inventory.list(&request))?;

    let lines = items.map(|item| {
        let frame = match item {
            Ok(item) => Frame::Item(item),
            Err(e) => Frame::Error(e),
        };
        serde_json::to_string(&frame).map(|mut line| {
            line.push('\n');
            line
        })
    });
    let lines: Vec<_> = lines.collect();

    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(futures::stream::iter(lines)),
    )
        .into_response())
}

async fn delete(
    State(inventory): Shared,
    Json(request): Json<DeleteRequest>,
) -> Result<StatusCode, ServiceError> {
    logged("delete", inventory.delete(&request)).map(|_| StatusCode::NO_CONTENT)
}

async fn read_schema(
    State(inventory): Shared,
    Json(scope): Json<Scope>,
) -> Result<Json<Document>, ServiceError> {
    logged("schema/read", inventory.read_schema(&scope)).map(Json)
}

async fn create_schema(
    State(inventory): Shared,
    Json(document): Json<Document>,
) -> Result<StatusCode, ServiceError> {
    logged("schema/create", inventory.create_schema(&document))
        .map(|_| StatusCode::NO_CONTENT)
}
