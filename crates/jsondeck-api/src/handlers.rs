//! Resource handlers shared by every collection.
//!
//! A request runs through three steps:
//!
//! 1. [`plan`] turns the routed request and its body into an
//!    [`Operation`], or rejects it without touching the store.
//! 2. [`apply`] runs the operation against the loaded [`Collection`] and
//!    yields an [`Outcome`]: a reply, plus the new collection when it
//!    changed.
//! 3. [`handle`] wires both to a [`Store`]: load, apply, save when the
//!    outcome requires it.
//!
//! # Endpoints
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | `POST` | `/{resource}` | 201 + created record | 500 bad body or failed write |
//! | `GET` | `/{resource}` | 200 + collection | -- |
//! | `GET` | `/{resource}/{id}` | 200 + record | 404 |
//! | `PATCH` | `/{resource}/{id}` | 200 + merged record | 400 no id, 404, 500 |
//! | `DELETE` | `/{resource}/{id}` | 200 | 404, 405 no id |
//!
//! Lookups coerce both the requested id and each record's identity
//! field to an integer and take the first match in insertion order.

use axum::http::{Method, StatusCode};
use jsondeck_store::{Collection, Record, Store, coerce_id, parse_id};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::resource::ResourceSpec;
use crate::response::Reply;
use crate::route::{PathShape, ResourceRoute};

/// A request reduced to what it does to a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Append a record whose identity field is already coerced.
    Create(Record),
    /// Return the whole collection.
    List,
    /// Return the first record matching `id`.
    Fetch {
        /// The coerced id, `None` when the segment holds no integer.
        id: Option<i64>,
    },
    /// Shallow-merge `changes` onto the first record matching `id`.
    Update {
        /// The coerced id.
        id: Option<i64>,
        /// Fields to overwrite or add.
        changes: Record,
    },
    /// Remove every record matching `id`.
    Delete {
        /// The coerced id.
        id: Option<i64>,
    },
}

/// Result of applying an [`Operation`] to a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Send the reply; nothing to persist.
    Respond(Reply),
    /// Persist `collection`, then send `reply`.
    Persist {
        /// The full collection to write back.
        collection: Collection,
        /// Reply once the write succeeds.
        reply: Reply,
        /// Reply when the write fails. `None` keeps `reply` regardless.
        on_persist_failure: Option<ApiError>,
    },
}

/// Decide what a routed request does before any store access.
///
/// Rejections returned here (unsupported method, missing id, unusable
/// body, unrecognized target) are answered without loading the
/// collection.
pub fn plan(route: &ResourceRoute, body: &[u8]) -> Result<Operation, ApiError> {
    let spec = route.resource;

    match route.method {
        Method::POST => {
            let mut record = parse_record(body).map_err(|reason| {
                warn!(resource = %spec.kind, %reason, "Error while creating record");
                ApiError::Failed(format!("Failed to create {}", spec.item_key))
            })?;
            let identity = record
                .get(spec.identity_field())
                .and_then(coerce_id)
                .map_or(Value::Null, Value::from);
            record.insert(spec.identity_field().to_owned(), identity);
            Ok(Operation::Create(record))
        }
        Method::GET => match &route.shape {
            PathShape::Collection => Ok(Operation::List),
            PathShape::Member(segment) => Ok(Operation::Fetch {
                id: parse_id(segment),
            }),
            PathShape::Unrecognized => {
                info!(resource = %spec.kind, "Invalid URL");
                Err(ApiError::InvalidUrl)
            }
        },
        Method::PATCH => {
            let Some(raw) = route.id.as_deref() else {
                info!(resource = %spec.kind, "Update without id");
                return Err(ApiError::InvalidRequest);
            };
            let changes = parse_record(body).map_err(|reason| {
                warn!(resource = %spec.kind, id = raw, %reason, "Error while updating record");
                ApiError::Failed(format!("Failed to update {}", spec.item_key))
            })?;
            Ok(Operation::Update {
                id: parse_id(raw),
                changes,
            })
        }
        Method::DELETE => route.id.as_deref().map_or(Err(ApiError::MethodNotAllowed), |raw| {
            Ok(Operation::Delete { id: parse_id(raw) })
        }),
        _ => Err(ApiError::MethodNotAllowed),
    }
}

/// Apply an operation to a loaded collection.
///
/// Pure: the only effect is the returned [`Outcome`].
pub fn apply(spec: &ResourceSpec, operation: Operation, mut collection: Collection) -> Outcome {
    let field = spec.identity_field();

    match operation {
        Operation::Create(record) => {
            let created = Value::Object(record.clone());
            collection.push(record);
            Outcome::Persist {
                collection,
                reply: Reply::new(StatusCode::CREATED, format!("{} created", spec.noun))
                    .with_payload(spec.created_key, created),
                on_persist_failure: Some(ApiError::Failed(format!(
                    "Failed to create {}",
                    spec.item_key
                ))),
            }
        }
        Operation::List => Outcome::Respond(
            Reply::ok(format!("Getting all {}", spec.list_key))
                .with_payload(spec.list_key, collection.into_value()),
        ),
        Operation::Fetch { id } => {
            match id.and_then(|id| collection.find(field, id)) {
                Some(record) => Outcome::Respond(
                    Reply::ok(format!("Found the {}", spec.item_key))
                        .with_payload(spec.item_key, Value::Object(record.clone())),
                ),
                None => {
                    // An id with no leading integer is reported as `NaN`.
                    let shown = id.map_or_else(|| String::from("NaN"), |id| id.to_string());
                    Outcome::Respond(
                        ApiError::NotFound(format!("{} with ID {shown} not found", spec.noun))
                            .into_reply(),
                    )
                }
            }
        }
        Operation::Update { id, changes } => {
            let Some(record) = id.and_then(|id| collection.find_mut(field, id)) else {
                return not_found(spec);
            };
            record.extend(changes);
            let merged = Value::Object(record.clone());
            Outcome::Persist {
                collection,
                reply: Reply::ok(format!("{} updated successfully", spec.noun))
                    .with_payload(spec.item_key, merged),
                on_persist_failure: Some(ApiError::Failed(format!(
                    "Failed to update {}",
                    spec.item_key
                ))),
            }
        }
        Operation::Delete { id } => {
            let Some(id) = id.filter(|&id| collection.contains(field, id)) else {
                return not_found(spec);
            };
            let removed = collection.remove_all(field, id);
            debug!(resource = %spec.kind, id, removed, "Records removed");
            Outcome::Persist {
                collection,
                reply: Reply::ok(format!("{} deleted successfully", spec.noun)),
                on_persist_failure: None,
            }
        }
    }
}

/// Run one routed request against `store`.
///
/// The request always completes with a reply. A failed write turns into
/// the operation's failure reply when it has one (create, update);
/// otherwise it is logged and the success reply stands (delete).
pub async fn handle(store: &dyn Store, route: &ResourceRoute, body: &[u8]) -> Reply {
    let spec = route.resource;

    let operation = match plan(route, body) {
        Ok(operation) => operation,
        Err(rejection) => return rejection.into_reply(),
    };
    debug!(resource = %spec.kind, ?operation, "Planned operation");

    let collection = store.load(spec.kind).await;

    match apply(spec, operation, collection) {
        Outcome::Respond(reply) => reply,
        Outcome::Persist {
            collection,
            reply,
            on_persist_failure,
        } => match store.save(spec.kind, &collection).await {
            Ok(()) => reply,
            Err(e) => on_persist_failure.map_or_else(
                || {
                    warn!(
                        resource = %spec.kind,
                        error = %e,
                        "Write failed, responding as if it succeeded"
                    );
                    reply
                },
                ApiError::into_reply,
            ),
        },
    }
}

fn not_found(spec: &ResourceSpec) -> Outcome {
    Outcome::Respond(ApiError::NotFound(format!("{} not found", spec.noun)).into_reply())
}

/// Parse a request body as a JSON object.
fn parse_record(body: &[u8]) -> Result<Record, String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(String::from("body is not a JSON object")),
        Err(e) => Err(e.to_string()),
    }
}
