//! HTTP API for the Jsondeck service.
//!
//! Exposes create/read/update/delete over two JSON collections, `users`
//! and `posts`, each persisted as a single document through an injected
//! [`Store`](jsondeck_store::Store).
//!
//! # Request flow
//!
//! ```text
//! request --> route(method, target) --> RouteDecision
//!               |                          |
//!               |                          +-- NotFound --> 404 "Invalid endpoint"
//!               |
//!               +-- Resource --> plan --> load --> apply --> [save] --> Reply
//! ```
//!
//! [`handlers::plan`] and [`handlers::apply`] are pure: every decision
//! that needs no stored data is made before the store is touched, and
//! the mutation itself is a function of `(Collection, Operation)`. Only
//! [`handlers::handle`] performs I/O.
//!
//! Every response is a JSON envelope carrying `error` (the status reason
//! phrase) and `message`, plus a resource-specific payload key.

pub mod error;
pub mod handlers;
pub mod resource;
pub mod response;
pub mod route;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use response::Reply;
pub use route::{PathShape, ResourceRoute, RouteDecision, route};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve, spawn_server, start_server};
pub use state::AppState;
