//! Storage layer for the Jsondeck service.
//!
//! Each resource type ("users", "posts") is persisted as one JSON array
//! document. The whole document is the unit of persistence: every read
//! loads the full [`Collection`] and every write replaces it.
//!
//! # Architecture
//!
//! ```text
//! Resource handler
//!     |
//!     +-- Store::load(kind) --> Collection   (degrades to empty)
//!     |
//!     +-- Store::save(kind, &Collection)     (full rewrite)
//!         |-- FileStore    ({data_dir}/{kind}.json, temp file + rename)
//!         +-- MemoryStore  (in-process map, tests and embedding)
//! ```
//!
//! # Concurrency
//!
//! No store coordinates across calls. Two mutating requests against the
//! same resource can interleave between `load` and `save`; the last
//! `save` wins and the earlier mutation is lost. A single `save` is
//! atomic: readers observe either the old document or the new one.
//!
//! # Modules
//!
//! - [`resource`] -- [`ResourceKind`] and its identity field
//! - [`collection`] -- [`Collection`], [`Record`], integer id coercion
//! - [`store`] -- the [`Store`] trait
//! - [`file`] -- [`FileStore`]
//! - [`memory`] -- [`MemoryStore`]
//! - [`error`] -- [`StoreError`]

pub mod collection;
pub mod error;
pub mod file;
pub mod memory;
pub mod resource;
pub mod store;

// Re-export primary types for convenience.
pub use collection::{Collection, Record, coerce_id, parse_id};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use resource::ResourceKind;
pub use store::Store;
