//! Persistence of the area collection.
//!
//! The snapshot is a single JSON document stored under one key of a
//! [`KeyValueStore`]. The layout is an object mapping area names to
//! `{ "percentage": n, "empleados": [{ "nombre", "horas", "propinas" }] }`.

mod key_value;
mod repository;

pub use key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use repository::{AreaRepository, DEFAULT_STORAGE_KEY};
