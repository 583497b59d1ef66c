//! Persistence layer: the JSON file record store and its seed data.
//!
//! [`JsonFileStore`] owns the durable collection. It seeds the file with
//! [`seed::SEED_RECORDS`] on first access and validates everything it
//! reads, so a failed load never yields a partial collection.

pub mod json_file;
pub mod seed;

pub use json_file::JsonFileStore;
pub use seed::seed_collection;
