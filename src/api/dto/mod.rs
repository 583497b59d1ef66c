//! Data Transfer Objects for REST request/response serialization.

pub mod records_dto;

pub use records_dto::*;
