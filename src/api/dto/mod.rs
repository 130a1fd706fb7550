//! Data Transfer Objects for REST request/response serialization.

pub mod qr_dto;

pub use qr_dto::*;
