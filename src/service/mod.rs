//! Service layer: record operations over an injected store.
//!
//! [`QrService`] implements create, list and delete on top of any
//! [`super::persistence::RecordStore`].

pub mod qr_service;

pub use qr_service::QrService;
