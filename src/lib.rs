//! # qr-ledger
//!
//! REST service that stores QR-code metadata (a URL, a date, an image)
//! per user identifier.
//!
//! This crate exposes create, list and delete over HTTP and keeps
//! records in PostgreSQL. Deletion is soft: a record gets a
//! `deleted_at` timestamp and disappears from every read.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── QrService (service/)
//!     │
//!     ├── RecordStore (persistence/)
//!     │     ├── PostgresStore
//!     │     └── MemoryStore
//!     │
//!     └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
