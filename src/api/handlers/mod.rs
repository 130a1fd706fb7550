//! REST endpoint handlers organized by resource.

pub mod qr;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(qr::routes())
}
