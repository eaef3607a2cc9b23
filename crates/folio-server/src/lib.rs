// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP transport for Folio authorization.
//!
//! A thin adapter over `folio-server-auth`: it attaches a principal to each request, applies
//! route-level guards, gathers resource facts from `folio-server-db` and renders every denial
//! with its fixed status and reason code.

pub mod api;
pub mod api_response;
pub mod dev_identity;
pub mod error;
pub mod guard_middleware;
pub mod routes;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use folio_server_config::ServerConfig;
