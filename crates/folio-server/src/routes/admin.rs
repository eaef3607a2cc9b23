// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Administration handlers.
//!
//! Each handler sits behind a route layer; none of them re-checks the caller.
//!
//! - `GET /api/admin/roles`: [`RequireRole::admin`](crate::guard_middleware::RequireRole::admin)
//! - `GET /api/admin/system`: `SYSTEM_ADMIN`
//! - `GET /api/admin/settings`: `MANAGE_SETTINGS`

use axum::{extract::State, Json};
use folio_server_auth::{get_role_level, Permission, Role};
use serde::Serialize;

use crate::{api::AppState, api_response::CurrentPrincipal};

#[derive(Debug, Serialize)]
pub struct RoleGrants {
	pub role: Role,
	pub level: u8,
	pub permissions: Vec<Permission>,
}

/// GET /api/admin/roles - The full role capability table.
pub async fn role_matrix(State(state): State<AppState>) -> Json<Vec<RoleGrants>> {
	let grants = Role::all()
		.iter()
		.map(|role| RoleGrants {
			role: *role,
			level: get_role_level(*role),
			permissions: state.table.permissions_for(*role),
		})
		.collect();
	Json(grants)
}

#[derive(Debug, Serialize)]
pub struct SystemStatusResponse {
	pub version: &'static str,
	pub environment: String,
	pub dev_mode: bool,
	pub database_connections: u32,
}

/// GET /api/admin/system - Process and pool status.
#[tracing::instrument(skip(state), fields(user_id = %principal.user_id))]
pub async fn system_status(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
) -> Json<SystemStatusResponse> {
	Json(SystemStatusResponse {
		version: env!("CARGO_PKG_VERSION"),
		environment: state.config.auth.environment.clone(),
		dev_mode: state.config.auth.dev_mode,
		database_connections: state.pool.size(),
	})
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
	pub fact_timeout_ms: u64,
	pub log_level: String,
	pub base_url: String,
}

/// GET /api/admin/settings - Effective authorization and logging settings.
///
/// The database url is never returned.
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
	Json(SettingsResponse {
		fact_timeout_ms: state.config.authz.fact_timeout_ms,
		log_level: state.config.logging.level.clone(),
		base_url: state.config.http.base_url.clone(),
	})
}
