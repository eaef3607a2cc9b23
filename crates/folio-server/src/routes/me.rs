// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{extract::State, Json};
use folio_server_auth::{get_role_level, policy, Permission, Role, UserId};
use serde::Serialize;

use crate::{api::AppState, api_response::CurrentPrincipal};

#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
	pub user_id: UserId,
	pub role: Role,
	pub level: u8,
	pub permissions: Vec<Permission>,
	pub rate_limit_exempt: bool,
}

/// GET /api/me/permissions - What the caller's role grants.
#[tracing::instrument(skip(state), fields(user_id = %principal.user_id))]
pub async fn get_permissions(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
) -> Json<PermissionsResponse> {
	Json(PermissionsResponse {
		user_id: principal.user_id,
		role: principal.role,
		level: get_role_level(principal.role),
		permissions: state.table.permissions_for(principal.role),
		rate_limit_exempt: policy::is_exempt_from_rate_limit(principal.role),
	})
}
