// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User administration handlers.
//!
//! User records live with the identity provider. These handlers authorize the change and log
//! it; applying it is the provider's job.

use axum::{
	extract::{rejection::JsonRejection, Path},
	http::StatusCode,
	Json,
};
use folio_server_auth::{policy, ReasonCode, Role, UserId};
use serde::{Deserialize, Serialize};

use crate::{
	api_response::{guard, ApiDenial, CurrentPrincipal},
	validation::{json_body, parse_resource_id, parse_role},
};

/// DELETE /api/users/{id} - Authorize deleting a user.
///
/// Nobody may delete their own account.
#[tracing::instrument(fields(actor_id = %principal.user_id, target_id = %id))]
pub async fn delete_user(
	CurrentPrincipal(principal): CurrentPrincipal,
	Path(id): Path<String>,
) -> Result<StatusCode, ApiDenial> {
	let target: UserId = parse_resource_id(&id)?;

	guard(policy::can_delete_user(
		principal.role,
		target == principal.user_id,
	))?;

	tracing::info!(actor_id = %principal.user_id, target_id = %target, "User deletion authorized");
	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
	pub role: String,
}

#[derive(Debug, Serialize)]
pub struct AssignRoleResponse {
	pub user_id: UserId,
	pub role: Role,
}

/// PUT /api/users/{id}/role - Authorize a role assignment.
///
/// The target role is validated before the caller's own role is considered. A body without a
/// string `role` is an `INVALID_ROLE`.
#[tracing::instrument(skip(body), fields(actor_id = %principal.user_id, target_id = %id))]
pub async fn assign_role(
	CurrentPrincipal(principal): CurrentPrincipal,
	Path(id): Path<String>,
	body: Result<Json<AssignRoleRequest>, JsonRejection>,
) -> Result<Json<AssignRoleResponse>, ApiDenial> {
	let target: UserId = parse_resource_id(&id)?;
	let body = json_body(body, ReasonCode::InvalidRole)?;

	guard(policy::can_assign_role_named(principal.role, &body.role))?;
	let role: Role = parse_role(&body.role)?;

	tracing::info!(
		actor_id = %principal.user_id,
		target_id = %target,
		role = %role,
		"Role assignment authorized"
	);
	Ok(Json(AssignRoleResponse {
		user_id: target,
		role,
	}))
}
