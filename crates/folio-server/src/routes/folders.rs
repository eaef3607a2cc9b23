// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder HTTP handlers.
//!
//! Reads go through [`FolderAccessResolver`](folio_server_auth::FolderAccessResolver), which
//! walks the live folder store on every call. Every lookup is bounded by the configured fact
//! timeout and a slow or failing store is reported as `FOLDER_CHECK_FAILED`.

use std::future::Future;

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	Json,
};
use folio_server_auth::{
	policy, AccessLevel, AclEntry, AclSubject, AuthError, FolderId, FolderPathSegment,
	FolderTreeNode, ReasonCode, ResourceRef,
};
use folio_server_db::DbError;
use serde::{Deserialize, Serialize};

use crate::{
	api::AppState,
	api_response::{fact_failure, guard, ApiDenial, CurrentPrincipal},
	validation::{json_body, parse_resource_id},
};

async fn bounded<T>(
	state: &AppState,
	fut: impl Future<Output = Result<T, AuthError>>,
) -> Result<T, ApiDenial> {
	let timeout = state.folders.fact_timeout();
	match tokio::time::timeout(timeout, fut).await {
		Ok(result) => result.map_err(ApiDenial::from),
		Err(_) => {
			tracing::warn!(timeout = ?timeout, "Folder lookup timed out");
			Err(ApiDenial::from(AuthError::Timeout(timeout)))
		}
	}
}

/// GET /api/folders/tree - The folders visible to the caller.
///
/// A folder hidden from the caller hides its whole subtree, even where a descendant would be
/// reachable by id.
#[tracing::instrument(skip(state), fields(user_id = %principal.user_id, role = %principal.role))]
pub async fn get_tree(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
) -> Result<Json<Vec<FolderTreeNode>>, ApiDenial> {
	let tree = bounded(&state, state.folders.folder_tree(&principal)).await?;
	Ok(Json(tree))
}

/// GET /api/folders/{id}/path - Root-first path to a readable folder.
#[tracing::instrument(skip(state), fields(user_id = %principal.user_id, folder_id = %id))]
pub async fn get_path(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Vec<FolderPathSegment>>, ApiDenial> {
	let folder_id: FolderId = parse_resource_id(&id)?;
	let path = bounded(&state, state.folders.folder_path(folder_id, &principal)).await?;
	Ok(Json(path))
}

#[derive(Debug, Serialize)]
pub struct FolderAccessResponse {
	pub folder_id: FolderId,
	pub read: bool,
	pub write: bool,
}

/// GET /api/folders/{id}/access - Whether the caller may read and write a folder.
///
/// A plain denial is `false`. A failed lookup fails the request instead of reporting `false`.
#[tracing::instrument(skip(state), fields(user_id = %principal.user_id, folder_id = %id))]
pub async fn get_access(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<FolderAccessResponse>, ApiDenial> {
	let folder_id: FolderId = parse_resource_id(&id)?;

	let (read, write) = tokio::join!(
		state.folders.authorize_folder_read(folder_id, &principal),
		state.folders.authorize_folder_write(folder_id, &principal),
	);

	for decision in [&read, &write] {
		if let Some(code) = decision.code().filter(|c| c.is_check_failure()) {
			return Err(ApiDenial::from(code));
		}
	}

	Ok(Json(FolderAccessResponse {
		folder_id,
		read: read.allowed(),
		write: write.allowed(),
	}))
}

#[derive(Debug, Deserialize)]
pub struct GrantPermissionRequest {
	pub subject: AclSubject,
	pub access: AccessLevel,
}

/// PUT /api/folders/{id}/permissions - Add or replace an ACL entry.
///
/// Allowed for the folder's owner and for roles holding `SET_FOLDER_PERMISSIONS` or
/// `MANAGE_FOLDERS`. A body without a valid `subject` and `access` is rejected as
/// `MISSING_RESOURCE_ID` before ownership is looked up.
#[tracing::instrument(skip(state, body), fields(user_id = %principal.user_id, folder_id = %id))]
pub async fn grant_permission(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: Result<Json<GrantPermissionRequest>, JsonRejection>,
) -> Result<StatusCode, ApiDenial> {
	let folder_id: FolderId = parse_resource_id(&id)?;
	let body = json_body(body, ReasonCode::MissingResourceId)?;

	let decision = state
		.facts
		.with_ownership(&principal, ResourceRef::Folder(folder_id), |is_owner| {
			policy::can_manage_folder_permissions(&state.table, principal.role, is_owner)
		})
		.await;
	guard(decision)?;

	let entry = AclEntry {
		subject: body.subject,
		access: body.access,
	};
	state
		.folder_repo
		.grant_access(folder_id, entry)
		.await
		.map_err(|e| match e {
			DbError::NotFound(_) => ApiDenial::from(ReasonCode::AccessDenied),
			other => fact_failure(other, ReasonCode::FolderCheckFailed),
		})?;

	tracing::info!(
		folder_id = %folder_id,
		subject = ?entry.subject,
		access = %entry.access,
		"Folder permission granted"
	);
	Ok(StatusCode::NO_CONTENT)
}
