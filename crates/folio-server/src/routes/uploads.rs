// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{rejection::JsonRejection, State},
	Json,
};
use folio_server_auth::{policy, ReasonCode};
use serde::{Deserialize, Serialize};

use crate::{
	api::AppState,
	api_response::{guard, ApiDenial, CurrentPrincipal},
	validation::json_body,
};

#[derive(Debug, Deserialize)]
pub struct UploadCheckRequest {
	pub size: u64,
	pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadCheckResponse {
	pub allowed: bool,
	pub max_size: u64,
}

/// POST /api/uploads/check - Pre-flight an upload against the caller's role.
///
/// Checks run in order: upload permission, then size limit, then file type. A body without a
/// numeric `size` and a string `mime_type` is rejected as `MISSING_RESOURCE_ID` first.
#[tracing::instrument(
	skip(state, body),
	fields(user_id = %principal.user_id, size = tracing::field::Empty)
)]
pub async fn check_upload(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
	body: Result<Json<UploadCheckRequest>, JsonRejection>,
) -> Result<Json<UploadCheckResponse>, ApiDenial> {
	let body = json_body(body, ReasonCode::MissingResourceId)?;
	tracing::Span::current().record("size", body.size);

	guard(policy::can_upload_file(
		&state.table,
		principal.role,
		body.size,
		&body.mime_type,
	))?;

	Ok(Json(UploadCheckResponse {
		allowed: true,
		max_size: policy::get_max_upload_size(principal.role),
	}))
}
