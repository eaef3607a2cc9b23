// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	Json,
};
use folio_server_auth::{
	policy::{self, BulkOperation, BulkResourceKind},
	ReasonCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
	api::AppState,
	api_response::{guard, ApiDenial, CurrentPrincipal},
	validation::{json_body, parse_bulk_ids},
};

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
	pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
	pub operation: BulkOperation,
	pub kind: BulkResourceKind,
	pub ids: Vec<Uuid>,
}

/// POST /api/bulk/{kind}/{op} - Authorize a bulk operation over a list of ids.
///
/// The body must carry a non-empty `ids` array and the `(op, kind)` pair must be a supported
/// combination. Both are checked before the caller's permissions.
#[tracing::instrument(skip(state, body), fields(user_id = %principal.user_id))]
pub async fn bulk_operation(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
	Path((kind, op)): Path<(String, String)>,
	body: Result<Json<BulkRequest>, JsonRejection>,
) -> Result<Json<BulkResponse>, ApiDenial> {
	let body = json_body(body, ReasonCode::MissingResourceId)?;
	let ids = parse_bulk_ids(&body.ids)?;

	let (Ok(kind), Ok(operation)) = (
		kind.parse::<BulkResourceKind>(),
		op.parse::<BulkOperation>(),
	) else {
		return Err(ApiDenial::from(ReasonCode::InvalidBulkOperation));
	};

	guard(policy::can_perform_bulk_operation(
		&state.table,
		principal.role,
		operation,
		kind,
	))?;

	tracing::info!(
		operation = ?operation,
		kind = ?kind,
		count = ids.len(),
		"Bulk operation authorized"
	);
	Ok(Json(BulkResponse {
		operation,
		kind,
		ids,
	}))
}
