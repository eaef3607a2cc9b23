// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Path, State},
	Json,
};
use folio_server_auth::{authorize_content_access, ContentId, ReasonCode};
use folio_server_db::ContentRecord;

use crate::{
	api::AppState,
	api_response::{bounded_fact, guard, ApiDenial, CurrentPrincipal},
	validation::parse_resource_id,
};

/// GET /api/content/{id} - A content item, if its state and authorship allow the caller to
/// read it.
///
/// A missing item is reported as `CONTENT_ACCESS_DENIED` so callers cannot tell which ids
/// exist. The lookup is bounded by the fact timeout; a slow or failing read is
/// `OWNERSHIP_CHECK_FAILED`.
#[tracing::instrument(skip(state), fields(user_id = %principal.user_id, content_id = %id))]
pub async fn get_content(
	CurrentPrincipal(principal): CurrentPrincipal,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ContentRecord>, ApiDenial> {
	let content_id: ContentId = parse_resource_id(&id)?;

	let record = bounded_fact(
		state.facts.timeout(),
		state.content_repo.get_content(content_id),
		ReasonCode::OwnershipCheckFailed,
	)
	.await?
	.ok_or_else(|| ApiDenial::from(ReasonCode::ContentAccessDenied))?;

	guard(authorize_content_access(
		&state.table,
		&principal,
		record.facts(),
	))?;
	Ok(Json(record))
}
