// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Input validation that runs before any policy is evaluated.
//!
//! Malformed input never reaches a decision function: identifiers, roles and bulk id lists are
//! checked here and rejected with their own reason codes.

use axum::{extract::rejection::JsonRejection, Json};
use folio_server_auth::{ReasonCode, Role};
use uuid::Uuid;

use crate::api_response::ApiDenial;

/// Parse a path or body identifier into a typed id.
///
/// An empty or non-UUID value is treated as missing.
pub fn parse_resource_id<T: From<Uuid>>(raw: &str) -> Result<T, ApiDenial> {
	let raw = raw.trim();
	if raw.is_empty() {
		return Err(ApiDenial::from(ReasonCode::MissingResourceId));
	}
	Uuid::parse_str(raw)
		.map(T::from)
		.map_err(|_| ApiDenial::from(ReasonCode::MissingResourceId))
}

/// Unwrap a JSON request body, rejecting a missing or malformed one with `code`.
///
/// Replaces axum's plain-text rejection so a bad body is reported like any other denial.
pub fn json_body<T>(
	body: Result<Json<T>, JsonRejection>,
	code: ReasonCode,
) -> Result<T, ApiDenial> {
	match body {
		Ok(Json(body)) => Ok(body),
		Err(e) => {
			tracing::debug!(error = %e, code = %code, "request body rejected");
			Err(ApiDenial::from(code))
		}
	}
}

/// Parse a role name supplied by a client.
pub fn parse_role(raw: &str) -> Result<Role, ApiDenial> {
	raw.parse::<Role>()
		.map_err(|e| ApiDenial::from(folio_server_auth::AuthError::InvalidRole(e)))
}

/// Validate the id list of a bulk request.
///
/// The list must be non-empty and every entry must be a valid identifier. Duplicates are
/// removed, preserving first occurrence.
pub fn parse_bulk_ids(raw: &[String]) -> Result<Vec<Uuid>, ApiDenial> {
	if raw.is_empty() {
		return Err(ApiDenial::from(ReasonCode::MissingResourceId));
	}

	let mut ids = Vec::with_capacity(raw.len());
	for value in raw {
		let id: Uuid = parse_resource_id(value)?;
		if !ids.contains(&id) {
			ids.push(id);
		}
	}
	Ok(ids)
}
