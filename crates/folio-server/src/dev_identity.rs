// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Development identity layer.
//!
//! Verifying credentials is outside this server. In production an upstream authenticator
//! attaches a [`Principal`] to the request extensions. With `auth.dev_mode` enabled this layer
//! builds one from request headers instead:
//!
//! - `X-Dev-User-Id`: the user's UUID
//! - `X-Dev-Role`: `administrator`, `editor` or `read-only`
//!
//! Missing headers are `MISSING_CREDENTIALS`, an unparseable user id is `INVALID_CREDENTIALS`
//! and an unknown role is `INVALID_ROLE`.

use axum::{
	extract::{Request, State},
	http::HeaderMap,
	middleware::Next,
	response::{IntoResponse, Response},
};
use folio_server_auth::{Principal, ReasonCode, Role, UserId};

use crate::{api_response::ApiDenial, validation::parse_role, AppState};

pub const DEV_USER_ID_HEADER: &str = "x-dev-user-id";
pub const DEV_ROLE_HEADER: &str = "x-dev-role";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers
		.get(name)
		.and_then(|v| v.to_str().ok())
		.map(str::trim)
		.filter(|v| !v.is_empty())
}

/// Build a principal from the dev identity headers.
pub fn principal_from_headers(headers: &HeaderMap) -> Result<Principal, ApiDenial> {
	let (Some(user_id), Some(role)) = (
		header(headers, DEV_USER_ID_HEADER),
		header(headers, DEV_ROLE_HEADER),
	) else {
		return Err(ApiDenial::from(ReasonCode::MissingCredentials));
	};

	let user_id: UserId = user_id
		.parse()
		.map_err(|_| ApiDenial::from(ReasonCode::InvalidCredentials))?;
	let role: Role = parse_role(role)?;
	Ok(Principal::new(user_id, role))
}

/// Attach a dev principal to the request when dev mode is on.
///
/// With dev mode off the request passes through untouched and any principal must come from an
/// upstream layer.
pub async fn dev_identity_layer(
	State(state): State<AppState>,
	mut req: Request,
	next: Next,
) -> Response {
	if !state.config.auth.dev_mode || req.extensions().get::<Principal>().is_some() {
		return next.run(req).await;
	}

	match principal_from_headers(req.headers()) {
		Ok(principal) => {
			tracing::debug!(
				user_id = %principal.user_id,
				role = %principal.role,
				"Dev identity attached"
			);
			req.extensions_mut().insert(principal);
			next.run(req).await
		}
		Err(denial) => {
			tracing::info!(
				path = %req.uri().path(),
				code = %denial.code(),
				"Dev identity rejected"
			);
			denial.into_response()
		}
	}
}
