// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP rendering of authorization denials.
//!
//! Every handler and route layer in this crate reports failure through [`ApiDenial`], so a
//! client always sees the same `{ "error": CODE, "message": ... }` body with the status fixed by
//! [`folio_server_auth::status_for`].

use std::{future::Future, time::Duration};

use axum::{
	extract::FromRequestParts,
	http::request::Parts,
	response::{IntoResponse, Response},
	Json,
};
use folio_server_auth::{AuthError, GuardDenial, Principal, ReasonCode};
use folio_server_db::DbError;

/// A guard denial rendered as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDenial(pub GuardDenial);

impl ApiDenial {
	pub fn code(&self) -> ReasonCode {
		self.0.code
	}
}

impl IntoResponse for ApiDenial {
	fn into_response(self) -> Response {
		(self.0.status, Json(self.0)).into_response()
	}
}

impl From<GuardDenial> for ApiDenial {
	fn from(denial: GuardDenial) -> Self {
		Self(denial)
	}
}

impl From<ReasonCode> for ApiDenial {
	fn from(code: ReasonCode) -> Self {
		Self(GuardDenial::new(code))
	}
}

impl From<AuthError> for ApiDenial {
	fn from(err: AuthError) -> Self {
		Self(GuardDenial::from(err))
	}
}

/// Proceeds on `Allowed`, otherwise converts the decision into a response.
pub fn guard(decision: folio_server_auth::AuthorizationDecision) -> Result<(), ApiDenial> {
	folio_server_auth::guard(decision).map_err(ApiDenial)
}

/// Maps a repository failure while gathering a fact to the fail-closed code for that fact.
pub fn fact_failure(err: DbError, code: ReasonCode) -> ApiDenial {
	tracing::error!(error = %err, code = %code, "fact lookup failed");
	ApiDenial::from(code)
}

/// Awaits a repository read under `timeout`.
///
/// A failed or timed-out read is reported as `code`, never as an allowed outcome.
pub async fn bounded_fact<T>(
	timeout: Duration,
	read: impl Future<Output = Result<T, DbError>>,
	code: ReasonCode,
) -> Result<T, ApiDenial> {
	match tokio::time::timeout(timeout, read).await {
		Ok(result) => result.map_err(|e| fact_failure(e, code)),
		Err(_) => {
			tracing::warn!(timeout = ?timeout, code = %code, "fact lookup timed out");
			Err(ApiDenial::from(code))
		}
	}
}

/// The verified principal for the current request.
///
/// Rejects with `AUTHENTICATION_REQUIRED` when no identity layer attached one.
#[derive(Debug, Clone, Copy)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
	S: Send + Sync,
{
	type Rejection = ApiDenial;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<Principal>()
			.copied()
			.map(CurrentPrincipal)
			.ok_or_else(|| ApiDenial::from(ReasonCode::AuthenticationRequired))
	}
}
