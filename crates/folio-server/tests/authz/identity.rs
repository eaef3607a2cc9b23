// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tests for principal attachment and the health route.

use axum::{
	body::Body,
	http::{Request, StatusCode},
};
use folio_server::ServerConfig;
use folio_server_auth::{Principal, Role, UserId};

use super::support::{assert_denied, body_json, TestApp};

fn with_headers(path: &str, user_id: &str, role: &str) -> Request<Body> {
	Request::get(path)
		.header("x-dev-user-id", user_id)
		.header("x-dev-role", role)
		.body(Body::empty())
		.unwrap()
}

#[tokio::test]
async fn health_needs_no_identity() {
	let app = TestApp::new().await;

	let response = app.get("/health", None).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn health_reports_closed_pool() {
	let app = TestApp::new().await;
	app.state.pool.close().await;

	let response = app.get("/health", None).await;
	assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_user_id_is_invalid_credentials() {
	let app = TestApp::new().await;

	assert_denied(
		app.send(with_headers("/api/me/permissions", "alice", "editor"))
			.await,
		StatusCode::UNAUTHORIZED,
		"INVALID_CREDENTIALS",
	)
	.await;
}

#[tokio::test]
async fn unknown_role_header_is_invalid_role() {
	let app = TestApp::new().await;
	let id = UserId::generate().to_string();

	assert_denied(
		app.send(with_headers("/api/me/permissions", &id, "Administrator"))
			.await,
		StatusCode::BAD_REQUEST,
		"INVALID_ROLE",
	)
	.await;
}

#[tokio::test]
async fn without_dev_mode_requests_need_an_upstream_principal() {
	let app = TestApp::with_config(ServerConfig::default()).await;
	let id = UserId::generate().to_string();

	assert_denied(
		app.send(with_headers("/api/me/permissions", &id, "administrator"))
			.await,
		StatusCode::UNAUTHORIZED,
		"AUTHENTICATION_REQUIRED",
	)
	.await;
}

#[tokio::test]
async fn upstream_principal_is_used_as_is() {
	let app = TestApp::with_config(ServerConfig::default()).await;
	let principal = Principal::new(UserId::generate(), Role::ReadOnly);

	let mut request = Request::get("/api/me/permissions")
		.body(Body::empty())
		.unwrap();
	request.extensions_mut().insert(principal);

	let response = app.send(request).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["user_id"], principal.user_id.to_string());
	assert_eq!(body["role"], "read-only");
}
