// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for content routes.

use axum::http::{Method, StatusCode};
use folio_server_auth::ContentId;

use super::support::{assert_denied, body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn content_visibility_matrix() {
	let app = TestApp::new().await;
	let f = app.fixtures;
	let path = |id: ContentId| format!("/api/content/{id}");

	let cases = vec![
		AuthzCase {
			name: "reader reads published",
			method: Method::GET,
			path: path(f.content.published),
			user: Some(f.reader),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "reader reads own draft",
			method: Method::GET,
			path: path(f.content.reader_draft),
			user: Some(f.reader),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "reader cannot read another's draft",
			method: Method::GET,
			path: path(f.content.editor_draft),
			user: Some(f.reader),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other reader cannot read archived",
			method: Method::GET,
			path: path(f.content.archived),
			user: Some(f.other_reader),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "editor reads any draft",
			method: Method::GET,
			path: path(f.content.reader_draft),
			user: Some(f.editor),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin reads archived",
			method: Method::GET,
			path: path(f.content.archived),
			user: Some(f.admin),
			body: None,
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn denied_content_carries_its_code() {
	let app = TestApp::new().await;

	assert_denied(
		app.get(
			&format!("/api/content/{}", app.fixtures.content.editor_draft),
			Some(&app.fixtures.reader),
		)
		.await,
		StatusCode::FORBIDDEN,
		"CONTENT_ACCESS_DENIED",
	)
	.await;
}

#[tokio::test]
async fn published_content_body_is_returned() {
	let app = TestApp::new().await;

	let response = app
		.get(
			&format!("/api/content/{}", app.fixtures.content.published),
			Some(&app.fixtures.other_reader),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;
	assert_eq!(body["title"], "published");
	assert_eq!(body["status"], "published");
}

#[tokio::test]
async fn missing_content_is_indistinguishable_from_denied() {
	let app = TestApp::new().await;

	assert_denied(
		app.get(
			&format!("/api/content/{}", ContentId::generate()),
			Some(&app.fixtures.admin),
		)
		.await,
		StatusCode::FORBIDDEN,
		"CONTENT_ACCESS_DENIED",
	)
	.await;
}

#[tokio::test]
async fn unreachable_database_fails_closed() {
	let app = TestApp::new().await;
	app.state.pool.close().await;

	assert_denied(
		app.get(
			&format!("/api/content/{}", app.fixtures.content.published),
			Some(&app.fixtures.admin),
		)
		.await,
		StatusCode::INTERNAL_SERVER_ERROR,
		"OWNERSHIP_CHECK_FAILED",
	)
	.await;
}
