// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for administration routes.

use axum::http::{Method, StatusCode};

use super::support::{assert_denied, body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn admin_routes_matrix() {
	let app = TestApp::new().await;
	let f = app.fixtures;

	let mut cases = Vec::new();
	for path in ["/api/admin/roles", "/api/admin/system", "/api/admin/settings"] {
		cases.push(AuthzCase {
			name: "admin allowed",
			method: Method::GET,
			path: path.to_string(),
			user: Some(f.admin),
			body: None,
			expected_status: StatusCode::OK,
		});
		for user in [f.editor, f.reader] {
			cases.push(AuthzCase {
				name: "non-admin forbidden",
				method: Method::GET,
				path: path.to_string(),
				user: Some(user),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			});
		}
	}

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn each_admin_route_reports_its_own_code() {
	let app = TestApp::new().await;
	let editor = app.fixtures.editor;

	assert_denied(
		app.get("/api/admin/system", Some(&editor)).await,
		StatusCode::FORBIDDEN,
		"SYSTEM_ADMIN_REQUIRED",
	)
	.await;
	assert_denied(
		app.get("/api/admin/roles", Some(&editor)).await,
		StatusCode::FORBIDDEN,
		"ADMIN_REQUIRED",
	)
	.await;
	assert_denied(
		app.get("/api/admin/settings", Some(&editor)).await,
		StatusCode::FORBIDDEN,
		"INSUFFICIENT_PERMISSIONS",
	)
	.await;
}

#[tokio::test]
async fn role_matrix_lists_every_role() {
	let app = TestApp::new().await;

	let body = body_json(app.get("/api/admin/roles", Some(&app.fixtures.admin)).await).await;
	let roles: Vec<&str> = body
		.as_array()
		.unwrap()
		.iter()
		.map(|r| r["role"].as_str().unwrap())
		.collect();
	assert_eq!(roles, vec!["administrator", "editor", "read-only"]);

	let read_only = &body[2]["permissions"];
	assert_eq!(
		read_only,
		&serde_json::json!(["READ_CONTENT", "READ_DOCUMENT", "READ_TEMPLATE"])
	);
}

#[tokio::test]
async fn settings_do_not_expose_database_url() {
	let app = TestApp::new().await;

	let response = app
		.get("/api/admin/settings", Some(&app.fixtures.admin))
		.await;
	let body = body_json(response).await;
	assert_eq!(body["fact_timeout_ms"], 2000);
	assert!(body.get("database_url").is_none());
	assert!(!body.to_string().contains("sqlite"));
}

#[tokio::test]
async fn me_reports_granted_permissions() {
	let app = TestApp::new().await;

	let body = body_json(
		app.get("/api/me/permissions", Some(&app.fixtures.editor))
			.await,
	)
	.await;
	assert_eq!(body["role"], "editor");
	assert_eq!(body["level"], 2);
	assert_eq!(body["rate_limit_exempt"], false);
	let permissions = body["permissions"].as_array().unwrap();
	assert!(permissions.contains(&serde_json::json!("UPLOAD_DOCUMENT")));
	assert!(!permissions.contains(&serde_json::json!("SYSTEM_ADMIN")));

	let body = body_json(
		app.get("/api/me/permissions", Some(&app.fixtures.admin))
			.await,
	)
	.await;
	assert_eq!(body["rate_limit_exempt"], true);
}
