// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for upload checks, bulk operations and user administration.

use axum::{
	body::Body,
	http::{Request, StatusCode},
};
use folio_server_auth::UserId;
use serde_json::json;

use super::support::{assert_denied, body_json, TestApp};

const MIB: u64 = 1024 * 1024;

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn read_only_may_not_upload() {
	let app = TestApp::new().await;

	assert_denied(
		app.post(
			"/api/uploads/check",
			Some(&app.fixtures.reader),
			json!({ "size": 100, "mime_type": "application/pdf" }),
		)
		.await,
		StatusCode::FORBIDDEN,
		"UPLOAD_PERMISSION_DENIED",
	)
	.await;
}

#[tokio::test]
async fn editor_size_limit_is_enforced() {
	let app = TestApp::new().await;

	assert_denied(
		app.post(
			"/api/uploads/check",
			Some(&app.fixtures.editor),
			json!({ "size": 60 * MIB, "mime_type": "application/pdf" }),
		)
		.await,
		StatusCode::UNPROCESSABLE_ENTITY,
		"FILE_SIZE_EXCEEDED",
	)
	.await;

	let response = app
		.post(
			"/api/uploads/check",
			Some(&app.fixtures.admin),
			json!({ "size": 60 * MIB, "mime_type": "application/pdf" }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await["max_size"], 100 * MIB);
}

#[tokio::test]
async fn unknown_file_type_is_rejected() {
	let app = TestApp::new().await;

	assert_denied(
		app.post(
			"/api/uploads/check",
			Some(&app.fixtures.editor),
			json!({ "size": MIB, "mime_type": "application/x-msdownload" }),
		)
		.await,
		StatusCode::UNPROCESSABLE_ENTITY,
		"INVALID_FILE_TYPE",
	)
	.await;
}

#[tokio::test]
async fn malformed_upload_body_is_rejected_with_a_code() {
	let app = TestApp::new().await;

	for body in [
		json!({ "mime_type": "application/pdf" }),
		json!({ "size": -1, "mime_type": "application/pdf" }),
		json!({ "size": 100 }),
	] {
		assert_denied(
			app.post("/api/uploads/check", Some(&app.fixtures.admin), body)
				.await,
			StatusCode::BAD_REQUEST,
			"MISSING_RESOURCE_ID",
		)
		.await;
	}
}

// ============================================================================
// Bulk operations
// ============================================================================

#[tokio::test]
async fn bulk_document_update_uses_upload_permission() {
	let app = TestApp::new().await;
	let ids = vec![uuid::Uuid::new_v4(), uuid::Uuid::new_v4()];

	let response = app
		.post(
			"/api/bulk/document/update",
			Some(&app.fixtures.editor),
			json!({ "ids": ids }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await["ids"].as_array().unwrap().len(), 2);

	assert_denied(
		app.post(
			"/api/bulk/document/update",
			Some(&app.fixtures.reader),
			json!({ "ids": ids }),
		)
		.await,
		StatusCode::FORBIDDEN,
		"INSUFFICIENT_PERMISSIONS",
	)
	.await;
}

#[tokio::test]
async fn unmapped_bulk_pair_is_invalid_not_forbidden() {
	let app = TestApp::new().await;
	let ids = vec![uuid::Uuid::new_v4()];

	for path in ["/api/bulk/user/publish", "/api/bulk/folder/delete", "/api/bulk/content/archive"] {
		assert_denied(
			app.post(path, Some(&app.fixtures.admin), json!({ "ids": ids }))
				.await,
			StatusCode::BAD_REQUEST,
			"INVALID_BULK_OPERATION",
		)
		.await;
	}
}

#[tokio::test]
async fn bulk_id_list_is_validated_first() {
	let app = TestApp::new().await;

	assert_denied(
		app.post(
			"/api/bulk/content/delete",
			Some(&app.fixtures.admin),
			json!({ "ids": [] }),
		)
		.await,
		StatusCode::BAD_REQUEST,
		"MISSING_RESOURCE_ID",
	)
	.await;

	assert_denied(
		app.post(
			"/api/bulk/content/delete",
			Some(&app.fixtures.admin),
			json!({ "ids": "not-a-list" }),
		)
		.await,
		StatusCode::BAD_REQUEST,
		"MISSING_RESOURCE_ID",
	)
	.await;
}

#[tokio::test]
async fn bulk_without_body_is_rejected() {
	let app = TestApp::new().await;
	let mut builder = Request::post("/api/bulk/content/delete");
	for (name, value) in app.fixtures.editor.auth_headers() {
		builder = builder.header(name, value);
	}

	assert_denied(
		app.send(builder.body(Body::empty()).unwrap()).await,
		StatusCode::BAD_REQUEST,
		"MISSING_RESOURCE_ID",
	)
	.await;
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn nobody_deletes_themselves() {
	let app = TestApp::new().await;

	for user in [app.fixtures.admin, app.fixtures.editor, app.fixtures.reader] {
		assert_denied(
			app.delete(&format!("/api/users/{}", user.id()), Some(&user))
				.await,
			StatusCode::FORBIDDEN,
			"SELF_DELETE_FORBIDDEN",
		)
		.await;
	}
}

#[tokio::test]
async fn only_administrators_delete_users() {
	let app = TestApp::new().await;
	let target = UserId::generate();

	let response = app
		.delete(&format!("/api/users/{target}"), Some(&app.fixtures.admin))
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	assert_denied(
		app.delete(&format!("/api/users/{target}"), Some(&app.fixtures.editor))
			.await,
		StatusCode::FORBIDDEN,
		"ADMIN_REQUIRED",
	)
	.await;
}

#[tokio::test]
async fn role_assignment_validates_target_first() {
	let app = TestApp::new().await;
	let target = UserId::generate();
	let path = format!("/api/users/{target}/role");

	assert_denied(
		app.put(&path, Some(&app.fixtures.editor), json!({ "role": "owner" }))
			.await,
		StatusCode::BAD_REQUEST,
		"INVALID_ROLE",
	)
	.await;

	assert_denied(
		app.put(&path, Some(&app.fixtures.editor), json!({ "role": "editor" }))
			.await,
		StatusCode::FORBIDDEN,
		"ADMIN_REQUIRED",
	)
	.await;

	for body in [json!({ "role": 5 }), json!({}), json!({ "role": null })] {
		assert_denied(
			app.put(&path, Some(&app.fixtures.admin), body).await,
			StatusCode::BAD_REQUEST,
			"INVALID_ROLE",
		)
		.await;
	}

	let response = app
		.put(&path, Some(&app.fixtures.admin), json!({ "role": "read-only" }))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await["role"], "read-only");
}
