// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for folder routes.

use axum::http::StatusCode;
use folio_server_auth::FolderId;
use serde_json::{json, Value};

use super::support::{assert_denied, body_json, TestApp};

fn names(nodes: &Value) -> Vec<String> {
	nodes
		.as_array()
		.unwrap()
		.iter()
		.map(|n| n["name"].as_str().unwrap().to_string())
		.collect()
}

// ============================================================================
// Tree
// ============================================================================

#[tokio::test]
async fn private_root_hides_public_child_from_tree() {
	let app = TestApp::new().await;
	let reader = &app.fixtures.reader;

	let response = app.get("/api/folders/tree", Some(reader)).await;
	assert_eq!(response.status(), StatusCode::OK);

	let tree = body_json(response).await;
	assert_eq!(names(&tree), vec!["team"]);
	assert_eq!(names(&tree[0]["children"]), vec!["notes"]);
}

#[tokio::test]
async fn public_child_is_still_directly_readable() {
	let app = TestApp::new().await;
	let reader = &app.fixtures.reader;
	let folders = app.fixtures.folders;

	let response = app
		.get(
			&format!("/api/folders/{}/access", folders.public_child),
			Some(reader),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;
	assert_eq!(body["read"], true);
	assert_eq!(body["write"], false);
}

#[tokio::test]
async fn administrator_sees_the_whole_forest() {
	let app = TestApp::new().await;

	let tree = body_json(app.get("/api/folders/tree", Some(&app.fixtures.admin)).await).await;
	assert_eq!(names(&tree), vec!["a-private", "team"]);
	assert_eq!(names(&tree[0]["children"]), vec!["b-public"]);
	assert_eq!(tree[0]["children"][0]["is_public"], true);
}

#[tokio::test]
async fn tree_requires_authentication() {
	let app = TestApp::new().await;
	assert_denied(
		app.get("/api/folders/tree", None).await,
		StatusCode::BAD_REQUEST,
		"MISSING_CREDENTIALS",
	)
	.await;
}

// ============================================================================
// Path
// ============================================================================

#[tokio::test]
async fn path_is_root_first() {
	let app = TestApp::new().await;
	let folders = app.fixtures.folders;

	let response = app
		.get(
			&format!("/api/folders/{}/path", folders.team_child),
			Some(&app.fixtures.reader),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(names(&body_json(response).await), vec!["team", "notes"]);
}

#[tokio::test]
async fn path_to_unreadable_folder_is_denied() {
	let app = TestApp::new().await;
	let folders = app.fixtures.folders;

	assert_denied(
		app.get(
			&format!("/api/folders/{}/path", folders.private_root),
			Some(&app.fixtures.reader),
		)
		.await,
		StatusCode::FORBIDDEN,
		"INSUFFICIENT_PERMISSIONS",
	)
	.await;
}

#[tokio::test]
async fn missing_folder_looks_like_a_denial() {
	let app = TestApp::new().await;

	assert_denied(
		app.get(
			&format!("/api/folders/{}/path", FolderId::generate()),
			Some(&app.fixtures.reader),
		)
		.await,
		StatusCode::FORBIDDEN,
		"ACCESS_DENIED",
	)
	.await;
}

#[tokio::test]
async fn malformed_folder_id_is_missing_resource_id() {
	let app = TestApp::new().await;

	assert_denied(
		app.get("/api/folders/not-a-uuid/path", Some(&app.fixtures.reader))
			.await,
		StatusCode::BAD_REQUEST,
		"MISSING_RESOURCE_ID",
	)
	.await;
}

// ============================================================================
// Access
// ============================================================================

#[tokio::test]
async fn write_entry_is_inherited_by_descendants() {
	let app = TestApp::new().await;
	let folders = app.fixtures.folders;

	let body = body_json(
		app.get(
			&format!("/api/folders/{}/access", folders.team_child),
			Some(&app.fixtures.reader),
		)
		.await,
	)
	.await;
	assert_eq!(body["read"], true);
	assert_eq!(body["write"], true);

	let body = body_json(
		app.get(
			&format!("/api/folders/{}/access", folders.team_child),
			Some(&app.fixtures.other_reader),
		)
		.await,
	)
	.await;
	assert_eq!(body["read"], true);
	assert_eq!(body["write"], false);
}

#[tokio::test]
async fn editor_writes_anywhere_but_reads_by_acl() {
	let app = TestApp::new().await;
	let folders = app.fixtures.folders;

	let body = body_json(
		app.get(
			&format!("/api/folders/{}/access", folders.private_root),
			Some(&app.fixtures.editor),
		)
		.await,
	)
	.await;
	assert_eq!(body["read"], false);
	assert_eq!(body["write"], true);
}

// ============================================================================
// Permissions
// ============================================================================

#[tokio::test]
async fn reader_cannot_grant_folder_permissions() {
	let app = TestApp::new().await;
	let folders = app.fixtures.folders;
	let other = app.fixtures.other_reader;

	assert_denied(
		app.put(
			&format!("/api/folders/{}/permissions", folders.team),
			Some(&other),
			json!({
				"subject": { "type": "user", "value": other.id() },
				"access": "write"
			}),
		)
		.await,
		StatusCode::FORBIDDEN,
		"INSUFFICIENT_PERMISSIONS",
	)
	.await;
}

#[tokio::test]
async fn editor_grant_takes_effect_immediately() {
	let app = TestApp::new().await;
	let folders = app.fixtures.folders;
	let other = app.fixtures.other_reader;
	let access_path = format!("/api/folders/{}/access", folders.team_child);

	let before = body_json(app.get(&access_path, Some(&other)).await).await;
	assert_eq!(before["write"], false);

	let response = app
		.put(
			&format!("/api/folders/{}/permissions", folders.team),
			Some(&app.fixtures.editor),
			json!({
				"subject": { "type": "user", "value": other.id() },
				"access": "write"
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let after = body_json(app.get(&access_path, Some(&other)).await).await;
	assert_eq!(after["write"], true);
}

#[tokio::test]
async fn folder_owner_may_grant_without_the_permission() {
	let app = TestApp::new().await;
	let reader = app.fixtures.reader;
	let other = app.fixtures.other_reader;

	let owned = folio_server_auth::FolderNode::new(FolderId::generate(), "mine", None);
	app.state
		.folder_repo
		.create_folder(&owned, reader.id())
		.await
		.unwrap();

	let response = app
		.put(
			&format!("/api/folders/{}/permissions", owned.id),
			Some(&reader),
			json!({
				"subject": { "type": "user", "value": other.id() },
				"access": "read"
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let body = body_json(
		app.get(&format!("/api/folders/{}/access", owned.id), Some(&other))
			.await,
	)
	.await;
	assert_eq!(body["read"], true);
}

#[tokio::test]
async fn granting_on_a_missing_folder_is_denied() {
	let app = TestApp::new().await;

	assert_denied(
		app.put(
			&format!("/api/folders/{}/permissions", FolderId::generate()),
			Some(&app.fixtures.editor),
			json!({
				"subject": { "type": "role", "value": "editor" },
				"access": "read"
			}),
		)
		.await,
		StatusCode::FORBIDDEN,
		"ACCESS_DENIED",
	)
	.await;
}

#[tokio::test]
async fn malformed_grant_body_is_missing_resource_id() {
	let app = TestApp::new().await;
	let path = format!("/api/folders/{}/permissions", app.fixtures.folders.team);

	for body in [
		json!({ "access": "read" }),
		json!({ "subject": { "type": "group", "value": "x" }, "access": "read" }),
		json!({ "subject": { "type": "role", "value": "editor" }, "access": "admin" }),
	] {
		assert_denied(
			app.put(&path, Some(&app.fixtures.admin), body).await,
			StatusCode::BAD_REQUEST,
			"MISSING_RESOURCE_ID",
		)
		.await;
	}
}
