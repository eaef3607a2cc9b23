// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	body::Body,
	http::{header::HeaderName, header::HeaderValue, Method, Request, Response, StatusCode},
	Router,
};
use folio_server::{create_app_state, create_router, AppState, ServerConfig};
use folio_server_auth::{
	AccessLevel, AclEntry, ContentId, ContentStatus, FolderId, FolderNode, Principal, Role, UserId,
};
use folio_server_db::{create_pool, run_migrations, ContentRecord};
use serde::Serialize;
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Debug, Clone, Copy)]
pub struct TestUser {
	pub principal: Principal,
}

impl TestUser {
	fn new(role: Role) -> Self {
		Self {
			principal: Principal::new(UserId::generate(), role),
		}
	}

	pub fn id(&self) -> UserId {
		self.principal.user_id
	}

	pub fn auth_headers(&self) -> [(HeaderName, HeaderValue); 2] {
		[
			(
				HeaderName::from_static("x-dev-user-id"),
				HeaderValue::from_str(&self.principal.user_id.to_string()).unwrap(),
			),
			(
				HeaderName::from_static("x-dev-role"),
				HeaderValue::from_static(self.principal.role.as_str()),
			),
		]
	}
}

/// Folder layout:
///
/// ```text
/// private_root   (private, no ACL)
/// └── public_child   (public)
/// team           (private, read-only role may read, reader may write)
/// └── team_child (private)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FolderFixture {
	pub private_root: FolderId,
	pub public_child: FolderId,
	pub team: FolderId,
	pub team_child: FolderId,
}

#[derive(Debug, Clone, Copy)]
pub struct ContentFixture {
	pub reader_draft: ContentId,
	pub editor_draft: ContentId,
	pub published: ContentId,
	pub archived: ContentId,
}

#[derive(Debug, Clone, Copy)]
pub struct Fixtures {
	pub admin: TestUser,
	pub editor: TestUser,
	pub reader: TestUser,
	pub other_reader: TestUser,
	pub folders: FolderFixture,
	pub content: ContentFixture,
}

pub struct TestApp {
	pub router: Router,
	pub fixtures: Fixtures,
	pub state: AppState,
	_temp_dir: TempDir,
}

impl TestApp {
	pub async fn new() -> Self {
		let mut config = ServerConfig::default();
		config.auth.dev_mode = true;
		Self::with_config(config).await
	}

	pub async fn with_config(config: ServerConfig) -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("folio.db");
		let pool = create_pool(&format!("sqlite:{}", db_path.display()))
			.await
			.unwrap();
		run_migrations(&pool).await.unwrap();

		let state = create_app_state(pool, &config);
		let fixtures = create_fixtures(&state).await;
		let router = create_router(state.clone());

		Self {
			router,
			fixtures,
			state,
			_temp_dir: temp_dir,
		}
	}

	pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::GET, path, user, Option::<()>::None)
			.await
	}

	pub async fn post(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::POST, path, user, Some(body)).await
	}

	pub async fn put(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::PUT, path, user, Some(body)).await
	}

	pub async fn delete(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::DELETE, path, user, Option::<()>::None)
			.await
	}

	pub async fn send(&self, request: Request<Body>) -> Response<Body> {
		self.router.clone().oneshot(request).await.unwrap()
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(test_user) = user {
			for (name, value) in test_user.auth_headers() {
				builder = builder.header(name, value);
			}
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		self.send(builder.body(request_body).unwrap()).await
	}
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

/// Asserts both the status and the reason code of a denial.
pub async fn assert_denied(response: Response<Body>, status: StatusCode, code: &str) {
	let actual = response.status();
	let body = body_json(response).await;
	assert_eq!(actual, status, "unexpected status, body: {body}");
	assert_eq!(body["error"], code, "unexpected code, body: {body}");
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = match (&case.method, &case.body) {
			(m, Some(body)) if *m == Method::POST => {
				app.post(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, Some(body)) if *m == Method::PUT => {
				app.put(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, _) if *m == Method::DELETE => app.delete(&case.path, case.user.as_ref()).await,
			_ => app.get(&case.path, case.user.as_ref()).await,
		};

		if response.status() != case.expected_status {
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}

async fn create_fixtures(state: &AppState) -> Fixtures {
	let admin = TestUser::new(Role::Administrator);
	let editor = TestUser::new(Role::Editor);
	let reader = TestUser::new(Role::ReadOnly);
	let other_reader = TestUser::new(Role::ReadOnly);

	let folders = create_folder_fixture(state, &admin, &reader).await;
	let content = create_content_fixture(state, &editor, &reader).await;

	Fixtures {
		admin,
		editor,
		reader,
		other_reader,
		folders,
		content,
	}
}

async fn create_folder_fixture(
	state: &AppState,
	admin: &TestUser,
	reader: &TestUser,
) -> FolderFixture {
	let repo = &state.folder_repo;

	let private_root = FolderNode::new(FolderId::generate(), "a-private", None);
	let public_child =
		FolderNode::new(FolderId::generate(), "b-public", Some(private_root.id)).public();
	let team = FolderNode::new(FolderId::generate(), "team", None)
		.with_entry(AclEntry::role(Role::ReadOnly, AccessLevel::Read))
		.with_entry(AclEntry::user(reader.id(), AccessLevel::Write));
	let team_child = FolderNode::new(FolderId::generate(), "notes", Some(team.id));

	for folder in [&private_root, &public_child, &team, &team_child] {
		repo.create_folder(folder, admin.id()).await.unwrap();
	}

	FolderFixture {
		private_root: private_root.id,
		public_child: public_child.id,
		team: team.id,
		team_child: team_child.id,
	}
}

async fn create_content_fixture(
	state: &AppState,
	editor: &TestUser,
	reader: &TestUser,
) -> ContentFixture {
	let repo = &state.content_repo;

	let reader_draft = ContentRecord::new("reader draft", reader.id());
	let editor_draft = ContentRecord::new("editor draft", editor.id());
	let published = ContentRecord::new("published", editor.id());
	let archived = ContentRecord::new("archived", editor.id());

	for record in [&reader_draft, &editor_draft, &published, &archived] {
		repo.create_content(record).await.unwrap();
	}
	repo.set_status(published.id, ContentStatus::Published)
		.await
		.unwrap();
	repo.set_status(archived.id, ContentStatus::Archived)
		.await
		.unwrap();

	ContentFixture {
		reader_draft: reader_draft.id,
		editor_draft: editor_draft.id,
		published: published.id,
		archived: archived.id,
	}
}
