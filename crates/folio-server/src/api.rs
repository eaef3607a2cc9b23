// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	middleware::from_fn_with_state,
	routing::{delete, get, post, put},
	Router,
};
use folio_server_auth::{FactResolver, FolderAccessResolver, Permission, RoleCapabilityTable};
use folio_server_config::ServerConfig;
use folio_server_db::{ContentRepository, FolderRepository, OwnershipRepository};
use sqlx::SqlitePool;

use crate::{
	dev_identity::dev_identity_layer,
	guard_middleware::{RequirePermission, RequireRole},
	routes,
};

/// Shared state for all handlers.
///
/// The capability table is built once and shared. Resolvers hold no per-request state and read
/// current facts on every call.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<ServerConfig>,
	pub pool: SqlitePool,
	pub table: Arc<RoleCapabilityTable>,
	pub folders: FolderAccessResolver,
	pub facts: FactResolver,
	pub folder_repo: FolderRepository,
	pub content_repo: ContentRepository,
}

/// Wire repositories and resolvers over `pool`.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let table = Arc::new(RoleCapabilityTable::standard());
	let fact_timeout = config.authz.fact_timeout();

	let folder_repo = FolderRepository::new(pool.clone());
	let content_repo = ContentRepository::new(pool.clone());
	let ownership_repo = OwnershipRepository::new(pool.clone());

	let folders = FolderAccessResolver::new(Arc::new(folder_repo.clone()), table.clone())
		.with_fact_timeout(fact_timeout);
	let facts =
		FactResolver::new(Arc::new(ownership_repo), table.clone()).with_timeout(fact_timeout);

	tracing::debug!(
		fact_timeout_ms = fact_timeout.as_millis() as u64,
		dev_mode = config.auth.dev_mode,
		"Application state created"
	);

	AppState {
		config: Arc::new(config.clone()),
		pool,
		table,
		folders,
		facts,
		folder_repo,
		content_repo,
	}
}

fn admin_routes(state: &AppState) -> Router<AppState> {
	let system = Router::new()
		.route("/system", get(routes::admin::system_status))
		.route_layer(RequirePermission::system_admin(state.table.clone()));

	let settings = Router::new()
		.route("/settings", get(routes::admin::get_settings))
		.route_layer(RequirePermission::new(
			state.table.clone(),
			Permission::ManageSettings,
		));

	Router::new()
		.route("/roles", get(routes::admin::role_matrix))
		.route_layer(RequireRole::admin())
		.merge(system)
		.merge(settings)
}

fn folder_routes() -> Router<AppState> {
	Router::new()
		.route("/tree", get(routes::folders::get_tree))
		.route("/{id}/path", get(routes::folders::get_path))
		.route("/{id}/access", get(routes::folders::get_access))
		.route("/{id}/permissions", put(routes::folders::grant_permission))
}

fn user_routes() -> Router<AppState> {
	Router::new()
		.route("/{id}", delete(routes::users::delete_user))
		.route("/{id}/role", put(routes::users::assign_role))
}

/// Create the API router with all routes.
pub fn create_router(state: AppState) -> Router {
	let api = Router::new()
		.route("/me/permissions", get(routes::me::get_permissions))
		.route("/content/{id}", get(routes::content::get_content))
		.route("/bulk/{kind}/{op}", post(routes::bulk::bulk_operation))
		.nest("/folders", folder_routes())
		.route("/uploads/check", post(routes::uploads::check_upload))
		.nest("/users", user_routes())
		.nest("/admin", admin_routes(&state))
		.layer(from_fn_with_state(state.clone(), dev_identity_layer));

	Router::new()
		.route("/health", get(routes::health::health_check))
		.nest("/api", api)
		.with_state(state)
}
