// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route-level authorization layers.
//!
//! Coarse checks that depend only on the principal's role run as Tower layers in front of a
//! group of routes. Checks that need resource facts (ownership, content state, folder ACLs) run
//! inside handlers against the policy functions directly.
//!
//! - [`RequirePermission`] - the role must hold a permission in the capability table
//! - [`RequireRole`] - the role must sit at or above a level in the hierarchy
//!
//! Requests without a principal are rejected with `AUTHENTICATION_REQUIRED` (401). Denials are
//! logged with the user id and reason code, never with credentials.
//!
//! # Example
//!
//! ```ignore
//! use folio_server::guard_middleware::{RequirePermission, RequireRole};
//!
//! Router::new()
//!     .route("/system", get(system_status))
//!     .route_layer(RequirePermission::system_admin(table.clone()));
//!
//! Router::new()
//!     .route("/drafts", get(list_drafts))
//!     .route_layer(RequireRole::editor());
//! ```

use std::{
	future::Future,
	pin::Pin,
	sync::Arc,
	task::{Context, Poll},
};

use axum::{
	body::Body,
	http::Request,
	response::{IntoResponse, Response},
};
use folio_server_auth::{
	policy, AuthorizationDecision, Permission, Principal, ReasonCode, Role, RoleCapabilityTable,
};
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::api_response::ApiDenial;

fn evaluate(
	principal: Option<&Principal>,
	check: impl FnOnce(Role) -> AuthorizationDecision,
) -> Result<Principal, ReasonCode> {
	let principal = principal.copied().ok_or(ReasonCode::AuthenticationRequired)?;
	check(principal.role).into_result()?;
	Ok(principal)
}

// =============================================================================
// RequirePermission
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PermissionRule {
	Single(Permission),
	SystemAdmin,
}

/// Requires the principal's role to hold a permission.
#[derive(Clone)]
pub struct RequirePermission {
	table: Arc<RoleCapabilityTable>,
	rule: PermissionRule,
}

impl RequirePermission {
	/// Denies with `INSUFFICIENT_PERMISSIONS` when `permission` is not granted.
	pub fn new(table: Arc<RoleCapabilityTable>, permission: Permission) -> Self {
		Self {
			table,
			rule: PermissionRule::Single(permission),
		}
	}

	/// Requires `SYSTEM_ADMIN`, denying with `SYSTEM_ADMIN_REQUIRED`.
	pub fn system_admin(table: Arc<RoleCapabilityTable>) -> Self {
		Self {
			table,
			rule: PermissionRule::SystemAdmin,
		}
	}
}

impl<S> Layer<S> for RequirePermission {
	type Service = RequirePermissionService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequirePermissionService {
			inner,
			table: self.table.clone(),
			rule: self.rule,
		}
	}
}

#[derive(Clone)]
pub struct RequirePermissionService<S> {
	inner: S,
	table: Arc<RoleCapabilityTable>,
	rule: PermissionRule,
}

impl<S> Service<Request<Body>> for RequirePermissionService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = GuardFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let table = &self.table;
		let rule = self.rule;
		let outcome = evaluate(req.extensions().get::<Principal>(), |role| match rule {
			PermissionRule::Single(permission) => policy::require_permission(table, role, permission),
			PermissionRule::SystemAdmin => policy::can_access_system_admin(table, role),
		});

		match outcome {
			Ok(principal) => {
				tracing::debug!(
					user_id = %principal.user_id,
					role = %principal.role,
					rule = ?rule,
					"Permission check passed"
				);
				GuardFuture::Inner {
					fut: self.inner.call(req),
				}
			}
			Err(code) => {
				tracing::info!(
					path = %req.uri().path(),
					rule = ?rule,
					code = %code,
					"Permission check denied"
				);
				GuardFuture::rejected(code)
			}
		}
	}
}

// =============================================================================
// RequireRole
// =============================================================================

/// Requires the principal's role to be at or above a minimum level.
///
/// This is a coarse gate only. It never stands in for a permission check.
#[derive(Debug, Clone, Copy)]
pub struct RequireRole {
	minimum: Role,
}

impl RequireRole {
	pub fn new(minimum: Role) -> Self {
		Self { minimum }
	}

	/// Administrators only, denying with `ADMIN_REQUIRED`.
	pub fn admin() -> Self {
		Self::new(Role::Administrator)
	}

	/// Editors and above, denying with `EDITOR_REQUIRED`.
	pub fn editor() -> Self {
		Self::new(Role::Editor)
	}
}

impl<S> Layer<S> for RequireRole {
	type Service = RequireRoleService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequireRoleService {
			inner,
			minimum: self.minimum,
		}
	}
}

#[derive(Clone)]
pub struct RequireRoleService<S> {
	inner: S,
	minimum: Role,
}

impl<S> Service<Request<Body>> for RequireRoleService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = GuardFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let minimum = self.minimum;
		match evaluate(req.extensions().get::<Principal>(), |role| {
			policy::require_role(role, minimum)
		}) {
			Ok(principal) => {
				tracing::debug!(
					user_id = %principal.user_id,
					role = %principal.role,
					minimum = %minimum,
					"Role check passed"
				);
				GuardFuture::Inner {
					fut: self.inner.call(req),
				}
			}
			Err(code) => {
				tracing::info!(
					path = %req.uri().path(),
					minimum = %minimum,
					code = %code,
					"Role check denied"
				);
				GuardFuture::rejected(code)
			}
		}
	}
}

// =============================================================================
// Shared future
// =============================================================================

pin_project! {
	/// Either the wrapped service's future or an immediate denial.
	#[project = GuardFutureProj]
	pub enum GuardFuture<F> {
		Inner { #[pin] fut: F },
		Rejected { code: ReasonCode },
	}
}

impl<F> GuardFuture<F> {
	fn rejected(code: ReasonCode) -> Self {
		GuardFuture::Rejected { code }
	}
}

impl<F, E> Future for GuardFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			GuardFutureProj::Inner { fut } => fut.poll(cx),
			GuardFutureProj::Rejected { code } => {
				Poll::Ready(Ok(ApiDenial::from(*code).into_response()))
			}
		}
	}
}
