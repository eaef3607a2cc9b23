// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fact gathering for policy decisions.
//!
//! Policies are pure; the facts they need (who owns a resource, what state content is in)
//! come from collaborators. Every lookup here is bounded by a timeout and any failure is a
//! denial, never an allow.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::error::{AuthError, Result};
use crate::folder::DEFAULT_FACT_TIMEOUT;
use crate::policy;
use crate::rbac::RoleCapabilityTable;
use crate::types::{ContentStatus, Principal, ResourceRef, UserId};

/// Looks up whether a user owns a resource.
#[async_trait]
pub trait OwnershipCheck: Send + Sync {
	async fn is_owner(&self, user_id: UserId, resource: ResourceRef) -> Result<bool>;
}

/// Facts about a content item needed to authorize access to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFacts {
	pub status: ContentStatus,
	pub author_id: UserId,
}

/// Gathers ownership facts under a timeout and applies policies to them.
#[derive(Clone)]
pub struct FactResolver {
	ownership: Arc<dyn OwnershipCheck>,
	table: Arc<RoleCapabilityTable>,
	timeout: Duration,
}

impl FactResolver {
	pub fn new(ownership: Arc<dyn OwnershipCheck>, table: Arc<RoleCapabilityTable>) -> Self {
		Self {
			ownership,
			table,
			timeout: DEFAULT_FACT_TIMEOUT,
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn table(&self) -> &RoleCapabilityTable {
		&self.table
	}

	/// Upper bound on any single fact read made on behalf of this resolver.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Whether `principal` owns `resource`.
	///
	/// # Errors
	/// [`AuthError::OwnershipCheck`] if the lookup fails, [`AuthError::Timeout`] if it does not
	/// complete in time. Either maps to `OWNERSHIP_CHECK_FAILED`.
	#[instrument(level = "debug", skip(self, principal), fields(user_id = %principal.user_id, resource = %resource))]
	pub async fn ownership(&self, principal: &Principal, resource: ResourceRef) -> Result<bool> {
		match tokio::time::timeout(self.timeout, self.ownership.is_owner(principal.user_id, resource))
			.await
		{
			Ok(Ok(is_owner)) => Ok(is_owner),
			Ok(Err(e)) => {
				warn!(resource = %resource, error = %e, "ownership check failed");
				Err(match e {
					AuthError::OwnershipCheck(_) => e,
					other => AuthError::OwnershipCheck(other.to_string()),
				})
			}
			Err(_) => {
				warn!(resource = %resource, timeout = ?self.timeout, "ownership check timed out");
				Err(AuthError::Timeout(self.timeout))
			}
		}
	}

	/// Runs `decide` with the looked-up ownership fact, failing closed if the lookup fails.
	pub async fn with_ownership(
		&self,
		principal: &Principal,
		resource: ResourceRef,
		decide: impl FnOnce(bool) -> AuthorizationDecision,
	) -> AuthorizationDecision {
		match self.ownership(principal, resource).await {
			Ok(is_owner) => decide(is_owner),
			Err(_) => AuthorizationDecision::Denied(ReasonCode::OwnershipCheckFailed),
		}
	}
}

/// Content access with ownership derived from the recorded author.
pub fn authorize_content_access(
	table: &RoleCapabilityTable,
	principal: &Principal,
	facts: ContentFacts,
) -> AuthorizationDecision {
	let decision = policy::can_access_content(
		table,
		principal.role,
		facts.status,
		facts.author_id == principal.user_id,
	);
	debug!(user_id = %principal.user_id, status = %facts.status, ?decision, "content access decided");
	decision
}
