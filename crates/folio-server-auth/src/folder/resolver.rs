// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder ACL inheritance.
//!
//! A folder is readable by a principal when any of these hold:
//! 1. The principal is an administrator
//! 2. The folder itself is public
//! 3. An ACL entry on the folder or any ancestor names the user or the role
//!
//! Tree listings are stricter: a node is listed only if its parent is listed, so a private
//! ancestor hides its whole subtree even where direct access would succeed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::store::FolderStore;
use super::types::{FolderNode, FolderPathSegment, FolderTreeNode};
use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::error::{AuthError, Result};
use crate::rbac::{Permission, RoleCapabilityTable};
use crate::types::{AccessLevel, FolderId, Principal, Role};

/// Default bound on a single folder fact lookup.
pub const DEFAULT_FACT_TIMEOUT: Duration = Duration::from_secs(2);

/// Resolves folder access against the live folder store.
#[derive(Clone)]
pub struct FolderAccessResolver {
	store: Arc<dyn FolderStore>,
	table: Arc<RoleCapabilityTable>,
	fact_timeout: Duration,
}

impl FolderAccessResolver {
	pub fn new(store: Arc<dyn FolderStore>, table: Arc<RoleCapabilityTable>) -> Self {
		Self {
			store,
			table,
			fact_timeout: DEFAULT_FACT_TIMEOUT,
		}
	}

	pub fn with_fact_timeout(mut self, timeout: Duration) -> Self {
		self.fact_timeout = timeout;
		self
	}

	pub fn fact_timeout(&self) -> Duration {
		self.fact_timeout
	}

	/// Returns the chain from the root down to `folder_id`, inclusive.
	///
	/// # Errors
	/// - [`AuthError::FolderNotFound`] if the folder or a referenced parent is missing
	/// - [`AuthError::CycleDetected`] if the parent links loop
	#[instrument(level = "debug", skip(self), fields(folder_id = %folder_id))]
	pub async fn ancestor_chain(&self, folder_id: FolderId) -> Result<Vec<FolderNode>> {
		let mut chain = Vec::new();
		let mut seen = HashSet::new();
		let mut next = Some(folder_id);

		while let Some(id) = next {
			if !seen.insert(id) {
				warn!(folder_id = %folder_id, at = %id, "cycle in folder hierarchy");
				return Err(AuthError::CycleDetected(id));
			}
			let node = self
				.store
				.get_folder(id)
				.await?
				.ok_or(AuthError::FolderNotFound(id))?;
			next = node.parent_id;
			chain.push(node);
		}

		chain.reverse();
		Ok(chain)
	}

	/// Whether `principal` may read `folder_id`.
	#[instrument(level = "debug", skip(self, principal), fields(folder_id = %folder_id, user_id = %principal.user_id, role = %principal.role))]
	pub async fn can_access_folder(&self, folder_id: FolderId, principal: &Principal) -> Result<bool> {
		if principal.role.is_administrator() {
			return Ok(true);
		}

		let chain = self.ancestor_chain(folder_id).await?;
		Ok(chain_readable(&chain, principal))
	}

	/// Whether `principal` may write into `folder_id`.
	///
	/// Administrators, and editors holding `MANAGE_FOLDERS`, write anywhere. Everyone else
	/// needs a write entry on the folder or an ancestor. Public folders are not writable by
	/// virtue of being public.
	#[instrument(level = "debug", skip(self, principal), fields(folder_id = %folder_id, user_id = %principal.user_id, role = %principal.role))]
	pub async fn has_write_permission(
		&self,
		folder_id: FolderId,
		principal: &Principal,
	) -> Result<bool> {
		if principal.role.is_administrator()
			|| (principal.role == Role::Editor
				&& self
					.table
					.has_permission(principal.role, Permission::ManageFolders))
		{
			return Ok(true);
		}

		let chain = self.ancestor_chain(folder_id).await?;
		Ok(chain
			.iter()
			.any(|node| node.grants(principal, AccessLevel::Write)))
	}

	/// The root-first path to `folder_id`, if the principal may read the folder.
	///
	/// # Errors
	/// [`AuthError::InsufficientPermissions`] if the leaf is not readable; no partial path is
	/// returned.
	pub async fn folder_path(
		&self,
		folder_id: FolderId,
		principal: &Principal,
	) -> Result<Vec<FolderPathSegment>> {
		let chain = self.ancestor_chain(folder_id).await?;
		if !principal.role.is_administrator() && !chain_readable(&chain, principal) {
			return Err(AuthError::InsufficientPermissions);
		}
		Ok(chain.iter().map(FolderPathSegment::from).collect())
	}

	/// The forest of folders visible to `principal`.
	///
	/// Only nodes reachable from a parentless root are considered. Children are ordered by
	/// name.
	#[instrument(level = "debug", skip(self, principal), fields(user_id = %principal.user_id, role = %principal.role))]
	pub async fn folder_tree(&self, principal: &Principal) -> Result<Vec<FolderTreeNode>> {
		let folders = self.store.list_folders().await?;

		let mut children: HashMap<Option<FolderId>, Vec<&FolderNode>> = HashMap::new();
		for folder in &folders {
			children.entry(folder.parent_id).or_default().push(folder);
		}
		for siblings in children.values_mut() {
			siblings.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
		}

		let mut visited = HashSet::new();
		let tree = build_level(&children, None, false, principal, &mut visited);
		debug!(visible = visited.len(), total = folders.len(), "folder tree built");
		Ok(tree)
	}

	/// Fail-closed read check bounded by the fact timeout.
	pub async fn authorize_folder_read(
		&self,
		folder_id: FolderId,
		principal: &Principal,
	) -> AuthorizationDecision {
		self.decide(folder_id, self.can_access_folder(folder_id, principal))
			.await
	}

	/// Fail-closed write check bounded by the fact timeout.
	pub async fn authorize_folder_write(
		&self,
		folder_id: FolderId,
		principal: &Principal,
	) -> AuthorizationDecision {
		self.decide(folder_id, self.has_write_permission(folder_id, principal))
			.await
	}

	async fn decide(
		&self,
		folder_id: FolderId,
		check: impl std::future::Future<Output = Result<bool>>,
	) -> AuthorizationDecision {
		match tokio::time::timeout(self.fact_timeout, check).await {
			Ok(Ok(true)) => AuthorizationDecision::Allowed,
			Ok(Ok(false)) => AuthorizationDecision::Denied(ReasonCode::AccessDenied),
			Ok(Err(e)) => {
				if e.is_internal() {
					warn!(folder_id = %folder_id, error = %e, "folder check failed");
				}
				AuthorizationDecision::Denied(e.reason_code())
			}
			Err(_) => {
				warn!(folder_id = %folder_id, timeout = ?self.fact_timeout, "folder check timed out");
				AuthorizationDecision::Denied(ReasonCode::FolderCheckFailed)
			}
		}
	}
}

/// Read rule over a root-first chain: a public leaf, or a read entry anywhere on the chain.
fn chain_readable(chain: &[FolderNode], principal: &Principal) -> bool {
	chain.last().is_some_and(|leaf| leaf.is_public)
		|| chain
			.iter()
			.any(|node| node.grants(principal, AccessLevel::Read))
}

fn build_level(
	children: &HashMap<Option<FolderId>, Vec<&FolderNode>>,
	parent: Option<FolderId>,
	inherited_grant: bool,
	principal: &Principal,
	visited: &mut HashSet<FolderId>,
) -> Vec<FolderTreeNode> {
	let Some(nodes) = children.get(&parent) else {
		return Vec::new();
	};

	let mut level = Vec::new();
	for node in nodes {
		if !visited.insert(node.id) {
			continue;
		}
		let granted = inherited_grant || node.grants(principal, AccessLevel::Read);
		let visible = principal.role.is_administrator() || node.is_public || granted;
		if !visible {
			visited.remove(&node.id);
			continue;
		}
		level.push(FolderTreeNode {
			id: node.id,
			name: node.name.clone(),
			is_public: node.is_public,
			children: build_level(children, Some(node.id), granted, principal, visited),
		});
	}
	level
}
