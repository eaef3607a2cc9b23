// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The role → capability grant table and the permission evaluator over it.
//!
//! The table is built once at startup and shared by reference (usually behind an `Arc`).
//! It is never mutated afterwards, so concurrent requests read it without locking.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::Permission;
use crate::types::Role;

const EDITOR_GRANTS: &[Permission] = &[
	// Needed to attribute content to its author.
	Permission::ReadUser,
	Permission::CreateContent,
	Permission::ReadContent,
	Permission::UpdateContent,
	Permission::DeleteContent,
	Permission::PublishContent,
	Permission::UploadDocument,
	Permission::ReadDocument,
	Permission::DeleteDocument,
	Permission::ManageFolders,
	Permission::CreateTemplate,
	Permission::ReadTemplate,
	Permission::UpdateTemplate,
];

const READ_ONLY_GRANTS: &[Permission] = &[
	Permission::ReadContent,
	Permission::ReadDocument,
	Permission::ReadTemplate,
];

/// Immutable mapping from role to granted permissions.
///
/// A role without an entry holds no permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCapabilityTable {
	grants: HashMap<Role, HashSet<Permission>>,
}

impl RoleCapabilityTable {
	/// The platform's grant table.
	pub fn standard() -> Self {
		Self::from_grants([
			(Role::Administrator, Permission::all()),
			(Role::Editor, EDITOR_GRANTS),
			(Role::ReadOnly, READ_ONLY_GRANTS),
		])
	}

	/// Builds a table from explicit per-role grants.
	pub fn from_grants<'a, I>(grants: I) -> Self
	where
		I: IntoIterator<Item = (Role, &'a [Permission])>,
	{
		let grants = grants
			.into_iter()
			.map(|(role, perms)| (role, perms.iter().copied().collect()))
			.collect();
		Self { grants }
	}

	/// Returns true if `role` holds `permission`.
	pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
		let held = self
			.grants
			.get(&role)
			.is_some_and(|set| set.contains(&permission));
		trace!(%role, %permission, held, "permission lookup");
		held
	}

	/// Like [`Self::has_permission`] for a role string that has not been validated.
	///
	/// Unknown role names hold nothing.
	pub fn has_permission_named(&self, role: &str, permission: Permission) -> bool {
		role
			.parse::<Role>()
			.is_ok_and(|role| self.has_permission(role, permission))
	}

	/// True iff at least one of `permissions` is held. Empty input is false.
	pub fn has_any(&self, role: Role, permissions: &[Permission]) -> bool {
		permissions.iter().any(|p| self.has_permission(role, *p))
	}

	/// True iff every one of `permissions` is held. Empty input is true.
	pub fn has_all(&self, role: Role, permissions: &[Permission]) -> bool {
		permissions.iter().all(|p| self.has_permission(role, *p))
	}

	/// The permissions granted to `role`, in declaration order.
	pub fn permissions_for(&self, role: Role) -> Vec<Permission> {
		let Some(set) = self.grants.get(&role) else {
			return Vec::new();
		};
		let mut perms: Vec<Permission> = set.iter().copied().collect();
		perms.sort();
		perms
	}
}

impl Default for RoleCapabilityTable {
	fn default() -> Self {
		Self::standard()
	}
}
