// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder administration policy.

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::rbac::{Permission, RoleCapabilityTable};
use crate::types::Role;

/// Whether a principal may change a folder's ACL.
pub fn can_manage_folder_permissions(
	table: &RoleCapabilityTable,
	role: Role,
	is_owner: bool,
) -> AuthorizationDecision {
	if is_owner {
		return AuthorizationDecision::Allowed;
	}
	AuthorizationDecision::allow_if(
		table.has_any(
			role,
			&[Permission::SetFolderPermissions, Permission::ManageFolders],
		),
		ReasonCode::InsufficientPermissions,
	)
}
