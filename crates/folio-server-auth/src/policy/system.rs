// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! System administration gates and route-level role/permission requirements.

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::rbac::{Permission, RoleCapabilityTable};
use crate::types::Role;

pub fn can_access_system_admin(table: &RoleCapabilityTable, role: Role) -> AuthorizationDecision {
	AuthorizationDecision::allow_if(
		table.has_permission(role, Permission::SystemAdmin),
		ReasonCode::SystemAdminRequired,
	)
}

/// Only administrators bypass rate limiting.
pub fn is_exempt_from_rate_limit(role: Role) -> bool {
	role.is_administrator()
}

/// Coarse route gate on the role hierarchy.
///
/// This is the only place the role level is compared, and it never grants a permission.
pub fn require_role(role: Role, minimum: Role) -> AuthorizationDecision {
	let code = match minimum {
		Role::Administrator => ReasonCode::AdminRequired,
		Role::Editor => ReasonCode::EditorRequired,
		Role::ReadOnly => ReasonCode::InsufficientPermissions,
	};
	AuthorizationDecision::allow_if(role.level() >= minimum.level(), code)
}

pub fn require_admin(role: Role) -> AuthorizationDecision {
	require_role(role, Role::Administrator)
}

pub fn require_editor(role: Role) -> AuthorizationDecision {
	require_role(role, Role::Editor)
}

pub fn require_permission(
	table: &RoleCapabilityTable,
	role: Role,
	permission: Permission,
) -> AuthorizationDecision {
	AuthorizationDecision::allow_if(
		table.has_permission(role, permission),
		ReasonCode::InsufficientPermissions,
	)
}

pub fn require_any_permission(
	table: &RoleCapabilityTable,
	role: Role,
	permissions: &[Permission],
) -> AuthorizationDecision {
	AuthorizationDecision::allow_if(
		table.has_any(role, permissions),
		ReasonCode::InsufficientPermissions,
	)
}

pub fn require_all_permissions(
	table: &RoleCapabilityTable,
	role: Role,
	permissions: &[Permission],
) -> AuthorizationDecision {
	AuthorizationDecision::allow_if(
		table.has_all(role, permissions),
		ReasonCode::InsufficientPermissions,
	)
}
