// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User administration policies.

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::error::RoleParseError;
use crate::types::Role;

/// Whether `assigner` may give a user the `target` role.
///
/// Only administrators assign roles. Every `Role` value is a valid target; unvalidated
/// names go through [`can_assign_role_named`].
pub fn can_assign_role(assigner: Role, _target: Role) -> AuthorizationDecision {
	AuthorizationDecision::allow_if(assigner.is_administrator(), ReasonCode::AdminRequired)
}

/// [`can_assign_role`] for a target role name that has not been validated yet.
///
/// An unknown target is rejected with `INVALID_ROLE` before the assigner is considered.
pub fn can_assign_role_named(assigner: Role, target: &str) -> AuthorizationDecision {
	match target.parse::<Role>() {
		Ok(target) => can_assign_role(assigner, target),
		Err(RoleParseError(_)) => AuthorizationDecision::Denied(ReasonCode::InvalidRole),
	}
}

/// Whether the acting user may modify a user record.
///
/// Users may always edit themselves; restricting that to profile fields is the caller's job.
pub fn can_modify_user(acting: Role, is_self: bool) -> AuthorizationDecision {
	if is_self {
		return AuthorizationDecision::Allowed;
	}
	AuthorizationDecision::allow_if(acting.is_administrator(), ReasonCode::AdminRequired)
}

/// Whether the acting user may delete a user record.
///
/// Deleting your own account is never allowed, administrators included.
pub fn can_delete_user(acting: Role, is_self: bool) -> AuthorizationDecision {
	if is_self {
		return AuthorizationDecision::Denied(ReasonCode::SelfDeleteForbidden);
	}
	AuthorizationDecision::allow_if(acting.is_administrator(), ReasonCode::AdminRequired)
}
