// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content access policies.

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::rbac::{Permission, RoleCapabilityTable};
use crate::types::{ContentStatus, Role};

/// Whether a principal may read a content item.
///
/// Published content is readable by any authenticated principal. Drafts and archived items
/// are readable by their owner or by anyone who may update content.
pub fn can_access_content(
	table: &RoleCapabilityTable,
	role: Role,
	status: ContentStatus,
	is_owner: bool,
) -> AuthorizationDecision {
	match status {
		ContentStatus::Published => AuthorizationDecision::Allowed,
		ContentStatus::Draft | ContentStatus::Archived => AuthorizationDecision::allow_if(
			is_owner || table.has_permission(role, Permission::UpdateContent),
			ReasonCode::ContentAccessDenied,
		),
	}
}
