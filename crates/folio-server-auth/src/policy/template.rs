// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Template access policy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::rbac::{Permission, RoleCapabilityTable};
use crate::types::Role;

/// Operations on templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateOperation {
	Read,
	Create,
	Update,
	Delete,
}

impl TemplateOperation {
	/// The one permission that gates this operation.
	pub fn required_permission(self) -> Permission {
		match self {
			TemplateOperation::Read => Permission::ReadTemplate,
			TemplateOperation::Create => Permission::CreateTemplate,
			TemplateOperation::Update => Permission::UpdateTemplate,
			TemplateOperation::Delete => Permission::DeleteTemplate,
		}
	}
}

impl FromStr for TemplateOperation {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"read" => Ok(TemplateOperation::Read),
			"create" => Ok(TemplateOperation::Create),
			"update" => Ok(TemplateOperation::Update),
			"delete" => Ok(TemplateOperation::Delete),
			other => Err(format!("unknown template operation '{other}'")),
		}
	}
}

pub fn can_access_template(
	table: &RoleCapabilityTable,
	role: Role,
	op: TemplateOperation,
) -> AuthorizationDecision {
	AuthorizationDecision::allow_if(
		table.has_permission(role, op.required_permission()),
		ReasonCode::TemplateAccessDenied,
	)
}
