// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bulk operation policy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::rbac::{Permission, RoleCapabilityTable};
use crate::types::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperation {
	Delete,
	Update,
	Publish,
}

impl FromStr for BulkOperation {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"delete" => Ok(BulkOperation::Delete),
			"update" => Ok(BulkOperation::Update),
			"publish" => Ok(BulkOperation::Publish),
			other => Err(format!("unknown bulk operation '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkResourceKind {
	Content,
	Document,
	User,
}

impl FromStr for BulkResourceKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"content" => Ok(BulkResourceKind::Content),
			"document" => Ok(BulkResourceKind::Document),
			"user" => Ok(BulkResourceKind::User),
			other => Err(format!("unknown bulk resource kind '{other}'")),
		}
	}
}

/// The permission that gates `op` over `kind`, or `None` if the pair is not a bulk operation.
///
/// Updating documents in bulk is gated by the upload permission; there is no separate
/// document-update permission.
pub fn bulk_operation_permission(op: BulkOperation, kind: BulkResourceKind) -> Option<Permission> {
	use BulkOperation as Op;
	use BulkResourceKind as Kind;

	match (op, kind) {
		(Op::Delete, Kind::Content) => Some(Permission::DeleteContent),
		(Op::Update, Kind::Content) => Some(Permission::UpdateContent),
		(Op::Publish, Kind::Content) => Some(Permission::PublishContent),
		(Op::Delete, Kind::Document) => Some(Permission::DeleteDocument),
		(Op::Update, Kind::Document) => Some(Permission::UploadDocument),
		(Op::Delete, Kind::User) => Some(Permission::DeleteUser),
		(Op::Update, Kind::User) => Some(Permission::UpdateUser),
		(Op::Publish, Kind::Document) | (Op::Publish, Kind::User) => None,
	}
}

pub fn can_perform_bulk_operation(
	table: &RoleCapabilityTable,
	role: Role,
	op: BulkOperation,
	kind: BulkResourceKind,
) -> AuthorizationDecision {
	match bulk_operation_permission(op, kind) {
		Some(permission) => AuthorizationDecision::allow_if(
			table.has_permission(role, permission),
			ReasonCode::InsufficientPermissions,
		),
		None => AuthorizationDecision::Denied(ReasonCode::InvalidBulkOperation),
	}
}
