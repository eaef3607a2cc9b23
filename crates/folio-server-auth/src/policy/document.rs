// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document access and upload policies.

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::rbac::{Permission, RoleCapabilityTable};
use crate::types::Role;

const MIB: u64 = 1024 * 1024;

/// MIME types accepted for upload: office documents, plain text and common raster images.
pub const ALLOWED_UPLOAD_MIME_TYPES: &[&str] = &[
	"application/pdf",
	"application/msword",
	"application/vnd.openxmlformats-officedocument.wordprocessingml.document",
	"application/vnd.ms-excel",
	"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
	"application/vnd.ms-powerpoint",
	"application/vnd.openxmlformats-officedocument.presentationml.presentation",
	"text/plain",
	"text/csv",
	"image/jpeg",
	"image/png",
	"image/gif",
	"image/webp",
];

/// Whether a principal may read a document.
///
/// Documents in public folders are readable by anyone. Otherwise explicit folder access is
/// required, or the upload permission, which doubles as a read fallback for uploaders.
pub fn can_access_document(
	table: &RoleCapabilityTable,
	role: Role,
	is_public_folder: bool,
	has_explicit_folder_access: bool,
) -> AuthorizationDecision {
	if is_public_folder {
		return AuthorizationDecision::Allowed;
	}
	AuthorizationDecision::allow_if(
		has_explicit_folder_access || table.has_permission(role, Permission::UploadDocument),
		ReasonCode::DocumentAccessDenied,
	)
}

/// Largest upload a role may make, in bytes.
pub fn get_max_upload_size(role: Role) -> u64 {
	match role {
		Role::Administrator => 100 * MIB,
		Role::Editor => 50 * MIB,
		Role::ReadOnly => 0,
	}
}

/// Returns true if `mime_type` is on the upload allowlist.
///
/// Parameters such as `; charset=utf-8` are ignored and the comparison is case-insensitive.
pub fn is_allowed_mime_type(mime_type: &str) -> bool {
	let essence = mime_type.split(';').next().unwrap_or_default().trim();
	ALLOWED_UPLOAD_MIME_TYPES
		.iter()
		.any(|allowed| allowed.eq_ignore_ascii_case(essence))
}

/// Whether a principal may upload a file of `size` bytes and type `mime_type`.
///
/// Checks run in a fixed order and the first failure decides the code: upload permission,
/// then size ceiling, then file type.
pub fn can_upload_file(
	table: &RoleCapabilityTable,
	role: Role,
	size: u64,
	mime_type: &str,
) -> AuthorizationDecision {
	AuthorizationDecision::allow_if(
		table.has_permission(role, Permission::UploadDocument),
		ReasonCode::UploadPermissionDenied,
	)
	.and_then(|| {
		AuthorizationDecision::allow_if(
			size <= get_max_upload_size(role),
			ReasonCode::FileSizeExceeded,
		)
	})
	.and_then(|| {
		AuthorizationDecision::allow_if(is_allowed_mime_type(mime_type), ReasonCode::InvalidFileType)
	})
}
