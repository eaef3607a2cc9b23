// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-resource authorization policies.
//!
//! Every function here is pure over its inputs and returns a total
//! [`AuthorizationDecision`](crate::AuthorizationDecision). Facts that need I/O (ownership,
//! folder state) are gathered by the caller, see [`crate::facts`] and [`crate::folder`].

pub mod bulk;
pub mod content;
pub mod document;
pub mod folder;
pub mod system;
pub mod template;
pub mod user;

pub use bulk::{
	bulk_operation_permission, can_perform_bulk_operation, BulkOperation, BulkResourceKind,
};
pub use content::can_access_content;
pub use document::{
	can_access_document, can_upload_file, get_max_upload_size, is_allowed_mime_type,
	ALLOWED_UPLOAD_MIME_TYPES,
};
pub use folder::can_manage_folder_permissions;
pub use system::{
	can_access_system_admin, is_exempt_from_rate_limit, require_admin, require_all_permissions,
	require_any_permission, require_editor, require_permission, require_role,
};
pub use template::{can_access_template, TemplateOperation};
pub use user::{can_assign_role, can_assign_role_named, can_delete_user, can_modify_user};
