// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capability tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An atomic granted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
	// User management
	CreateUser,
	ReadUser,
	UpdateUser,
	DeleteUser,
	ManageRoles,

	// Content
	CreateContent,
	ReadContent,
	UpdateContent,
	DeleteContent,
	PublishContent,

	// Documents
	UploadDocument,
	ReadDocument,
	DeleteDocument,

	// Folders and templates
	ManageFolders,
	SetFolderPermissions,
	CreateTemplate,
	ReadTemplate,
	UpdateTemplate,
	DeleteTemplate,

	// System
	SystemAdmin,
	ManageSettings,
}

impl Permission {
	/// Every permission, grouped by domain.
	pub fn all() -> &'static [Permission] {
		&[
			Permission::CreateUser,
			Permission::ReadUser,
			Permission::UpdateUser,
			Permission::DeleteUser,
			Permission::ManageRoles,
			Permission::CreateContent,
			Permission::ReadContent,
			Permission::UpdateContent,
			Permission::DeleteContent,
			Permission::PublishContent,
			Permission::UploadDocument,
			Permission::ReadDocument,
			Permission::DeleteDocument,
			Permission::ManageFolders,
			Permission::SetFolderPermissions,
			Permission::CreateTemplate,
			Permission::ReadTemplate,
			Permission::UpdateTemplate,
			Permission::DeleteTemplate,
			Permission::SystemAdmin,
			Permission::ManageSettings,
		]
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Permission::CreateUser => "CREATE_USER",
			Permission::ReadUser => "READ_USER",
			Permission::UpdateUser => "UPDATE_USER",
			Permission::DeleteUser => "DELETE_USER",
			Permission::ManageRoles => "MANAGE_ROLES",
			Permission::CreateContent => "CREATE_CONTENT",
			Permission::ReadContent => "READ_CONTENT",
			Permission::UpdateContent => "UPDATE_CONTENT",
			Permission::DeleteContent => "DELETE_CONTENT",
			Permission::PublishContent => "PUBLISH_CONTENT",
			Permission::UploadDocument => "UPLOAD_DOCUMENT",
			Permission::ReadDocument => "READ_DOCUMENT",
			Permission::DeleteDocument => "DELETE_DOCUMENT",
			Permission::ManageFolders => "MANAGE_FOLDERS",
			Permission::SetFolderPermissions => "SET_FOLDER_PERMISSIONS",
			Permission::CreateTemplate => "CREATE_TEMPLATE",
			Permission::ReadTemplate => "READ_TEMPLATE",
			Permission::UpdateTemplate => "UPDATE_TEMPLATE",
			Permission::DeleteTemplate => "DELETE_TEMPLATE",
			Permission::SystemAdmin => "SYSTEM_ADMIN",
			Permission::ManageSettings => "MANAGE_SETTINGS",
		}
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
