// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder hierarchy and ACL types.

use serde::{Deserialize, Serialize};

use crate::types::{AccessLevel, FolderId, Principal, Role, UserId};

/// Who an ACL entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AclSubject {
	User(UserId),
	Role(Role),
}

impl AclSubject {
	pub fn matches(&self, user_id: UserId, role: Role) -> bool {
		match self {
			AclSubject::User(id) => *id == user_id,
			AclSubject::Role(r) => *r == role,
		}
	}
}

/// A grant on a folder. It applies to the folder and every descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclEntry {
	pub subject: AclSubject,
	pub access: AccessLevel,
}

impl AclEntry {
	pub fn user(user_id: UserId, access: AccessLevel) -> Self {
		Self {
			subject: AclSubject::User(user_id),
			access,
		}
	}

	pub fn role(role: Role, access: AccessLevel) -> Self {
		Self {
			subject: AclSubject::Role(role),
			access,
		}
	}

	/// Returns true if this entry gives `principal` at least `required` access.
	pub fn grants(&self, principal: &Principal, required: AccessLevel) -> bool {
		self.subject.matches(principal.user_id, principal.role) && self.access.satisfies(required)
	}
}

/// A folder as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
	pub id: FolderId,
	pub name: String,
	pub parent_id: Option<FolderId>,
	pub is_public: bool,
	#[serde(default)]
	pub acl: Vec<AclEntry>,
}

impl FolderNode {
	pub fn new(id: FolderId, name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
		Self {
			id,
			name: name.into(),
			parent_id,
			is_public: false,
			acl: Vec::new(),
		}
	}

	pub fn public(mut self) -> Self {
		self.is_public = true;
		self
	}

	pub fn with_entry(mut self, entry: AclEntry) -> Self {
		self.acl.push(entry);
		self
	}

	/// Returns true if any entry on this node alone gives `principal` `required` access.
	pub fn grants(&self, principal: &Principal, required: AccessLevel) -> bool {
		self.acl.iter().any(|e| e.grants(principal, required))
	}
}

/// A visible folder with its visible children, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTreeNode {
	pub id: FolderId,
	pub name: String,
	pub is_public: bool,
	pub children: Vec<FolderTreeNode>,
}

/// One element of an ancestor path, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPathSegment {
	pub id: FolderId,
	pub name: String,
}

impl From<&FolderNode> for FolderPathSegment {
	fn from(node: &FolderNode) -> Self {
		Self {
			id: node.id,
			name: node.name.clone(),
		}
	}
}
