// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authorization.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs ([`UserId`], [`FolderId`], etc.)
//! - **Role**: The closed set of platform roles ([`Role`]) with an informational level
//! - **Resource facts**: Content lifecycle ([`ContentStatus`]), folder grant levels
//!   ([`AccessLevel`]) and resource references used by ownership lookups ([`ResourceRef`])
//! - **Principal**: The verified actor a decision is made for ([`Principal`])
//!
//! All ID types serialize transparently as UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::RoleParseError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}

		impl FromStr for $name {
			type Err = uuid::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Uuid::parse_str(s).map(Self)
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(FolderId, "Unique identifier for a folder.");
define_id_type!(ContentId, "Unique identifier for a content item.");
define_id_type!(DocumentId, "Unique identifier for an uploaded document.");
define_id_type!(TemplateId, "Unique identifier for a template.");

// =============================================================================
// Roles
// =============================================================================

/// Platform roles.
///
/// The level ordering is informational only. Permissions are enumerated per role in
/// [`crate::RoleCapabilityTable`] and are never derived from the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
	#[serde(rename = "administrator")]
	Administrator,
	#[serde(rename = "editor")]
	Editor,
	#[serde(rename = "read-only")]
	ReadOnly,
}

impl Role {
	/// Returns all roles, highest level first.
	pub fn all() -> &'static [Role] {
		&[Role::Administrator, Role::Editor, Role::ReadOnly]
	}

	/// Hierarchy level: read-only=1, editor=2, administrator=3.
	pub fn level(self) -> u8 {
		match self {
			Role::ReadOnly => 1,
			Role::Editor => 2,
			Role::Administrator => 3,
		}
	}

	/// Wire name of the role.
	pub fn as_str(self) -> &'static str {
		match self {
			Role::Administrator => "administrator",
			Role::Editor => "editor",
			Role::ReadOnly => "read-only",
		}
	}

	pub fn is_administrator(self) -> bool {
		matches!(self, Role::Administrator)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = RoleParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"administrator" => Ok(Role::Administrator),
			"editor" => Ok(Role::Editor),
			"read-only" => Ok(Role::ReadOnly),
			other => Err(RoleParseError(other.to_string())),
		}
	}
}

/// Returns the hierarchy level of a role.
pub fn get_role_level(role: Role) -> u8 {
	role.level()
}

// =============================================================================
// Resource facts
// =============================================================================

/// Content lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
	Draft,
	Published,
	Archived,
}

impl fmt::Display for ContentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ContentStatus::Draft => write!(f, "draft"),
			ContentStatus::Published => write!(f, "published"),
			ContentStatus::Archived => write!(f, "archived"),
		}
	}
}

impl FromStr for ContentStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"draft" => Ok(ContentStatus::Draft),
			"published" => Ok(ContentStatus::Published),
			"archived" => Ok(ContentStatus::Archived),
			other => Err(format!("unknown content status '{other}'")),
		}
	}
}

/// Grant level of a folder ACL entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
	Read,
	Write,
}

impl AccessLevel {
	/// Returns true if a grant at this level satisfies the `required` level.
	///
	/// A write grant satisfies a read requirement.
	pub fn satisfies(self, required: AccessLevel) -> bool {
		match required {
			AccessLevel::Read => true,
			AccessLevel::Write => self == AccessLevel::Write,
		}
	}
}

impl fmt::Display for AccessLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AccessLevel::Read => write!(f, "read"),
			AccessLevel::Write => write!(f, "write"),
		}
	}
}

impl FromStr for AccessLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"read" => Ok(AccessLevel::Read),
			"write" => Ok(AccessLevel::Write),
			other => Err(format!("unknown access level '{other}'")),
		}
	}
}

/// A resource whose ownership can be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ResourceRef {
	Content(ContentId),
	Document(DocumentId),
	Folder(FolderId),
	Template(TemplateId),
}

impl fmt::Display for ResourceRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResourceRef::Content(id) => write!(f, "content:{id}"),
			ResourceRef::Document(id) => write!(f, "document:{id}"),
			ResourceRef::Folder(id) => write!(f, "folder:{id}"),
			ResourceRef::Template(id) => write!(f, "template:{id}"),
		}
	}
}

// =============================================================================
// Principal
// =============================================================================

/// The verified actor a decision is made on behalf of.
///
/// Built once per request by the identity layer and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub user_id: UserId,
	pub role: Role,
}

impl Principal {
	pub fn new(user_id: UserId, role: Role) -> Self {
		Self { user_id, role }
	}
}
