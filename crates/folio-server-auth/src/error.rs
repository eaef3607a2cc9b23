// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization error types.
//!
//! Ordinary "no" answers are never errors; they are [`crate::AuthorizationDecision::Denied`].
//! The errors here cover malformed input and failures while gathering facts, and each maps to
//! a fail-closed [`ReasonCode`].

use std::time::Duration;

use thiserror::Error;

use crate::decision::ReasonCode;
use crate::types::FolderId;

/// A role string that is not one of the closed set of roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid role: '{0}'")]
pub struct RoleParseError(pub String);

/// Errors that can occur while evaluating folder access or gathering facts.
#[derive(Debug, Error)]
pub enum AuthError {
	// =========================================================================
	// Malformed input
	// =========================================================================
	/// A role string could not be validated.
	#[error(transparent)]
	InvalidRole(#[from] RoleParseError),

	/// A required resource identifier was missing or unparseable.
	#[error("missing resource id")]
	MissingResourceId,

	// =========================================================================
	// Folder tree
	// =========================================================================
	/// The folder, or one of its ancestors, does not exist.
	#[error("folder not found: {0}")]
	FolderNotFound(FolderId),

	/// The parent chain loops back on itself.
	#[error("cycle detected in folder hierarchy at {0}")]
	CycleDetected(FolderId),

	// =========================================================================
	// Denials that are raised rather than returned
	// =========================================================================
	/// The principal may not see the requested folder path.
	#[error("insufficient permissions")]
	InsufficientPermissions,

	// =========================================================================
	// Infrastructure
	// =========================================================================
	/// The folder store failed.
	#[error("folder store error: {0}")]
	FolderStore(String),

	/// The ownership lookup failed.
	#[error("ownership check error: {0}")]
	OwnershipCheck(String),

	/// A fact lookup did not complete in time.
	#[error("fact lookup timed out after {0:?}")]
	Timeout(Duration),
}

impl AuthError {
	/// Returns true if this error came from infrastructure rather than input or policy.
	pub fn is_internal(&self) -> bool {
		matches!(
			self,
			AuthError::FolderStore(_)
				| AuthError::OwnershipCheck(_)
				| AuthError::Timeout(_)
				| AuthError::CycleDetected(_)
		)
	}

	/// The fail-closed reason code for this error when encountered during a folder check.
	pub fn reason_code(&self) -> ReasonCode {
		match self {
			AuthError::InvalidRole(_) => ReasonCode::InvalidRole,
			AuthError::MissingResourceId => ReasonCode::MissingResourceId,
			AuthError::FolderNotFound(_) => ReasonCode::AccessDenied,
			AuthError::InsufficientPermissions => ReasonCode::InsufficientPermissions,
			AuthError::OwnershipCheck(_) => ReasonCode::OwnershipCheckFailed,
			AuthError::CycleDetected(_) | AuthError::FolderStore(_) | AuthError::Timeout(_) => {
				ReasonCode::FolderCheckFailed
			}
		}
	}
}

pub type Result<T> = std::result::Result<T, AuthError>;
