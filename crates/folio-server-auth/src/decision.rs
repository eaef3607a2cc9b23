// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decisions and their stable reason codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable reason codes emitted by the authorization core.
///
/// This is the closed set of codes any decision or guard denial can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
	MissingCredentials,
	MissingResourceId,
	AuthenticationRequired,
	InvalidCredentials,
	InsufficientPermissions,
	AccessDenied,
	AdminRequired,
	EditorRequired,
	ContentAccessDenied,
	DocumentAccessDenied,
	TemplateAccessDenied,
	SelfDeleteForbidden,
	SystemAdminRequired,
	UploadPermissionDenied,
	InvalidRole,
	InvalidBulkOperation,
	FileSizeExceeded,
	InvalidFileType,
	OwnershipCheckFailed,
	FolderCheckFailed,
}

impl ReasonCode {
	/// Every reason code, in declaration order.
	pub fn all() -> &'static [ReasonCode] {
		&[
			ReasonCode::MissingCredentials,
			ReasonCode::MissingResourceId,
			ReasonCode::AuthenticationRequired,
			ReasonCode::InvalidCredentials,
			ReasonCode::InsufficientPermissions,
			ReasonCode::AccessDenied,
			ReasonCode::AdminRequired,
			ReasonCode::EditorRequired,
			ReasonCode::ContentAccessDenied,
			ReasonCode::DocumentAccessDenied,
			ReasonCode::TemplateAccessDenied,
			ReasonCode::SelfDeleteForbidden,
			ReasonCode::SystemAdminRequired,
			ReasonCode::UploadPermissionDenied,
			ReasonCode::InvalidRole,
			ReasonCode::InvalidBulkOperation,
			ReasonCode::FileSizeExceeded,
			ReasonCode::InvalidFileType,
			ReasonCode::OwnershipCheckFailed,
			ReasonCode::FolderCheckFailed,
		]
	}

	pub fn as_str(self) -> &'static str {
		match self {
			ReasonCode::MissingCredentials => "MISSING_CREDENTIALS",
			ReasonCode::MissingResourceId => "MISSING_RESOURCE_ID",
			ReasonCode::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
			ReasonCode::InvalidCredentials => "INVALID_CREDENTIALS",
			ReasonCode::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
			ReasonCode::AccessDenied => "ACCESS_DENIED",
			ReasonCode::AdminRequired => "ADMIN_REQUIRED",
			ReasonCode::EditorRequired => "EDITOR_REQUIRED",
			ReasonCode::ContentAccessDenied => "CONTENT_ACCESS_DENIED",
			ReasonCode::DocumentAccessDenied => "DOCUMENT_ACCESS_DENIED",
			ReasonCode::TemplateAccessDenied => "TEMPLATE_ACCESS_DENIED",
			ReasonCode::SelfDeleteForbidden => "SELF_DELETE_FORBIDDEN",
			ReasonCode::SystemAdminRequired => "SYSTEM_ADMIN_REQUIRED",
			ReasonCode::UploadPermissionDenied => "UPLOAD_PERMISSION_DENIED",
			ReasonCode::InvalidRole => "INVALID_ROLE",
			ReasonCode::InvalidBulkOperation => "INVALID_BULK_OPERATION",
			ReasonCode::FileSizeExceeded => "FILE_SIZE_EXCEEDED",
			ReasonCode::InvalidFileType => "INVALID_FILE_TYPE",
			ReasonCode::OwnershipCheckFailed => "OWNERSHIP_CHECK_FAILED",
			ReasonCode::FolderCheckFailed => "FOLDER_CHECK_FAILED",
		}
	}

	/// Returns true for codes raised because a fact could not be gathered.
	pub fn is_check_failure(self) -> bool {
		matches!(
			self,
			ReasonCode::OwnershipCheckFailed | ReasonCode::FolderCheckFailed
		)
	}
}

impl fmt::Display for ReasonCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of every policy function.
///
/// Denials carry the reason code; an allowed decision carries none. On the wire a decision is
/// `{ "allowed": bool, "code": CODE | null }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DecisionBody", try_from = "DecisionBody")]
#[must_use]
pub enum AuthorizationDecision {
	Allowed,
	Denied(ReasonCode),
}

#[derive(Serialize, Deserialize)]
struct DecisionBody {
	allowed: bool,
	code: Option<ReasonCode>,
}

impl From<AuthorizationDecision> for DecisionBody {
	fn from(decision: AuthorizationDecision) -> Self {
		Self {
			allowed: decision.allowed(),
			code: decision.code(),
		}
	}
}

impl TryFrom<DecisionBody> for AuthorizationDecision {
	type Error = &'static str;

	fn try_from(body: DecisionBody) -> Result<Self, Self::Error> {
		match (body.allowed, body.code) {
			(true, None) => Ok(AuthorizationDecision::Allowed),
			(false, Some(code)) => Ok(AuthorizationDecision::Denied(code)),
			(true, Some(_)) => Err("an allowed decision carries no code"),
			(false, None) => Err("a denied decision needs a code"),
		}
	}
}

impl AuthorizationDecision {
	/// Allowed if `condition` holds, otherwise denied with `code`.
	pub fn allow_if(condition: bool, code: ReasonCode) -> Self {
		if condition {
			AuthorizationDecision::Allowed
		} else {
			AuthorizationDecision::Denied(code)
		}
	}

	pub fn allowed(&self) -> bool {
		matches!(self, AuthorizationDecision::Allowed)
	}

	/// The denial code, or `None` when allowed.
	pub fn code(&self) -> Option<ReasonCode> {
		match self {
			AuthorizationDecision::Allowed => None,
			AuthorizationDecision::Denied(code) => Some(*code),
		}
	}

	/// Chains another check that runs only if this one allowed.
	pub fn and_then(self, next: impl FnOnce() -> AuthorizationDecision) -> Self {
		match self {
			AuthorizationDecision::Allowed => next(),
			denied => denied,
		}
	}

	/// Converts into a `Result`, keeping the denial code as the error.
	pub fn into_result(self) -> Result<(), ReasonCode> {
		match self {
			AuthorizationDecision::Allowed => Ok(()),
			AuthorizationDecision::Denied(code) => Err(code),
		}
	}
}
