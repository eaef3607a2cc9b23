// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The transport boundary for decisions.
//!
//! Policies return reason codes only. The mapping from code to HTTP status lives here and
//! nowhere else.

use http::StatusCode;
use serde::Serialize;

use crate::decision::{AuthorizationDecision, ReasonCode};
use crate::error::AuthError;

/// The fixed transport status for a reason code.
pub fn status_for(code: ReasonCode) -> StatusCode {
	match code {
		ReasonCode::MissingCredentials
		| ReasonCode::MissingResourceId
		| ReasonCode::InvalidRole
		| ReasonCode::InvalidBulkOperation => StatusCode::BAD_REQUEST,

		ReasonCode::AuthenticationRequired | ReasonCode::InvalidCredentials => {
			StatusCode::UNAUTHORIZED
		}

		ReasonCode::InsufficientPermissions
		| ReasonCode::AccessDenied
		| ReasonCode::AdminRequired
		| ReasonCode::EditorRequired
		| ReasonCode::ContentAccessDenied
		| ReasonCode::DocumentAccessDenied
		| ReasonCode::TemplateAccessDenied
		| ReasonCode::SelfDeleteForbidden
		| ReasonCode::SystemAdminRequired
		| ReasonCode::UploadPermissionDenied => StatusCode::FORBIDDEN,

		ReasonCode::FileSizeExceeded | ReasonCode::InvalidFileType => {
			StatusCode::UNPROCESSABLE_ENTITY
		}

		ReasonCode::OwnershipCheckFailed | ReasonCode::FolderCheckFailed => {
			StatusCode::INTERNAL_SERVER_ERROR
		}
	}
}

fn default_message(code: ReasonCode) -> &'static str {
	match code {
		ReasonCode::MissingCredentials => "Credentials were not supplied",
		ReasonCode::MissingResourceId => "A resource identifier is required",
		ReasonCode::AuthenticationRequired => "Authentication required",
		ReasonCode::InvalidCredentials => "Credentials are invalid",
		ReasonCode::InsufficientPermissions => "Insufficient permissions",
		ReasonCode::AccessDenied => "Access denied",
		ReasonCode::AdminRequired => "Administrator role required",
		ReasonCode::EditorRequired => "Editor role required",
		ReasonCode::ContentAccessDenied => "Access to this content is denied",
		ReasonCode::DocumentAccessDenied => "Access to this document is denied",
		ReasonCode::TemplateAccessDenied => "Access to this template is denied",
		ReasonCode::SelfDeleteForbidden => "You cannot delete your own account",
		ReasonCode::SystemAdminRequired => "System administration access required",
		ReasonCode::UploadPermissionDenied => "You may not upload files",
		ReasonCode::InvalidRole => "Role is not valid",
		ReasonCode::InvalidBulkOperation => "Bulk operation is not supported for this resource",
		ReasonCode::FileSizeExceeded => "File exceeds the upload size limit",
		ReasonCode::InvalidFileType => "File type is not allowed",
		ReasonCode::OwnershipCheckFailed => "Ownership could not be verified",
		ReasonCode::FolderCheckFailed => "Folder access could not be verified",
	}
}

/// A structured denial, ready to be rendered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardDenial {
	#[serde(skip)]
	pub status: StatusCode,
	#[serde(rename = "error")]
	pub code: ReasonCode,
	pub message: String,
}

impl GuardDenial {
	pub fn new(code: ReasonCode) -> Self {
		Self {
			status: status_for(code),
			code,
			message: default_message(code).to_string(),
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}
}

impl From<ReasonCode> for GuardDenial {
	fn from(code: ReasonCode) -> Self {
		GuardDenial::new(code)
	}
}

impl From<AuthError> for GuardDenial {
	fn from(err: AuthError) -> Self {
		let denial = GuardDenial::new(err.reason_code());
		match err {
			AuthError::InvalidRole(_) => denial.with_message(err.to_string()),
			_ => denial,
		}
	}
}

/// Proceeds on `Allowed`, otherwise returns the denial.
pub fn guard(decision: AuthorizationDecision) -> Result<(), GuardDenial> {
	decision.into_result().map_err(GuardDenial::from)
}
