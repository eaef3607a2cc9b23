// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization core for the Folio content platform.
//!
//! This crate decides, for every request, whether a principal may act on a resource. It
//! composes three sources of truth:
//!
//! - **Role grants**: a fixed [`RoleCapabilityTable`] mapping each [`Role`] to its
//!   [`Permission`]s, evaluated with `has_permission`, `has_any` and `has_all`
//! - **Resource facts**: ownership and content lifecycle state, combined with grants by the
//!   pure functions in [`policy`]
//! - **Folder ACLs**: inherited grants over the folder forest, resolved by
//!   [`FolderAccessResolver`]
//!
//! Every policy returns an [`AuthorizationDecision`]; denials carry a [`ReasonCode`] from a
//! closed set. [`guard`] maps those codes onto transport statuses.
//!
//! Facts that need I/O are fetched through the [`FolderStore`] and [`OwnershipCheck`]
//! collaborator traits under a timeout. A failed or slow lookup is a denial with a
//! `*_CHECK_FAILED` code.
//!
//! # Example
//!
//! ```
//! use folio_server_auth::{policy, ReasonCode, Role, RoleCapabilityTable};
//!
//! let table = RoleCapabilityTable::standard();
//! let decision = policy::can_upload_file(&table, Role::Editor, 60 * 1024 * 1024, "application/pdf");
//! assert_eq!(decision.code(), Some(ReasonCode::FileSizeExceeded));
//! ```

pub mod decision;
pub mod error;
pub mod facts;
pub mod folder;
pub mod guard;
pub mod policy;
pub mod rbac;
pub mod types;

pub use decision::{AuthorizationDecision, ReasonCode};
pub use error::{AuthError, Result, RoleParseError};
pub use facts::{authorize_content_access, ContentFacts, FactResolver, OwnershipCheck};
pub use folder::{
	AclEntry, AclSubject, FolderAccessResolver, FolderNode, FolderPathSegment, FolderStore,
	FolderTreeNode, InMemoryFolderStore,
};
pub use guard::{guard, status_for, GuardDenial};
pub use rbac::{Permission, RoleCapabilityTable};
pub use types::{
	get_role_level, AccessLevel, ContentId, ContentStatus, DocumentId, FolderId, Principal,
	ResourceRef, Role, TemplateId, UserId,
};
