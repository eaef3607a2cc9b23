// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder hierarchy access: ACL inheritance, ancestor paths and pruned tree listings.

pub mod memory;
pub mod resolver;
pub mod store;
pub mod types;

pub use memory::InMemoryFolderStore;
pub use resolver::{FolderAccessResolver, DEFAULT_FACT_TIMEOUT};
pub use store::FolderStore;
pub use types::{AclEntry, AclSubject, FolderNode, FolderPathSegment, FolderTreeNode};
