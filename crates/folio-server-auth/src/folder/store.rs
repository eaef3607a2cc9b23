// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use super::types::FolderNode;
use crate::error::Result;
use crate::types::FolderId;

/// Read access to the folder forest.
///
/// Implementations must return current state on every call. The resolver never caches.
#[async_trait]
pub trait FolderStore: Send + Sync {
	async fn get_folder(&self, id: FolderId) -> Result<Option<FolderNode>>;
	async fn list_folders(&self) -> Result<Vec<FolderNode>>;
}
