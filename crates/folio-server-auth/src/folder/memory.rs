// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`FolderStore`], used by tests and dev setups without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::FolderStore;
use super::types::FolderNode;
use crate::error::Result;
use crate::types::FolderId;

#[derive(Debug, Default)]
pub struct InMemoryFolderStore {
	folders: RwLock<HashMap<FolderId, FolderNode>>,
}

impl InMemoryFolderStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_folders(folders: impl IntoIterator<Item = FolderNode>) -> Self {
		Self {
			folders: RwLock::new(folders.into_iter().map(|f| (f.id, f)).collect()),
		}
	}

	/// Inserts or replaces a folder.
	pub async fn put(&self, folder: FolderNode) {
		self.folders.write().await.insert(folder.id, folder);
	}

	pub async fn remove(&self, id: FolderId) -> Option<FolderNode> {
		self.folders.write().await.remove(&id)
	}
}

#[async_trait]
impl FolderStore for InMemoryFolderStore {
	async fn get_folder(&self, id: FolderId) -> Result<Option<FolderNode>> {
		Ok(self.folders.read().await.get(&id).cloned())
	}

	async fn list_folders(&self) -> Result<Vec<FolderNode>> {
		Ok(self.folders.read().await.values().cloned().collect())
	}
}
