// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder repository for database operations.
//!
//! This module provides database access for the folder forest including:
//! - Folder creation and lookup with their ACL entries
//! - ACL grants and revocations
//! - Cycle-safe moves

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use folio_server_auth::{
	AccessLevel, AclEntry, AclSubject, AuthError, FolderId, FolderNode, FolderStore, Role, UserId,
};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::row::{parse_enum, parse_id};

/// Repository for folder database operations.
///
/// All IDs are UUIDs stored as strings in SQLite.
#[derive(Clone)]
pub struct FolderRepository {
	pool: SqlitePool,
}

impl FolderRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a folder and its initial ACL entries.
	///
	/// # Errors
	/// Returns `DbError::Sqlx` if the id already exists or the parent does not.
	#[tracing::instrument(skip(self, folder), fields(folder_id = %folder.id, owner_id = %owner_id))]
	pub async fn create_folder(&self, folder: &FolderNode, owner_id: UserId) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let mut tx = self.pool.begin().await?;

		sqlx::query(
			r#"
			INSERT INTO folders (id, name, parent_id, is_public, owner_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(folder.id.to_string())
		.bind(&folder.name)
		.bind(folder.parent_id.map(|p| p.to_string()))
		.bind(folder.is_public as i32)
		.bind(owner_id.to_string())
		.bind(&now)
		.bind(&now)
		.execute(&mut *tx)
		.await?;

		for entry in &folder.acl {
			let (subject_type, subject_value) = subject_columns(&entry.subject);
			sqlx::query(
				r#"
				INSERT INTO folder_acl (folder_id, subject_type, subject_value, access, created_at)
				VALUES (?, ?, ?, ?, ?)
				"#,
			)
			.bind(folder.id.to_string())
			.bind(subject_type)
			.bind(subject_value)
			.bind(entry.access.to_string())
			.bind(&now)
			.execute(&mut *tx)
			.await?;
		}

		tx.commit().await?;
		tracing::debug!(folder_id = %folder.id, entries = folder.acl.len(), "folder created");
		Ok(())
	}

	/// Get a folder with its ACL.
	///
	/// # Returns
	/// `None` if no folder exists with this ID.
	#[tracing::instrument(skip(self), fields(folder_id = %id))]
	pub async fn get_folder(&self, id: FolderId) -> Result<Option<FolderNode>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, parent_id, is_public
			FROM folders
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		let Some(row) = row else {
			return Ok(None);
		};
		let mut folder = row_to_folder(&row)?;

		let acl_rows = sqlx::query(
			r#"
			SELECT subject_type, subject_value, access
			FROM folder_acl
			WHERE folder_id = ?
			ORDER BY subject_type, subject_value
			"#,
		)
		.bind(id.to_string())
		.fetch_all(&self.pool)
		.await?;

		folder.acl = acl_rows
			.iter()
			.map(row_to_acl_entry)
			.collect::<Result<_, _>>()?;
		Ok(Some(folder))
	}

	/// List every folder with its ACL.
	#[tracing::instrument(skip(self))]
	pub async fn list_folders(&self) -> Result<Vec<FolderNode>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, name, parent_id, is_public
			FROM folders
			ORDER BY name
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		let acl_rows = sqlx::query(
			r#"
			SELECT folder_id, subject_type, subject_value, access
			FROM folder_acl
			ORDER BY folder_id, subject_type, subject_value
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		let mut acls: HashMap<FolderId, Vec<AclEntry>> = HashMap::new();
		for row in &acl_rows {
			let folder_id: String = row.get("folder_id");
			acls
				.entry(parse_id(&folder_id, "folder_id")?)
				.or_default()
				.push(row_to_acl_entry(row)?);
		}

		rows
			.iter()
			.map(|row| {
				let mut folder = row_to_folder(row)?;
				folder.acl = acls.remove(&folder.id).unwrap_or_default();
				Ok::<_, DbError>(folder)
			})
			.collect()
	}

	/// Grant or change an ACL entry. An existing entry for the same subject is replaced.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the folder does not exist.
	#[tracing::instrument(skip(self), fields(folder_id = %folder_id))]
	pub async fn grant_access(&self, folder_id: FolderId, entry: AclEntry) -> Result<(), DbError> {
		let (subject_type, subject_value) = subject_columns(&entry.subject);
		let result = sqlx::query(
			r#"
			INSERT INTO folder_acl (folder_id, subject_type, subject_value, access, created_at)
			SELECT id, ?, ?, ?, ? FROM folders WHERE id = ?
			ON CONFLICT (folder_id, subject_type, subject_value)
			DO UPDATE SET access = excluded.access
			"#,
		)
		.bind(subject_type)
		.bind(subject_value)
		.bind(entry.access.to_string())
		.bind(Utc::now().to_rfc3339())
		.bind(folder_id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("folder {folder_id}")));
		}

		tracing::debug!(folder_id = %folder_id, access = %entry.access, "folder access granted");
		Ok(())
	}

	/// Remove a subject's ACL entry.
	///
	/// # Returns
	/// `true` if an entry was removed.
	#[tracing::instrument(skip(self), fields(folder_id = %folder_id))]
	pub async fn revoke_access(
		&self,
		folder_id: FolderId,
		subject: AclSubject,
	) -> Result<bool, DbError> {
		let (subject_type, subject_value) = subject_columns(&subject);
		let result = sqlx::query(
			r#"
			DELETE FROM folder_acl
			WHERE folder_id = ? AND subject_type = ? AND subject_value = ?
			"#,
		)
		.bind(folder_id.to_string())
		.bind(subject_type)
		.bind(subject_value)
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	#[tracing::instrument(skip(self), fields(folder_id = %folder_id))]
	pub async fn set_public(&self, folder_id: FolderId, is_public: bool) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE folders SET is_public = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(is_public as i32)
		.bind(Utc::now().to_rfc3339())
		.bind(folder_id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("folder {folder_id}")));
		}
		Ok(())
	}

	/// Re-parent a folder, refusing any move that would make it its own ancestor.
	///
	/// The ancestor walk and the update run in one transaction.
	///
	/// # Errors
	/// - `DbError::NotFound` if the folder or the new parent does not exist
	/// - `DbError::Conflict` if `new_parent` is the folder itself or one of its descendants
	#[tracing::instrument(skip(self), fields(folder_id = %folder_id))]
	pub async fn move_folder(
		&self,
		folder_id: FolderId,
		new_parent: Option<FolderId>,
	) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		let exists = sqlx::query("SELECT 1 FROM folders WHERE id = ?")
			.bind(folder_id.to_string())
			.fetch_optional(&mut *tx)
			.await?;
		if exists.is_none() {
			return Err(DbError::NotFound(format!("folder {folder_id}")));
		}

		let mut seen = HashSet::new();
		let mut cursor = new_parent;
		while let Some(current) = cursor {
			if current == folder_id {
				tracing::warn!(folder_id = %folder_id, "refusing move that would create a cycle");
				return Err(DbError::Conflict(format!(
					"moving folder {folder_id} would make it its own ancestor"
				)));
			}
			if !seen.insert(current) {
				return Err(DbError::Internal(format!(
					"existing cycle in folder hierarchy at {current}"
				)));
			}

			let row = sqlx::query("SELECT parent_id FROM folders WHERE id = ?")
				.bind(current.to_string())
				.fetch_optional(&mut *tx)
				.await?
				.ok_or_else(|| DbError::NotFound(format!("folder {current}")))?;
			let parent_id: Option<String> = row.get("parent_id");
			cursor = parent_id
				.map(|p| parse_id(&p, "parent_id"))
				.transpose()?;
		}

		sqlx::query(
			r#"
			UPDATE folders SET parent_id = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(new_parent.map(|p| p.to_string()))
		.bind(Utc::now().to_rfc3339())
		.bind(folder_id.to_string())
		.execute(&mut *tx)
		.await?;

		tx.commit().await?;
		tracing::debug!(folder_id = %folder_id, "folder moved");
		Ok(())
	}
}

#[async_trait]
impl FolderStore for FolderRepository {
	async fn get_folder(&self, id: FolderId) -> folio_server_auth::Result<Option<FolderNode>> {
		FolderRepository::get_folder(self, id)
			.await
			.map_err(|e| AuthError::FolderStore(e.to_string()))
	}

	async fn list_folders(&self) -> folio_server_auth::Result<Vec<FolderNode>> {
		FolderRepository::list_folders(self)
			.await
			.map_err(|e| AuthError::FolderStore(e.to_string()))
	}
}

fn subject_columns(subject: &AclSubject) -> (&'static str, String) {
	match subject {
		AclSubject::User(id) => ("user", id.to_string()),
		AclSubject::Role(role) => ("role", role.as_str().to_string()),
	}
}

fn row_to_folder(row: &sqlx::sqlite::SqliteRow) -> Result<FolderNode, DbError> {
	let id: String = row.get("id");
	let parent_id: Option<String> = row.get("parent_id");
	let is_public: i32 = row.get("is_public");

	Ok(FolderNode {
		id: parse_id(&id, "folder id")?,
		name: row.get("name"),
		parent_id: parent_id.map(|p| parse_id(&p, "parent_id")).transpose()?,
		is_public: is_public != 0,
		acl: Vec::new(),
	})
}

fn row_to_acl_entry(row: &sqlx::sqlite::SqliteRow) -> Result<AclEntry, DbError> {
	let subject_type: String = row.get("subject_type");
	let subject_value: String = row.get("subject_value");
	let access: String = row.get("access");

	let subject = match subject_type.as_str() {
		"user" => AclSubject::User(parse_id::<UserId>(&subject_value, "acl user")?),
		"role" => AclSubject::Role(parse_enum::<Role>(&subject_value, "acl role")?),
		other => {
			return Err(DbError::Internal(format!(
				"Invalid acl subject_type: {other}"
			)))
		}
	};

	Ok(AclEntry {
		subject,
		access: parse_enum::<AccessLevel>(&access, "acl access")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;
	use folio_server_auth::{FolderAccessResolver, Principal, RoleCapabilityTable};
	use std::sync::Arc;

	async fn make_repo() -> FolderRepository {
		FolderRepository::new(create_test_pool().await)
	}

	async fn create(repo: &FolderRepository, name: &str, parent: Option<FolderId>) -> FolderId {
		let id = FolderId::generate();
		repo.create_folder(&FolderNode::new(id, name, parent), UserId::generate())
			.await
			.unwrap();
		id
	}

	mod crud {
		use super::*;

		#[tokio::test]
		async fn folder_round_trips_with_acl() {
			let repo = make_repo().await;
			let user = UserId::generate();
			let id = FolderId::generate();
			let folder = FolderNode::new(id, "handbook", None)
				.public()
				.with_entry(AclEntry::user(user, AccessLevel::Write))
				.with_entry(AclEntry::role(Role::ReadOnly, AccessLevel::Read));
			repo.create_folder(&folder, user).await.unwrap();

			let got = repo.get_folder(id).await.unwrap().unwrap();
			assert_eq!(got.name, "handbook");
			assert!(got.is_public);
			assert_eq!(got.acl.len(), 2);
			assert!(got.acl.contains(&AclEntry::user(user, AccessLevel::Write)));
		}

		#[tokio::test]
		async fn missing_folder_is_none() {
			let repo = make_repo().await;
			assert!(repo.get_folder(FolderId::generate()).await.unwrap().is_none());
		}

		#[tokio::test]
		async fn parent_must_exist() {
			let repo = make_repo().await;
			let result = repo
				.create_folder(
					&FolderNode::new(FolderId::generate(), "orphan", Some(FolderId::generate())),
					UserId::generate(),
				)
				.await;
			assert!(result.is_err());
		}

		#[tokio::test]
		async fn grant_replaces_existing_entry() {
			let repo = make_repo().await;
			let id = create(&repo, "a", None).await;
			repo.grant_access(id, AclEntry::role(Role::Editor, AccessLevel::Read))
				.await
				.unwrap();
			repo.grant_access(id, AclEntry::role(Role::Editor, AccessLevel::Write))
				.await
				.unwrap();

			let acl = repo.get_folder(id).await.unwrap().unwrap().acl;
			assert_eq!(acl, vec![AclEntry::role(Role::Editor, AccessLevel::Write)]);

			assert!(repo.revoke_access(id, AclSubject::Role(Role::Editor)).await.unwrap());
			assert!(!repo.revoke_access(id, AclSubject::Role(Role::Editor)).await.unwrap());
		}

		#[tokio::test]
		async fn list_groups_acl_by_folder() {
			let repo = make_repo().await;
			let a = create(&repo, "a", None).await;
			let b = create(&repo, "b", Some(a)).await;
			repo.grant_access(b, AclEntry::role(Role::ReadOnly, AccessLevel::Read))
				.await
				.unwrap();

			let folders = repo.list_folders().await.unwrap();
			assert_eq!(folders.len(), 2);
			let b_node = folders.iter().find(|f| f.id == b).unwrap();
			assert_eq!(b_node.parent_id, Some(a));
			assert_eq!(b_node.acl.len(), 1);
			assert!(folders.iter().find(|f| f.id == a).unwrap().acl.is_empty());
		}

		#[tokio::test]
		async fn grant_on_missing_folder_is_not_found() {
			let repo = make_repo().await;
			assert!(matches!(
				repo.grant_access(
					FolderId::generate(),
					AclEntry::role(Role::Editor, AccessLevel::Read)
				)
				.await,
				Err(DbError::NotFound(_))
			));
		}

		#[tokio::test]
		async fn set_public_on_missing_folder_is_not_found() {
			let repo = make_repo().await;
			assert!(matches!(
				repo.set_public(FolderId::generate(), true).await,
				Err(DbError::NotFound(_))
			));
		}
	}

	mod moves {
		use super::*;

		#[tokio::test]
		async fn move_under_sibling_succeeds() {
			let repo = make_repo().await;
			let a = create(&repo, "a", None).await;
			let b = create(&repo, "b", None).await;
			repo.move_folder(b, Some(a)).await.unwrap();
			assert_eq!(repo.get_folder(b).await.unwrap().unwrap().parent_id, Some(a));

			repo.move_folder(b, None).await.unwrap();
			assert_eq!(repo.get_folder(b).await.unwrap().unwrap().parent_id, None);
		}

		#[tokio::test]
		async fn move_into_self_is_refused() {
			let repo = make_repo().await;
			let a = create(&repo, "a", None).await;
			assert!(matches!(
				repo.move_folder(a, Some(a)).await,
				Err(DbError::Conflict(_))
			));
		}

		#[tokio::test]
		async fn move_into_descendant_is_refused() {
			let repo = make_repo().await;
			let a = create(&repo, "a", None).await;
			let b = create(&repo, "b", Some(a)).await;
			let c = create(&repo, "c", Some(b)).await;

			assert!(matches!(
				repo.move_folder(a, Some(c)).await,
				Err(DbError::Conflict(_))
			));
			assert_eq!(repo.get_folder(a).await.unwrap().unwrap().parent_id, None);
		}

		#[tokio::test]
		async fn move_to_missing_parent_is_not_found() {
			let repo = make_repo().await;
			let a = create(&repo, "a", None).await;
			assert!(matches!(
				repo.move_folder(a, Some(FolderId::generate())).await,
				Err(DbError::NotFound(_))
			));
		}
	}

	mod as_store {
		use super::*;

		#[tokio::test]
		async fn resolver_reads_through_repository() {
			let repo = make_repo().await;
			let reader = Principal::new(UserId::generate(), Role::ReadOnly);
			let root = create(&repo, "root", None).await;
			let child = create(&repo, "child", Some(root)).await;
			repo.grant_access(root, AclEntry::user(reader.user_id, AccessLevel::Read))
				.await
				.unwrap();

			let resolver = FolderAccessResolver::new(
				Arc::new(repo.clone()),
				Arc::new(RoleCapabilityTable::standard()),
			);
			assert!(resolver.can_access_folder(child, &reader).await.unwrap());
			assert!(!resolver.has_write_permission(child, &reader).await.unwrap());

			let path = resolver.folder_path(child, &reader).await.unwrap();
			assert_eq!(path.len(), 2);
			assert_eq!(path[0].id, root);
		}

		#[tokio::test]
		async fn revoked_grant_takes_effect_immediately() {
			let repo = make_repo().await;
			let reader = Principal::new(UserId::generate(), Role::ReadOnly);
			let root = create(&repo, "root", None).await;
			repo.grant_access(root, AclEntry::user(reader.user_id, AccessLevel::Read))
				.await
				.unwrap();

			let resolver = FolderAccessResolver::new(
				Arc::new(repo.clone()),
				Arc::new(RoleCapabilityTable::standard()),
			);
			assert!(resolver.authorize_folder_read(root, &reader).await.allowed());

			repo.revoke_access(root, AclSubject::User(reader.user_id))
				.await
				.unwrap();
			assert!(!resolver.authorize_folder_read(root, &reader).await.allowed());
		}
	}
}
