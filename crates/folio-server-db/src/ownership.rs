// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ownership lookups across resource tables.

use async_trait::async_trait;
use folio_server_auth::{AuthError, OwnershipCheck, ResourceRef, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

#[derive(Clone)]
pub struct OwnershipRepository {
	pool: SqlitePool,
}

impl OwnershipRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// The recorded owner of `resource`, or `None` if it does not exist.
	#[tracing::instrument(skip(self), fields(resource = %resource))]
	pub async fn owner_of(&self, resource: ResourceRef) -> Result<Option<UserId>, DbError> {
		let (sql, id) = match resource {
			ResourceRef::Content(id) => ("SELECT author_id AS owner FROM content WHERE id = ?", id.to_string()),
			ResourceRef::Document(id) => ("SELECT owner_id AS owner FROM documents WHERE id = ?", id.to_string()),
			ResourceRef::Folder(id) => ("SELECT owner_id AS owner FROM folders WHERE id = ?", id.to_string()),
			ResourceRef::Template(id) => ("SELECT owner_id AS owner FROM templates WHERE id = ?", id.to_string()),
		};

		let row = sqlx::query(sql)
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| {
			let owner: String = r.get("owner");
			crate::row::parse_id(&owner, "owner")
		})
		.transpose()
	}

	/// Whether `user_id` owns `resource`. A missing resource is owned by nobody.
	pub async fn is_owner(&self, user_id: UserId, resource: ResourceRef) -> Result<bool, DbError> {
		Ok(self.owner_of(resource).await? == Some(user_id))
	}
}

#[async_trait]
impl OwnershipCheck for OwnershipRepository {
	async fn is_owner(
		&self,
		user_id: UserId,
		resource: ResourceRef,
	) -> folio_server_auth::Result<bool> {
		OwnershipRepository::is_owner(self, user_id, resource)
			.await
			.map_err(|e| AuthError::OwnershipCheck(e.to_string()))
	}
}
