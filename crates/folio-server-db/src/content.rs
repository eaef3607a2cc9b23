// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content repository: records and the lifecycle facts access decisions read.

use chrono::{DateTime, Utc};
use folio_server_auth::{ContentFacts, ContentId, ContentStatus, FolderId, UserId};
use serde::Serialize;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::row::{parse_enum, parse_id, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
	pub id: ContentId,
	pub title: String,
	pub status: ContentStatus,
	pub author_id: UserId,
	pub folder_id: Option<FolderId>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
	pub fn new(title: impl Into<String>, author_id: UserId) -> Self {
		let now = Utc::now();
		Self {
			id: ContentId::generate(),
			title: title.into(),
			status: ContentStatus::Draft,
			author_id,
			folder_id: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn facts(&self) -> ContentFacts {
		ContentFacts {
			status: self.status,
			author_id: self.author_id,
		}
	}
}

#[derive(Clone)]
pub struct ContentRepository {
	pool: SqlitePool,
}

impl ContentRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, record), fields(content_id = %record.id))]
	pub async fn create_content(&self, record: &ContentRecord) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO content (id, title, status, author_id, folder_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(record.id.to_string())
		.bind(&record.title)
		.bind(record.status.to_string())
		.bind(record.author_id.to_string())
		.bind(record.folder_id.map(|f| f.to_string()))
		.bind(record.created_at.to_rfc3339())
		.bind(record.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(content_id = %record.id, status = %record.status, "content created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(content_id = %id))]
	pub async fn get_content(&self, id: ContentId) -> Result<Option<ContentRecord>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, title, status, author_id, folder_id, created_at, updated_at
			FROM content
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_content(&r)).transpose()
	}

	/// Status and author only, for access checks.
	#[tracing::instrument(skip(self), fields(content_id = %id))]
	pub async fn get_content_facts(&self, id: ContentId) -> Result<Option<ContentFacts>, DbError> {
		let row = sqlx::query("SELECT status, author_id FROM content WHERE id = ?")
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| {
			let status: String = r.get("status");
			let author_id: String = r.get("author_id");
			Ok::<_, DbError>(ContentFacts {
				status: parse_enum(&status, "status")?,
				author_id: parse_id(&author_id, "author_id")?,
			})
		})
		.transpose()
	}

	#[tracing::instrument(skip(self), fields(content_id = %id, status = %status))]
	pub async fn set_status(&self, id: ContentId, status: ContentStatus) -> Result<(), DbError> {
		let result = sqlx::query("UPDATE content SET status = ?, updated_at = ? WHERE id = ?")
			.bind(status.to_string())
			.bind(Utc::now().to_rfc3339())
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("content {id}")));
		}
		Ok(())
	}
}

fn row_to_content(row: &sqlx::sqlite::SqliteRow) -> Result<ContentRecord, DbError> {
	let id: String = row.get("id");
	let status: String = row.get("status");
	let author_id: String = row.get("author_id");
	let folder_id: Option<String> = row.get("folder_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(ContentRecord {
		id: parse_id(&id, "content id")?,
		title: row.get("title"),
		status: parse_enum(&status, "status")?,
		author_id: parse_id(&author_id, "author_id")?,
		folder_id: folder_id.map(|f| parse_id(&f, "folder_id")).transpose()?,
		created_at: parse_timestamp(&created_at, "created_at")?,
		updated_at: parse_timestamp(&updated_at, "updated_at")?,
	})
}
