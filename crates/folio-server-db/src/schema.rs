// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Table definitions. Every statement is idempotent.

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

const STATEMENTS: &[&str] = &[
	r#"
	CREATE TABLE IF NOT EXISTS folders (
		id TEXT PRIMARY KEY,
		name TEXT NOT NULL,
		parent_id TEXT REFERENCES folders(id),
		is_public INTEGER NOT NULL DEFAULT 0,
		owner_id TEXT NOT NULL,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE INDEX IF NOT EXISTS idx_folders_parent ON folders(parent_id)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS folder_acl (
		folder_id TEXT NOT NULL REFERENCES folders(id) ON DELETE CASCADE,
		subject_type TEXT NOT NULL CHECK (subject_type IN ('user', 'role')),
		subject_value TEXT NOT NULL,
		access TEXT NOT NULL CHECK (access IN ('read', 'write')),
		created_at TEXT NOT NULL,
		PRIMARY KEY (folder_id, subject_type, subject_value)
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS content (
		id TEXT PRIMARY KEY,
		title TEXT NOT NULL,
		status TEXT NOT NULL CHECK (status IN ('draft', 'published', 'archived')),
		author_id TEXT NOT NULL,
		folder_id TEXT REFERENCES folders(id),
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS documents (
		id TEXT PRIMARY KEY,
		folder_id TEXT REFERENCES folders(id),
		owner_id TEXT NOT NULL,
		filename TEXT NOT NULL,
		mime_type TEXT NOT NULL,
		size_bytes INTEGER NOT NULL,
		created_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS templates (
		id TEXT PRIMARY KEY,
		name TEXT NOT NULL,
		owner_id TEXT NOT NULL,
		created_at TEXT NOT NULL
	)
	"#,
];

/// Creates all tables and indexes if they do not exist.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for statement in STATEMENTS {
		sqlx::query(statement).execute(pool).await?;
	}
	tracing::debug!(statements = STATEMENTS.len(), "schema applied");
	Ok(())
}
