// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for Folio.
//!
//! The repositories here back the collaborator traits of `folio-server-auth`:
//! [`FolderRepository`] implements `FolderStore` and [`OwnershipRepository`] implements
//! `OwnershipCheck`. Every read returns current state; nothing is cached.

pub mod content;
pub mod error;
pub mod folder;
pub mod ownership;
pub mod pool;
mod row;
pub mod schema;
pub mod testing;

pub use content::{ContentRecord, ContentRepository};
pub use error::{DbError, Result};
pub use folder::FolderRepository;
pub use ownership::OwnershipRepository;
pub use pool::create_pool;
pub use schema::run_migrations;
