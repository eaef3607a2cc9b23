// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server startup errors.
//!
//! Request-time failures never surface here; they are rendered as
//! [`ApiDenial`](crate::api_response::ApiDenial) responses.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
	#[error("configuration error: {0}")]
	Config(#[from] folio_server_config::ConfigError),

	#[error("database error: {0}")]
	Db(#[from] folio_server_db::DbError),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
