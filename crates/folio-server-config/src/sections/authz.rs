// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization fact lookup settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_FACT_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzConfig {
	/// Upper bound on a single ownership or folder lookup. Lookups that exceed it deny.
	pub fact_timeout_ms: u64,
}

impl Default for AuthzConfig {
	fn default() -> Self {
		Self {
			fact_timeout_ms: DEFAULT_FACT_TIMEOUT_MS,
		}
	}
}

impl AuthzConfig {
	pub fn fact_timeout(&self) -> Duration {
		Duration::from_millis(self.fact_timeout_ms)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzConfigLayer {
	pub fact_timeout_ms: Option<u64>,
}

impl AuthzConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.fact_timeout_ms.is_some() {
			self.fact_timeout_ms = other.fact_timeout_ms;
		}
	}

	pub fn finalize(self) -> AuthzConfig {
		AuthzConfig {
			fact_timeout_ms: self.fact_timeout_ms.unwrap_or(DEFAULT_FACT_TIMEOUT_MS),
		}
	}
}
