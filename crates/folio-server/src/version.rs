// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build information for folio-server.

/// Build metadata baked in at compile time.
///
/// `FOLIO_GIT_SHA` and `FOLIO_BUILD_TIMESTAMP` are optional build environment variables.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
	pub version: &'static str,
	pub git_sha: &'static str,
	pub build_timestamp: &'static str,
	pub platform: &'static str,
}

impl BuildInfo {
	pub fn current() -> Self {
		Self {
			version: env!("CARGO_PKG_VERSION"),
			git_sha: option_env!("FOLIO_GIT_SHA").unwrap_or("unknown"),
			build_timestamp: option_env!("FOLIO_BUILD_TIMESTAMP").unwrap_or("unknown"),
			platform: std::env::consts::OS,
		}
	}
}

/// Format version info for display.
pub fn format_version_info() -> String {
	use chrono::{DateTime, Utc};

	let info = BuildInfo::current();

	let mut output = format!(
		"folio-server version: {}\n\
         Git SHA:              {}\n\
         Built at:             {}\n\
         Platform:             {}",
		info.version, info.git_sha, info.build_timestamp, info.platform,
	);

	if let Ok(built_at) = DateTime::parse_from_rfc3339(info.build_timestamp) {
		let built_at_utc: DateTime<Utc> = built_at.into();
		let age = Utc::now().signed_duration_since(built_at_utc);

		if let Ok(std_duration) = age.to_std() {
			output.push_str(&format!(
				"\nBuild age:            {} ({} seconds)",
				humantime::format_duration(std_duration),
				std_duration.as_secs()
			));
		}
	}

	output
}
