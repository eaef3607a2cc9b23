// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folio authorization server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use folio_server::{create_app_state, create_router, ServerError};
use folio_server_config::LogFormat;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod version;

/// Folio server - HTTP surface for Folio authorization.
#[derive(Parser, Debug)]
#[command(name = "folio-server", about = "Folio authorization server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/folio/server.toml)
	#[arg(long, env = "FOLIO_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for folio-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => folio_server_config::load_config_with_file(path),
		None => folio_server_config::load_config(),
	}
	.map_err(ServerError::from)?;

	let fmt_layer = match config.logging.format {
		LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
		LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
	};
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(fmt_layer)
		.init();

	tracing::info!(
		version = env!("CARGO_PKG_VERSION"),
		environment = %config.auth.environment,
		dev_mode = config.auth.dev_mode,
		"Starting folio-server"
	);
	if config.auth.dev_mode {
		tracing::warn!("Dev identity headers are accepted; do not expose this server publicly");
	}

	let pool = folio_server_db::create_pool(&config.database.url)
		.await
		.map_err(ServerError::from)?;
	folio_server_db::run_migrations(&pool)
		.await
		.map_err(ServerError::from)?;

	let state = create_app_state(pool.clone(), &config);
	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!(addr = %addr, base_url = %config.http.base_url, "Listening");
	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	pool.close().await;
	tracing::info!("Server stopped");
	Ok(())
}
