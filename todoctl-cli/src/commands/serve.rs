//! HTTP server command
//!
//! Runs the todo list web app until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::db::{create_pool, migrations};
use todoctl_server::{run_server, MemoryTodoStore, PgTodoStore, ServerConfig, TodoStore};

use crate::config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Database URL (overrides environment and .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Keep todos in memory instead of Postgres (lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn TodoStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; todos are lost on exit");
        Arc::new(MemoryTodoStore::new())
    } else {
        let database_url = config::database_url(args.database_url)?;

        let pool = create_pool(&database_url)
            .await
            .context("Failed to create database pool")?;
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;

        Arc::new(PgTodoStore::new(pool))
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        request_timeout: Duration::from_secs(args.timeout),
    };

    tracing::info!("Starting todoctl server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
