//! Seed command: insert one fixed document into a collection

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value as JsonValue};

use todoctl_server::db::{create_pool, migrations, DocumentRepo};
use todoctl_server::models::Collection;

use crate::config;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides environment and .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Collection to insert into
    #[arg(long, default_value = Collection::SEED_DEFAULT)]
    pub collection: String,
}

/// The document every seed run inserts.
pub fn seed_document() -> JsonValue {
    json!({ "name": "kuleep" })
}

/// Insert the seed document. Runs unconditionally, so repeated runs
/// insert duplicates.
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let collection = Collection::new(&args.collection).context("Invalid --collection")?;
    let database_url = config::database_url(args.database_url)?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let doc = DocumentRepo::new(&pool)
        .insert_one(&collection, seed_document())
        .await
        .with_context(|| format!("Failed to insert into collection '{}'", collection))?;

    tracing::info!(id = %doc.id, collection = %collection, "seed document inserted");
    println!("{}", doc.id);

    Ok(())
}
