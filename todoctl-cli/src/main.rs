//! todoctl CLI - todo list web app and database seeding
//!
//! - `serve`: run the HTTP server (`GET /` lists todos, `POST /add` inserts one)
//! - `seed`: insert one fixed document into a collection

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Minimal todo list web app backed by Postgres"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the todo list HTTP server
    Serve(commands::serve::ServeArgs),
    /// Insert the seed document into a collection
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    // Commands re-read DATABASE_URL/uri after this, so .env values apply
    // even though clap parsed before they were loaded
    config::load_dotenv();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
    }
    Ok(())
}
