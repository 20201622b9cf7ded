// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use taskquip::cli::{self, Cli, Commands};
use taskquip::{db, server, tasks::TaskStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Variables already in the environment win over .env
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `list` output stays clean
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let config = args.to_config();

    match args.command() {
        Commands::Serve => server::run(config).await,
        Commands::List => {
            let pool = db::create_pool(&config.database_url).await?;
            db::ensure_schema(&pool).await?;
            let store = TaskStore::new(pool);
            cli::run_list(&store, &mut std::io::stdout().lock()).await
        }
    }
}
