use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use forma::cli::{Cli, Commands};
use forma::commands;
use forma::state::AppState;
use forma::store::Store;
use forma::types::OutputFmt;
use forma::{db, types};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let fmt = if cli.json {
        OutputFmt::Json
    } else {
        OutputFmt::Pretty
    };

    let db_path = db::default_path()?;
    let store = Store::open(&db_path.to_string_lossy()).await?;
    let mut state = AppState::load(store.clone()).await?;

    match cli.cmd {
        Commands::Plan(cmd) => commands::plan::handle(cmd, &mut state, fmt).await?,
        Commands::Workout(cmd) => commands::workout::handle(cmd, &mut state).await?,
        Commands::Measure(cmd) => commands::measure::handle(cmd, &mut state, fmt).await?,
        Commands::Meals(cmd) => commands::meals::handle(cmd, &mut state).await?,
        Commands::Settings(cmd) => commands::settings::handle(cmd, &mut state).await?,
        Commands::Config(cmd) => commands::config::handle(cmd).await?,
        Commands::Sync => {
            let config = types::Config::load(&types::Config::default_path()?)?;
            commands::sync::handle(&config, &mut state).await?;
        }
        Commands::Status { muscle } => commands::status::handle(muscle, &state, fmt)?,
        Commands::Db(cmd) => commands::db::handle(cmd, &mut state, &store).await?,
    }

    Ok(())
}
