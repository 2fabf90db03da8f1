use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use wordnest_config::Config;
use wordnest_types::{AppEvent, Provider};
use wordnest_wordbook::FileStore;

pub mod audio;
pub mod controller;
pub mod events;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Dictionary lookup, translation and a personal wordbook in the terminal
#[derive(Parser, Debug)]
#[command(name = "wordnest", version)]
struct Args {
    /// Profile whose settings and wordbook to use
    #[arg(short, long, default_value = "main")]
    profile: String,

    /// Use this config file instead of the profile's
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dictionary package to open at startup
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Provider used by `translate` (deepl or gemini)
    #[arg(long)]
    provider: Option<Provider>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Human-readable on a terminal, JSON when redirected
    if atty::is(atty::Stream::Stderr) {
        builder.init();
    } else {
        builder.json().init();
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => profile::load_config_file(path)?,
        None => {
            let root = profile::config_root()?;
            profile::init_user_config(&root)?;
            profile::load_user_profile(&root, &args.profile)?
        }
    };

    config.apply_env();
    if let Some(path) = &args.dictionary {
        config.dictionary.path = Some(path.display().to_string());
    }
    if let Some(provider) = args.provider {
        config.translator.default_provider = provider;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = load_config(&args)?;
    let startup_dictionary = config.dictionary.path.clone().map(PathBuf::from);

    let wordbook_dir = profile::wordbook_dir(&config, &profile::data_root()?, &args.profile);
    tracing::info!("Wordbook storage: {}", wordbook_dir.display());

    let state = Arc::new(AppState::new(config, Box::new(FileStore::new(wordbook_dir)))?);
    state.load_wordbook().await;

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    if let Some(path) = startup_dictionary {
        controller.dispatch(AppEvent::LoadDictionary(path)).await?;
    }

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("Task finished, shutting down"),
                Some(Ok(Err(e))) => tracing::error!("Task failed: {e}"),
                Some(Err(e)) => tracing::error!("Task panicked: {e}"),
                None => tracing::warn!("No tasks running"),
            }
        }
    }

    controller.shutdown();
    tasks.abort_all();
    while tasks.join_next().await.is_some() {}

    Ok(())
}
