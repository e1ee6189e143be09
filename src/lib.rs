use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use log::info;

pub mod api;
pub mod app;
pub mod catalog;
pub mod draft;
pub mod form;
pub mod settings;
pub mod status;
pub mod ui;

use api::QuizApiClient;
use draft::{DraftStore, FileStorage};
use settings::Settings;

/// Sends `log` output to the configured log file; the terminal belongs to the form.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let path = settings.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

pub fn run(settings: Settings) -> Result<()> {
    info!("PubQuiz starting...");
    info!("Settings loaded: {}", settings.summary());

    let client = QuizApiClient::new(&settings)?;
    let drafts = DraftStore::new(FileStorage::new(settings.draft_dir.clone()));

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(app::run(client, drafts, settings.status_interval()))
}
