#![windows_subsystem = "windows"]

mod config;
mod database;
mod error;
mod gui;
mod logging;
mod quiz;
mod session;

use config::Config;
use database::Store;

pub type Result<T> = std::result::Result<T, error::Error>;

fn open_store(config: &Config) -> Result<Store> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let store = Store::open(&config.database_path).await?;
        store.initialize(Some(&config.seed_path)).await?;
        Ok(store)
    })
}

fn main() -> Result<()> {
    let config = Config::default();
    logging::init_tracing(&config.log_filter);

    let store = open_store(&config).inspect_err(|e| tracing::error!(%e, "database unavailable"))?;
    tracing::info!(path = %config.database_path.display(), "database ready");

    gui::run(config, store)?;

    Ok(())
}
