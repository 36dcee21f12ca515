use axum::Router;
use nestling_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;

use crate::app;

pub struct Application {
    pub config: AppConfig,
    pub router: Router,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    Ok(bootstrap_with_config(config))
}

pub fn bootstrap_with_config(config: AppConfig) -> Application {
    let router = app::router(&config);
    Application { config, router }
}
