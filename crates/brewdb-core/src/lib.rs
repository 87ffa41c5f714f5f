mod app_config;
mod brewery;
mod config;
mod raw;
mod transport;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use brewery::BreweryRecord;
pub use config::{load_app_config, load_app_config_from_env, MAX_PER_PAGE};
pub use raw::{Coordinate, RawBrewery};
pub use transport::BreweryTransport;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
