//! Server configuration.
//!
//! Sources are layered, later ones winning:
//! 1. built-in defaults (`Settings::default()`)
//! 2. `config/default.{toml,json,yaml,...}` relative to the working directory
//! 3. `CHATROOM_`-prefixed environment variables, `__` between sections,
//!    e.g. `CHATROOM_HUB__ECHO_TO_SENDER=false`
//!
//! A `.env` file, if present, is loaded into the environment first.

mod settings;

use config::{Config, Environment, File};

pub use settings::{HubSettings, LogSettings, PartialSettings, ServerSettings, Settings};

use crate::utils::HubError;

const ENV_PREFIX: &str = "CHATROOM";

/// Loads the configuration from the default file and environment variables
/// and merges it with default values.
pub fn load_config() -> Result<Settings, HubError> {
    let _ = dotenvy::dotenv();

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let partial: PartialSettings = config.try_deserialize()?;
    Ok(Settings::merge(partial))
}

#[cfg(test)]
mod tests;
