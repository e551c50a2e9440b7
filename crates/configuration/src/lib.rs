use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, Logging, Profile, Reports, Storage};

/// File read by `load_config` when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "weightwise.toml";

/// Prefix of environment variables that override file values,
/// e.g. `WEIGHTWISE__PROFILE__HEIGHT_CM=172`.
pub const ENV_PREFIX: &str = "WEIGHTWISE";

/// Loads the application configuration from `weightwise.toml` in the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads the configuration from `path`, layering `WEIGHTWISE__*` environment
/// variables on top.
///
/// A missing file is not an error: every setting has a default.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No configuration file found, using defaults.");
    }
    build(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
