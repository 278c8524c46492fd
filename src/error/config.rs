use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The crate requires this environment variable to be defined when building a
    /// configuration with `Config::from_env`. Check `.env.example` for the full list.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}
