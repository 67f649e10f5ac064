pub mod graphql;
pub mod utils;

pub use crate::{config::graphql::GraphQLConfig, defaults};
pub use clap::{Args, Parser};
use serde::Deserialize;
use std::{
    fs::File,
    io::Error,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Error type returned by configuration operations.
#[derive(Error, Debug)]
pub enum EsormConfigError {
    #[error("Error parsing env variables from config")]
    EnvVarParseError(#[from] std::env::VarError),
    #[error("Error processing file: {0:?}")]
    ConfigFileError(#[from] Error),
    #[error("Error processing YAML file: {0:?}")]
    SerdeYamlError(#[from] serde_yaml::Error),
    #[error("Invalid value for {0:?}: expected {1}")]
    InvalidValue(String, String),
}

/// Result type returned by configuration operations.
pub type EsormConfigResult<T> = core::result::Result<T, EsormConfigError>;

/// Environment variable naming the model-definition file.
pub const MODELS_ENV_VAR: &str = "ESORM_MODELS";

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "esorm-graphql",
    about = "GraphQL API over document-store models.",
    version
)]
pub struct ServiceArgs {
    /// Log level passed to the service.
    #[clap(long, default_value = defaults::LOG_LEVEL, value_parser(["info", "debug", "error", "warn"]), help = "Log level passed to the service.")]
    pub log_level: String,

    /// Service config file.
    #[clap(
        short,
        long,
        value_name = "FILE",
        help = "Service config file."
    )]
    pub config: Option<PathBuf>,

    /// Model-definition file.
    #[clap(
        short,
        long,
        value_name = "FILE",
        env = MODELS_ENV_VAR,
        help = "Model-definition file."
    )]
    pub models: Option<PathBuf>,

    /// GraphQL API host.
    #[clap(long, help = "GraphQL API host.", default_value = defaults::GRAPHQL_API_HOST)]
    pub graphql_api_host: String,

    /// GraphQL API port.
    #[clap(long, help = "GraphQL API port.", default_value = defaults::GRAPHQL_API_PORT)]
    pub graphql_api_port: String,

    /// Max body size for GraphQL API requests.
    #[clap(long, help = "Max body size for GraphQL API requests.", default_value_t = defaults::MAX_BODY_SIZE )]
    pub max_body_size: usize,

    /// Enable verbose logging.
    #[clap(short, long, help = "Enable verbose logging.")]
    pub verbose: bool,
}

impl Default for ServiceArgs {
    fn default() -> Self {
        Self {
            log_level: defaults::LOG_LEVEL.to_string(),
            config: None,
            models: None,
            graphql_api_host: defaults::GRAPHQL_API_HOST.to_string(),
            graphql_api_port: defaults::GRAPHQL_API_PORT.to_string(),
            max_body_size: defaults::MAX_BODY_SIZE,
            verbose: defaults::VERBOSE_LOGGING,
        }
    }
}

pub trait Env {
    fn inject_opt_env_vars(&mut self) -> EsormConfigResult<()>;
}

/// Service configuration.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub log_level: String,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub graphql_api: GraphQLConfig,
    #[serde(default)]
    pub models: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::LOG_LEVEL.to_string(),
            verbose: defaults::VERBOSE_LOGGING,
            graphql_api: GraphQLConfig::default(),
            models: None,
        }
    }
}

impl From<ServiceArgs> for ServiceConfig {
    fn from(args: ServiceArgs) -> Self {
        ServiceConfig {
            log_level: args.log_level,
            verbose: args.verbose,
            graphql_api: GraphQLConfig {
                host: args.graphql_api_host,
                port: args.graphql_api_port,
                max_body_size: args.max_body_size,
            },
            models: args.models,
        }
    }
}

impl Env for ServiceConfig {
    fn inject_opt_env_vars(&mut self) -> EsormConfigResult<()> {
        if self.models.is_none() {
            match std::env::var(MODELS_ENV_VAR) {
                Ok(path) => self.models = Some(PathBuf::from(path)),
                Err(std::env::VarError::NotPresent) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

fn yaml_key(key: &str) -> serde_yaml::Value {
    serde_yaml::Value::String(key.into())
}

fn as_str(key: &str, value: &serde_yaml::Value) -> EsormConfigResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| EsormConfigError::InvalidValue(key.into(), "a string".into()))
}

fn as_bool(key: &str, value: &serde_yaml::Value) -> EsormConfigResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| EsormConfigError::InvalidValue(key.into(), "a boolean".into()))
}

fn as_u64(key: &str, value: &serde_yaml::Value) -> EsormConfigResult<u64> {
    value
        .as_u64()
        .ok_or_else(|| EsormConfigError::InvalidValue(key.into(), "an integer".into()))
}

impl ServiceConfig {
    // When building the config via a file, if any section (e.g., graphql_api) or
    // any individual setting in a section (e.g., graphql_api.host) is missing,
    // its default value is used.
    pub fn from_file(path: impl AsRef<Path>) -> EsormConfigResult<Self> {
        let file = File::open(path)?;
        let content: serde_yaml::Value = serde_yaml::from_reader(file)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml_str(content: &str) -> EsormConfigResult<Self> {
        let content: serde_yaml::Value = serde_yaml::from_str(content)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &serde_yaml::Value) -> EsormConfigResult<Self> {
        let mut config = ServiceConfig::default();

        if let Some(log_level) = content.get(yaml_key("log_level")) {
            config.log_level = as_str("log_level", log_level)?;
        }

        if let Some(verbose) = content.get(yaml_key("verbose")) {
            config.verbose = as_bool("verbose", verbose)?;
        }

        if let Some(models) = content.get(yaml_key("models")) {
            config.models = Some(PathBuf::from(as_str("models", models)?));
        }

        if let Some(section) = content.get(yaml_key("graphql_api")) {
            if let Some(host) = section.get(yaml_key("host")) {
                config.graphql_api.host = as_str("graphql_api.host", host)?;
            }

            if let Some(port) = section.get(yaml_key("port")) {
                config.graphql_api.port = as_u64("graphql_api.port", port)?.to_string();
            }

            if let Some(max_body_size) = section.get(yaml_key("max_body_size")) {
                config.graphql_api.max_body_size =
                    as_u64("graphql_api.max_body_size", max_body_size)? as usize;
            }
        }

        config.inject_opt_env_vars()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ServiceConfig::from_yaml_str(
            r#"
log_level: debug
graphql_api:
  port: 8080
models: ./models.yaml
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(!config.verbose);
        assert_eq!(config.graphql_api.host, defaults::GRAPHQL_API_HOST);
        assert_eq!(config.graphql_api.port, "8080");
        assert_eq!(config.graphql_api.max_body_size, defaults::MAX_BODY_SIZE);
        assert_eq!(config.models, Some(PathBuf::from("./models.yaml")));
    }

    #[test]
    fn empty_file_is_the_default_config() {
        let config = ServiceConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.graphql_api, GraphQLConfig::default());
        assert_eq!(config.log_level, defaults::LOG_LEVEL);
    }

    #[test]
    fn wrong_types_are_errors() {
        assert_matches!(
            ServiceConfig::from_yaml_str("graphql_api:\n  port: eighty\n"),
            Err(EsormConfigError::InvalidValue(key, _)) if key == "graphql_api.port"
        );
    }

    #[test]
    fn args_into_config() {
        let args = ServiceArgs::parse_from([
            "esorm-graphql",
            "--graphql-api-port",
            "4000",
            "--models",
            "models.yaml",
            "--verbose",
        ]);
        let config = ServiceConfig::from(args);
        assert_eq!(config.graphql_api.port, "4000");
        assert_eq!(config.graphql_api.http_url(), "http://127.0.0.1:4000");
        assert_eq!(config.models, Some(PathBuf::from("models.yaml")));
        assert!(config.verbose);
    }
}
