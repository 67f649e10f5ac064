use crate::config::ServiceConfig;
use anyhow::Context;
use std::{
    env,
    net::{SocketAddr, ToSocketAddrs},
    str::FromStr,
};
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

const RUST_LOG: &str = "RUST_LOG";
const HUMAN_LOGGING: &str = "HUMAN_LOGGING";

/// Derive a `SocketAddr` from a host and port, resolving the host if needed.
pub fn derive_socket_addr(host: &str, port: &str) -> anyhow::Result<SocketAddr> {
    let host = format!("{host}:{port}");
    match SocketAddr::from_str(&host) {
        Ok(v) => Ok(v),
        Err(e) => {
            debug!("Failed to parse '{host}': {e}. Retrying...");
            let addr = host
                .to_socket_addrs()
                .with_context(|| format!("Unable to resolve domain '{host}'"))?
                .last()
                .with_context(|| format!("Could not derive SocketAddr from '{host}'"))?;

            info!("Parsed SocketAddr '{addr:?}' from '{host}'");

            Ok(addr)
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the configured log level. `HUMAN_LOGGING=false`
/// switches to JSON output.
pub fn init_logging(config: &ServiceConfig) -> anyhow::Result<()> {
    let level = match env::var_os(RUST_LOG) {
        Some(level) => level
            .into_string()
            .map_err(|_| anyhow::anyhow!("`RUST_LOG` is not valid unicode"))?,
        None => config.log_level.clone(),
    };

    // We manually suppress some of the more verbose crate logging.
    let directives = if config.verbose {
        level
    } else {
        format!("{level},hyper=warn,tower_http=warn")
    };
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log directives {directives:?}"))?;

    let human_logging = match env::var_os(HUMAN_LOGGING) {
        Some(s) => s
            .to_str()
            .and_then(|s| bool::from_str(s).ok())
            .context("Expected `true` or `false` to be provided for `HUMAN_LOGGING`")?,
        None => true,
    };

    let sub = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    let result = if human_logging {
        sub.with_ansi(true)
            .with_level(true)
            .with_line_number(true)
            .try_init()
    } else {
        sub.with_ansi(false)
            .with_level(true)
            .with_line_number(true)
            .json()
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addrs() {
        assert_eq!(
            derive_socket_addr("127.0.0.1", "29987").unwrap(),
            "127.0.0.1:29987".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(derive_socket_addr("localhost", "80").unwrap().port(), 80);
        assert!(derive_socket_addr("127.0.0.1", "not-a-port").is_err());
    }
}
