use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use crossway_core::RouterConfig;
use serde::Deserialize;

use crate::error::ServerError;

/// Command line of the routing server. Flags override the config file.
#[derive(Debug, Parser)]
#[command(name = "crossway-server", version, about = "HTTP route planner")]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Network snapshot (JSON)
    #[arg(long)]
    pub network: Option<PathBuf>,

    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    #[arg(long)]
    pub concurrency_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub network: PathBuf,
    pub request_timeout_secs: u64,
    pub concurrency_limit: usize,
    pub router: RouterConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            network: PathBuf::from("network.json"),
            request_timeout_secs: 30,
            concurrency_limit: 64,
            router: RouterConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        Ok(toml::from_str(contents)?)
    }

    /// File (if any) first, then command line flags on top
    pub fn from_args(args: &Args) -> Result<Self, ServerError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(bind) = args.bind {
            config.bind = bind;
        }
        if let Some(network) = &args.network {
            config.network.clone_from(network);
        }
        if let Some(secs) = args.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(limit) = args.concurrency_limit {
            config.concurrency_limit = limit;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Router settings for the planner. Without an explicit query timeout the
    /// search deadline follows the request timeout, so searches whose response
    /// was already dropped do not keep blocking threads busy.
    pub fn router_config(&self) -> RouterConfig {
        let mut router = self.router.clone();
        router
            .query_timeout_ms
            .get_or_insert(self.request_timeout_secs.saturating_mul(1000));
        router
    }

    fn validate(&self) -> Result<(), ServerError> {
        if self.concurrency_limit == 0 {
            return Err(ServerError::Config("concurrency_limit must be positive".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ServerError::Config("request_timeout_secs must be positive".to_string()));
        }
        self.router.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_with_router_section() {
        let config = ServerConfig::from_toml(
            r#"
            bind = "127.0.0.1:9000"
            network = "/data/berlin.json"

            [router]
            max_visited_nodes = 10000
            query_timeout_ms = 2000

            [router.locator]
            search_radii = [0.001, 0.005]

            [router.weighting]
            turn_penalty = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.router.max_visited_nodes, 10_000);
        assert_eq!(config.router.locator.search_radii, vec![0.001, 0.005]);
        assert_eq!(config.router.weighting.turn_penalty, 5.0);
        assert_eq!(config.router.weighting.u_turn_penalty, 15.0);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "crossway-server",
            "--network",
            "other.json",
            "--concurrency-limit",
            "8",
        ]);
        let config = ServerConfig::from_args(&args).unwrap();
        assert_eq!(config.network, PathBuf::from("other.json"));
        assert_eq!(config.concurrency_limit, 8);
        assert_eq!(config.bind.port(), 8080);
    }

    #[test]
    fn query_deadline_follows_request_timeout() {
        let config = ServerConfig::from_toml("request_timeout_secs = 5").unwrap();
        assert_eq!(config.router_config().query_timeout_ms, Some(5000));

        let config = ServerConfig::from_toml(
            r#"
            request_timeout_secs = 5

            [router]
            query_timeout_ms = 750
            "#,
        )
        .unwrap();
        assert_eq!(config.router_config().query_timeout_ms, Some(750));
    }

    #[test]
    fn inverted_speed_bounds_are_rejected() {
        let config = ServerConfig::from_toml(
            r#"
            [router.weighting]
            max_speed = 2.0
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ServerError::Core(crossway_core::Error::InvalidConfig(_))));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let args = Args::parse_from(["crossway-server", "--concurrency-limit", "0"]);
        assert!(ServerConfig::from_args(&args).is_err());
    }
}
