//! Service configuration
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "classtab-svc", about = "Textbook-order class-list normalization service")]
pub struct CliArgs {
    /// HTTP listen port
    #[arg(long, env = "CLASSTAB_PORT")]
    pub port: Option<u16>,

    /// Directory for generated workbooks (served under /static)
    #[arg(long, env = "CLASSTAB_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Public base URL used when building download links
    /// (falls back to the request's own base URL)
    #[arg(long, env = "CLASSTAB_BASE_URL")]
    pub base_url: Option<String>,

    /// TOML config file path
    #[arg(long, env = "CLASSTAB_CONFIG")]
    pub config_file: Option<PathBuf>,
}

/// Optional TOML config file contents
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    base_url: Option<String>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub base_url: Option<String>,
}

impl ServiceConfig {
    /// Resolve configuration from CLI args, environment, config file and
    /// defaults. Env vars are folded into `args` by clap.
    pub fn resolve(args: &CliArgs) -> Self {
        let file = args
            .config_file
            .as_ref()
            .and_then(|path| match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<FileConfig>(&content) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Ignoring unparseable config file");
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            static_dir: args
                .static_dir
                .clone()
                .or(file.static_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            base_url: args.base_url.clone().or(file.base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            port: None,
            static_dir: None,
            base_url: None,
            config_file: None,
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServiceConfig::resolve(&no_args());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "port = 6000\nbase_url = \"https://files.example\"\n").unwrap();

        let args = CliArgs {
            port: Some(7000),
            static_dir: None,
            base_url: None,
            config_file: Some(file),
        };
        let config = ServiceConfig::resolve(&args);
        assert_eq!(config.port, 7000);
        assert_eq!(config.base_url.as_deref(), Some("https://files.example"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let args = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/config.toml")),
            ..no_args()
        };
        let config = ServiceConfig::resolve(&args);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
