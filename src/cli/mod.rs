// CLI module for intelliscan
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// intelliscan - Product image and barcode analysis relay backed by Gemini
#[derive(Parser, Debug)]
#[command(name = "intelliscan", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.intelliscan/config.toml if present)
    #[arg(short, long, env = "INTELLISCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides, which take precedence over every other source.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["intelliscan", "--host", "127.0.0.1", "--port", "9001"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9001);
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let args = Args::parse_from(["intelliscan"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
    }
}
