pub mod cli;

use crate::core::render::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "contract-toolchain-config")]
#[command(about = "Compose the contract toolchain configuration from the environment")]
pub struct CliConfig {
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Render a single network instead of the whole record
    #[arg(long)]
    pub network: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Validate endpoints, keys and named account indices before rendering
    #[arg(long)]
    pub check: bool,

    /// Load variables from this file instead of ./.env
    #[arg(long, conflicts_with = "no_dotenv")]
    pub env_file: Option<PathBuf>,

    /// Do not load any .env file
    #[arg(long)]
    pub no_dotenv: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = CliConfig::parse_from(["contract-toolchain-config"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.network.is_none());
        assert!(!cli.check);
        assert!(!cli.no_dotenv);
    }

    #[test]
    fn test_env_file_conflicts_with_no_dotenv() {
        let parsed = CliConfig::try_parse_from([
            "contract-toolchain-config",
            "--env-file",
            "ci.env",
            "--no-dotenv",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_single_network_as_toml() {
        let cli = CliConfig::parse_from([
            "contract-toolchain-config",
            "--format",
            "toml",
            "--network",
            "goerli",
            "--check",
        ]);
        assert_eq!(cli.format, OutputFormat::Toml);
        assert_eq!(cli.network.as_deref(), Some("goerli"));
        assert!(cli.check);
    }
}
