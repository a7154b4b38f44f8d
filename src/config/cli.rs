use crate::config::CliConfig;
use crate::core::render::render;
use crate::core::{Storage, ToolchainConfig};
use crate::domain::model::SANDBOX_NETWORK;
use crate::utils::error::{ConfigError, Result};
use crate::utils::validation::{named_account_issues, validate_named_accounts, Validate};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// Loads a dotenv file before the environment is snapshotted.
///
/// Variables already present in the process win. A missing `./.env` is fine;
/// a missing explicit `--env-file` is an error.
pub fn load_dotenv(cli: &CliConfig) -> Result<Option<PathBuf>> {
    if cli.no_dotenv {
        return Ok(None);
    }

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
            Ok(Some(path.clone()))
        }
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e.into()),
        },
    }
}

/// Checks the record if asked to and renders the requested part of it.
pub fn render_selection(cli: &CliConfig, config: &ToolchainConfig) -> Result<String> {
    if cli.check {
        check(cli, config)?;
    }

    match cli.network.as_deref() {
        Some(SANDBOX_NETWORK) => render(&config.networks.hardhat, cli.format),
        Some(name) => {
            let profile = config
                .network(name)
                .ok_or_else(|| ConfigError::UnknownNetwork {
                    name: name.to_string(),
                })?;
            render(profile, cli.format)
        }
        None => render(config, cli.format),
    }
}

/// With a selected network, named-account mismatches on it are fatal;
/// otherwise they are only reported.
fn check(cli: &CliConfig, config: &ToolchainConfig) -> Result<()> {
    config.validate()?;

    match cli.network.as_deref() {
        Some(name) => validate_named_accounts(&config.named_accounts, &config.networks, name)?,
        None => {
            for issue in named_account_issues(&config.named_accounts, &config.networks) {
                tracing::warn!("⚠️ {}", issue);
            }
        }
    }

    tracing::info!("✅ Configuration check passed");
    Ok(())
}
