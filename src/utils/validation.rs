use crate::domain::model::{NamedAccounts, Networks};
use crate::utils::error::{ConfigError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static PRIVATE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{64}$").expect("private key pattern"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ConfigError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" | "ws" | "wss" => Ok(()),
            scheme => Err(ConfigError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ConfigError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn is_private_key(value: &str) -> bool {
    PRIVATE_KEY_RE.is_match(value)
}

/// The key itself never appears in the error.
pub fn validate_private_key(field_name: &str, value: &str) -> Result<()> {
    if is_private_key(value) {
        return Ok(());
    }
    Err(ConfigError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: "<redacted>".to_string(),
        reason: "Expected 0x followed by 64 hex digits".to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Every role whose index falls outside a network's account list.
pub fn named_account_issues(named: &NamedAccounts, networks: &Networks) -> Vec<ConfigError> {
    let names = std::iter::once(crate::domain::model::SANDBOX_NETWORK)
        .chain(networks.remote.keys().map(String::as_str));

    names
        .flat_map(move |network| {
            let available = networks.account_count(network).unwrap_or(0);
            named
                .iter()
                .filter(move |(_, index)| **index >= available)
                .map(move |(role, index)| ConfigError::AccountIndexOutOfRange {
                    role: role.clone(),
                    index: *index,
                    network: network.to_string(),
                    available,
                })
        })
        .collect()
}

/// Checks named accounts against the one network that will be active.
pub fn validate_named_accounts(
    named: &NamedAccounts,
    networks: &Networks,
    network: &str,
) -> Result<()> {
    let available = networks
        .account_count(network)
        .ok_or_else(|| ConfigError::UnknownNetwork {
            name: network.to_string(),
        })?;

    match named.iter().find(|(_, index)| **index >= available) {
        Some((role, index)) => Err(ConfigError::AccountIndexOutOfRange {
            role: role.clone(),
            index: *index,
            network: network.to_string(),
            available,
        }),
        None => Ok(()),
    }
}
