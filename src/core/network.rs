use crate::core::defaults::{self, vars};
use crate::domain::model::{
    Accounts, ForkingConfig, HdAccounts, MiningConfig, NetworkProfile, Networks, SANDBOX_NETWORK,
};
use crate::domain::ports::EnvSource;
use crate::utils::validation::is_private_key;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const LOCALHOST_URL: &str = "http://localhost:8545";
pub const NETWORK_NAME_PLACEHOLDER: &str = "{{networkName}}";

pub const DEFAULT_MNEMONIC: &str = "test test test test test test test test test test test junk";
pub const DEFAULT_HD_PATH: &str = "m/44'/60'/0'/0";
pub const DEFAULT_HD_COUNT: u32 = 20;

/// Publicly known key of the first funded account of a local rollup node.
/// Only [`local_rollup_network`] may use it.
const LOCAL_ROLLUP_DEV_PRIVATE_KEY: &str =
    "0x7726827caac94a7f9e1b160f7ea819f172f7b6f9d2a97f992c38edeab82d4110";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]*\}\}").expect("placeholder pattern"));

/// Resolves the RPC endpoint for `network_name`.
///
/// Order: `ETH_NODE_URI_<NAME>`, the loopback default for `localhost`, the
/// `ETH_NODE_URI` template with `{{networkName}}` filled in, then the default
/// provider URL. Never returns an empty string.
pub fn node_url<E: EnvSource + ?Sized>(env: &E, network_name: &str) -> String {
    if let Some(uri) = env.non_empty(&vars::node_uri_for(network_name)) {
        debug!(network = network_name, "Using explicit node URI override");
        return uri;
    }

    if network_name == defaults::LOCALHOST_NETWORK {
        return LOCALHOST_URL.to_string();
    }

    if let Some(template) = env.non_empty(vars::ETH_NODE_URI) {
        let uri = template.replace(NETWORK_NAME_PLACEHOLDER, network_name);
        if !PLACEHOLDER_RE.is_match(&uri) {
            return uri;
        }
        warn!(
            network = network_name,
            "ETH_NODE_URI has unresolved placeholders, falling back to the default provider"
        );
    }

    default_provider_url(env, network_name)
}

fn default_provider_url<E: EnvSource + ?Sized>(env: &E, network_name: &str) -> String {
    let api_key = env.non_empty(vars::INFURA_API_KEY).unwrap_or_default();
    format!("https://{}.infura.io/v3/{}", network_name, api_key)
}

/// Seed phrase for `network_name`: `MNEMONIC_<NAME>`, then `MNEMONIC`, then
/// the well-known test phrase.
pub fn mnemonic<E: EnvSource + ?Sized>(env: &E, network_name: Option<&str>) -> String {
    network_name
        .and_then(|name| env.non_empty(&vars::mnemonic_for(name)))
        .or_else(|| env.non_empty(vars::MNEMONIC))
        .unwrap_or_else(|| DEFAULT_MNEMONIC.to_string())
}

/// Credentials for `network_name`.
///
/// A set `PRIVATE_KEY_<NAME>` yields exactly that one key; otherwise a
/// mnemonic derivation over the conventional index range.
pub fn accounts<E: EnvSource + ?Sized>(env: &E, network_name: Option<&str>) -> Accounts {
    if let Some(name) = network_name {
        if let Some(key) = env.non_empty(&vars::private_key_for(name)) {
            if !is_private_key(&key) {
                warn!(network = name, "Private key is not 0x-prefixed 32-byte hex");
            }
            return Accounts::PrivateKeys(vec![key]);
        }
    }

    Accounts::Mnemonic(HdAccounts {
        mnemonic: mnemonic(env, network_name),
        path: DEFAULT_HD_PATH.to_string(),
        initial_index: 0,
        count: DEFAULT_HD_COUNT,
    })
}

/// The local rollup node. Reads nothing from the environment.
pub fn local_rollup_network() -> NetworkProfile {
    NetworkProfile::rollup(
        defaults::ROLLUP_LOCAL,
        defaults::ROLLUP_LOCAL_URL,
        defaults::ROLLUP_LOCAL_SETTLEMENT_URL,
        Accounts::PrivateKeys(vec![LOCAL_ROLLUP_DEV_PRIVATE_KEY.to_string()]),
    )
}

/// Points the sandbox network at the network named by `HARDHAT_FORK`.
///
/// When the forked network is in the table its URL wins over `node_url`, and
/// its mnemonic (if any) becomes the sandbox's accounts. Interval mining from
/// `MINING_INTERVAL` is applied whether or not a fork is configured.
pub fn add_fork_configuration<E: EnvSource + ?Sized>(env: &E, mut networks: Networks) -> Networks {
    let fork = env.non_empty(vars::HARDHAT_FORK);
    let mut fork_url = fork.as_deref().map(|name| node_url(env, name));
    let mut fork_accounts = None;

    if let Some(name) = fork.as_deref().filter(|name| *name != SANDBOX_NETWORK) {
        if let Some(profile) = networks.remote.get(name) {
            fork_url = Some(profile.url.clone());
            if let Accounts::Mnemonic(hd) = &profile.accounts {
                fork_accounts = Some(hd.clone());
            }
        }
    }

    if let Some(url) = &fork_url {
        debug!(fork = fork.as_deref().unwrap_or_default(), url = %url, "Forking configured");
    }

    networks.hardhat.accounts = fork_accounts;
    networks.hardhat.forking = fork_url.map(|url| ForkingConfig {
        url,
        block_number: fork_block_number(env),
    });
    networks.hardhat.mining = mining_config(env);
    networks
}

fn fork_block_number<E: EnvSource + ?Sized>(env: &E) -> Option<u64> {
    let raw = env.non_empty(vars::HARDHAT_FORK_NUMBER)?;
    match raw.trim().parse::<u64>() {
        Ok(number) => Some(number),
        Err(e) => {
            warn!(value = %raw, error = %e, "Ignoring unparsable HARDHAT_FORK_NUMBER");
            None
        }
    }
}

fn mining_config<E: EnvSource + ?Sized>(env: &E) -> Option<MiningConfig> {
    let raw = env.non_empty(vars::MINING_INTERVAL)?;
    let interval: Result<Vec<u64>, _> = raw
        .split(',')
        .map(|part| part.trim().parse::<u64>())
        .collect();

    match interval {
        Ok(interval) => Some(MiningConfig {
            auto: false,
            interval,
        }),
        Err(e) => {
            warn!(value = %raw, error = %e, "Ignoring unparsable MINING_INTERVAL");
            None
        }
    }
}
