use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_private_key, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Name of the in-process sandbox network.
pub const SANDBOX_NETWORK: &str = "hardhat";

/// Account count the toolchain derives for the sandbox when no accounts are given.
pub const SANDBOX_DEFAULT_ACCOUNT_COUNT: usize = 20;

/// The complete configuration record handed to the contract toolchain.
///
/// Built once by [`crate::core::composer::ConfigComposer`] and never mutated
/// afterwards. Serializes with the toolchain's camelCase key names; optional
/// blocks are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolchainConfig {
    pub zksolc: RollupCompilerProfile,
    pub solidity: SolidityConfig,
    pub named_accounts: NamedAccounts,
    pub networks: Networks,
    pub paths: ProjectPaths,
    pub gas_reporter: GasReporterConfig,
    pub typechain: TypechainConfig,
    pub mocha: TestRunnerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalDeployments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenderly: Option<TenderlyConfig>,
}

impl ToolchainConfig {
    /// Looks up a non-sandbox network by its symbolic name.
    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.remote.get(name)
    }

    /// Every network name, sandbox first.
    pub fn network_names(&self) -> Vec<&str> {
        std::iter::once(SANDBOX_NETWORK)
            .chain(self.networks.remote.keys().map(String::as_str))
            .collect()
    }
}

/// Role name to zero-based index into the active network's account list.
pub type NamedAccounts = BTreeMap<String, usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidityConfig {
    pub compilers: Vec<CompilerProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerProfile {
    pub version: String,
    pub settings: CompilerSettings,
}

impl CompilerProfile {
    pub fn new(version: impl Into<String>, optimizer: OptimizerSettings) -> Self {
        Self {
            version: version.into(),
            settings: CompilerSettings { optimizer },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSettings {
    pub optimizer: OptimizerSettings,
}

/// `runs` stays a positive count even when the optimizer is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: NonZeroU32,
}

/// Settings for the rollup compiler backend (zksolc).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupCompilerProfile {
    pub version: String,
    pub compiler_source: CompilerSource,
    pub settings: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerSource {
    Binary,
    Docker,
}

/// Account credentials for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accounts {
    PrivateKeys(Vec<String>),
    Mnemonic(HdAccounts),
}

impl Accounts {
    /// Number of addressable accounts; a mnemonic exposes `count` of them.
    pub fn len(&self) -> usize {
        match self {
            Self::PrivateKeys(keys) => keys.len(),
            Self::Mnemonic(hd) => hd.count as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hierarchical-deterministic derivation: seed phrase plus index range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdAccounts {
    pub mnemonic: String,
    pub path: String,
    pub initial_index: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NetworksFields")]
pub struct Networks {
    pub hardhat: SandboxNetwork,
    #[serde(flatten)]
    pub remote: BTreeMap<String, NetworkProfile>,
}

/// Serialized shape of [`Networks`]; profile names come back from the map keys.
#[derive(Deserialize)]
struct NetworksFields {
    hardhat: SandboxNetwork,
    #[serde(flatten)]
    remote: BTreeMap<String, NetworkProfile>,
}

impl From<NetworksFields> for Networks {
    fn from(fields: NetworksFields) -> Self {
        let remote = fields
            .remote
            .into_iter()
            .map(|(name, mut profile)| {
                profile.name = name.clone();
                (name, profile)
            })
            .collect();
        Self {
            hardhat: fields.hardhat,
            remote,
        }
    }
}

impl Networks {
    /// Accounts reachable on `name`, or `None` when no such network exists.
    pub fn account_count(&self, name: &str) -> Option<usize> {
        if name == SANDBOX_NETWORK {
            return Some(
                self.hardhat
                    .accounts
                    .as_ref()
                    .map(|hd| hd.count as usize)
                    .unwrap_or(SANDBOX_DEFAULT_ACCOUNT_COUNT),
            );
        }
        self.remote.get(name).map(|profile| profile.accounts.len())
    }
}

/// The in-process network, optionally forking a live one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxNetwork {
    pub initial_base_fee_per_gas: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<HdAccounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forking: Option<ForkingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mining: Option<MiningConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkingConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningConfig {
    pub auto: bool,
    pub interval: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Symbolic name; it is the map key in serialized form.
    #[serde(skip)]
    pub name: String,
    pub url: String,
    pub accounts: Accounts,
    #[serde(flatten)]
    pub target: ExecutionTarget,
}

impl NetworkProfile {
    pub fn evm(name: impl Into<String>, url: impl Into<String>, accounts: Accounts) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            accounts,
            target: ExecutionTarget::Evm,
        }
    }

    pub fn rollup(
        name: impl Into<String>,
        url: impl Into<String>,
        eth_network: impl Into<String>,
        accounts: Accounts,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            accounts,
            target: ExecutionTarget::Rollup {
                eth_network: eth_network.into(),
            },
        }
    }

    pub fn is_rollup(&self) -> bool {
        matches!(self.target, ExecutionTarget::Rollup { .. })
    }

    /// Settlement-layer endpoint of a rollup network.
    pub fn eth_network(&self) -> Option<&str> {
        match &self.target {
            ExecutionTarget::Evm => None,
            ExecutionTarget::Rollup { eth_network } => Some(eth_network),
        }
    }
}

/// Where a network executes. A rollup always knows its settlement endpoint.
///
/// Serialized as the toolchain's `zksync` flag plus `ethNetwork`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TargetFields", try_from = "TargetFields")]
pub enum ExecutionTarget {
    Evm,
    Rollup { eth_network: String },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetFields {
    zksync: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eth_network: Option<String>,
}

impl From<ExecutionTarget> for TargetFields {
    fn from(target: ExecutionTarget) -> Self {
        match target {
            ExecutionTarget::Evm => Self {
                zksync: false,
                eth_network: None,
            },
            ExecutionTarget::Rollup { eth_network } => Self {
                zksync: true,
                eth_network: Some(eth_network),
            },
        }
    }
}

impl TryFrom<TargetFields> for ExecutionTarget {
    type Error = String;

    fn try_from(fields: TargetFields) -> std::result::Result<Self, Self::Error> {
        match (fields.zksync, fields.eth_network) {
            (false, None) => Ok(Self::Evm),
            (true, Some(eth_network)) => Ok(Self::Rollup { eth_network }),
            (true, None) => Err("zksync networks require ethNetwork".to_string()),
            (false, Some(_)) => Err("ethNetwork is only valid on zksync networks".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPaths {
    pub sources: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasReporterConfig {
    pub currency: String,
    pub gas_price: u32,
    pub enabled: bool,
    /// Only carried while the report is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinmarketcap: Option<String>,
    pub max_method_diff: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypechainConfig {
    pub out_dir: PathBuf,
    pub target: String,
}

/// Test runner settings; a zero timeout disables it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunnerConfig {
    pub timeout: u64,
}

/// Where the toolchain picks up deployments made on the forked network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDeployments {
    pub deployments: BTreeMap<String, Vec<PathBuf>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderlyConfig {
    pub project: String,
    pub username: String,
}

impl Validate for ToolchainConfig {
    /// Checks endpoints, literal keys and compiler versions. Named-account
    /// bounds depend on the active network and are checked separately.
    fn validate(&self) -> Result<()> {
        for (i, compiler) in self.solidity.compilers.iter().enumerate() {
            validate_non_empty_string(
                &format!("solidity.compilers[{}].version", i),
                &compiler.version,
            )?;
        }
        validate_non_empty_string("zksolc.version", &self.zksolc.version)?;

        if let Some(forking) = &self.networks.hardhat.forking {
            validate_url("networks.hardhat.forking.url", &forking.url)?;
        }

        for (name, profile) in &self.networks.remote {
            validate_url(&format!("networks.{}.url", name), &profile.url)?;
            if let Some(eth_network) = profile.eth_network() {
                validate_url(&format!("networks.{}.ethNetwork", name), eth_network)?;
            }
            if let Accounts::PrivateKeys(keys) = &profile.accounts {
                for key in keys {
                    validate_private_key(&format!("networks.{}.accounts", name), key)?;
                }
            }
        }

        Ok(())
    }
}
