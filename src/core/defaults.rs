//! Static literal tables of the composed record.

use std::num::NonZeroU32;

pub const SOLIDITY_VERSION: &str = "0.8.17";
pub const OPTIMIZER_ENABLED: bool = true;
pub const OPTIMIZER_RUNS: NonZeroU32 = match NonZeroU32::new(2000) {
    Some(runs) => runs,
    None => panic!("optimizer runs must be positive"),
};

pub const ZKSOLC_VERSION: &str = "1.3.1";

/// `(role, index)` pairs.
pub const NAMED_ACCOUNTS: &[(&str, usize)] = &[("deployer", 0), ("simpleERC20Beneficiary", 1)];

/// Public networks as `(symbolic name, provider network name)`. The provider
/// name selects the endpoint and the per-network credential variables.
pub const PUBLIC_NETWORKS: &[(&str, &str)] = &[
    ("staging", "rinkeby"),
    ("production", "mainnet"),
    ("mainnet", "mainnet"),
    ("rinkeby", "rinkeby"),
    ("kovan", "kovan"),
    ("goerli", "goerli"),
];

pub const LOCALHOST_NETWORK: &str = "localhost";

pub const ROLLUP_TESTNET: &str = "zkSyncTestnet";
pub const ROLLUP_TESTNET_URL: &str = "https://zksync2-testnet.zksync.dev";
/// Settlement network of the rollup testnet.
pub const ROLLUP_TESTNET_SETTLEMENT: &str = "goerli";

pub const ROLLUP_LOCAL: &str = "zkSyncLocal";
pub const ROLLUP_LOCAL_URL: &str = "http://localhost:3050/";
pub const ROLLUP_LOCAL_SETTLEMENT_URL: &str = "http://localhost:8545/";

pub const SANDBOX_INITIAL_BASE_FEE: u64 = 0;

pub const SOURCES_DIR: &str = "src";
pub const DEPLOYMENTS_DIR: &str = "deployments";

pub const GAS_REPORT_CURRENCY: &str = "USD";
pub const GAS_REPORT_GAS_PRICE: u32 = 100;
pub const GAS_REPORT_MAX_METHOD_DIFF: u32 = 10;

pub const TYPECHAIN_OUT_DIR: &str = "typechain";
pub const TYPECHAIN_TARGET: &str = "ethers-v5";

pub const TEST_TIMEOUT: u64 = 0;

pub const TENDERLY_PROJECT: &str = "template-ethereum-contracts";

/// Environment variables read during composition.
pub mod vars {
    pub const REPORT_GAS: &str = "REPORT_GAS";
    pub const COINMARKETCAP_API_KEY: &str = "COINMARKETCAP_API_KEY";
    pub const HARDHAT_FORK: &str = "HARDHAT_FORK";
    pub const HARDHAT_FORK_NUMBER: &str = "HARDHAT_FORK_NUMBER";
    pub const MINING_INTERVAL: &str = "MINING_INTERVAL";
    pub const TENDERLY_USERNAME: &str = "TENDERLY_USERNAME";
    pub const ETH_NODE_URI: &str = "ETH_NODE_URI";
    pub const INFURA_API_KEY: &str = "INFURA_API_KEY";
    pub const MNEMONIC: &str = "MNEMONIC";

    pub fn node_uri_for(network: &str) -> String {
        format!("ETH_NODE_URI_{}", network.to_uppercase())
    }

    pub fn mnemonic_for(network: &str) -> String {
        format!("MNEMONIC_{}", network.to_uppercase())
    }

    pub fn private_key_for(network: &str) -> String {
        format!("PRIVATE_KEY_{}", network.to_uppercase())
    }
}
