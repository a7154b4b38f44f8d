use crate::core::defaults::{self, vars};
use crate::core::network::{accounts, add_fork_configuration, local_rollup_network, node_url};
use crate::domain::model::{
    CompilerProfile, CompilerSource, ExternalDeployments, GasReporterConfig, NamedAccounts,
    NetworkProfile, Networks, OptimizerSettings, ProjectPaths, RollupCompilerProfile,
    SandboxNetwork, SolidityConfig, TenderlyConfig, TestRunnerConfig, ToolchainConfig,
    TypechainConfig, SANDBOX_NETWORK,
};
use crate::domain::ports::EnvSource;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Builds the [`ToolchainConfig`] from static tables and an environment.
///
/// Composition cannot fail: missing or unusable environment values fall back
/// to defaults or leave an optional block out.
pub struct ConfigComposer<'a, E: EnvSource + ?Sized> {
    env: &'a E,
}

impl<'a, E: EnvSource + ?Sized> ConfigComposer<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self { env }
    }

    pub fn compose(&self) -> ToolchainConfig {
        info!("Composing toolchain configuration");

        let config = ToolchainConfig {
            zksolc: Self::rollup_compiler(),
            solidity: Self::solidity(),
            named_accounts: Self::named_accounts(),
            networks: self.networks(),
            paths: ProjectPaths {
                sources: defaults::SOURCES_DIR.into(),
            },
            gas_reporter: self.gas_reporter(),
            typechain: TypechainConfig {
                out_dir: defaults::TYPECHAIN_OUT_DIR.into(),
                target: defaults::TYPECHAIN_TARGET.to_string(),
            },
            mocha: TestRunnerConfig {
                timeout: defaults::TEST_TIMEOUT,
            },
            external: self.external_deployments(),
            tenderly: self.tenderly(),
        };

        info!(
            networks = config.networks.remote.len() + 1,
            gas_report = config.gas_reporter.enabled,
            forking = config.networks.hardhat.forking.is_some(),
            external_deployments = config.external.is_some(),
            tenderly = config.tenderly.is_some(),
            "Configuration composed"
        );
        config
    }

    fn rollup_compiler() -> RollupCompilerProfile {
        RollupCompilerProfile {
            version: defaults::ZKSOLC_VERSION.to_string(),
            compiler_source: CompilerSource::Binary,
            settings: BTreeMap::new(),
        }
    }

    fn solidity() -> SolidityConfig {
        SolidityConfig {
            compilers: vec![CompilerProfile::new(
                defaults::SOLIDITY_VERSION,
                OptimizerSettings {
                    enabled: defaults::OPTIMIZER_ENABLED,
                    runs: defaults::OPTIMIZER_RUNS,
                },
            )],
        }
    }

    fn named_accounts() -> NamedAccounts {
        defaults::NAMED_ACCOUNTS
            .iter()
            .map(|(role, index)| (role.to_string(), *index))
            .collect()
    }

    fn networks(&self) -> Networks {
        let env = self.env;
        let mut remote = BTreeMap::new();
        let mut insert = |profile: NetworkProfile| {
            debug!(network = %profile.name, url = %profile.url, rollup = profile.is_rollup(), "Network resolved");
            remote.insert(profile.name.clone(), profile);
        };

        insert(NetworkProfile::evm(
            defaults::LOCALHOST_NETWORK,
            node_url(env, defaults::LOCALHOST_NETWORK),
            accounts(env, None),
        ));

        for (name, provider) in defaults::PUBLIC_NETWORKS {
            insert(NetworkProfile::evm(
                *name,
                node_url(env, provider),
                accounts(env, Some(*provider)),
            ));
        }

        insert(NetworkProfile::rollup(
            defaults::ROLLUP_TESTNET,
            defaults::ROLLUP_TESTNET_URL,
            node_url(env, defaults::ROLLUP_TESTNET_SETTLEMENT),
            accounts(env, Some(defaults::ROLLUP_TESTNET_SETTLEMENT)),
        ));
        insert(local_rollup_network());

        let networks = Networks {
            hardhat: SandboxNetwork {
                initial_base_fee_per_gas: defaults::SANDBOX_INITIAL_BASE_FEE,
                accounts: None,
                forking: None,
                mining: None,
            },
            remote,
        };
        add_fork_configuration(env, networks)
    }

    fn gas_reporter(&self) -> GasReporterConfig {
        let enabled = self.env.is_set(vars::REPORT_GAS);
        GasReporterConfig {
            currency: defaults::GAS_REPORT_CURRENCY.to_string(),
            gas_price: defaults::GAS_REPORT_GAS_PRICE,
            enabled,
            coinmarketcap: enabled
                .then(|| self.env.non_empty(vars::COINMARKETCAP_API_KEY))
                .flatten(),
            max_method_diff: defaults::GAS_REPORT_MAX_METHOD_DIFF,
        }
    }

    /// Present only while `HARDHAT_FORK` names the network being forked.
    fn external_deployments(&self) -> Option<ExternalDeployments> {
        let fork = self.env.non_empty(vars::HARDHAT_FORK)?;
        // joined as text: an absolute fork value must not replace the prefix
        let path = PathBuf::from(format!("{}/{}", defaults::DEPLOYMENTS_DIR, fork));

        let deployments = [SANDBOX_NETWORK, defaults::LOCALHOST_NETWORK]
            .into_iter()
            .map(|network| (network.to_string(), vec![path.clone()]))
            .collect();

        debug!(fork = %fork, path = %path.display(), "External deployments enabled");
        Some(ExternalDeployments { deployments })
    }

    fn tenderly(&self) -> Option<TenderlyConfig> {
        self.env
            .non_empty(vars::TENDERLY_USERNAME)
            .map(|username| TenderlyConfig {
                project: defaults::TENDERLY_PROJECT.to_string(),
                username,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::env::EnvSnapshot;
    use crate::domain::model::Accounts;
    use std::num::NonZeroU32;

    #[test]
    fn test_compose_with_empty_environment() {
        let env = EnvSnapshot::default();
        let config = ConfigComposer::new(&env).compose();

        assert_eq!(config.solidity.compilers.len(), 1);
        assert_eq!(config.solidity.compilers[0].version, "0.8.17");
        assert_eq!(config.solidity.compilers[0].settings.optimizer.runs.get(), 2000);
        assert_eq!(config.zksolc.version, "1.3.1");
        assert_eq!(config.named_accounts.get("deployer"), Some(&0));
        assert_eq!(config.named_accounts.get("simpleERC20Beneficiary"), Some(&1));
        assert!(!config.gas_reporter.enabled);
        assert!(config.external.is_none());
        assert!(config.tenderly.is_none());
        assert!(config.networks.hardhat.forking.is_none());
    }

    #[test]
    fn test_public_network_aliases_share_endpoints() {
        let env = EnvSnapshot::from_pairs([("ETH_NODE_URI_RINKEBY", "https://rinkeby.node")]);
        let config = ConfigComposer::new(&env).compose();

        assert_eq!(config.network("staging").unwrap().url, "https://rinkeby.node");
        assert_eq!(config.network("rinkeby").unwrap().url, "https://rinkeby.node");
        assert_eq!(
            config.network("production").unwrap().url,
            config.network("mainnet").unwrap().url
        );
    }

    #[test]
    fn test_rollup_testnet_settles_on_goerli() {
        let key = format!("0x{}", "22".repeat(32));
        let env = EnvSnapshot::from_pairs([
            ("ETH_NODE_URI_GOERLI", "https://goerli.node"),
            ("PRIVATE_KEY_GOERLI", key.as_str()),
        ]);
        let config = ConfigComposer::new(&env).compose();

        let testnet = config.network("zkSyncTestnet").unwrap();
        assert!(testnet.is_rollup());
        assert_eq!(testnet.url, "https://zksync2-testnet.zksync.dev");
        assert_eq!(testnet.eth_network(), Some("https://goerli.node"));
        assert_eq!(testnet.accounts, Accounts::PrivateKeys(vec![key]));
    }

    #[test]
    fn test_gas_reporter_key_requires_toggle() {
        let env = EnvSnapshot::from_pairs([("COINMARKETCAP_API_KEY", "cmc")]);
        let config = ConfigComposer::new(&env).compose();
        assert!(!config.gas_reporter.enabled);
        assert_eq!(config.gas_reporter.coinmarketcap, None);

        let env = EnvSnapshot::from_pairs([("REPORT_GAS", "1"), ("COINMARKETCAP_API_KEY", "cmc")]);
        let config = ConfigComposer::new(&env).compose();
        assert!(config.gas_reporter.enabled);
        assert_eq!(config.gas_reporter.coinmarketcap.as_deref(), Some("cmc"));
    }

    #[test]
    fn test_tenderly_block_follows_username() {
        let env = EnvSnapshot::from_pairs([("TENDERLY_USERNAME", "alice")]);
        let config = ConfigComposer::new(&env).compose();

        let tenderly = config.tenderly.unwrap();
        assert_eq!(tenderly.username, "alice");
        assert_eq!(tenderly.project, "template-ethereum-contracts");
    }

    #[test]
    fn test_absolute_fork_stays_under_deployments() {
        let env = EnvSnapshot::from_pairs([("HARDHAT_FORK", "/etc")]);
        let config = ConfigComposer::new(&env).compose();

        let external = config.external.unwrap();
        for paths in external.deployments.values() {
            assert!(paths[0].starts_with("deployments"));
            assert_eq!(paths[0].to_str(), Some("deployments//etc"));
        }
    }

    #[test]
    fn test_optimizer_change_touches_nothing_else() {
        let env = EnvSnapshot::from_pairs([("HARDHAT_FORK", "mainnet"), ("REPORT_GAS", "true")]);
        let original = ConfigComposer::new(&env).compose();

        let mut tuned = original.clone();
        tuned.solidity.compilers[0].settings.optimizer = OptimizerSettings {
            enabled: false,
            runs: NonZeroU32::new(1).unwrap(),
        };

        assert_ne!(tuned.solidity, original.solidity);
        tuned.solidity = original.solidity.clone();
        assert_eq!(tuned, original);
    }
}
