use contract_toolchain_config::core::network::{accounts, local_rollup_network, node_url};
use contract_toolchain_config::domain::model::{Accounts, OptimizerSettings};
use contract_toolchain_config::{ConfigComposer, EnvSnapshot, ToolchainConfig};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::Path;

const SUPPORTED_NETWORKS: &[&str] = &["localhost", "mainnet", "rinkeby", "kovan", "goerli"];

fn compose(pairs: &[(&str, &str)]) -> ToolchainConfig {
    let env = EnvSnapshot::from_pairs(pairs.iter().copied());
    ConfigComposer::new(&env).compose()
}

#[test]
fn test_every_network_resolves_to_a_url_naming_it() {
    let env = EnvSnapshot::default();

    for name in SUPPORTED_NETWORKS {
        let url = node_url(&env, name);
        assert!(!url.is_empty(), "{} resolved to an empty URL", name);
        assert!(url.contains(name), "{} resolved to {}", name, url);
    }
}

#[test]
fn test_override_wins_for_every_network() {
    let env: HashMap<String, String> = SUPPORTED_NETWORKS
        .iter()
        .map(|name| {
            (
                format!("ETH_NODE_URI_{}", name.to_uppercase()),
                format!("https://override.example/{}", name),
            )
        })
        .collect();

    for name in SUPPORTED_NETWORKS {
        assert_eq!(node_url(&env, name), format!("https://override.example/{}", name));
    }
}

#[test]
fn test_private_key_yields_exactly_that_account() {
    let key = format!("0x{}", "44".repeat(32));
    let env = EnvSnapshot::from_pairs([("PRIVATE_KEY_KOVAN", key.as_str())]);

    match accounts(&env, Some("kovan")) {
        Accounts::PrivateKeys(keys) => assert_eq!(keys, vec![key.clone()]),
        other => panic!("expected a private key list, got {:?}", other),
    }

    let config = ConfigComposer::new(&env).compose();
    assert_eq!(config.network("kovan").unwrap().accounts.len(), 1);
}

#[test]
fn test_without_private_key_accounts_are_a_derivation() {
    let env = EnvSnapshot::default();

    for name in SUPPORTED_NETWORKS {
        let resolved = accounts(&env, Some(*name));
        assert!(matches!(resolved, Accounts::Mnemonic(_)));
        assert!(!resolved.is_empty());
    }
    assert!(!accounts(&env, None).is_empty());
}

#[test]
fn test_external_deployments_follow_fork_variable() {
    assert!(compose(&[]).external.is_none());
    assert!(compose(&[("HARDHAT_FORK", "")]).external.is_none());

    let config = compose(&[("HARDHAT_FORK", "rinkeby")]);
    let external = config.external.expect("fork set, block expected");

    assert_eq!(external.deployments.len(), 2);
    for network in ["hardhat", "localhost"] {
        let paths = &external.deployments[network];
        assert_eq!(paths.len(), 1);
        assert!(paths[0]
            .components()
            .any(|component| component.as_os_str() == "rinkeby"));
        assert_eq!(paths[0], Path::new("deployments").join("rinkeby"));
    }
}

#[test]
fn test_external_deployments_omitted_from_rendered_record() {
    let rendered = serde_json::to_value(compose(&[])).unwrap();
    assert!(rendered.get("external").is_none());
}

#[test]
fn test_local_rollup_accounts_ignore_environment() {
    let fixed = local_rollup_network();

    let noisy = compose(&[
        ("PRIVATE_KEY_ZKSYNCLOCAL", "0xdeadbeef"),
        ("MNEMONIC", "other seed"),
        ("MNEMONIC_ZKSYNCLOCAL", "local seed"),
        ("ETH_NODE_URI_ZKSYNCLOCAL", "http://elsewhere:1"),
    ]);
    let quiet = compose(&[]);

    assert_eq!(noisy.network("zkSyncLocal"), Some(&fixed));
    assert_eq!(quiet.network("zkSyncLocal"), Some(&fixed));
    assert_eq!(fixed.accounts.len(), 1);
}

#[test]
fn test_rollup_networks_carry_settlement_endpoint() {
    let config = compose(&[]);

    let rollups: Vec<_> = config
        .networks
        .remote
        .values()
        .filter(|profile| profile.is_rollup())
        .collect();

    assert_eq!(rollups.len(), 2);
    for profile in rollups {
        assert!(profile.eth_network().is_some_and(|url| !url.is_empty()));
    }
}

#[test]
fn test_network_table_shape() {
    let config = compose(&[]);
    let names = config.network_names();

    assert_eq!(names[0], "hardhat");
    for expected in [
        "localhost",
        "staging",
        "production",
        "mainnet",
        "rinkeby",
        "kovan",
        "goerli",
        "zkSyncTestnet",
        "zkSyncLocal",
    ] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
    assert_eq!(names.len(), 10);
}

#[test]
fn test_optimizer_fields_are_independent() {
    let base = compose(&[("REPORT_GAS", "1"), ("TENDERLY_USERNAME", "carol")]);

    for (enabled, runs) in [(false, 2000), (true, 1), (false, 1)] {
        let mut changed = base.clone();
        changed.solidity.compilers[0].settings.optimizer = OptimizerSettings {
            enabled,
            runs: NonZeroU32::new(runs).unwrap(),
        };

        let mut restored = changed.clone();
        restored.solidity = base.solidity.clone();
        assert_eq!(restored, base);
        assert_eq!(changed.solidity.compilers[0].version, "0.8.17");
    }
}

#[test]
fn test_composition_is_deterministic() {
    let pairs = [
        ("HARDHAT_FORK", "mainnet"),
        ("MINING_INTERVAL", "100,200"),
        ("REPORT_GAS", "yes"),
    ];
    assert_eq!(compose(&pairs), compose(&pairs));
}
