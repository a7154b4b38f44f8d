use crate::utils::error::Result;
use serde::Serialize;

/// Output encodings understood by the toolchain loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

/// Serializes any part of the record. JSON output ends with a newline.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(value)?;
            rendered.push('\n');
            Ok(rendered)
        }
        OutputFormat::Toml => Ok(toml::to_string(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::composer::ConfigComposer;
    use crate::domain::env::EnvSnapshot;

    #[test]
    fn test_json_uses_toolchain_key_names() {
        let env = EnvSnapshot::from_pairs([("HARDHAT_FORK", "goerli")]);
        let config = ConfigComposer::new(&env).compose();

        let rendered = render(&config, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["namedAccounts"]["deployer"], 0);
        assert_eq!(value["networks"]["hardhat"]["initialBaseFeePerGas"], 0);
        assert_eq!(value["zksolc"]["compilerSource"], "binary");
        assert_eq!(value["gasReporter"]["maxMethodDiff"], 10);
        assert_eq!(value["typechain"]["outDir"], "typechain");
        assert_eq!(
            value["external"]["deployments"]["localhost"],
            serde_json::json!(["deployments/goerli"])
        );
        assert!(value.get("tenderly").is_none());
    }

    #[test]
    fn test_json_round_trips_record() {
        let env = EnvSnapshot::from_pairs([("TENDERLY_USERNAME", "bob"), ("MINING_INTERVAL", "500")]);
        let config = ConfigComposer::new(&env).compose();

        let rendered = render(&config, OutputFormat::Json).unwrap();
        let parsed: crate::domain::model::ToolchainConfig = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(
            parsed.network("zkSyncLocal").map(|n| n.name.as_str()),
            Some("zkSyncLocal")
        );
    }

    #[test]
    fn test_toml_rendering() {
        let env = EnvSnapshot::default();
        let config = ConfigComposer::new(&env).compose();

        let rendered = render(&config, OutputFormat::Toml).unwrap();
        let value: toml::Table = toml::from_str(&rendered).unwrap();

        assert_eq!(
            value["solidity"]["compilers"][0]["version"].as_str(),
            Some("0.8.17")
        );
        assert_eq!(value["networks"]["zkSyncLocal"]["zksync"].as_bool(), Some(true));
    }
}
