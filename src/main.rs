use clap::Parser;
use contract_toolchain_config::config::cli::{load_dotenv, render_selection};
use contract_toolchain_config::core::Storage;
use contract_toolchain_config::utils::logger;
use contract_toolchain_config::{CliConfig, ConfigComposer, ConfigError, EnvSnapshot, LocalStorage};

fn main() {
    let config = CliConfig::parse();

    // .env is loaded before the logger so RUST_LOG from it takes effect,
    // and before the snapshot so its values are composed
    let dotenv = load_dotenv(&config);

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting contract-toolchain-config");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let result = dotenv.and_then(|loaded| {
        if let Some(path) = loaded {
            tracing::info!("📄 Loaded environment from {}", path.display());
        }

        let env = EnvSnapshot::capture();
        tracing::debug!(vars = env.len(), "Environment captured");
        let toolchain = ConfigComposer::new(&env).compose();

        let rendered = render_selection(&config, &toolchain)?;
        match &config.output {
            Some(path) => {
                LocalStorage::new(".").write_file(path, rendered.as_bytes())?;
                tracing::info!("📁 Configuration written to: {}", path.display());
            }
            None => print!("{}", rendered),
        }
        Ok(())
    });

    if let Err(e) = result {
        exit_with(&e);
    }
}

fn exit_with(e: &ConfigError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
