use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON rendering error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML rendering error: {0}")]
    TomlError(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "Named account '{role}' uses index {index} but network '{network}' only has {available} account(s)"
    )]
    AccountIndexOutOfRange {
        role: String,
        index: usize,
        network: String,
        available: usize,
    },

    #[error("Unknown network: {name}")]
    UnknownNetwork { name: String },

    #[error("Env file error: {0}")]
    EnvFileError(#[from] dotenvy::Error),
}

impl ConfigError {
    /// Short message suitable for stderr.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not write configuration: {}", e),
            Self::JsonError(_) | Self::TomlError(_) => {
                "Could not render the configuration record".to_string()
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is invalid: {}", field, reason)
            }
            Self::AccountIndexOutOfRange {
                role,
                index,
                network,
                available,
            } => format!(
                "'{}' points at account #{} on '{}', which only has {}",
                role, index, network, available
            ),
            Self::UnknownNetwork { name } => format!("No network named '{}'", name),
            Self::EnvFileError(e) => format!("Could not load env file: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the output directory exists and is writable",
            Self::JsonError(_) | Self::TomlError(_) => {
                "Try the other output format or report the failing record"
            }
            Self::InvalidConfigValueError { .. } => {
                "Fix the environment variable that produced this value"
            }
            Self::AccountIndexOutOfRange { .. } => {
                "Provide a mnemonic for that network or lower the role's index"
            }
            Self::UnknownNetwork { .. } => "Run without --network to list every network",
            Self::EnvFileError(_) => {
                "Check the --env-file path and its KEY=value lines, or pass --no-dotenv"
            }
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfigValueError { .. }
            | Self::AccountIndexOutOfRange { .. } => 1,
            Self::UnknownNetwork { .. } => 2,
            Self::IoError(_)
            | Self::JsonError(_)
            | Self::TomlError(_)
            | Self::EnvFileError(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
