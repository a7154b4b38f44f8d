pub mod composer;
pub mod defaults;
pub mod network;
pub mod render;

pub use crate::domain::model::{NetworkProfile, ToolchainConfig};
pub use crate::domain::ports::{EnvSource, Storage};
pub use crate::utils::error::Result;
