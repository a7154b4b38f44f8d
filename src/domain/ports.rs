use crate::utils::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Read-only view of environment variables.
///
/// Composition only ever reads through this trait, so the same code runs
/// against the real process environment or an in-memory map.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`EnvSource::var`], but an empty value counts as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }

    fn is_set(&self, key: &str) -> bool {
        self.non_empty(key).is_some()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

pub trait Storage {
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}
