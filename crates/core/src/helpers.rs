use anyhow::{Context, Error};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Reads and deserializes a TOML file.
pub fn load_toml<T, P: AsRef<Path>>(path: P) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("can't read file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("can't parse TOML content from {}", path.display()))
}
