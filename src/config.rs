// src/config.rs

//! Script-argument loading and merging.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// On-disk script arguments:
///
/// ```toml
/// [args]
/// env = "staging"
/// version = "1.2.3"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ArgsFile {
    #[serde(default)]
    pub args: HashMap<String, String>,
}

/// Load script arguments from a TOML file.
pub fn load_args_file(path: &Path) -> Result<ArgsFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading args file {}", path.display()))?;
    let parsed: ArgsFile =
        toml::from_str(&text).with_context(|| format!("parsing args file {}", path.display()))?;
    Ok(parsed)
}

/// Merge script arguments: explicit `KEY=VALUE` flags win over args-file
/// entries of the same name.
pub fn merge_args(
    mut base: HashMap<String, String>,
    flags: &[String],
) -> Result<HashMap<String, String>> {
    for pair in flags {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid argument '{pair}': expected KEY=VALUE"))?;
        base.insert(key.to_string(), value.to_string());
    }
    Ok(base)
}
