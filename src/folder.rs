// src/folder.rs

//! Paths and hashes inside the shuttle cache folder.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;

/// Subdirectory of the cache folder holding compiled action binaries.
pub const BINARY_DIR: &str = "binaries";

/// Filename prefix for compiled action binaries.
pub const BINARY_PREFIX: &str = "actions";

/// Deterministic path for a cached compiled actions binary.
///
/// The name hex-encodes the first 16 bytes of the content hash; truncation
/// is a readability/collision trade-off, not a security boundary, since
/// this path is a cache key and not a content-integrity guarantee. No I/O
/// happens here; callers create or read the file at the returned path.
pub fn calculate_binary_path(shuttle_dir: &Path, hash: &str) -> PathBuf {
    let prefix = &hash.as_bytes()[..hash.len().min(16)];
    let mut name = format!("{BINARY_PREFIX}-{}", hex::encode(prefix));
    if cfg!(windows) {
        name.push_str(".exe");
    }
    shuttle_dir.join(BINARY_DIR).join(name)
}

/// Content hash of an actions source file, as a hex string.
pub fn hash_actions_source(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file =
        File::open(path).with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}
