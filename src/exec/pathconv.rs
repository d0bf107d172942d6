// src/exec/pathconv.rs

//! Windows to POSIX path translation for shell scripts.
//!
//! On Windows, shell scripts rely on Git Bash, and paths handed to them as
//! env vars must be in unix format. The resolver shells out to `cygpath`
//! (shipped with Git Bash) once per execution to translate the project
//! path; on every other platform it is the identity.

use anyhow::Result;

/// Path translation capability, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathResolver {
    /// Non-Windows hosts: every value passes through unchanged.
    Identity,
    /// Windows hosts: translate via `cygpath -u`.
    PosixTranslating,
}

impl PathResolver {
    /// Resolver for the current host.
    pub fn for_host() -> Self {
        if cfg!(windows) {
            PathResolver::PosixTranslating
        } else {
            PathResolver::Identity
        }
    }

    /// POSIX-style replacement for the native project path.
    ///
    /// `Identity` returns an empty string, which makes all downstream
    /// substitution a no-op and never runs a subprocess.
    /// `PosixTranslating` runs `cygpath`; failure aborts the environment
    /// build, since scripts would otherwise receive a broken path.
    pub async fn project_replacement(&self, project_path: &str) -> Result<String> {
        match self {
            PathResolver::Identity => Ok(String::new()),
            PathResolver::PosixTranslating => cygpath_unix(project_path).await,
        }
    }

    /// Replace literal occurrences of the native project path inside
    /// `value` with its POSIX form.
    ///
    /// This is textual substring replacement, not a path-aware operation:
    /// the temp and plan paths are derived from the project path, so it is
    /// expected to appear verbatim inside them. A value that does not
    /// contain the project path passes through unchanged.
    pub fn substitute(&self, project_path: &str, replacement: &str, value: &str) -> String {
        match self {
            PathResolver::Identity => value.to_string(),
            PathResolver::PosixTranslating => value.replace(project_path, replacement),
        }
    }
}

/// Converted path as read from the conversion tool's combined output
/// stream, trimmed of one trailing newline.
pub fn converter_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(stdout.len() + stderr.len());
    bytes.extend_from_slice(stdout);
    bytes.extend_from_slice(stderr);

    let mut path = String::from_utf8_lossy(&bytes).into_owned();
    if path.ends_with('\n') {
        path.pop();
        if path.ends_with('\r') {
            path.pop();
        }
    }
    path
}

#[cfg(windows)]
async fn cygpath_unix(project_path: &str) -> Result<String> {
    use anyhow::{Context, anyhow};
    use std::os::windows::process::CommandExt;

    // cygpath's argument escaping is not plain argv passing; hand it the
    // raw command line.
    let mut cmd = std::process::Command::new("cygpath");
    cmd.raw_arg(format!("-u \"{project_path}\""));

    let output = tokio::process::Command::from(cmd)
        .output()
        .await
        .context("failed converting windows path to unix style path")?;

    let combined = converter_output(&output.stdout, &output.stderr);
    if !output.status.success() {
        return Err(anyhow!(
            "failed converting windows path to unix style path: cygpath exited with {}: {}",
            output.status,
            combined.trim(),
        ));
    }

    Ok(combined)
}

#[cfg(not(windows))]
async fn cygpath_unix(_project_path: &str) -> Result<String> {
    Err(anyhow::anyhow!(
        "posix path translation is only available on windows hosts"
    ))
}
