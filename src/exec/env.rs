// src/exec/env.rs

//! Child environment construction.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::exec::context::ExecutionContext;
use crate::exec::pathconv::PathResolver;

/// Directory containing the currently running executable.
///
/// Read once at startup and injected into [`build_environment`].
/// Prepending it to `PATH` lets co-located helper binaries shadow system
/// binaries of the same name.
pub fn own_executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("resolving path of running executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Build the `NAME=VALUE` list for the child process.
///
/// Later entries shadow earlier ones when the shell consumes them, so the
/// fixed shuttle variables always win over inherited or caller-supplied
/// values of the same name. `shuttle_plan`/`plan`, `shuttle_tmp`/`tmp` and
/// `project`/`shuttle_project` carry the same value under two historical
/// names each.
///
/// Fails only if the path resolver fails (Windows hosts); every other step
/// is infallible.
pub async fn build_environment(
    ctx: &ExecutionContext,
    resolver: PathResolver,
    shuttle_dir: &Path,
) -> Result<Vec<String>> {
    let project_path = ctx.project_path.to_string_lossy().into_owned();
    let plan_path = ctx.local_plan_path.to_string_lossy().into_owned();
    let tmp_path = ctx.temp_directory_path.to_string_lossy().into_owned();

    let sh_replacement = resolver.project_replacement(&project_path).await?;
    let sub = |value: &str| resolver.substitute(&project_path, &sh_replacement, value);

    let mut env_list: Vec<String> = env::vars().map(|(k, v)| format!("{k}={v}")).collect();

    for (name, value) in &ctx.args {
        env_list.push(format!("{name}={value}"));
    }

    env_list.push(format!("shuttle_plan={}", sub(&plan_path)));
    env_list.push(format!("plan={}", sub(&plan_path)));
    env_list.push(format!("shuttle_tmp={}", sub(&tmp_path)));
    env_list.push(format!("tmp={}", sub(&tmp_path)));
    env_list.push(format!("project={}", sub(&project_path)));
    env_list.push(format!("shuttle_project={}", sub(&project_path)));

    let separator = if cfg!(windows) { ';' } else { ':' };
    env_list.push(format!(
        "PATH={}{}{}",
        shuttle_dir.display(),
        separator,
        env::var("PATH").unwrap_or_default(),
    ));

    // Downstream shuttle invocations must not re-validate the plan.
    env_list.push(format!("SHUTTLE_PLANS_ALREADY_VALIDATED={plan_path}"));
    env_list.push("SHUTTLE_INTERACTIVE=default".to_string());
    env_list.push(format!("SHUTTLE_CONTEXT_ID={}", ctx.context_id));

    Ok(env_list)
}
