// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod folder;
pub mod logging;
pub mod ui;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::{CliArgs, CliCommand};
use crate::errors::Result;
use crate::exec::{ExecutionContext, execute_shell};
use crate::ui::ConsoleUi;

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    match args.command {
        CliCommand::Run {
            script,
            name,
            project_path,
            plan_path,
            tmp_path,
            args,
            args_file,
        } => run_script(script, name, project_path, plan_path, tmp_path, args, args_file).await,
        CliCommand::BinaryPath {
            source,
            shuttle_dir,
        } => {
            let hash = folder::hash_actions_source(&source)?;
            let path = folder::calculate_binary_path(&shuttle_dir, &hash);
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_script(
    script: String,
    name: String,
    project_path: Option<PathBuf>,
    plan_path: Option<PathBuf>,
    tmp_path: Option<PathBuf>,
    arg_flags: Vec<String>,
    args_file: Option<PathBuf>,
) -> Result<()> {
    let project_path = absolutize(match project_path {
        Some(path) => path,
        None => std::env::current_dir()?,
    })?;
    let local_plan_path =
        plan_path.unwrap_or_else(|| project_path.join(".shuttle").join("plan"));
    let temp_directory_path =
        tmp_path.unwrap_or_else(|| project_path.join(".shuttle").join("temp"));

    let file_args = match &args_file {
        Some(path) => config::load_args_file(path)?.args,
        None => HashMap::new(),
    };
    let args = config::merge_args(file_args, &arg_flags)?;

    // Propagate the correlation id when a parent shuttle invocation set one.
    let context_id = std::env::var("SHUTTLE_CONTEXT_ID").unwrap_or_default();

    // Ctrl-C cancels the running script.
    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            token.cancel();
        });
    }

    let ctx = ExecutionContext {
        script,
        script_name: name,
        project_path,
        local_plan_path,
        temp_directory_path,
        args,
        context_id,
        cancellation,
    };

    info!(script = %ctx.script_name, "executing shell action");
    execute_shell(&ctx, Arc::new(ConsoleUi)).await
}

/// Make a path absolute against the current working directory.
///
/// Deliberately avoids `canonicalize`: resolving symlinks would break the
/// textual path substitution the Windows resolver relies on.
fn absolutize(path: PathBuf) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
