mod common;

use std::path::Path;

use common::{init_tracing, test_context};
use shuttle_exec::exec::PathResolver;
use shuttle_exec::exec::env::build_environment;

/// Final (shadowing-aware) value of `name` in the environment list.
fn final_value(env: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    env.iter()
        .rev()
        .find(|entry| entry.starts_with(&prefix))
        .map(|entry| entry[prefix.len()..].to_string())
}

#[tokio::test]
async fn test_environment_contains_all_shuttle_variables() {
    init_tracing();
    let project = tempfile::tempdir().unwrap();
    let mut ctx = test_context("true", project.path());
    ctx.args.insert("foo".to_string(), "bar".to_string());

    let env = build_environment(&ctx, PathResolver::Identity, Path::new("/opt/shuttle"))
        .await
        .expect("environment build is infallible off windows");

    let plan = ctx.local_plan_path.to_string_lossy().into_owned();
    let tmp = ctx.temp_directory_path.to_string_lossy().into_owned();
    let proj = ctx.project_path.to_string_lossy().into_owned();

    assert_eq!(final_value(&env, "shuttle_plan").as_deref(), Some(plan.as_str()));
    assert_eq!(final_value(&env, "plan").as_deref(), Some(plan.as_str()));
    assert_eq!(final_value(&env, "shuttle_tmp").as_deref(), Some(tmp.as_str()));
    assert_eq!(final_value(&env, "tmp").as_deref(), Some(tmp.as_str()));
    assert_eq!(final_value(&env, "project").as_deref(), Some(proj.as_str()));
    assert_eq!(final_value(&env, "shuttle_project").as_deref(), Some(proj.as_str()));
    assert_eq!(
        final_value(&env, "SHUTTLE_PLANS_ALREADY_VALIDATED").as_deref(),
        Some(plan.as_str())
    );
    assert_eq!(final_value(&env, "SHUTTLE_INTERACTIVE").as_deref(), Some("default"));
    assert_eq!(final_value(&env, "SHUTTLE_CONTEXT_ID").as_deref(), Some("test-context"));
    assert_eq!(final_value(&env, "foo").as_deref(), Some("bar"));
}

#[tokio::test]
async fn test_path_is_prefixed_with_shuttle_directory() {
    init_tracing();
    let project = tempfile::tempdir().unwrap();
    let ctx = test_context("true", project.path());

    let env = build_environment(&ctx, PathResolver::Identity, Path::new("/opt/shuttle"))
        .await
        .unwrap();

    let path = final_value(&env, "PATH").expect("PATH must be present");
    let separator = if cfg!(windows) { ';' } else { ':' };
    assert!(
        path.starts_with(&format!("/opt/shuttle{separator}")),
        "PATH should start with the shuttle dir: {path}"
    );
    // The inherited PATH is appended after the shuttle dir.
    let inherited = std::env::var("PATH").unwrap_or_default();
    assert!(path.ends_with(&inherited), "PATH should keep the inherited tail");
}

#[tokio::test]
async fn test_shuttle_variables_shadow_caller_args() {
    init_tracing();
    let project = tempfile::tempdir().unwrap();
    let mut ctx = test_context("true", project.path());
    // A caller-supplied arg must not override the fixed variables.
    ctx.args.insert("plan".to_string(), "bogus".to_string());

    let env = build_environment(&ctx, PathResolver::Identity, Path::new("/opt/shuttle"))
        .await
        .unwrap();

    let plan = ctx.local_plan_path.to_string_lossy().into_owned();
    assert_eq!(final_value(&env, "plan").as_deref(), Some(plan.as_str()));
}

#[tokio::test]
async fn test_identity_resolver_passes_values_through() {
    init_tracing();
    let resolver = PathResolver::Identity;

    let replacement = resolver.project_replacement("/home/user/project").await.unwrap();
    assert_eq!(replacement, "");

    for value in ["/home/user/project/tmp", "C:\\work\\project", ""] {
        assert_eq!(
            resolver.substitute("/home/user/project", &replacement, value),
            value
        );
    }
}

#[test]
fn test_resolver_for_host_matches_platform() {
    if cfg!(windows) {
        assert_eq!(PathResolver::for_host(), PathResolver::PosixTranslating);
    } else {
        assert_eq!(PathResolver::for_host(), PathResolver::Identity);
    }
}

#[test]
fn test_converter_output_reads_combined_stream() {
    use shuttle_exec::exec::pathconv::converter_output;

    // The conversion tool reports on its combined output stream; exactly
    // one trailing newline is trimmed.
    assert_eq!(converter_output(b"/c/work/project\n", b""), "/c/work/project");
    assert_eq!(converter_output(b"", b"/c/work/project\n"), "/c/work/project");
    assert_eq!(converter_output(b"/c/work/project\r\n", b""), "/c/work/project");
    assert_eq!(
        converter_output(b"/c/work/project\n\n", b""),
        "/c/work/project\n"
    );
}

#[test]
fn test_posix_substitution_is_textual() {
    // The substitution rule itself is platform-independent string surgery;
    // only the replacement lookup shells out.
    let resolver = PathResolver::PosixTranslating;
    assert_eq!(
        resolver.substitute("C:\\work\\project", "/c/work/project", "C:\\work\\project\\tmp"),
        "/c/work/project\\tmp"
    );
    // A value not containing the project path silently passes through.
    assert_eq!(
        resolver.substitute("C:\\work\\project", "/c/work/project", "D:\\elsewhere"),
        "D:\\elsewhere"
    );
}
