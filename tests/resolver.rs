// tests/resolver.rs

mod common;
use crate::common::init_tracing;

use std::path::PathBuf;
use std::sync::Arc;

use fcu_launcher::errors::LauncherError;
use fcu_launcher::fs::mock::MockFileSystem;
use fcu_launcher::fs::{FileSystem, RealFileSystem};
use fcu_launcher::resolve::{
    BuildCommand, BuildIfMissing, ExecutableResolver, InstallLayout, PrebuiltOnly,
    resolver_for_mode, with_exe_suffix,
};
use fcu_launcher::types::{DeploymentMode, ExecutableLocation};

fn layout() -> InstallLayout {
    InstallLayout::new("/opt/fcu/bin", "/opt/fcu", "fcu_cli")
}

#[test]
fn layout_joins_bundle_dir_and_name() {
    let layout = layout();
    assert_eq!(layout.executable_path(), PathBuf::from("/opt/fcu/bin/fcu_cli"));
    assert_eq!(
        layout.location(),
        ExecutableLocation {
            executable: PathBuf::from("/opt/fcu/bin/fcu_cli"),
            working_dir: PathBuf::from("/opt/fcu"),
        }
    );
}

#[test]
fn exe_suffix_only_added_when_missing() {
    assert_eq!(with_exe_suffix("tool.exe"), "tool.exe");
    if cfg!(windows) {
        assert_eq!(with_exe_suffix("fcu_cli"), "fcu_cli.exe");
    } else {
        assert_eq!(with_exe_suffix("fcu_cli"), "fcu_cli");
    }
}

#[test]
fn build_args_expand_executable_placeholder() {
    let build = BuildCommand::default();
    assert_eq!(build.program, "go");
    assert_eq!(
        build.expanded_args(&PathBuf::from("/opt/fcu/bin/fcu_cli")),
        vec!["build", "-o", "/opt/fcu/bin/fcu_cli", "./cmd/fcu_cli"]
    );
}

#[tokio::test]
async fn prebuilt_returns_existing_binary_every_time() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/opt/fcu/bin/fcu_cli");
    let resolver = PrebuiltOnly::new(layout(), Arc::new(fs));

    let first = resolver.resolve().await.expect("binary exists");
    let second = resolver.resolve().await.expect("binary still exists");

    assert_eq!(first, layout().location());
    assert_eq!(first, second);
}

#[tokio::test]
async fn prebuilt_without_binary_is_unavailable() {
    init_tracing();
    let resolver = PrebuiltOnly::new(layout(), Arc::new(MockFileSystem::new()));

    match resolver.resolve().await {
        Err(LauncherError::BuildUnavailable(path)) => {
            assert_eq!(path, PathBuf::from("/opt/fcu/bin/fcu_cli"));
        }
        other => panic!("expected BuildUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn packaged_mode_never_runs_the_build() {
    init_tracing();
    let tmp = tempfile::tempdir().unwrap();
    let marker = tmp.path().join("build-ran");

    // A build that would leave a trace if it were ever spawned.
    let touch = format!("touch '{}'", marker.display());
    let build = BuildCommand::new("sh", ["-c", touch.as_str()]);
    let layout = InstallLayout::new(tmp.path(), tmp.path(), "fcu_cli");
    let resolver = resolver_for_mode(
        DeploymentMode::Packaged,
        layout,
        build,
        Arc::new(RealFileSystem),
    );

    let result = resolver.resolve().await;
    assert!(matches!(result, Err(LauncherError::BuildUnavailable(_))));
    assert!(!marker.exists(), "packaged mode must not spawn a build");
}

#[tokio::test]
async fn development_mode_skips_build_when_binary_exists() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/opt/fcu/bin/fcu_cli");

    // The build program does not exist; resolving must not need it.
    let build = BuildCommand::new("definitely-not-a-build-tool", Vec::<String>::new());
    let resolver = BuildIfMissing::new(layout(), build, Arc::new(fs));

    assert_eq!(resolver.resolve().await.unwrap(), layout().location());
    assert_eq!(resolver.resolve().await.unwrap(), layout().location());
}

#[tokio::test]
async fn missing_build_tool_is_build_failed() {
    init_tracing();
    let tmp = tempfile::tempdir().unwrap();
    let build = BuildCommand::new("definitely-not-a-build-tool", Vec::<String>::new());
    let resolver = BuildIfMissing::new(
        InstallLayout::new(tmp.path(), tmp.path(), "fcu_cli"),
        build,
        Arc::new(RealFileSystem),
    );

    match resolver.resolve().await {
        Err(LauncherError::BuildFailed(msg)) => {
            assert!(msg.contains("definitely-not-a-build-tool"), "msg = {msg}");
        }
        other => panic!("expected BuildFailed, got {other:?}"),
    }
}

#[cfg(unix)]
mod unix {
    use super::*;

    #[tokio::test]
    async fn development_mode_builds_missing_binary_once() {
        init_tracing();
        let tmp = tempfile::tempdir().unwrap();
        let count = tmp.path().join("builds");
        let script = format!(
            "echo built >> '{}'; printf '#!/bin/sh\\n' > \"$1\"; chmod +x \"$1\"",
            count.display()
        );
        let build = BuildCommand::new("sh", ["-c", script.as_str(), "build", "{executable}"]);
        let layout = InstallLayout::new(tmp.path().join("bin"), tmp.path(), "fcu_cli");
        std::fs::create_dir_all(&layout.bundle_dir).unwrap();

        let resolver = resolver_for_mode(
            DeploymentMode::Development,
            layout.clone(),
            build,
            Arc::new(RealFileSystem),
        );

        let first = resolver.resolve().await.expect("build should succeed");
        let second = resolver.resolve().await.expect("binary now exists");

        assert_eq!(first, layout.location());
        assert_eq!(first, second);
        assert!(RealFileSystem.is_file(&layout.executable_path()));
        assert_eq!(std::fs::read_to_string(&count).unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn failed_build_carries_stderr() {
        init_tracing();
        let tmp = tempfile::tempdir().unwrap();
        let build = BuildCommand::new(
            "sh",
            ["-c", "echo 'compiling'; echo 'main.go:3: undefined: foo' >&2; exit 2"],
        );
        let resolver = BuildIfMissing::new(
            InstallLayout::new(tmp.path(), tmp.path(), "fcu_cli"),
            build,
            Arc::new(RealFileSystem),
        );

        match resolver.resolve().await {
            Err(LauncherError::BuildFailed(msg)) => {
                assert_eq!(msg, "main.go:3: undefined: foo");
            }
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_build_falls_back_to_stdout_then_generic() {
        init_tracing();
        let tmp = tempfile::tempdir().unwrap();
        let layout = InstallLayout::new(tmp.path(), tmp.path(), "fcu_cli");

        let stdout_only = BuildIfMissing::new(
            layout.clone(),
            BuildCommand::new("sh", ["-c", "echo 'go: module not found'; exit 1"]),
            Arc::new(RealFileSystem),
        );
        match stdout_only.resolve().await {
            Err(LauncherError::BuildFailed(msg)) => assert_eq!(msg, "go: module not found"),
            other => panic!("expected BuildFailed, got {other:?}"),
        }

        let silent = BuildIfMissing::new(
            layout,
            BuildCommand::new("sh", ["-c", "exit 1"]),
            Arc::new(RealFileSystem),
        );
        match silent.resolve().await {
            Err(LauncherError::BuildFailed(msg)) => assert_eq!(msg, "unknown error"),
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn build_that_produces_nothing_is_build_failed() {
        init_tracing();
        let tmp = tempfile::tempdir().unwrap();
        let resolver = BuildIfMissing::new(
            InstallLayout::new(tmp.path(), tmp.path(), "fcu_cli"),
            BuildCommand::new("sh", ["-c", "exit 0"]),
            Arc::new(RealFileSystem),
        );

        match resolver.resolve().await {
            Err(LauncherError::BuildFailed(msg)) => assert!(msg.contains("was not produced")),
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }
}
