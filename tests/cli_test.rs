//! Integration tests for command dispatch
//!
//! Commands that load settings run under `EnvGuard::isolated`, so a developer's
//! global config or `CHALLENGES_*` variables cannot change the outcome.

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use challenges::cli::{execute_command, Cli, CliError};
use challenges::exitcode;
use challenges::util::testing::EnvGuard;

fn run(args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    execute_command(&cli)
}

#[test]
fn given_samples_command_when_executed_then_succeeds() {
    assert!(run(&["challenges", "samples"]).is_ok());
}

#[test]
fn given_strip_command_when_executed_then_succeeds() {
    assert!(run(&["challenges", "strip", "absdefge", "ab", "fg", "ee"]).is_ok());
}

#[test]
fn given_empty_instance_when_stripping_then_exits_with_data_error() {
    let err = run(&["challenges", "strip", "abc", ""]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_tree_file_when_rendering_with_each_strategy_then_succeeds() {
    let temp = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(temp.path());
    let file = temp.path().join("tree.toml");
    fs::write(&file, "[root]\ntag = \"div\"\n\n[[root.children]]\ntag = \"p\"\ntext = \"x\"\n")
        .unwrap();
    let dir = temp.path().to_string_lossy().to_string();
    let file = file.to_string_lossy().to_string();

    for strategy in ["stack", "recursive", "auto"] {
        assert!(run(&["challenges", "-C", &dir, "render", &file, "-s", strategy]).is_ok());
    }
    assert!(run(&["challenges", "-C", &dir, "outline", &file]).is_ok());
}

#[test]
fn given_no_file_and_no_default_when_rendering_then_exits_with_usage() {
    let temp = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(temp.path());
    let dir = temp.path().to_string_lossy().to_string();

    let err = run(&["challenges", "-C", &dir, "render"]).unwrap_err();

    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_default_tree_in_local_config_when_rendering_without_file_then_uses_it() {
    let temp = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(temp.path());
    let tree = temp.path().join("default.toml");
    fs::write(&tree, "[root]\ntag = \"p\"\ntext = \"x\"\n").unwrap();
    fs::write(
        temp.path().join(".challenges.toml"),
        format!("[render]\ndefault_tree = {:?}\n", tree.to_string_lossy()),
    )
    .unwrap();
    let dir = temp.path().to_string_lossy().to_string();

    assert!(run(&["challenges", "-C", &dir, "render"]).is_ok());
}

#[test]
fn given_missing_tree_file_when_rendering_then_exits_with_noinput() {
    let temp = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(temp.path());
    let dir = temp.path().to_string_lossy().to_string();
    let missing = temp.path().join("nope.toml").to_string_lossy().to_string();

    let err = run(&["challenges", "-C", &dir, "render", &missing]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_config_init_when_executed_twice_then_second_needs_force() {
    let temp = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(temp.path());
    let dir = temp.path().to_string_lossy().to_string();

    assert!(run(&["challenges", "-C", &dir, "config", "init"]).is_ok());
    assert!(temp.path().join(".challenges.toml").exists());

    let err = run(&["challenges", "-C", &dir, "config", "init"]).unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));

    assert!(run(&["challenges", "-C", &dir, "config", "init", "--force"]).is_ok());
    assert!(run(&["challenges", "-C", &dir, "config", "show"]).is_ok());
    assert!(run(&["challenges", "-C", &dir, "config", "path"]).is_ok());
}

#[test]
fn given_default_tree_in_env_when_rendering_without_file_then_uses_it() {
    let temp = TempDir::new().unwrap();
    let mut env = EnvGuard::isolated(temp.path());
    let tree = temp.path().join("from_env.toml");
    fs::write(&tree, "[root]\ntag = \"p\"\ntext = \"x\"\n").unwrap();
    env.set("CHALLENGES_RENDER__DEFAULT_TREE", &tree);
    let dir = temp.path().to_string_lossy().to_string();

    assert!(run(&["challenges", "-C", &dir, "render"]).is_ok());
}

#[test]
fn given_bad_strategy_in_env_when_rendering_then_exits_with_config_error() {
    let temp = TempDir::new().unwrap();
    let mut env = EnvGuard::isolated(temp.path());
    env.set("CHALLENGES_RENDER__STRATEGY", "bfs");
    let dir = temp.path().to_string_lossy().to_string();

    let err = run(&["challenges", "-C", &dir, "config", "show"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}
