use astra::cli::{Args, Command};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("astra")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_build_defaults() {
    let parsed = Args::try_parse_from(make_args(&["build"])).unwrap();

    assert!(!parsed.verbose);
    match parsed.command {
        Command::Build { config } => {
            assert_eq!(config.source, PathBuf::from("."));
            assert_eq!(config.config, "astra.config.json");
            assert_eq!(config.config_path(), PathBuf::from("./astra.config.json"));
        }
        other => panic!("Expected build command, got {other:?}"),
    }
}

#[test]
fn test_install_flags() {
    let args = make_args(&["-v", "install", "-s", "proj", "-c", "custom.json", "-d", "/opt/Script"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    match parsed.command {
        Command::Install { config, destination } => {
            assert_eq!(config.config_path(), PathBuf::from("proj/custom.json"));
            assert_eq!(destination, Some(PathBuf::from("/opt/Script")));
        }
        other => panic!("Expected install command, got {other:?}"),
    }
}

#[test]
fn test_install_without_destination() {
    let parsed = Args::try_parse_from(make_args(&["install"])).unwrap();
    assert!(matches!(parsed.command, Command::Install { destination: None, .. }));
}

#[test]
fn test_package_long_flags() {
    let args = make_args(&["package", "--source", "proj", "--config", "a.json", "--verbose"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    match parsed.command {
        Command::Package { config } => assert_eq!(config.config_path(), PathBuf::from("proj/a.json")),
        other => panic!("Expected package command, got {other:?}"),
    }
}

#[test]
fn test_init_flags() {
    let parsed = Args::try_parse_from(make_args(&["init", "-o", "new", "-f"])).unwrap();
    match parsed.command {
        Command::Init { output, force } => {
            assert_eq!(output, PathBuf::from("new"));
            assert!(force);
        }
        other => panic!("Expected init command, got {other:?}"),
    }
}

#[test]
fn test_missing_command() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_unknown_flag_for_command() {
    assert!(Args::try_parse_from(make_args(&["build", "-d", "x"])).is_err());
}

#[test]
fn test_command_definition() {
    Args::command().debug_assert();
    let help = Args::command().render_help().to_string();
    assert!(help.contains("build"));
    assert!(help.contains("package"));
}
