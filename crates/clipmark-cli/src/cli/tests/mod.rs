//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_check() {
    match parse(&["clipmark", "check", "not a url"]) {
        CliCommand::Check { input } => assert_eq!(input, "not a url"),
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_preview() {
    match parse(&["clipmark", "preview", "https://example.com/page"]) {
        CliCommand::Preview { url, json } => {
            assert_eq!(url, "https://example.com/page");
            assert!(!json);
        }
        _ => panic!("expected Preview"),
    }
}

#[test]
fn cli_parse_preview_json() {
    match parse(&["clipmark", "preview", "--json", "https://example.com"]) {
        CliCommand::Preview { json, .. } => assert!(json),
        _ => panic!("expected Preview with --json"),
    }
}

#[test]
fn cli_parse_add() {
    match parse(&["clipmark", "add", "https://example.com/a?b=c"]) {
        CliCommand::Add { source, yes, json } => {
            assert_eq!(source, "https://example.com/a?b=c");
            assert!(!yes);
            assert!(!json);
        }
        _ => panic!("expected Add"),
    }
}

#[test]
fn cli_parse_add_stdin_yes() {
    match parse(&["clipmark", "add", "-", "-y"]) {
        CliCommand::Add { source, yes, .. } => {
            assert_eq!(source, "-");
            assert!(yes);
        }
        _ => panic!("expected Add from stdin"),
    }
}

#[test]
fn cli_parse_global_config() {
    let cli = Cli::try_parse_from([
        "clipmark",
        "check",
        "https://example.com",
        "--config",
        "/tmp/c.toml",
    ])
    .unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/c.toml"))
    );
}

#[test]
fn cli_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["clipmark"]).is_err());
}
