use clap::{CommandFactory, Parser};
use fsdrill::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["fsdrill", "play"],
        vec!["fsdrill", "play", "--curriculum", "quick"],
        vec!["fsdrill", "play", "--level", "3"],
        vec!["fsdrill", "levels"],
        vec!["fsdrill", "levels", "--format", "json"],
        vec!["fsdrill", "levels", "--curriculum", "standard", "--format", "text"],
        vec!["fsdrill", "config"],
        vec!["fsdrill", "--config", "./drill.toml", "config"],
        vec!["fsdrill", "config", "--log-level", "debug", "--log-output", "stderr"],
        vec!["fsdrill", "--verbose", "play"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_values() {
    assert!(Cli::try_parse_from(["fsdrill", "play", "--level", "0"]).is_err());
    assert!(Cli::try_parse_from(["fsdrill", "play", "--level", "two"]).is_err());
    assert!(Cli::try_parse_from(["fsdrill", "levels", "--format", "yaml"]).is_err());
    assert!(Cli::try_parse_from(["fsdrill"]).is_err());
    assert!(Cli::try_parse_from(["fsdrill", "teach"]).is_err());
}

#[test]
fn parse_play_arguments() {
    let cli = Cli::try_parse_from(["fsdrill", "play", "--curriculum", "quick", "--level", "2"])
        .unwrap();
    assert_eq!(
        cli.command,
        Commands::Play {
            curriculum: Some("quick".to_string()),
            level: Some(2),
        }
    );
}

#[test]
fn help_lists_every_command() {
    let help = Cli::command().render_long_help().to_string();
    for name in ["play", "levels", "config"] {
        assert!(help.contains(name), "help should mention {name}");
    }
    Cli::command().debug_assert();
}
