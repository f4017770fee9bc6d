use clap::Parser;

use crate::cli::args::{Cli, Commands, KitsCommands, PickArg, parse_pick};

#[test]
fn test_parse_pick_full() {
    assert_eq!(
        parse_pick("TikTok=1:2").unwrap(),
        PickArg {
            platform: "TikTok".to_string(),
            caption_index: 1,
            image_index: 2,
        }
    );
}

#[test]
fn test_parse_pick_image_defaults_to_zero() {
    let pick = parse_pick("Instagram=2").unwrap();
    assert_eq!((pick.caption_index, pick.image_index), (2, 0));
}

#[test]
fn test_parse_pick_splits_on_last_equals() {
    assert_eq!(parse_pick("X=Twitter=0:1").unwrap().platform, "X=Twitter");
}

#[test]
fn test_parse_pick_rejects_malformed() {
    for raw in ["TikTok", "=1:0", "TikTok=a:0", "TikTok=1:b", "TikTok=-1:0"] {
        assert!(parse_pick(raw).is_err(), "{raw} should be rejected");
    }
}

#[test]
fn test_run_defaults() {
    let cli = Cli::try_parse_from(["launchkit", "run", "--brief", "brief.toml"]).unwrap();
    match cli.command {
        Commands::Run {
            user,
            persona,
            variant,
            picks,
            email,
            save,
            out,
            ..
        } => {
            assert_eq!(user, "local");
            assert_eq!((persona, variant), (0, 0));
            assert!(picks.is_empty());
            assert_eq!(email, None);
            assert!(!save);
            assert_eq!(out, None);
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn test_run_collects_repeated_picks_and_global_flags() {
    let cli = Cli::try_parse_from([
        "launchkit",
        "run",
        "--brief",
        "b.json",
        "--pick",
        "TikTok=1:0",
        "--pick",
        "Instagram=2:1",
        "--gateway-url",
        "http://127.0.0.1:9000",
        "--verbose",
    ])
    .unwrap();

    assert_eq!(cli.gateway_url.as_deref(), Some("http://127.0.0.1:9000"));
    assert!(cli.verbose);
    let Commands::Run { picks, .. } = cli.command else {
        panic!("expected run");
    };
    assert_eq!(picks.len(), 2);
    assert_eq!(picks[1].platform, "Instagram");
}

#[test]
fn test_kits_list_requires_user() {
    assert!(Cli::try_parse_from(["launchkit", "kits", "list"]).is_err());

    let cli = Cli::try_parse_from(["launchkit", "kits", "list", "--user", "alice", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Kits(KitsCommands::List { ref user, json: true }) if user == "alice"
    ));
    assert_eq!(cli.command.name(), "kits list");
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
