use super::*;
use clap::Parser;

#[test]
fn resolve_parses_hints_and_repeated_authors() {
    let cli = Cli::try_parse_from([
        "reviewsync",
        "resolve",
        "Attention Is All You Need",
        "--venue",
        "neurips",
        "--year",
        "2017",
        "--author",
        "Ashish Vaswani",
        "--author",
        "Noam Shazeer",
        "--discussions",
    ])
    .expect("parse");
    match cli.command {
        Commands::Resolve(args) => {
            assert_eq!(args.title, "Attention Is All You Need");
            assert_eq!(args.venue.as_deref(), Some("neurips"));
            assert_eq!(args.year, Some(2017));
            assert_eq!(args.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
            assert!(args.discussions);
            assert!(!args.no_verify);
            assert!(!args.no_meta_review);
        }
        _ => panic!("expected resolve command"),
    }
}

#[test]
fn global_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from([
        "reviewsync",
        "reviews",
        "rJXMpikCZ",
        "--config",
        "reviewsync.toml",
        "-vv",
        "--no-meta-review",
    ])
    .expect("parse");
    assert_eq!(cli.verbose, 2);
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("reviewsync.toml"))
    );
    match cli.command {
        Commands::Reviews(ForumArgs {
            reference,
            no_meta_review,
        }) => {
            assert_eq!(reference, "rJXMpikCZ");
            assert!(no_meta_review);
        }
        _ => panic!("expected reviews command"),
    }
}

#[test]
fn validate_requires_expected_title() {
    let parsed = Cli::try_parse_from(["reviewsync", "validate", "rJXMpikCZ"]);
    assert!(parsed.is_err(), "validate without --title must be rejected");

    let cli = Cli::try_parse_from([
        "reviewsync",
        "validate",
        "https://openreview.net/forum?id=rJXMpikCZ",
        "--title",
        "Graph Attention Networks",
    ])
    .expect("parse");
    assert!(matches!(cli.command, Commands::Validate(_)));
}

#[test]
fn config_and_extract_id_parse() {
    let cli = Cli::try_parse_from(["reviewsync", "config"]).expect("parse");
    assert!(matches!(cli.command, Commands::Config));

    let cli = Cli::try_parse_from(["reviewsync", "extract-id", "openreview.net/forum?id=x1"])
        .expect("parse");
    match cli.command {
        Commands::ExtractId(args) => assert_eq!(args.text, "openreview.net/forum?id=x1"),
        _ => panic!("expected extract-id command"),
    }
}
