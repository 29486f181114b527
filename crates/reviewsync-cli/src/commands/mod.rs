use std::path::Path;

use anyhow::{Context, Result, bail};
use reviewsync_core::models::ResolveRequest;
use reviewsync_core::{ReviewSync, ReviewSyncConfig, extract_identifier_from_reference};
use serde::Serialize;

use crate::cli::{Commands, ForumArgs, ResolveArgs, ValidateArgs};

mod support;

use self::support::{failure_reason, forum_identifier, print_json};

#[derive(Debug, Serialize)]
struct ExtractedIdentifier<'a> {
    reference: &'a str,
    identifier: Option<String>,
}

pub(crate) fn run(config_path: Option<&Path>, command: Commands) -> Result<()> {
    match command {
        Commands::ExtractId(args) => {
            let identifier = extract_identifier_from_reference(&args.text);
            let found = identifier.is_some();
            print_json(&ExtractedIdentifier {
                reference: &args.text,
                identifier,
            })?;
            if !found {
                bail!("no forum identifier found in reference");
            }
            Ok(())
        }
        Commands::Config => print_json(&load_config(config_path)?.redacted()),
        Commands::Resolve(args) => run_resolve(&open_client(config_path)?, args),
        Commands::Validate(args) => run_validate(&open_client(config_path)?, &args),
        Commands::Reviews(args) => run_reviews(&open_client(config_path)?, &args),
        Commands::Discussions(args) => run_discussions(&open_client(config_path)?, &args),
    }
}

fn load_config(config_path: Option<&Path>) -> Result<ReviewSyncConfig> {
    match config_path {
        Some(path) => tracing::debug!(path = %path.display(), "loading configuration file"),
        None => tracing::debug!("loading configuration from environment"),
    }
    let config = ReviewSyncConfig::load(config_path).context("failed to load configuration")?;
    tracing::debug!(
        api_base = %config.api_base,
        legacy_api_base = %config.legacy_api_base,
        year_span = config.year_span,
        "configuration loaded"
    );
    Ok(config)
}

fn open_client(config_path: Option<&Path>) -> Result<ReviewSync> {
    ReviewSync::new(load_config(config_path)?).context("failed to create client")
}

fn build_resolve_request(args: ResolveArgs) -> ResolveRequest {
    let mut request = ResolveRequest::new(args.title)
        .with_authors(args.authors)
        .with_verify(!args.no_verify);
    if let Some(venue) = args.venue {
        request = request.with_venue(venue);
    }
    if let Some(year) = args.year {
        request = request.with_year(year);
    }
    request.include_meta_review = !args.no_meta_review;
    request.include_discussions = args.discussions;
    request
}

fn run_resolve(client: &ReviewSync, args: ResolveArgs) -> Result<()> {
    let request = build_resolve_request(args);
    let result = client.resolve_by_title(&request);
    print_json(&result)?;
    if !result.success {
        return Err(failure_reason("resolve", result.error.as_ref()));
    }
    Ok(())
}

fn run_validate(client: &ReviewSync, args: &ValidateArgs) -> Result<()> {
    let identifier = forum_identifier(&args.reference)?;
    let result = client.validate_identifier(&args.title, &args.authors, &identifier);
    print_json(&result)?;
    if let Some(error) = &result.error {
        return Err(failure_reason("validate", Some(error)));
    }
    if !result.valid {
        bail!("forum '{identifier}' does not match the expected paper");
    }
    Ok(())
}

fn run_reviews(client: &ReviewSync, args: &ForumArgs) -> Result<()> {
    let identifier = forum_identifier(&args.reference)?;
    print_json(&client.fetch_reviews(&identifier, !args.no_meta_review))
}

fn run_discussions(client: &ReviewSync, args: &ForumArgs) -> Result<()> {
    let identifier = forum_identifier(&args.reference)?;
    print_json(&client.fetch_thread(&identifier, !args.no_meta_review))
}
