use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;

#[cfg(test)]
mod tests;

pub use args::{ExtractIdArgs, ForumArgs, ResolveArgs, ValidateArgs};

#[derive(Debug, Parser)]
#[command(name = "reviewsync")]
#[command(about = "Match paper titles to review-forum records and fetch their reviews", version)]
pub struct Cli {
    /// TOML configuration file. `REVIEWSYNC_*` environment variables override it.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the forum for a paper title and fetch its reviews.
    Resolve(ResolveArgs),
    /// Check that a forum identifier belongs to the expected paper.
    Validate(ValidateArgs),
    /// Reviews of one forum.
    Reviews(ForumArgs),
    /// Reviews and discussion comments of one forum.
    Discussions(ForumArgs),
    /// Extract a forum identifier from a URL or citation.
    ExtractId(ExtractIdArgs),
    /// Print the effective configuration with secrets redacted.
    Config,
}
