use clap::Args;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[arg(allow_hyphen_values = true)]
    pub title: String,
    /// Venue path (`ICLR.cc/2024/Conference`) or short name (`iclr`).
    #[arg(long)]
    pub venue: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    /// Expected author; repeat for several.
    #[arg(long = "author", value_name = "NAME")]
    pub authors: Vec<String>,
    /// Accept the best candidate even when its title score is below threshold.
    #[arg(long, default_value_t = false)]
    pub no_verify: bool,
    #[arg(long, default_value_t = false)]
    pub no_meta_review: bool,
    #[arg(long, default_value_t = false)]
    pub discussions: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Forum identifier, forum URL, or citation text containing one.
    pub reference: String,
    #[arg(long, allow_hyphen_values = true)]
    pub title: String,
    #[arg(long = "author", value_name = "NAME")]
    pub authors: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ForumArgs {
    /// Forum identifier, forum URL, or citation text containing one.
    pub reference: String,
    #[arg(long, default_value_t = false)]
    pub no_meta_review: bool,
}

#[derive(Debug, Args)]
pub struct ExtractIdArgs {
    pub text: String,
}
