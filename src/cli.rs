//! Command-line interface definitions for the paywall reader.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and the display protocol can also come from environment
//! variables.

use clap::Parser;
use paywall_reader::{MethodTag, RetryPolicy};

/// Command-line arguments for the paywall reader.
///
/// # Examples
///
/// ```sh
/// # Read an article using the source's configured methods
/// paywall_reader --source nytimes.com --url https://www.nytimes.com/2022/07/20/us/politics/story.html
///
/// # Force the method order
/// paywall_reader -s wsj.com -u https://www.wsj.com/articles/x -M google-cache -M archive
///
/// # List supported sources
/// paywall_reader --list-sources
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source id (canonical domain), e.g. nytimes.com
    #[arg(short, long, required_unless_present = "list_sources")]
    pub source: Option<String>,

    /// Article url
    #[arg(short, long, required_unless_present = "list_sources")]
    pub url: Option<String>,

    /// Retrieval method to try, in order (NONE, ARCHIVE, GOOGLE_CACHE). Repeatable.
    /// Defaults to the source's configured methods.
    #[arg(short = 'M', long = "method")]
    pub methods: Vec<MethodTag>,

    /// Optional path to a YAML source table replacing the built-in one
    #[arg(long)]
    pub sources_file: Option<String>,

    /// Search-engine API key for GOOGLE_CACHE lookups
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Search-engine engine id for GOOGLE_CACHE lookups
    #[arg(long, env = "GOOGLE_ENGINE_ID")]
    pub google_engine_id: Option<String>,

    /// Protocol archived images should be served over
    #[arg(long, env = "DISPLAY_PROTOCOL", default_value = "https")]
    pub display_protocol: String,

    /// When to retry a failed method without the trailing slash (any-failure, mirror-only)
    #[arg(long, default_value = "any-failure")]
    pub retry_policy: RetryPolicy,

    /// Print the article as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// List supported sources and exit
    #[arg(long)]
    pub list_sources: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "paywall_reader",
            "--source",
            "nytimes.com",
            "--url",
            "https://www.nytimes.com/a.html",
        ]);

        assert_eq!(cli.source.as_deref(), Some("nytimes.com"));
        assert_eq!(cli.url.as_deref(), Some("https://www.nytimes.com/a.html"));
        assert!(cli.methods.is_empty());
        assert_eq!(cli.retry_policy, RetryPolicy::AnyFailure);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_short_flags_and_methods() {
        let cli = Cli::parse_from([
            "paywall_reader",
            "-s",
            "wsj.com",
            "-u",
            "https://www.wsj.com/articles/x",
            "-M",
            "google-cache",
            "-M",
            "ARCHIVE",
            "--retry-policy",
            "mirror-only",
            "--json",
        ]);

        assert_eq!(cli.methods, vec![MethodTag::GoogleCache, MethodTag::Archive]);
        assert_eq!(cli.retry_policy, RetryPolicy::MirrorOnly);
        assert!(cli.json);
    }

    #[test]
    fn test_list_sources_needs_no_article() {
        let cli = Cli::parse_from(["paywall_reader", "--list-sources"]);
        assert!(cli.list_sources);
        assert!(cli.source.is_none());
    }

    #[test]
    fn test_source_required_without_list_flag() {
        assert!(Cli::try_parse_from(["paywall_reader", "--url", "https://a.com/x"]).is_err());
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(
            Cli::try_parse_from(["paywall_reader", "-s", "a.com", "-u", "https://a.com/x", "-M", "carrier-pigeon"])
                .is_err()
        );
    }
}
