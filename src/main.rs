//! # Paywall Reader
//!
//! Command-line front end: resolves a mirror for one article, extracts it
//! with the source's extractor and prints the result.
//!
//! ## Usage
//!
//! ```sh
//! paywall_reader --source bloomberg.com --url https://www.bloomberg.com/news/articles/x
//! ```

use clap::Parser;
use itertools::Itertools;
use paywall_reader::{ContentError, ContentService, ExtractorRegistry, MirrorConfig, ServiceConfig, SourceTable};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.source, ?args.url, ?args.methods, "Parsed CLI arguments");

    // ---- Source table ----
    let sources = match args.sources_file.as_deref() {
        Some(path) => SourceTable::from_path(path)?,
        None => SourceTable::builtin()?,
    };

    if args.list_sources {
        for descriptor in sources.iter() {
            println!(
                "{:<24} {:<28} {}",
                descriptor.id,
                descriptor.display_name,
                descriptor.effective_methods().iter().join(", ")
            );
        }
        return Ok(());
    }

    let (Some(source_id), Some(url)) = (args.source.as_deref(), args.url.as_deref()) else {
        return Err("both --source and --url are required".into());
    };

    // ---- Service ----
    let config = ServiceConfig {
        mirror: MirrorConfig::default().with_credentials(args.google_api_key.clone(), args.google_engine_id.clone()),
        display_protocol: args.display_protocol.clone(),
        retry_policy: args.retry_policy,
    };
    let service = ContentService::new(sources, ExtractorRegistry::with_builtin_sources(), config)?;

    let outcome = if args.methods.is_empty() {
        service.read(source_id, url).await
    } else {
        service.get_content(source_id, url, &args.methods).await
    };

    let article = match outcome {
        Ok(article) => article,
        Err(ContentError::NoArticleFound { .. }) => {
            error!(source_id, url, "Article not found");
            return Err(format!("article not found: {url}").into());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        println!("{}\n\n{}", article.headline, article.body_html);
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, millis = elapsed.as_millis() as u64, "Execution complete");
    Ok(())
}
