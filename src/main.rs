//! # Headline Ranker
//!
//! Fetches the headlines several news outlets publish for one category and
//! ranks them: the most frequent meaningful terms across all sources, and the
//! headlines built from the most frequent terms.
//!
//! ## Usage
//!
//! ```sh
//! headline_ranker headlines -c politics
//! headline_ranker post-headlines -c politics --top-headlines 20 --top-tokens 20
//! headline_ranker post-multi-word-tokens "New York" "White House"
//! headline_ranker summarize -c politics
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr. Any failure is
//! printed as `{"error": "..."}` with a non-zero exit code.

use clap::Parser;
use clap::error::ErrorKind;
use serde::Serialize;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use headline_ranker::api::LlmSummarizer;
use headline_ranker::cli::{Cli, Command, RankArgs};
use headline_ranker::config::NewsConfig;
use headline_ranker::error::{ErrorBody, Result};
use headline_ranker::models::NewsResult;
use headline_ranker::news::News;
use headline_ranker::outputs::json::write_news_result;
use headline_ranker::outputs::tokens::{Saved, TokenStore, parse_synonym_tokens, synonym_document};
use headline_ranker::scrapers::WebScraper;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

/// Print a failure as the structured error body.
fn report(message: String) -> ExitCode {
    let body = ErrorBody { error: message };
    let json = serde_json::to_string(&body)
        .unwrap_or_else(|_| format!("{{\"error\":{:?}}}", body.error));
    println!("{json}");
    ExitCode::FAILURE
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn saved_output<T: Serialize>(saved: Saved, stored: &T) -> Result<String> {
    match saved {
        Saved::Written(path) => {
            info!(path = %path.display(), "Token document stored");
            to_json(stored)
        }
        Saved::Skipped(message) => to_json(&message),
    }
}

/// Fetch and rank with the stored token configuration.
async fn rank(config: NewsConfig, store: &TokenStore, args: &RankArgs) -> Result<NewsResult> {
    let counts = args.top_counts(&config)?;
    let token_config = store.load().await;
    let news = News::new(config, WebScraper::new()?);
    news.get_headlines(args.fetch.category, &args.fetch.sources(), &token_config, Some(counts))
        .await
}

async fn run(cli: Cli) -> Result<String> {
    let config = cli.news_config()?;
    debug!(?config, "Resolved configuration");
    let store = TokenStore::new(&config);

    match cli.command {
        Command::Headlines(args) => {
            let result = rank(config, &store, &args).await?;
            to_json(&result)
        }
        Command::PostHeadlines(args) => {
            let data_dir = config.data_dir.clone();
            let filename = config.headlines_filename.clone();
            let result = rank(config, &store, &args).await?;
            write_news_result(&result, &data_dir, &filename).await?;
            to_json(&result)
        }
        Command::PostIgnoreTokens { tokens } => {
            let saved = store.save_ignore_tokens(&tokens).await?;
            saved_output(saved, &tokens)
        }
        Command::PostMultiWordTokens { phrases } => {
            let saved = store.save_multi_word_tokens(&phrases).await?;
            saved_output(saved, &phrases)
        }
        Command::PostSynonymTokens { file } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            let groups = parse_synonym_tokens(&raw).unwrap_or_else(|e| {
                error!(path = %file.display(), error = %e, "Malformed synonym document; nothing to store");
                Vec::new()
            });
            let saved = store.save_synonym_tokens(&groups).await?;
            saved_output(saved, &synonym_document(&groups))
        }
        Command::Summarize(args) => {
            let summarizer = LlmSummarizer::load(&config, args.llm_config.clone(), &args.template).await?;
            let news = News::new(config, WebScraper::new()?);
            let summary = news
                .summarize_headlines(args.fetch.category, &args.fetch.sources(), &summarizer)
                .await?;
            to_json(&summary)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => return report(e.to_string().trim().to_string()),
    };
    init_tracing(cli.verbose);

    let start_time = Instant::now();
    info!("headline_ranker starting up");

    let code = match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            report(ErrorBody::from(&e).error)
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    code
}
