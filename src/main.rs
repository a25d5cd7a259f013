//! Word-Ripple main entry point
//!
//! This is the command-line interface for the Word-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use word_ripple::clock::SystemClock;
use word_ripple::config::load_settings_with_hash;
use word_ripple::output::{write_result, write_result_to};
use word_ripple::{Coordinator, CrawlResult, Profiler};

/// Word-Ripple: a deadline-bounded word-frequency crawler
///
/// Word-Ripple crawls outward from a set of start pages, up to a maximum
/// depth and within a time limit, and reports the most popular words it
/// found along with the number of pages visited.
#[derive(Parser, Debug)]
#[command(name = "word-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A deadline-bounded word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (settings, config_hash) = load_settings_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let coordinator = Coordinator::new(settings)?;

    if cli.dry_run {
        print_dry_run(&coordinator);
        return Ok(());
    }

    let profiler = Profiler::new(Arc::new(SystemClock));
    let result = coordinator.run_profiled(&profiler).await?;

    let settings = coordinator.settings();
    emit_result(&result, settings.result_path.as_deref())?;
    emit_profile(&profiler, settings.profile_output_path.as_deref())?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the result and profile.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_ripple=info,warn"),
            1 => EnvFilter::new("word_ripple=debug,info"),
            2 => EnvFilter::new("word_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_dry_run(coordinator: &Coordinator) {
    let settings = coordinator.settings();
    let options = &settings.options;

    println!("=== Word-Ripple Dry Run ===\n");
    println!("Crawler Configuration:");
    println!("  Implementation: {:?}", settings.implementation);
    println!("  Parallelism: {}", settings.parallelism);
    println!("  Max depth: {}", options.max_depth);
    println!("  Timeout: {:?}", options.timeout);
    println!("  Popular word count: {}", options.popular_word_count);
    println!("  Ignored URL patterns: {}", options.ignored_urls.len());
    println!("  Ignored word patterns: {}", options.ignored_words.len());

    println!("\nOutput:");
    println!(
        "  Result: {}",
        settings.result_path.as_deref().unwrap_or("<stdout>")
    );
    println!(
        "  Profile: {}",
        settings.profile_output_path.as_deref().unwrap_or("<stdout>")
    );

    println!("\nStart Pages ({}):", settings.start_pages.len());
    for page in &settings.start_pages {
        println!("  - {}", page);
    }

    println!("\n✓ Configuration is valid");
}

fn emit_result(result: &CrawlResult, path: Option<&str>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            write_result(result, Path::new(path))
                .with_context(|| format!("Failed to write result to {}", path))?;
            tracing::info!("Result written to {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_result_to(result, &mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn emit_profile(profiler: &Profiler, path: Option<&str>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            profiler
                .write_data(Path::new(path))
                .with_context(|| format!("Failed to write profile to {}", path))?;
            tracing::info!("Profile appended to {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            profiler.write_data_to(&mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
