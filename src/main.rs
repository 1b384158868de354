//! Captionkit command line
//!
//! Converts, validates and analyzes caption files. All caption logic lives
//! in the library; this binary wires configuration, logging and output.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing::{Level, info};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use captionkit::cli::{Args, Commands};
use captionkit::config::Config;
use captionkit::error::CaptionError;
use captionkit::format::CaptionFormat;
use captionkit::quality::OverallQuality;
use captionkit::subtitle::ParseMode;
use captionkit::track::{CaptionTrack, TrackAnalytics, TrackFilter, select_best_track};
use captionkit::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;
    info!("Starting captionkit");

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Convert { input, output, format, strict } => {
            let target = resolve_format(format.as_deref(), &config)?;
            if strict {
                config.parse.mode = ParseMode::Strict;
            }
            let output = output.unwrap_or_else(|| input.with_extension(target.extension()));

            let workflow = Workflow::new(config);
            workflow.convert_file(&input, &output, target).await?;
            println!("Wrote {}", output.display());
        }
        Commands::Batch { input_dir, format, output_dir } => {
            let target = resolve_format(format.as_deref(), &config)?;

            let workflow = Workflow::new(config);
            let summary = workflow
                .convert_directory(&input_dir, target, output_dir.as_ref())
                .await?;

            println!("Converted {} files", summary.converted.len());
            for (path, reason) in &summary.failed {
                println!("  failed: {} ({})", path.display(), reason);
            }
        }
        Commands::Validate { input, format } => {
            let format = format.as_deref().map(str::parse::<CaptionFormat>).transpose()?;

            let workflow = Workflow::new(config.clone());
            let report = workflow.validate_file(&input, format).await?;
            print_json(&report, config.output.pretty_json)?;

            if !report.is_valid {
                anyhow::bail!("{} is not a valid {} document", input.display(), report.format);
            }
        }
        Commands::Analyze { input, min_quality } => {
            let minimum = min_quality.as_deref().map(str::parse::<OverallQuality>).transpose()?;

            let workflow = Workflow::new(config.clone());
            let report = workflow.analyze_file(&input).await?;
            print_json(&report, config.output.pretty_json)?;

            if let Some(minimum) = minimum {
                workflow.assessor().check(&report.quality, minimum)?;
            }
        }
        Commands::Tracks { input, language, only } => {
            let content = tokio::fs::read_to_string(&input).await?;
            let tracks: Vec<CaptionTrack> = serde_json::from_str(&content)?;

            let filter = TrackFilter {
                language_codes: only.map(|codes| {
                    codes.split(',').map(|s| s.trim().to_string()).collect()
                }),
                ..Default::default()
            };
            let candidates: Vec<CaptionTrack> =
                filter.apply(&tracks)?.into_iter().cloned().collect();

            let analytics = TrackAnalytics::from_tracks(&tracks);
            println!(
                "{} tracks ({} available, {} manual, {} auto-generated), most common language: {}",
                analytics.total_tracks,
                analytics.available_tracks,
                analytics.manual_tracks,
                analytics.auto_generated_tracks,
                analytics.most_common_language().unwrap_or("-")
            );

            match select_best_track(&candidates, &language) {
                Some(track) => {
                    println!("Best track: {} [{}]", track.display_name(), track.caption_id)
                }
                None => println!("No accessible caption track found"),
            }
        }
        Commands::InitConfig { output } => {
            Config::default().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }

    info!("captionkit finished successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".captionkit").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "captionkit.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so JSON reports on stdout stay clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Resolve the target format from the command line or the config default
fn resolve_format(format: Option<&str>, config: &Config) -> Result<CaptionFormat, CaptionError> {
    match format {
        Some(name) => name.parse(),
        None => Ok(config.output.default_format),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
