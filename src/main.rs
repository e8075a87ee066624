use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use libritts_db::app::{RunOptions, RunSummary, Stages, run_convert, write_report};
use libritts_db::audio::transcoder::{FfmpegTranscoder, TranscoderSettings};
use libritts_db::cli::{Cli, Commands, ConfigAction, Locations};
use libritts_db::config::Config;
use libritts_db::diagnostics::check_dependencies;
use libritts_db::output::print_summary;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Default level from -q/-v; RUST_LOG wins when set.
fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            locations,
            chunk_size,
            quality,
            jobs,
            skip_audio,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_overrides(&mut config, chunk_size, quality, jobs);
            let stages = if skip_audio {
                Stages::SqlOnly
            } else {
                Stages::All
            };
            convert(&config, &locations, stages, cli.quiet)?;
        }
        Commands::Sql {
            locations,
            chunk_size,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_overrides(&mut config, chunk_size, None, None);
            convert(&config, &locations, Stages::SqlOnly, cli.quiet)?;
        }
        Commands::Audio {
            locations,
            quality,
            jobs,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_overrides(&mut config, None, quality, jobs);
            convert(&config, &locations, Stages::AudioOnly, cli.quiet)?;
        }
        Commands::Check { corpus } => {
            let config = load_config(cli.config.as_deref())?;
            if !check_dependencies(&config, &corpus) {
                std::process::exit(1);
            }
        }
        Commands::Config {
            action: ConfigAction::Dump,
        } => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", config.to_toml()?);
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "libritts-db",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config), which must exist
/// 2. Default config path (~/.config/libritts-db/config.toml)
/// 3. Built-in defaults
///
/// Environment overrides apply on top; command-line flags after that.
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path).with_context(|| format!("loading config {}", path.display()))?
    } else {
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)?
    };

    Ok(config.with_env_overrides())
}

fn apply_overrides(
    config: &mut Config,
    chunk_size: Option<usize>,
    quality: Option<u8>,
    jobs: Option<usize>,
) {
    if let Some(chunk_size) = chunk_size {
        config.sql.chunk_size = chunk_size;
    }
    if let Some(quality) = quality {
        config.audio.quality = quality;
    }
    if let Some(jobs) = jobs {
        config.audio.jobs = jobs;
    }
}

fn convert(config: &Config, locations: &Locations, stages: Stages, quiet: bool) -> Result<()> {
    let options = RunOptions {
        corpus_root: locations.corpus.clone(),
        output_root: locations.output.clone(),
        stages,
        generated_on: chrono::Local::now().date_naive(),
        show_progress: !quiet && std::io::stderr().is_terminal(),
    };
    let transcoder = FfmpegTranscoder::system(TranscoderSettings {
        program: config.audio.transcoder.clone(),
        codec: config.audio.codec.clone(),
        quality: config.audio.quality,
    });

    let summary: RunSummary = run_convert(config, &options, &transcoder)
        .with_context(|| format!("converting {}", locations.corpus.display()))?;

    if let Some(report) = &locations.report {
        write_report(report, &summary)
            .with_context(|| format!("writing report {}", report.display()))?;
    }
    if !quiet {
        print_summary(&summary, std::io::stdout().is_terminal());
    }
    Ok(())
}
