//! Command-line interface for libritts-db
//!
//! Provides argument parsing using clap derive macros.

use crate::defaults;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Convert a LibriTTS-style corpus into SQL scripts and transcoded audio
#[derive(Parser, Debug)]
#[command(
    name = "libritts-db",
    version,
    about = "Convert a LibriTTS-style corpus into SQL scripts and transcoded audio"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors, hide the progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Input and output locations shared by the conversion commands.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Locations {
    /// Corpus root containing BOOKS.txt, CHAPTERS.txt and speakers.tsv
    #[arg(value_name = "CORPUS", default_value = defaults::CORPUS_ROOT)]
    pub corpus: PathBuf,

    /// Output root for SQL scripts and transcoded audio
    #[arg(value_name = "OUTPUT", default_value = defaults::OUTPUT_ROOT)]
    pub output: PathBuf,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit SQL scripts and transcode audio
    Convert {
        #[command(flatten)]
        locations: Locations,

        /// Transcription rows per chunk file
        #[arg(long, value_name = "N")]
        chunk_size: Option<usize>,

        /// Transcoder quality setting (lower is better for mp3 VBR)
        #[arg(long, value_name = "Q")]
        quality: Option<u8>,

        /// Parallel transcoder processes
        #[arg(long, short = 'j', value_name = "N")]
        jobs: Option<usize>,

        /// Only emit SQL scripts
        #[arg(long)]
        skip_audio: bool,
    },

    /// Emit SQL scripts only
    Sql {
        #[command(flatten)]
        locations: Locations,

        /// Transcription rows per chunk file
        #[arg(long, value_name = "N")]
        chunk_size: Option<usize>,
    },

    /// Transcode audio of the reconciled chapters only
    Audio {
        #[command(flatten)]
        locations: Locations,

        /// Transcoder quality setting (lower is better for mp3 VBR)
        #[arg(long, value_name = "Q")]
        quality: Option<u8>,

        /// Parallel transcoder processes
        #[arg(long, short = 'j', value_name = "N")]
        jobs: Option<usize>,
    },

    /// Check the transcoder and corpus layout
    Check {
        /// Corpus root to inspect
        #[arg(value_name = "CORPUS", default_value = defaults::CORPUS_ROOT)]
        corpus: PathBuf,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigAction {
    /// Print the effective configuration (file + environment) as TOML
    Dump,
}
