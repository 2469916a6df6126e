use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use wordlat_cli::commands::{config_ops, inspect_ops, parse_lm_scale, run_ops};
use wordlat_cli::trace_init::init_tracing;
use wordlat_core::settings::settings;
use wordlat_core::LatticeError;

#[derive(Parser)]
#[command(name = "wordlat", about = "Word lattice decoding and analysis")]
struct Cli {
    /// Custom settings TOML (see `wordlat settings export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Also write JSON trace lines to <dir>/wordlat-trace.jsonl
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode every lattice in a list file and report WER
    Run {
        /// File of whitespace-separated `<lattice> <reference>` pairs
        list_file: PathBuf,
        /// Language-model scale (finite, non-negative)
        #[arg(value_parser = parse_lm_scale)]
        lm_scale: f64,
        /// Directory for .wordsAtTime, .dot and .lattice outputs
        output_dir: PathBuf,
        /// Write one JSON object per utterance to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show the best path of one lattice with per-edge scores
    Decode {
        /// Lattice file
        lattice_file: PathBuf,
        /// Language-model scale (default: decoder.lm_scale setting)
        #[arg(long, value_parser = parse_lm_scale)]
        lm_scale: Option<f64>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show size, path count and density of one lattice
    Stats {
        /// Lattice file
        lattice_file: PathBuf,
    },
    /// List the midpoint times of every edge with the given label
    Hits {
        /// Lattice file
        lattice_file: PathBuf,
        /// Edge label to find
        word: String,
    },
    /// List the distinct labels active at a time
    WordsAt {
        /// Lattice file
        lattice_file: PathBuf,
        /// Time in seconds
        time: f64,
    },
    /// Export a lattice as Graphviz DOT
    Dot {
        /// Lattice file
        lattice_file: PathBuf,
        /// Output DOT file
        output_file: PathBuf,
    },
    /// Export or validate settings TOML
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the default settings TOML
    Export,
    /// Validate a custom settings TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

fn dispatch(command: Command) -> Result<(), LatticeError> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    match command {
        Command::Run {
            list_file,
            lm_scale,
            output_dir,
            report,
        } => {
            run_ops::run_cmd(&list_file, lm_scale, &output_dir, report.as_deref(), &mut out)?;
        }
        Command::Decode {
            lattice_file,
            lm_scale,
            json,
        } => {
            let lm_scale = lm_scale.unwrap_or(settings().decoder.lm_scale);
            inspect_ops::decode_cmd(&lattice_file, lm_scale, json, &mut out)?;
        }
        Command::Stats { lattice_file } => inspect_ops::stats_cmd(&lattice_file, &mut out)?,
        Command::Hits { lattice_file, word } => {
            inspect_ops::hits_cmd(&lattice_file, &word, &mut out)?
        }
        Command::WordsAt { lattice_file, time } => {
            inspect_ops::words_at_cmd(&lattice_file, time, &mut out)?
        }
        Command::Dot {
            lattice_file,
            output_file,
        } => inspect_ops::dot_cmd(&lattice_file, &output_file)?,
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
        },
    }
    out.flush().map_err(|source| LatticeError::FileAccess {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    let trace_guard = init_tracing(filter, cli.trace_dir.as_deref());

    if let Some(file) = &cli.settings {
        config_ops::load_custom_settings(file);
    }

    if let Err(e) = dispatch(cli.command) {
        eprintln!("Error: {e}");
        drop(trace_guard);
        process::exit(e.exit_code());
    }
}
