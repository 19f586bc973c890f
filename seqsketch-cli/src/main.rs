use clap::{Parser, Subcommand};
use std::path::PathBuf;
use anyhow::{Result, Context};

mod config;
mod commands;
mod error;

use config::{Config, MethodType, OutputFormat, SketchOverrides};
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "seqsketch")]
#[command(about = "seqsketch - k-mer encoding and sequence sketching")]
#[command(version)]
#[command(long_about = "
seqsketch packs k-mers into 2-bit integer codes and selects minimizer,
closed-syncmer or protein-minimizer sketches from FASTA/FASTQ records.

Examples:
  seqsketch encode ACGT GGCAA
  seqsketch decode -k 4 27 228
  seqsketch kmers reads.fa -k 21 --canonical
  seqsketch sketch genome.fa --method minimizer -k 15 -w 10
  seqsketch sketch plasmid.fa --method syncmer -k 15 -s 5 --circular --format json
  seqsketch sketch proteins.fa --method protein --protein -k 7 -w 5
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack k-mers (1 to 32 bases) into integer codes
    Encode {
        /// K-mers to encode
        #[arg(required = true)]
        kmers: Vec<String>,
    },

    /// Unpack integer codes into k-mers
    Decode {
        /// K-mer size of the codes
        #[arg(short, long)]
        k: usize,

        /// Codes to decode
        #[arg(required = true)]
        codes: Vec<u64>,
    },

    /// List the packed code of every k-mer of every record
    Kmers {
        /// Input sequence file (FASTA/FASTQ, optionally gzipped)
        input: PathBuf,

        /// K-mer size (1 to 32)
        #[arg(short, long)]
        k: Option<usize>,

        /// Report canonical codes
        #[arg(long)]
        canonical: bool,

        /// Treat records as circular
        #[arg(long)]
        circular: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Select a sketch of every record
    Sketch {
        /// Input sequence file (FASTA/FASTQ, optionally gzipped)
        input: PathBuf,

        /// Sketch method
        #[arg(short, long)]
        method: Option<MethodType>,

        /// K-mer size
        #[arg(short, long)]
        k: Option<usize>,

        /// Minimizer window width in k-mers
        #[arg(short, long)]
        w: Option<usize>,

        /// Syncmer s-mer size
        #[arg(short, long)]
        s: Option<usize>,

        /// Reading frame for protein sketches of nucleotide input (1, 2, 3, -1, -2, -3)
        #[arg(long, allow_negative_numbers = true)]
        frame: Option<i8>,

        /// Treat records as circular
        #[arg(long)]
        circular: bool,

        /// Records are amino-acid sequences
        #[arg(long)]
        protein: bool,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print an example configuration file
    Config {
        /// Write the example to this path instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    // Setup logging
    setup_logging(cli.verbose, cli.quiet)?;

    // Load configuration
    let config = Config::load(cli.config.as_deref())
        .map_err(|e| CliError::config(format!("{:#}", e)))?;

    // Set global thread count, command line first
    let threads = cli.threads.unwrap_or(config.general.threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to set thread count")?;
    log::debug!("Using {} threads", threads);

    // Execute the requested command
    match cli.command {
        Commands::Encode { kmers } => {
            let mut out = commands::open_output(None)?;
            commands::encode::execute(&kmers, &mut out)?;
        }

        Commands::Decode { k, codes } => {
            let mut out = commands::open_output(None)?;
            commands::decode::execute(k, &codes, &mut out)?;
        }

        Commands::Kmers { input, k, canonical, circular, out } => {
            let mut writer = commands::open_output(out.as_deref())?;
            commands::kmers::execute(
                &input,
                k.unwrap_or(config.sketch.k),
                canonical,
                circular || config.sketch.circular,
                &mut writer,
            )?;
        }

        Commands::Sketch {
            input,
            method,
            k,
            w,
            s,
            frame,
            circular,
            protein,
            format,
            out,
        } => {
            let overrides = SketchOverrides { method, k, w, s, frame, circular };
            let mut writer = commands::open_output(out.as_deref())?;
            commands::sketch::execute(&config, &input, &overrides, protein, format, &mut writer)?;
        }

        Commands::Config { out } => match out {
            Some(path) => {
                Config::write_example(&path)?;
                log::info!("Wrote example configuration to {}", path.display());
            }
            None => print!("{}", Config::example_toml()?),
        },
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            print_error_and_exit(cli_err);
        }
        return Err(err);
    }

    Ok(())
}
