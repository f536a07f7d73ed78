//! sndutils CLI - row-wise transformations over snd tables
//!
//! ```bash
//! sndutils rank [-0] in.snd              # percentile ranks, -0 for zero truncation
//! sndutils selcol col.list [in.snd]      # keep columns named in col.list (stdin if no input)
//! sndutils noise [-r 0.3] in.snd         # randomly turn values into zero
//! sndutils top in.snd                    # two largest values per row and their labels
//! ```
//!
//! Every input path accepts `-` for standard input. Output goes to standard output, logs to
//! standard error (`RUST_LOG` or `-v`).

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sndutils::execution::{RunContext, Runner, TracingObserver};
use sndutils::ingestion::{STDIN_PATH, SndWriter, open_path};
use sndutils::processing::{
    ColumnSelector, DEFAULT_NOISE_RATE, NoiseInjector, NoiseOptions, RankOptions, Ranker,
    RecordTransform, TopTwoReporter,
};

#[derive(Parser)]
#[command(name = "sndutils")]
#[command(about = "Row-wise transformations over tab-separated snd tables", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert numbers to zero-truncated ranks
    Rank {
        /// Rank values <= 0 as a bare 0 and leave them out of the population
        #[arg(short = '0')]
        zero_truncate: bool,

        /// Input snd file
        input: PathBuf,
    },

    /// Select columns based on their names
    Selcol {
        /// Column names to keep, one per line
        col_list: PathBuf,

        /// Input snd file (default: stdin)
        input: Option<PathBuf>,
    },

    /// Randomly turn some values to zero
    Noise {
        /// Probability of zeroing each value
        #[arg(short = 'r', long = "rate", default_value_t = DEFAULT_NOISE_RATE)]
        rate: f64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Input snd file
        input: PathBuf,
    },

    /// Report the top 2 classes of each row
    Top {
        /// Input snd file
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    let runner = Runner::new().with_observer(Arc::new(TracingObserver));
    let mut writer = SndWriter::new(io::stdout().lock());

    match command {
        Commands::Rank {
            zero_truncate,
            input,
        } => {
            let mut ranker = Ranker::new(RankOptions { zero_truncate });
            stream(&runner, "rank", &input, &mut writer, &mut ranker)
        }
        Commands::Selcol { col_list, input } => {
            let names = open_path(&col_list)
                .with_context(|| format!("opening name list {}", col_list.display()))?;
            let mut selector = ColumnSelector::from_reader(names)
                .with_context(|| format!("reading name list {}", col_list.display()))?;
            let input = input.unwrap_or_else(|| PathBuf::from(STDIN_PATH));
            stream(&runner, "selcol", &input, &mut writer, &mut selector)
        }
        Commands::Noise { rate, seed, input } => {
            let mut noise = NoiseInjector::from_options(&NoiseOptions { rate, seed })?;
            stream(&runner, "noise", &input, &mut writer, &mut noise)
        }
        Commands::Top { input } => {
            let mut top = TopTwoReporter::new();
            stream(&runner, "top", &input, &mut writer, &mut top)
        }
    }
}

fn stream<W: Write, T: RecordTransform>(
    runner: &Runner,
    command: &'static str,
    input: &Path,
    writer: &mut SndWriter<W>,
    transform: &mut T,
) -> Result<()> {
    let reader = open_path(input).with_context(|| format!("opening {}", input.display()))?;
    let ctx = RunContext {
        command,
        input: input.to_path_buf(),
    };
    runner
        .run(&ctx, reader, writer, transform)
        .with_context(|| format!("{command} failed on {}", input.display()))?;
    Ok(())
}
