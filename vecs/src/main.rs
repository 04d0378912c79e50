//! vecs CLI - inspect `.fvecs` / `.ivecs` vector files

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vecs::constants::{DEFAULT_DISPLAY_RECORDS, DEFAULT_SCAN_BYTES, DEFAULT_VIEW_COUNT};
use vecs::display::{render_layout, render_records};
use vecs::{DimensionPolicy, DimensionWindow, ReadError, ScanConfig, VecFormat, VecsFile};

#[derive(Parser)]
#[command(name = "vecs", author, version)]
#[command(about = "Inspect .fvecs / .ivecs vector files", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first vectors of a file with summary statistics
    View {
        /// Path to a .fvecs or .ivecs file
        path: PathBuf,

        /// Number of vectors to display
        #[arg(default_value_t = DEFAULT_VIEW_COUNT)]
        count: usize,
    },
    /// Show the byte layout of the start of a file
    Layout(LayoutArgs),
    /// Load a whole file whose vectors all share one dimension
    Load {
        /// Path to a .fvecs or .ivecs file
        path: PathBuf,

        /// Fail if vectors hold fewer values than this
        #[arg(long)]
        min_dim: Option<usize>,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Path to a .fvecs or .ivecs file
    path: PathBuf,

    /// Maximum bytes to read for the visualization
    #[arg(default_value_t = DEFAULT_SCAN_BYTES)]
    max_bytes: usize,

    /// Number of vectors to lay out
    #[arg(long, default_value_t = DEFAULT_DISPLAY_RECORDS)]
    records: usize,

    /// Dimension that is always accepted as plausible
    #[arg(long)]
    expected_dim: Option<i32>,

    /// Smallest plausible dimension
    #[arg(long)]
    min_dim: Option<i32>,

    /// Largest plausible dimension
    #[arg(long)]
    max_dim: Option<i32>,

    /// Never reinterpret rejected headers as big-endian
    #[arg(long)]
    no_byte_order_fallback: bool,
}

impl LayoutArgs {
    fn scan_config(&self, format: VecFormat) -> ScanConfig {
        let mut config = ScanConfig::for_format(format).with_max_records(Some(self.records));

        if self.expected_dim.is_some() || self.min_dim.is_some() || self.max_dim.is_some() {
            let base = DimensionWindow::default();
            let window = base
                .with_expected(self.expected_dim.unwrap_or(base.expected))
                .with_range(
                    self.min_dim.unwrap_or(base.min),
                    self.max_dim.unwrap_or(base.max),
                );
            config = config.with_policy(DimensionPolicy::Window(window));
        }
        if self.no_byte_order_fallback {
            config = config.with_byte_order_fallback(false);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::View { path, count } => handle_view(path, *count),
        Commands::Layout(args) => handle_layout(args),
        Commands::Load { path, min_dim } => handle_load(path, *min_dim),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(ReadError::UnsupportedFormat { .. }) => {
            println!("Unknown file format. Please use .fvecs or .ivecs files.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn handle_view(path: &Path, count: usize) -> vecs::Result<()> {
    let file = VecsFile::open(path)?;
    let outcome = file.read_records(count)?;

    if let Some(err) = &outcome.diagnostic {
        println!("{err}");
    }
    print!("{}", render_records(&outcome.records));
    Ok(())
}

fn handle_layout(args: &LayoutArgs) -> vecs::Result<()> {
    let file = VecsFile::open(&args.path)?;
    let config = args.scan_config(file.format);
    let report = file.scan_prefix(args.max_bytes, &config)?;

    print!("{}", render_layout(&report));
    Ok(())
}

fn handle_load(path: &Path, min_dim: Option<usize>) -> vecs::Result<()> {
    let file = VecsFile::open(path)?;
    match file.format {
        VecFormat::FloatVectors => {
            let set = file.load_uniform::<f32>(min_dim)?;
            println!("Loaded {} vectors of dimension {}", set.len(), set.dim);
        }
        VecFormat::IntVectors => {
            let set = file.load_uniform::<i32>(min_dim)?;
            println!("Loaded {} rows with k = {} entries per row", set.len(), set.dim);
        }
    }
    Ok(())
}
