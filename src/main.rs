use clap::{Parser, Subcommand};
use folder_grid::compose::{ComposeRequest, compose};
use folder_grid::config::{self, BackendKind, GridConfig};
use folder_grid::{logger, output, prune};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "folder-grid")]
#[command(about = "Compose folders of images into one grid, or prune badly cropped sprites")]
#[command(long_about = "\
Compose folders of images into one grid, or prune badly cropped sprites

compose: every bmp/png/jpg/jpeg file under the input folders (searched
recursively, separate several folders with ';') is resized to one cell and
placed left to right, top to bottom on a canvas of fixed width. The result
is written as <output-file>.png, or '<output-file> (N).png' if that name is
taken.

prune: every image directly inside a folder whose four corner pixels
include a fully transparent one is deleted.

Run 'folder-grid gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Log per-file decisions (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags for the compose command. Anything left unset comes from the config
/// file, then from the stock defaults.
#[derive(clap::Args)]
struct ComposeArgs {
    /// Input folder(s), separated by ';'
    #[arg(long, short)]
    input: String,

    /// Existing directory to write the grid into
    #[arg(long, short)]
    output: PathBuf,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output base name, without extension [default: OutputGrid]
    #[arg(long)]
    output_file: Option<String>,

    /// Canvas width in pixels [default: 520]
    #[arg(long)]
    width: Option<u32>,

    /// Cell width in pixels [default: 26]
    #[arg(long)]
    cell_width: Option<u32>,

    /// Cell height in pixels [default: 26]
    #[arg(long)]
    cell_height: Option<u32>,

    /// Rendering backend [default: sharpened]
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Resampler id 1-14, unknown ids use bicubic [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    resampler: Option<i64>,

    /// Gaussian sharpen sigma [default: 4.5]
    #[arg(long)]
    sigma: Option<f32>,

    /// Gaussian sharpen radius [default: 2]
    #[arg(long)]
    radius: Option<u32>,

    /// Resize only, skip sharpening
    #[arg(long)]
    no_sharpen: bool,

    /// Interpolation mode 0-7 for the legacy backend [default: 7]
    #[arg(long, allow_negative_numbers = true)]
    interpolation: Option<i64>,

    /// Sort input paths before layout
    #[arg(long)]
    sort: bool,

    /// Maximum parallel workers [default: CPU cores]
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Lay out every image in the input folders as one grid PNG
    Compose(ComposeArgs),
    /// Delete images with a fully transparent corner pixel
    Prune {
        /// Folder to prune (not recursive)
        dir: PathBuf,
        /// Report what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Compose(args) => {
            logger::init(cli.verbose);
            match run_compose(args) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Prune { dir, dry_run } => {
            logger::init(cli.verbose);
            match prune::prune_directory(&dir, dry_run) {
                Ok(report) => {
                    output::print_prune_output(&report, dry_run);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            ExitCode::SUCCESS
        }
    }
}

fn run_compose(args: ComposeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut grid_config = config::load_config(args.config.as_deref())?;
    apply_overrides(&mut grid_config, &args);
    init_thread_pool(&grid_config.processing);

    let request = ComposeRequest::new(&args.input, args.output);
    let summary = compose(&request, &grid_config)?;
    output::print_compose_output(&summary);
    Ok(())
}

/// Layer command-line flags on top of the loaded config.
fn apply_overrides(config: &mut GridConfig, args: &ComposeArgs) {
    if let Some(name) = &args.output_file {
        config.output_file = name.clone();
    }
    if let Some(width) = args.width {
        config.image_width = width;
    }
    if let Some(w) = args.cell_width {
        config.cell_width = w;
    }
    if let Some(h) = args.cell_height {
        config.cell_height = h;
    }
    if let Some(kind) = args.backend {
        config.backend.kind = kind;
    }
    if let Some(id) = args.resampler {
        config.backend.resampler_id = id;
    }
    if let Some(sigma) = args.sigma {
        config.backend.sigma = sigma;
    }
    if let Some(radius) = args.radius {
        config.backend.radius = radius;
    }
    if args.no_sharpen {
        config.backend.sharpen = false;
    }
    if let Some(mode) = args.interpolation {
        config.backend.interpolation_mode = mode;
    }
    if args.sort {
        config.sort_paths = true;
    }
    if args.threads.is_some() {
        config.processing.max_processes = args.threads;
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
