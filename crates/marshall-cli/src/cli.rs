use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "MarshallMix Developers",
    version,
    about = "MarshallMix CLI - Marshall asphalt mix volumetrics, optimum asphalt content and aggregate gradation blending.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a design session template with default material constants and zeroed specimens.
    Init(InitArgs),
    /// Compute Gmb, VTM, VMA and VFA for every specimen and select the optimum asphalt content.
    Marshall(MarshallArgs),
    /// Blend the aggregate gradations with the mix proportions.
    Gradation(GradationArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned columns rounded to two decimals.
    #[default]
    Table,
    /// Comma-separated values at full precision.
    Csv,
}

/// Arguments shared by the calculation subcommands.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Path to the design session file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output format of the result tables.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Set a specific session value, overriding the session file.
    /// Can be used multiple times. Example: -S materials.gmm=2.46
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Write the template to this path instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of zeroed specimen rows (1-20).
    #[arg(long, value_name = "INT")]
    pub rows: Option<usize>,

    /// Overwrite the output file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `marshall` subcommand.
#[derive(Args, Debug)]
pub struct MarshallArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Override the design air-void content used to select the optimum specimen.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub target_vtm: Option<f64>,

    /// Override the number of specimen rows (1-20).
    #[arg(short = 'n', long, value_name = "INT")]
    pub specimen_count: Option<usize>,

    /// Also report the asphalt content interpolated between the specimens straddling the target VTM.
    #[arg(long)]
    pub bracket: bool,

    /// Print the chart series of every Marshall property after the results table.
    #[arg(long)]
    pub series: bool,
}

/// Arguments for the `gradation` subcommand.
#[derive(Args, Debug)]
pub struct GradationArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Override the tolerance on the sum of the mix proportions.
    #[arg(long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    /// Print the gradation chart series after the results table.
    #[arg(long)]
    pub series: bool,
}
