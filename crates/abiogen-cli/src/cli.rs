use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Abiogen Contributors",
    version,
    about = "Abiogen CLI - A Monte-Carlo toy model estimating how often random prebiotic conditions yield a stable polyglycine chain.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Number of independent trials to run [default: 20000]
    #[arg(short = 'n', long, value_name = "NUM")]
    pub trials: Option<u64>,

    /// Seed for the random number generator [default: 42]
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Path to a configuration file in TOML format.
    /// Command-line flags take precedence over values in the file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Do not draw a progress bar on stderr
    #[arg(long)]
    pub no_progress: bool,
}
