use crate::render::{run_analyze, run_compare, run_pillars, AnalyzeArgs, CompareArgs};
use crate::server;
use autotruth::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AutoTruth",
    about = "Score EV sustainability disclosures for transparency and greenwashing risk",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one disclosure file and print the breakdown
    Analyze(AnalyzeArgs),
    /// Rank several disclosure files against the top performer
    Compare(CompareArgs),
    /// List the lifecycle pillars with their configured weights
    Pillars,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Compare(args) => run_compare(args),
        Command::Pillars => run_pillars(),
    }
}
