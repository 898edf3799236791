use crate::render::{run_analyze, run_portfolio, AnalyzeArgs, PortfolioArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use smart_collection::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Smart Collection",
    about = "Score small government debts and serve the cost-benefit API",
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
    /// Analyze a single debt case and print the recommendation
    Analyze(AnalyzeArgs),
    /// Run the demonstration portfolio through the engine and print the totals
    Portfolio(PortfolioArgs),
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
        Command::Portfolio(args) => run_portfolio(args),
    }
}
