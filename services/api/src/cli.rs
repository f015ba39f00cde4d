use crate::demo::{run_demo, run_estimate, DemoArgs, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use estate_valuation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Estate Valuation",
    about = "Serve and run comparable-driven home valuations from the command line",
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
    /// Value a single home against an optional listing export
    Valuation {
        #[command(subcommand)]
        command: ValuationCommand,
    },
    /// Value a handful of sample homes against the bundled Oahu listings
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ValuationCommand {
    /// Print an estimate, value range, comparables and projections
    Estimate(EstimateArgs),
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
        Command::Valuation {
            command: ValuationCommand::Estimate(args),
        } => run_estimate(args),
        Command::Demo(args) => run_demo(args),
    }
}
