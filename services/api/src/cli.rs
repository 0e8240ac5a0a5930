use crate::preview::{run_preview, PreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use nextcampus_leads::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Next Campus Leads",
    about = "Serve and preview the Next Campus application and consultation forms",
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
    /// Render a submission from a JSON file without contacting external services
    Preview(PreviewArgs),
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
        Command::Preview(args) => run_preview(args),
    }
}
