mod cli;
mod infra;
mod preview;
mod routes;
mod server;

use nextcampus_leads::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
