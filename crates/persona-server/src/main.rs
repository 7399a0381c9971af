use std::process::ExitCode;

use clap::Parser;
use persona_server::cli::Cli;
use persona_server::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match persona_server::run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "persona agent stopped");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}
