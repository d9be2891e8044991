use clap::Parser;
use spring_training_calendar::logging::{setup_tracing, shutdown_tracing};
use spring_training_calendar::schedule::games::convert_listing;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "parse-games")]
#[command(about = "Convert a spring training games listing into the calendar's JSON payload")]
struct Cli {
    /// Games listing, one game per line
    #[arg(default_value = "games.txt")]
    input: PathBuf,

    /// Where to write the payload
    #[arg(default_value = "games.json")]
    output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loki = setup_tracing().await;

    let exit_code = match convert_listing(&cli.input, &cli.output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    };

    shutdown_tracing(loki).await;

    exit_code
}
