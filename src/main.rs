use chuck::infrastructure::config::Config;
use chuck::infrastructure::http_client::HyperHttpClient;
use chuck::infrastructure::{logging, output};
use chuck::presentation::cli::{self, Cli};
use clap::Parser;

const FAILURE_EXIT_CODE: i32 = 2;

/// One command, one request, one rendered result.
///
/// Runs on a current-thread runtime: there is never more than a single
/// request in flight.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let requested_level = std::env::var(logging::LOG_LEVEL_VAR).ok();
    if let Err(err) = logging::init_logging(cli.debug, requested_level.as_deref()) {
        eprintln!("warning: logging disabled: {err}");
    }

    if let Err(err) = run(&cli).await {
        tracing::debug!("command failed: {err:#}");
        output::print_error(&cli::user_facing_message(&err));
        std::process::exit(FAILURE_EXIT_CODE);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let service =
        HyperHttpClient::new(config.timeout)?.create_joke_service(config.base_url.clone());
    cli.run(&service, &config).await
}
