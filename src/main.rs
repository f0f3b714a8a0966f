use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::filter::EnvFilter;

use gas_watch::{
    config::Config,
    fee_data::ProviderFeeDataClient,
    fetcher::{self, GasPriceFetcher},
    time::DefaultTime,
    watcher::Report,
    Watcher,
};

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let config = match Config::initialize() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let client = match ProviderFeeDataClient::new(config.attempt_timeout) {
        Ok(client) => client,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let configuration =
        fetcher::Configuration::default().set_attempt_timeout(config.attempt_timeout);
    let fetcher = GasPriceFetcher::new(client, config.endpoints, configuration);
    let mut watcher = Watcher::new(fetcher, DefaultTime, config.poll_interval);

    let limit = if config.once { Some(1) } else { None };
    let mut failed = false;
    watcher
        .run(limit, |report| match report {
            Report::Reading(observation) => {
                failed = false;
                println!("{}", observation);
            }
            Report::Unavailable(failures) => {
                failed = true;
                for failure in failures {
                    error!("{}", failure);
                }
            }
        })
        .await;

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
