use std::time::{Duration, Instant};
use tracing::{info, trace, warn};

use crate::fee_data::FeeDataClient;
use crate::fetcher::{EndpointFailure, FetchResult, GasPriceFetcher};
use crate::reading::{GasReading, Observation, PriceChange};
use crate::time::Time;

// Default values.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub enum Report<E> {
    Reading(Observation),
    Unavailable(Vec<EndpointFailure<E>>),
}

/// Polls the fetcher periodically and keeps the last successful reading, so
/// each new reading can be compared against it.
#[derive(Debug)]
pub struct Watcher<C: FeeDataClient, T: Time> {
    fetcher: GasPriceFetcher<C>,
    time: T,
    interval: Duration,
    previous: Option<GasReading>,
}

impl<C: FeeDataClient, T: Time> Watcher<C, T>
where
    C: Send + Sync,
    T: Send + Sync,
{
    pub fn new(fetcher: GasPriceFetcher<C>, time: T, interval: Duration) -> Self {
        Self {
            fetcher,
            time,
            interval,
            previous: None,
        }
    }

    pub fn with_previous(mut self, previous: Option<GasReading>) -> Self {
        self.previous = previous;
        self
    }

    pub fn previous(&self) -> Option<GasReading> {
        self.previous
    }

    pub fn fetcher(&self) -> &GasPriceFetcher<C> {
        &self.fetcher
    }

    /// Fetches once. A failed fetch leaves the previous reading untouched.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn tick(&mut self) -> Report<C::Error> {
        match self.fetcher.fetch_gas_price().await {
            FetchResult::Success { reading, .. } => {
                let change = self
                    .previous
                    .map(|previous| PriceChange::between(previous, reading));
                self.previous = Some(reading);

                let observation = Observation { reading, change };
                info!("Gas price: {}", observation);
                Report::Reading(observation)
            }

            FetchResult::Failure(failures) => {
                warn!("Could not obtain the gas price from any endpoint");
                Report::Unavailable(failures)
            }
        }
    }

    /// Ticks `limit` times, or forever when `limit` is `None`. Consecutive
    /// ticks start `interval` apart, the time spent fetching included.
    pub async fn run<F>(&mut self, limit: Option<usize>, mut on_report: F)
    where
        F: FnMut(&Report<C::Error>) + Send,
    {
        if limit == Some(0) {
            return;
        }

        let mut ticks = 0;
        loop {
            let start = Instant::now();
            let report = self.tick().await;
            on_report(&report);
            ticks += 1;

            if limit.map_or(false, |limit| ticks >= limit) {
                break;
            }

            let pause = self.interval.saturating_sub(self.time.elapsed(start));
            trace!("Sleeping for {:?}", pause);
            self.time.sleep(pause).await;
        }
    }
}
