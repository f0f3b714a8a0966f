use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::endpoint::{Endpoint, EndpointList};
use crate::fee_data::FeeDataClient;
use crate::reading::{GasReading, ReadingError};

// Default values.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a single endpoint did not produce a gas price.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AttemptError<E> {
    #[error("fee data request: {0}")]
    Client(E),

    #[error("response has no gas price")]
    MissingGasPrice,

    #[error("unusable gas price: {0}")]
    Conversion(ReadingError),

    #[error("no response after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure<E> {
    pub endpoint: Endpoint,
    pub error: AttemptError<E>,
}

impl<E: fmt::Display> fmt::Display for EndpointFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.endpoint, self.error)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<E> {
    /// The first usable reading, with the failures of the endpoints tried
    /// before it.
    Success {
        reading: GasReading,
        skipped: Vec<EndpointFailure<E>>,
    },

    /// Every endpoint failed, one entry per endpoint in list order.
    Failure(Vec<EndpointFailure<E>>),
}

impl<E> FetchResult<E> {
    /// Number of endpoints that were contacted.
    pub fn attempts(&self) -> usize {
        match self {
            FetchResult::Success { skipped, .. } => skipped.len() + 1,
            FetchResult::Failure(failures) => failures.len(),
        }
    }

    pub fn reading(&self) -> Option<GasReading> {
        match self {
            FetchResult::Success { reading, .. } => Some(*reading),
            FetchResult::Failure(_) => None,
        }
    }

    pub fn failures(&self) -> &[EndpointFailure<E>] {
        match self {
            FetchResult::Success { skipped, .. } => skipped,
            FetchResult::Failure(failures) => failures,
        }
    }

    pub fn into_result(self) -> Result<GasReading, ExhaustedError<E>> {
        match self {
            FetchResult::Success { reading, .. } => Ok(reading),
            FetchResult::Failure(failures) => Err(ExhaustedError { failures }),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("all {} endpoints failed", .failures.len())]
pub struct ExhaustedError<E> {
    pub failures: Vec<EndpointFailure<E>>,
}

#[derive(Debug, Clone)]
pub struct Configuration {
    /// Upper bound for a single endpoint attempt. `None` waits for as long as
    /// the client does.
    pub attempt_timeout: Option<Duration>,
}

impl Configuration {
    pub fn set_attempt_timeout(mut self, attempt_timeout: Option<Duration>) -> Configuration {
        self.attempt_timeout = attempt_timeout;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            attempt_timeout: Some(ATTEMPT_TIMEOUT),
        }
    }
}

#[derive(Debug)]
pub struct GasPriceFetcher<C: FeeDataClient> {
    client: C,
    endpoints: EndpointList,
    configuration: Configuration,
}

impl<C: FeeDataClient> GasPriceFetcher<C>
where
    C: Send + Sync,
{
    pub fn new(client: C, endpoints: EndpointList, configuration: Configuration) -> Self {
        Self {
            client,
            endpoints,
            configuration,
        }
    }

    pub fn endpoints(&self) -> &EndpointList {
        &self.endpoints
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn fetch_gas_price(&self) -> FetchResult<C::Error> {
        fetch_gas_price(
            &self.client,
            &self.endpoints,
            self.configuration.attempt_timeout,
        )
        .await
    }
}

/// Tries the endpoints in order, one at a time, and returns the first gas
/// price that is present. Never returns early on an error.
#[tracing::instrument(level = "trace", skip_all)]
pub async fn fetch_gas_price<C: FeeDataClient>(
    client: &C,
    endpoints: &EndpointList,
    attempt_timeout: Option<Duration>,
) -> FetchResult<C::Error> {
    let mut failures = Vec::with_capacity(endpoints.len());

    for endpoint in endpoints {
        trace!("Requesting fee data from `{}`", endpoint);
        let start = Instant::now();

        match attempt(client, endpoint, attempt_timeout).await {
            Ok(reading) => {
                debug!(
                    "Gas price from `{}` is {} (took {:?})",
                    endpoint,
                    reading,
                    start.elapsed()
                );
                return FetchResult::Success {
                    reading,
                    skipped: failures,
                };
            }

            Err(err) => {
                debug!("Endpoint `{}` failed: {}", endpoint, err);
                failures.push(EndpointFailure {
                    endpoint: endpoint.clone(),
                    error: err,
                });
            }
        }
    }

    debug!("All {} endpoints failed", failures.len());
    FetchResult::Failure(failures)
}

async fn attempt<C: FeeDataClient>(
    client: &C,
    endpoint: &Endpoint,
    attempt_timeout: Option<Duration>,
) -> Result<GasReading, AttemptError<C::Error>> {
    let fee_data = match attempt_timeout {
        Some(duration) => tokio::time::timeout(duration, client.fee_data(endpoint))
            .await
            .map_err(|_| AttemptError::Timeout(duration))?,
        None => client.fee_data(endpoint).await,
    }
    .map_err(AttemptError::Client)?;

    // The client succeeding is not enough, the field itself must be present.
    let gas_price = fee_data.gas_price.ok_or(AttemptError::MissingGasPrice)?;
    GasReading::from_wei(gas_price).map_err(AttemptError::Conversion)
}
