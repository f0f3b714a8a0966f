use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider, ProviderError};
use ethers::types::{BlockNumber, U256};
use std::time::Duration;
use tracing::{debug, trace};

use crate::endpoint::Endpoint;
use crate::fee_data::{FeeData, FeeDataClient};

// Used when the node does not answer `eth_maxPriorityFeePerGas`.
const DEFAULT_PRIORITY_FEE: u64 = 1_000_000_000; // 1 gwei

/// Implementation backed by an ethers HTTP provider.

#[derive(Debug, thiserror::Error)]
pub enum ProviderFeeDataError {
    #[error("could not build the HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("eth_gasPrice request error: {0}")]
    GasPrice(ProviderError),

    #[error("latest block request error: {0}")]
    LatestBlock(ProviderError),
}

#[derive(Debug, Clone)]
pub struct ProviderFeeDataClient {
    client: reqwest::Client,
}

impl ProviderFeeDataClient {
    /// The HTTP client is shared by every endpoint. `request_timeout` bounds
    /// each individual JSON-RPC request.
    pub fn new(
        request_timeout: Option<Duration>,
    ) -> Result<ProviderFeeDataClient, ProviderFeeDataError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProviderFeeDataError::Client)?;
        Ok(ProviderFeeDataClient { client })
    }

    fn provider(&self, endpoint: &Endpoint) -> Provider<Http> {
        let http = Http::new_with_client(endpoint.url().clone(), self.client.clone());
        Provider::new(http)
    }
}

#[async_trait]
impl FeeDataClient for ProviderFeeDataClient {
    type Error = ProviderFeeDataError;

    #[tracing::instrument(level = "trace", skip(self))]
    async fn fee_data(&self, endpoint: &Endpoint) -> Result<FeeData, Self::Error> {
        let provider = self.provider(endpoint);

        // A `null` result is kept as an absent gas price.
        let (gas_price, block, priority_fee) = tokio::join!(
            provider.request::<_, Option<U256>>("eth_gasPrice", ()),
            provider.get_block(BlockNumber::Latest),
            provider.request::<_, U256>("eth_maxPriorityFeePerGas", ()),
        );

        let gas_price = gas_price.map_err(ProviderFeeDataError::GasPrice)?;
        let block = block.map_err(ProviderFeeDataError::LatestBlock)?;
        let priority_fee = priority_fee.unwrap_or_else(|err| {
            debug!("no priority fee from `{}`, using the default: {}", endpoint, err);
            U256::from(DEFAULT_PRIORITY_FEE)
        });

        let base_fee = block.and_then(|block| block.base_fee_per_gas);
        let (max_fee_per_gas, max_priority_fee_per_gas) = eip1559_fees(base_fee, priority_fee);

        let fee_data = FeeData {
            gas_price,
            max_fee_per_gas,
            max_priority_fee_per_gas,
        };
        trace!("fee data: {:?}", fee_data);
        Ok(fee_data)
    }
}

// Pre-London blocks have no base fee, so there are no EIP-1559 fees either.
fn eip1559_fees(base_fee: Option<U256>, priority_fee: U256) -> (Option<U256>, Option<U256>) {
    match base_fee {
        Some(base_fee) => {
            let max_fee = base_fee
                .checked_mul(U256::from(2))
                .and_then(|fee| fee.checked_add(priority_fee));
            (max_fee, Some(priority_fee))
        }
        None => (None, None),
    }
}
