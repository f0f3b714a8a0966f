use async_trait::async_trait;
use ethers::types::U256;
use std::error::Error;
use std::fmt::Debug;

use crate::endpoint::Endpoint;

/// Reads the current fee data from a single JSON-RPC endpoint.
#[async_trait]
pub trait FeeDataClient: Debug {
    type Error: Error + Send + Sync;

    async fn fee_data(&self, endpoint: &Endpoint) -> Result<FeeData, Self::Error>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeData {
    pub gas_price: Option<U256>, // in wei
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
}

impl FeeData {
    pub fn with_gas_price(gas_price: U256) -> FeeData {
        FeeData {
            gas_price: Some(gas_price),
            ..Default::default()
        }
    }
}
