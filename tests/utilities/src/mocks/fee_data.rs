use async_trait::async_trait;
use ethers::types::U256;
use gas_watch::{
    endpoint::Endpoint,
    fee_data::{FeeData, FeeDataClient},
};
use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// The request fails with a transport error.
    Unreachable,

    /// The request succeeds without a gas price.
    MissingGasPrice,

    /// The request succeeds with this gas price, in wei.
    GasPrice(u64),

    /// The request never completes.
    Hang,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MockFeeDataError {
    #[error("fee data mock error: connection refused")]
    Unreachable,

    #[error("fee data mock error: nothing scripted for `{0}`")]
    Unscripted(String),
}

/// Answers each endpoint from a scripted sequence of responses. The last
/// response of a sequence is repeated once the others were consumed.
#[derive(Debug, Default)]
pub struct MockFeeDataClient {
    responses: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    calls: Mutex<Vec<String>>,
}

impl MockFeeDataClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, response: MockResponse) -> Self {
        self.respond_with_sequence(url, vec![response])
    }

    pub fn respond_with_sequence(self, url: &str, responses: Vec<MockResponse>) -> Self {
        let key = Endpoint::parse(url).unwrap().to_string();
        self.responses
            .lock()
            .unwrap()
            .insert(key, responses.into_iter().collect());
        self
    }

    /// Endpoints contacted so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self, key: &str) -> Option<MockResponse> {
        let mut responses = self.responses.lock().unwrap();
        let sequence = responses.get_mut(key)?;
        if sequence.len() > 1 {
            sequence.pop_front()
        } else {
            sequence.front().cloned()
        }
    }
}

#[async_trait]
impl FeeDataClient for MockFeeDataClient {
    type Error = MockFeeDataError;

    async fn fee_data(&self, endpoint: &Endpoint) -> Result<FeeData, Self::Error> {
        let key = endpoint.to_string();
        self.calls.lock().unwrap().push(key.clone());

        match self.next_response(&key) {
            None => Err(MockFeeDataError::Unscripted(key)),
            Some(MockResponse::Unreachable) => Err(MockFeeDataError::Unreachable),
            Some(MockResponse::MissingGasPrice) => Ok(FeeData::default()),
            Some(MockResponse::GasPrice(wei)) => Ok(FeeData::with_gas_price(U256::from(wei))),
            Some(MockResponse::Hang) => std::future::pending().await,
        }
    }
}
