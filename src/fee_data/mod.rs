mod client;
mod provider;

pub use client::{FeeData, FeeDataClient};
pub use provider::{ProviderFeeDataClient, ProviderFeeDataError};
