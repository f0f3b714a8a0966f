pub mod config;
pub mod endpoint;
pub mod fee_data;
pub mod fetcher;
pub mod reading;
pub mod time;
pub mod watcher;

pub use endpoint::{Endpoint, EndpointList};
pub use fetcher::{fetch_gas_price, FetchResult, GasPriceFetcher};
pub use reading::GasReading;
pub use watcher::Watcher;
