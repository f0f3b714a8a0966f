mod utilities;

pub mod mocks;

pub use utilities::{gwei_to_wei, setup_tracing};
