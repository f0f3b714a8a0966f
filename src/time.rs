use async_trait::async_trait;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Sleeping and elapsed time, so polling can be driven without real delays.
#[async_trait]
pub trait Time: Debug {
    async fn sleep(&self, duration: Duration);

    fn elapsed(&self, start: Instant) -> Duration;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTime;

#[async_trait]
impl Time for DefaultTime {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn elapsed(&self, start: Instant) -> Duration {
        start.elapsed()
    }
}
