use async_trait::async_trait;
use gas_watch::time::Time;
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Never sleeps. Records the requested durations and reports a fixed
/// elapsed time.
#[derive(Clone, Debug)]
pub struct MockTime {
    pub elapsed: Duration,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl MockTime {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Time for MockTime {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }

    fn elapsed(&self, _: Instant) -> Duration {
        self.elapsed
    }
}
