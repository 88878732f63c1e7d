use async_trait::async_trait;
use std::time::Duration;

/// Source of waiting for jitter and rate-limit cooldowns
#[async_trait]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
pub mod stub {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Returns immediately and remembers every requested sleep
    #[derive(Clone, Default)]
    pub struct RecordingDelay {
        slept: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingDelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sleeps(&self) -> Vec<Duration> {
            self.slept.lock().clone()
        }

        pub fn count_of(&self, duration: Duration) -> usize {
            self.slept.lock().iter().filter(|d| **d == duration).count()
        }
    }

    #[async_trait]
    impl Delay for RecordingDelay {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().push(duration);
        }
    }
}
