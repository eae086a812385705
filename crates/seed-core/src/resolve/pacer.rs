//! Politeness delay between outbound lookups

use std::time::Duration;

use tokio::time::Instant;

/// Keeps at least `min_interval` between the end of one call and the start
/// of the next.
#[derive(Debug, Clone)]
pub struct Pacer {
    min_interval: Duration,
    last_finished: Option<Instant>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_finished: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the interval since the previous call finished has passed.
    /// The first call never waits.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_finished {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
    }

    /// Records that the current call has returned.
    pub fn finished(&mut self) {
        self.last_finished = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_does_not_wait() {
        let mut pacer = Pacer::new(Duration::from_secs(5));
        let start = Instant::now();

        pacer.wait().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_calls_are_spaced() {
        let mut pacer = Pacer::new(Duration::from_millis(150));
        let start = Instant::now();

        for _ in 0..3 {
            pacer.wait().await;
            pacer.finished();
        }

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_still_gets_full_pause() {
        let mut pacer = Pacer::new(Duration::from_millis(150));

        pacer.wait().await;
        tokio::time::sleep(Duration::from_millis(500)).await;
        pacer.finished();
        let returned = Instant::now();
        pacer.wait().await;

        assert!(returned.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_never_waits() {
        let mut pacer = Pacer::disabled();
        let start = Instant::now();

        for _ in 0..10 {
            pacer.wait().await;
            pacer.finished();
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
