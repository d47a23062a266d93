//! Bounded, sequential retry with exponential backoff.
//!
//! [`RetryPolicy`] decides *whether* and *how long*; a [`Sleeper`] does the
//! waiting, so tests swap in a recording fake instead of real time.

use std::{fmt::Display, future::Future, time::Duration};

use tracing::warn;

/// Something that can wait for a given duration.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> + Send;
}

/// Real wall-clock sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Max attempts plus a doubling delay, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. `0` is treated as `1`.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exp)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt bound is reached. Attempts are strictly sequential.
    ///
    /// `op` receives the 1-based attempt number. The last error is returned
    /// unchanged when retries are exhausted.
    pub async fn run<T, E, F, Fut, P, S>(
        &self,
        sleeper: &S,
        is_retryable: P,
        mut op: F,
    ) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        S: Sleeper,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts && is_retryable(&err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retryable failure, backing off"
                    );
                    sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{sync::Mutex, time::Duration};

    use super::Sleeper;

    /// Fake clock: records requested delays and returns immediately.
    #[derive(Debug, Default)]
    pub struct RecordingSleeper {
        pub delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn recorded(&self) -> Vec<Duration> {
            self.delays.lock().unwrap().clone()
        }
    }

    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, delay: Duration) {
            self.delays.lock().unwrap().push(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::{testing::RecordingSleeper, *};

    #[derive(Debug, PartialEq)]
    enum Fail {
        Transient,
        Fatal,
    }

    impl Display for Fail {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    fn transient(e: &Fail) -> bool {
        *e == Fail::Transient
    }

    #[test]
    fn delays_double_from_base() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(1), Duration::from_secs(2));
        assert_eq!(p.delay_for(2), Duration::from_secs(4));
        assert_eq!(p.delay_for(3), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn succeeds_after_two_transient_failures() {
        let sleeper = RecordingSleeper::default();
        let calls = AtomicU32::new(0);

        let out = RetryPolicy::default()
            .run(&sleeper, transient, |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(Fail::Transient)
                    } else {
                        Ok("take")
                    }
                }
            })
            .await;

        assert_eq!(out, Ok("take"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            sleeper.recorded(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
    }

    #[tokio::test]
    async fn fatal_error_is_not_retried() {
        let sleeper = RecordingSleeper::default();
        let calls = AtomicU32::new(0);

        let out: Result<(), Fail> = RetryPolicy::default()
            .run(&sleeper, transient, |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Fail::Fatal) }
            })
            .await;

        assert_eq!(out, Err(Fail::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sleeper.recorded().is_empty());
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_error() {
        let sleeper = RecordingSleeper::default();
        let calls = AtomicU32::new(0);

        let out: Result<(), Fail> = RetryPolicy::default()
            .run(&sleeper, transient, |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Fail::Transient) }
            })
            .await;

        assert_eq!(out, Err(Fail::Transient));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            sleeper.recorded(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
    }

    #[tokio::test]
    async fn zero_attempts_still_calls_once() {
        let sleeper = RecordingSleeper::default();
        let policy = RetryPolicy {
            max_attempts: 0,
            base_delay: Duration::from_millis(1),
        };
        let out: Result<u8, Fail> = policy.run(&sleeper, transient, |_| async { Ok(7) }).await;
        assert_eq!(out, Ok(7));
    }
}
