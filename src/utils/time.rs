use std::time::{Duration, Instant};

/// A measurement of a monotonically nondecreasing clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(Instant);

impl Timestamp {
    #[inline]
    pub fn now() -> Timestamp {
        Timestamp(Instant::now())
    }

    #[inline]
    pub fn elapsed(self) -> Duration {
        Timestamp::now() - self
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        self.0.saturating_duration_since(rhs.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn monotonic() {
        let ts = Timestamp::now();
        let later = Timestamp::now();
        assert!(later >= ts);
        assert_eq!(ts - later, Duration::from_secs(0));
        assert!(ts.elapsed() >= later - ts);
    }
}
