use std::sync::Mutex;

/// Counters for backend fetch outcomes.
pub struct FetchMetrics {
    inner: Mutex<Counters>,
}

struct Counters {
    requests: usize,
    failures: usize,
    fallbacks: usize,
}

impl FetchMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                requests: 0,
                failures: 0,
                fallbacks: 0,
            }),
        }
    }

    pub fn record_request(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.requests += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.failures += 1;
        }
    }

    pub fn record_fallback(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.fallbacks += 1;
        }
    }

    /// `(requests, failures, fallbacks)` at this instant.
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(counters) = self.inner.lock() {
            (counters.requests, counters.failures, counters.fallbacks)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for FetchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let metrics = FetchMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_failure();
        metrics.record_fallback();
        assert_eq!(metrics.snapshot(), (2, 1, 1));
    }
}
