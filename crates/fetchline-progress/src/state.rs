use std::time::{Duration, Instant};

/// Byte accounting for one active download.
///
/// Lives exactly as long as the download it measures and is never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    transferred: u64,
    total: Option<u64>,
    started: Instant,
}

impl ProgressState {
    pub fn new(total: Option<u64>) -> Self {
        Self::starting_at(total, Instant::now())
    }

    pub fn starting_at(total: Option<u64>, started: Instant) -> Self {
        Self {
            transferred: 0,
            total,
            started,
        }
    }

    pub fn advance(&mut self, len: u64) {
        self.transferred = self.transferred.saturating_add(len);
    }

    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    /// Average bytes per second since the download started.
    pub fn throughput_at(&self, now: Instant) -> f64 {
        let secs = self.elapsed_at(now).as_secs_f64();
        if secs > 0.0 {
            self.transferred as f64 / secs
        } else {
            0.0
        }
    }

    /// Percentage of `total` transferred, if the total is known.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.total.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.transferred as f64 / total as f64) * 100.0
            }
        })
    }
}

/// Rate limiter for redraws.
///
/// The first call is always due; later calls are due once `interval` has
/// passed since the last due call.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    last: Option<Instant>,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// `HH:MM:SS`, hours unbounded.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut state = ProgressState::new(Some(10));
        state.advance(3);
        state.advance(4);
        assert_eq!(state.transferred(), 7);
        assert_eq!(state.total(), Some(10));
    }

    #[test]
    fn percentage_requires_total() {
        let mut state = ProgressState::new(None);
        state.advance(5);
        assert_eq!(state.percentage(), None);

        let mut state = ProgressState::new(Some(200));
        state.advance(50);
        assert_eq!(state.percentage(), Some(25.0));
    }

    #[test]
    fn throughput_over_elapsed() {
        let start = Instant::now();
        let mut state = ProgressState::starting_at(None, start);
        state.advance(2048);

        let rate = state.throughput_at(start + Duration::from_secs(2));
        assert!((rate - 1024.0).abs() < f64::EPSILON);
        assert_eq!(state.throughput_at(start), 0.0);
    }

    #[test]
    fn cadence_skips_until_interval_passes() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_millis(100));

        assert!(cadence.due(start));
        assert!(!cadence.due(start + Duration::from_millis(50)));
        assert!(!cadence.due(start + Duration::from_millis(99)));
        assert!(cadence.due(start + Duration::from_millis(100)));
        assert!(!cadence.due(start + Duration::from_millis(150)));
        assert!(cadence.due(start + Duration::from_millis(250)));
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_clock(Duration::from_secs(61)), "00:01:01");
        assert_eq!(format_clock(Duration::from_secs(3 * 3600 + 125)), "03:02:05");
    }
}
