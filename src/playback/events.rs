use std::path::PathBuf;
use std::time::Duration;

use crate::library::format_mss;

/// Elapsed time of a track, clamped to `[0, total]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    elapsed: Duration,
    total: Duration,
}

impl Progress {
    /// Build a progress value; `elapsed` past `total` (decoder overshoot) is clamped.
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self {
            elapsed: elapsed.min(total),
            total,
        }
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Completion in `0.0..=100.0`. Always `0.0` when the total is unknown (zero).
    pub fn percent(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64() * 100.0).clamp(0.0, 100.0)
    }

    /// Elapsed time as `M:SS`.
    pub fn elapsed_label(&self) -> String {
        format_mss(self.elapsed)
    }
}

/// Messages the playback side sends to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    NowPlaying {
        display_name: String,
        total: Duration,
    },
    Tick(Progress),
    Completed,
    PlaybackError {
        path: PathBuf,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_relative_to_total() {
        let p = Progress::new(Duration::from_secs(1), Duration::from_secs(5));
        assert_eq!(p.percent(), 20.0);
        assert_eq!(p.elapsed_label(), "0:01");
    }

    #[test]
    fn overshoot_is_clamped_to_total() {
        let p = Progress::new(Duration::from_millis(5_400), Duration::from_secs(5));
        assert_eq!(p.elapsed(), Duration::from_secs(5));
        assert_eq!(p.percent(), 100.0);
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        let p = Progress::new(Duration::from_secs(42), Duration::ZERO);
        assert_eq!(p.percent(), 0.0);
        assert_eq!(p.elapsed(), Duration::ZERO);
        assert!(p.percent().is_finite());
    }
}
