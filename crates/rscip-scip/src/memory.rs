//! Resident-memory sampling around a solve.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Resident set size of this process at one named point of a solve.
#[derive(Debug, Clone, Copy)]
pub struct RssSample {
    pub rss_bytes: u64,
    /// e.g. "solve_start"
    pub stage: &'static str,
}

impl RssSample {
    /// Sample the current process; `None` when the platform cannot report it.
    pub fn capture(stage: &'static str) -> Option<Self> {
        let pid = Pid::from_u32(std::process::id());
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        sys.process(pid).map(|process| RssSample {
            rss_bytes: process.memory(),
            stage,
        })
    }

    /// Growth in bytes since `earlier` (negative when memory was returned).
    pub fn delta_since(&self, earlier: &Self) -> i64 {
        let to_signed = |bytes: u64| i64::try_from(bytes).unwrap_or(i64::MAX);
        to_signed(self.rss_bytes) - to_signed(earlier.rss_bytes)
    }
}

/// Start and end samples of one solve.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RssWindow {
    start: Option<RssSample>,
}

impl RssWindow {
    pub(crate) fn open() -> Self {
        Self {
            start: RssSample::capture("solve_start"),
        }
    }

    pub(crate) fn start_bytes(&self) -> Option<u64> {
        self.start.map(|sample| sample.rss_bytes)
    }

    /// Take the closing sample, returning its size and the growth over the window.
    pub(crate) fn close(&self) -> (Option<u64>, Option<i64>) {
        let end = RssSample::capture("solve_end");
        let delta = match (&self.start, &end) {
            (Some(start), Some(end)) => Some(end.delta_since(start)),
            _ => None,
        };
        (end.map(|sample| sample.rss_bytes), delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_current_process() {
        let Some(sample) = RssSample::capture("test_stage") else {
            return;
        };
        assert_eq!(sample.stage, "test_stage");
        assert!(sample.rss_bytes > 0);
    }

    #[test]
    fn test_delta_since() {
        let before = RssSample {
            rss_bytes: 1000,
            stage: "solve_start",
        };
        let after = RssSample {
            rss_bytes: 1500,
            stage: "solve_end",
        };
        assert_eq!(after.delta_since(&before), 500);
        assert_eq!(before.delta_since(&after), -500);
    }

    #[test]
    fn test_window_reports_delta_only_with_both_samples() {
        let window = RssWindow { start: None };
        let (_, delta) = window.close();
        assert!(delta.is_none());
        assert!(window.start_bytes().is_none());
    }
}
