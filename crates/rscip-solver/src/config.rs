//! Solve configuration.

use crate::SolverError;

/// Default relative optimality gap (solve to proven optimality).
pub const DEFAULT_GAP: f64 = 0.0;
/// Default time limit in seconds; SCIP treats `1e20` as unlimited.
pub const DEFAULT_TIME_LIMIT: f64 = 1e20;
/// Default number of solver threads.
pub const DEFAULT_THREADS: u32 = 1;
/// Default width of the solver's log table.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 143;

/// Options for a single solve call.
///
/// Every field has a concrete default matching the host-facing `solve()`
/// signature, so an untouched `SolveOptions::default()` reproduces a plain
/// call with no keyword arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    /// Relative optimality gap at which the search stops.
    pub gap: f64,
    /// Time limit in seconds.
    pub time_limit: f64,
    /// Stop as soon as one feasible solution is found.
    pub first_feasible: bool,
    /// Run presolving and propagation before the search.
    pub presolve: bool,
    /// Worker threads; more than one selects the parallel solver.
    pub threads: u32,
    /// Print the solver log.
    pub verbose: bool,
    /// Width of the solver's log table.
    pub display_width: u32,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            time_limit: DEFAULT_TIME_LIMIT,
            first_feasible: false,
            presolve: true,
            threads: DEFAULT_THREADS,
            verbose: true,
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_first_feasible(mut self, enabled: bool) -> Self {
        self.first_feasible = enabled;
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = enabled;
        self
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn with_display_width(mut self, width: u32) -> Self {
        self.display_width = width;
        self
    }

    /// Whether the solve should run on the parallel solver.
    pub fn is_parallel(&self) -> bool {
        self.threads > 1
    }

    /// Check option ranges before any solver resource is created.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidSetting`] for a negative or non-finite
    /// gap, a time limit outside `[0, 1e20]`, zero threads, or a thread
    /// count / display width that does not fit a C `int`.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(SolverError::InvalidSetting(format!(
                "gap must be a finite value >= 0 (got {})",
                self.gap
            )));
        }
        if !(0.0..=DEFAULT_TIME_LIMIT).contains(&self.time_limit) {
            return Err(SolverError::InvalidSetting(format!(
                "time_limit must be within [0, 1e20] seconds (got {})",
                self.time_limit
            )));
        }
        if self.threads == 0 {
            return Err(SolverError::InvalidSetting(
                "threads must be >= 1".to_string(),
            ));
        }
        if i32::try_from(self.threads).is_err() {
            return Err(SolverError::InvalidSetting(format!(
                "threads too large (got {})",
                self.threads
            )));
        }
        if i32::try_from(self.display_width).is_err() {
            return Err(SolverError::InvalidSetting(format!(
                "display_width too large (got {})",
                self.display_width
            )));
        }
        Ok(())
    }
}
