//! Backend-independent reading of how a solve ended.

/// How a solve ended, independent of the backend's own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// The backend proved one of the two but not which.
    InfeasibleOrUnbounded,
    TimeLimit,
    /// Stopped after the requested number of feasible solutions.
    SolutionLimit,
    GapLimit,
    /// Node, memory, bound or restart limit.
    OtherLimit,
    /// User interrupt or termination signal.
    Interrupted,
    Unknown,
}

impl SolverStatus {
    pub const ALL: [SolverStatus; 10] = [
        SolverStatus::Optimal,
        SolverStatus::Infeasible,
        SolverStatus::Unbounded,
        SolverStatus::InfeasibleOrUnbounded,
        SolverStatus::TimeLimit,
        SolverStatus::SolutionLimit,
        SolverStatus::GapLimit,
        SolverStatus::OtherLimit,
        SolverStatus::Interrupted,
        SolverStatus::Unknown,
    ];

    pub fn is_optimal(self) -> bool {
        self == SolverStatus::Optimal
    }

    /// True when the search stopped on a configured limit; a feasible
    /// solution may still be available.
    pub fn is_limit(self) -> bool {
        matches!(
            self,
            SolverStatus::TimeLimit
                | SolverStatus::SolutionLimit
                | SolverStatus::GapLimit
                | SolverStatus::OtherLimit
        )
    }

    pub fn is_infeasible(self) -> bool {
        self == SolverStatus::Infeasible
    }

    pub fn is_unbounded(self) -> bool {
        self == SolverStatus::Unbounded
    }

    /// snake_case name used in logs and host-facing output.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::InfeasibleOrUnbounded => "infeasible_or_unbounded",
            SolverStatus::TimeLimit => "time_limit",
            SolverStatus::SolutionLimit => "solution_limit",
            SolverStatus::GapLimit => "gap_limit",
            SolverStatus::OtherLimit => "other_limit",
            SolverStatus::Interrupted => "interrupted",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_limits_are_limits() {
        let limits: Vec<SolverStatus> = SolverStatus::ALL
            .into_iter()
            .filter(|status| status.is_limit())
            .collect();
        assert_eq!(
            limits,
            vec![
                SolverStatus::TimeLimit,
                SolverStatus::SolutionLimit,
                SolverStatus::GapLimit,
                SolverStatus::OtherLimit,
            ]
        );
    }

    #[test]
    fn test_infeasible_or_unbounded_is_neither() {
        let status = SolverStatus::InfeasibleOrUnbounded;
        assert!(!status.is_infeasible());
        assert!(!status.is_unbounded());
        assert!(!status.is_optimal());
    }

    #[test]
    fn test_names_are_unique_snake_case() {
        let mut names: Vec<&str> = SolverStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert!(
            names
                .iter()
                .all(|name| name.chars().all(|c| c.is_ascii_lowercase() || c == '_'))
        );
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SolverStatus::ALL.len());
        assert_eq!(SolverStatus::GapLimit.to_string(), "gap_limit");
    }
}
