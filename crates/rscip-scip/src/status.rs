//! Decoding of SCIP's terminal status codes.

use rscip_solver::SolverStatus;
use scip_sys as ffi;

/// Status of a SCIP solve, decoded from `SCIPgetStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScipStatus {
    Unknown,
    UserInterrupt,
    NodeLimit,
    TotalNodeLimit,
    StallNodeLimit,
    TimeLimit,
    MemLimit,
    GapLimit,
    PrimalLimit,
    DualLimit,
    SolLimit,
    BestSolLimit,
    RestartLimit,
    Optimal,
    Infeasible,
    Unbounded,
    InfOrUnbounded,
    Terminate,
    /// A code this build does not know by name.
    Other(i32),
}

const KNOWN: &[(ffi::SCIP_Status, ScipStatus)] = &[
    (ffi::SCIP_Status_SCIP_STATUS_UNKNOWN, ScipStatus::Unknown),
    (ffi::SCIP_Status_SCIP_STATUS_USERINTERRUPT, ScipStatus::UserInterrupt),
    (ffi::SCIP_Status_SCIP_STATUS_NODELIMIT, ScipStatus::NodeLimit),
    (ffi::SCIP_Status_SCIP_STATUS_TOTALNODELIMIT, ScipStatus::TotalNodeLimit),
    (ffi::SCIP_Status_SCIP_STATUS_STALLNODELIMIT, ScipStatus::StallNodeLimit),
    (ffi::SCIP_Status_SCIP_STATUS_TIMELIMIT, ScipStatus::TimeLimit),
    (ffi::SCIP_Status_SCIP_STATUS_MEMLIMIT, ScipStatus::MemLimit),
    (ffi::SCIP_Status_SCIP_STATUS_GAPLIMIT, ScipStatus::GapLimit),
    (ffi::SCIP_Status_SCIP_STATUS_PRIMALLIMIT, ScipStatus::PrimalLimit),
    (ffi::SCIP_Status_SCIP_STATUS_DUALLIMIT, ScipStatus::DualLimit),
    (ffi::SCIP_Status_SCIP_STATUS_SOLLIMIT, ScipStatus::SolLimit),
    (ffi::SCIP_Status_SCIP_STATUS_BESTSOLLIMIT, ScipStatus::BestSolLimit),
    (ffi::SCIP_Status_SCIP_STATUS_RESTARTLIMIT, ScipStatus::RestartLimit),
    (ffi::SCIP_Status_SCIP_STATUS_OPTIMAL, ScipStatus::Optimal),
    (ffi::SCIP_Status_SCIP_STATUS_INFEASIBLE, ScipStatus::Infeasible),
    (ffi::SCIP_Status_SCIP_STATUS_UNBOUNDED, ScipStatus::Unbounded),
    (ffi::SCIP_Status_SCIP_STATUS_INFORUNBD, ScipStatus::InfOrUnbounded),
    (ffi::SCIP_Status_SCIP_STATUS_TERMINATE, ScipStatus::Terminate),
];

impl ScipStatus {
    /// Decode a raw status code.
    pub fn from_code(code: i32) -> Self {
        KNOWN
            .iter()
            .find(|(raw, _)| i64::from(*raw) == i64::from(code))
            .map(|(_, status)| *status)
            .unwrap_or(ScipStatus::Other(code))
    }

    /// Decode the value returned by `SCIPgetStatus`.
    pub fn from_raw(raw: ffi::SCIP_Status) -> Self {
        match i32::try_from(raw) {
            Ok(code) => Self::from_code(code),
            Err(_) => ScipStatus::Other(i32::MAX),
        }
    }

    /// The integer code SCIP uses for this status.
    pub fn code(self) -> i32 {
        if let ScipStatus::Other(code) = self {
            return code;
        }
        KNOWN
            .iter()
            .find(|(_, status)| *status == self)
            .and_then(|(raw, _)| i32::try_from(*raw).ok())
            .unwrap_or(-1)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScipStatus::Unknown => "unknown",
            ScipStatus::UserInterrupt => "user_interrupt",
            ScipStatus::NodeLimit => "node_limit",
            ScipStatus::TotalNodeLimit => "total_node_limit",
            ScipStatus::StallNodeLimit => "stall_node_limit",
            ScipStatus::TimeLimit => "time_limit",
            ScipStatus::MemLimit => "mem_limit",
            ScipStatus::GapLimit => "gap_limit",
            ScipStatus::PrimalLimit => "primal_limit",
            ScipStatus::DualLimit => "dual_limit",
            ScipStatus::SolLimit => "sol_limit",
            ScipStatus::BestSolLimit => "best_sol_limit",
            ScipStatus::RestartLimit => "restart_limit",
            ScipStatus::Optimal => "optimal",
            ScipStatus::Infeasible => "infeasible",
            ScipStatus::Unbounded => "unbounded",
            ScipStatus::InfOrUnbounded => "inf_or_unbounded",
            ScipStatus::Terminate => "terminate",
            ScipStatus::Other(_) => "other",
        }
    }

    /// Map to the solver-agnostic status.
    pub fn to_solver_status(self) -> SolverStatus {
        match self {
            ScipStatus::Optimal => SolverStatus::Optimal,
            ScipStatus::Infeasible => SolverStatus::Infeasible,
            ScipStatus::Unbounded => SolverStatus::Unbounded,
            ScipStatus::InfOrUnbounded => SolverStatus::InfeasibleOrUnbounded,
            ScipStatus::TimeLimit => SolverStatus::TimeLimit,
            ScipStatus::SolLimit | ScipStatus::BestSolLimit => SolverStatus::SolutionLimit,
            ScipStatus::GapLimit => SolverStatus::GapLimit,
            ScipStatus::NodeLimit
            | ScipStatus::TotalNodeLimit
            | ScipStatus::StallNodeLimit
            | ScipStatus::MemLimit
            | ScipStatus::PrimalLimit
            | ScipStatus::DualLimit
            | ScipStatus::RestartLimit => SolverStatus::OtherLimit,
            ScipStatus::UserInterrupt | ScipStatus::Terminate => SolverStatus::Interrupted,
            ScipStatus::Unknown | ScipStatus::Other(_) => SolverStatus::Unknown,
        }
    }
}

impl std::fmt::Display for ScipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScipStatus::Other(code) => write!(f, "other({})", code),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}
