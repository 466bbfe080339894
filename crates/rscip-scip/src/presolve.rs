//! Parameters that switch SCIP's presolving off.

use crate::ffi::{ScipError, ScipModel};
use scip_sys as ffi;
use tracing::{debug, warn};

/// Integer parameters set to `0` to disable presolving: plugin round limits
/// first, global round and restart limits last.
pub const PRESOLVE_DISABLE_PARAMS: &[&str] = &[
    "presolving/milp/maxrounds",
    "presolving/trivial/maxrounds",
    "presolving/inttobinary/maxrounds",
    "presolving/gateextraction/maxrounds",
    "presolving/dualcomp/maxrounds",
    "presolving/domcol/maxrounds",
    "presolving/implics/maxrounds",
    "presolving/sparsify/maxrounds",
    "presolving/dualsparsify/maxrounds",
    "propagating/dualfix/maxprerounds",
    "propagating/genvbounds/maxprerounds",
    "propagating/obbt/maxprerounds",
    "propagating/nlobbt/maxprerounds",
    "propagating/probing/maxprerounds",
    "propagating/pseudoobj/maxprerounds",
    "propagating/redcost/maxprerounds",
    "propagating/rootredcost/maxprerounds",
    "propagating/symmetry/maxprerounds",
    "propagating/vbounds/maxprerounds",
    "constraints/cardinality/maxprerounds",
    "constraints/SOS1/maxprerounds",
    "constraints/SOS2/maxprerounds",
    "constraints/varbound/maxprerounds",
    "constraints/knapsack/maxprerounds",
    "constraints/setppc/maxprerounds",
    "constraints/linking/maxprerounds",
    "constraints/or/maxprerounds",
    "constraints/and/maxprerounds",
    "constraints/xor/maxprerounds",
    "constraints/conjunction/maxprerounds",
    "constraints/disjunction/maxprerounds",
    "constraints/linear/maxprerounds",
    "constraints/orbisack/maxprerounds",
    "constraints/orbitope/maxprerounds",
    "constraints/symresack/maxprerounds",
    "constraints/logicor/maxprerounds",
    "constraints/bounddisjunction/maxprerounds",
    "constraints/cumulative/maxprerounds",
    "constraints/nonlinear/maxprerounds",
    "constraints/pseudoboolean/maxprerounds",
    "constraints/superindicator/maxprerounds",
    "constraints/indicator/maxprerounds",
    "constraints/components/maxprerounds",
    "presolving/maxrestarts",
    "presolving/maxrounds",
    "propagating/maxrounds",
    "propagating/maxroundsroot",
];

/// Whether a failed parameter write may be skipped.
///
/// Plugin sets differ between SCIP releases, so a name the linked build
/// does not know is tolerated. Anything else is not.
pub(crate) fn is_skippable(err: &ScipError) -> bool {
    err.retcode() == Some(ffi::SCIP_Retcode_SCIP_PARAMETERUNKNOWN)
}

/// Set every entry of [`PRESOLVE_DISABLE_PARAMS`] to `0`.
///
/// Returns the number of entries skipped as unknown to the linked build.
///
/// # Errors
///
/// Returns the first failure other than an unknown parameter name.
pub fn disable_presolve(model: &mut ScipModel) -> Result<usize, ScipError> {
    let mut skipped = 0;
    for &param in PRESOLVE_DISABLE_PARAMS {
        match model.set_int_param(param, 0) {
            Ok(()) => {}
            Err(err) if is_skippable(&err) => {
                skipped += 1;
                warn!(
                    component = "solver",
                    operation = "disable_presolve",
                    status = "warn",
                    param,
                    "Parameter unknown to linked SCIP; skipping"
                );
            }
            Err(err) => return Err(err),
        }
    }
    debug!(
        component = "solver",
        operation = "disable_presolve",
        status = "success",
        num_params = PRESOLVE_DISABLE_PARAMS.len(),
        skipped,
        "Disabled presolving"
    );
    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_table_shape() {
        assert_eq!(PRESOLVE_DISABLE_PARAMS.len(), 47);
        let unique: BTreeSet<_> = PRESOLVE_DISABLE_PARAMS.iter().collect();
        assert_eq!(unique.len(), PRESOLVE_DISABLE_PARAMS.len());
        assert_eq!(
            PRESOLVE_DISABLE_PARAMS.last(),
            Some(&"propagating/maxroundsroot")
        );
        assert!(
            PRESOLVE_DISABLE_PARAMS
                .iter()
                .all(|param| param.ends_with("maxrounds")
                    || param.ends_with("maxprerounds")
                    || param.ends_with("maxrestarts")
                    || param.ends_with("maxroundsroot"))
        );
    }

    #[test]
    fn test_only_unknown_parameter_is_skippable() {
        let unknown = ScipError::Call {
            function: "SCIPsetIntParam",
            retcode: ffi::SCIP_Retcode_SCIP_PARAMETERUNKNOWN,
        };
        let wrong_value = ScipError::Call {
            function: "SCIPsetIntParam",
            retcode: ffi::SCIP_Retcode_SCIP_PARAMETERWRONGVAL,
        };
        assert!(is_skippable(&unknown));
        assert!(!is_skippable(&wrong_value));
        assert!(!is_skippable(&ScipError::InvalidName {
            name: "x".to_string()
        }));
    }

    #[test]
    fn test_disable_presolve_on_fresh_model() {
        let mut model = ScipModel::new("presolve").unwrap();
        let skipped = disable_presolve(&mut model).unwrap();
        assert!(skipped < PRESOLVE_DISABLE_PARAMS.len());
    }
}
