//! Evaluation pipeline
//!
//! Runs the validation guard and then every [`Policy`] in order, producing a
//! fresh snapshot. The caller's snapshot is never modified.

use tartan_core::{EvaluationLog, RawSnapshot, StateSnapshot};
use tracing::{error, instrument, trace};

use crate::guard::{validate, Validated};
use crate::policy::{PassContext, Policy};

/// Evaluate one pass over a typed snapshot
///
/// Every decision is appended to `log`; the log is never cleared, so reusing
/// it across passes accumulates records.
#[instrument(
    name = "evaluate",
    skip_all,
    fields(occupied = current.proximity_occupied, away = current.away_timer_active)
)]
pub fn evaluate(current: &StateSnapshot, log: &mut EvaluationLog) -> StateSnapshot {
    let pass = PassContext::new(current.clone());

    let next = Policy::ORDER
        .into_iter()
        .fold(current.clone(), |state, policy| {
            trace!(%policy, "Applying policy");
            policy.apply(state, &pass, log)
        });

    if let Err(violation) = next.check_invariants() {
        error!(%violation, "Evaluated snapshot violates an invariant");
    }

    next
}

/// Evaluate one pass over a loosely-typed snapshot
///
/// Values that cannot be interpreted are replaced by fail-safe defaults and
/// reported to `log` as error records before the policies run.
pub fn evaluate_raw(current: &RawSnapshot, log: &mut EvaluationLog) -> StateSnapshot {
    let Validated { snapshot, errors } = validate(current);
    for err in &errors {
        log.error(err.to_string());
    }
    evaluate(&snapshot, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tartan_core::Field;

    #[test]
    fn test_caller_snapshot_is_untouched() {
        let current = StateSnapshot {
            light_on: true,
            ..Default::default()
        };
        let before = current.clone();
        let mut log = EvaluationLog::new();

        let next = evaluate(&current, &mut log);

        assert_eq!(current, before);
        assert_ne!(next, current);
    }

    #[test]
    fn test_log_accumulates_across_passes() {
        let mut log = EvaluationLog::new();
        let first = evaluate(&StateSnapshot::default(), &mut log);
        let after_first = log.len();
        assert!(after_first > 0);

        let occupied = StateSnapshot {
            proximity_occupied: true,
            light_on: true,
            ..first
        };
        evaluate(&occupied, &mut log);
        assert!(log.len() > after_first);
        assert!(log.contains("Starting away timer"));
        assert!(log.contains("Turning on light"));
    }

    #[test]
    fn test_raw_errors_precede_decisions() {
        let raw = RawSnapshot::from(&StateSnapshot::default())
            .with(Field::ProximityOccupied, "invalid_value");
        let mut log = EvaluationLog::new();
        let next = evaluate_raw(&raw, &mut log);

        assert!(!next.door_open);
        assert_eq!(log.records()[0].to_string(), "Error: Invalid proximity state");
    }
}
