//! Occupancy lighting: the light may only be on in an occupied house

use tartan_core::{EvaluationLog, StateSnapshot};

use crate::messages;
use crate::policy::PassContext;

pub(crate) fn apply(
    mut state: StateSnapshot,
    pass: &PassContext,
    log: &mut EvaluationLog,
) -> StateSnapshot {
    let requested = pass.requested().light_on;

    if state.is_vacant() {
        if requested {
            log.info(messages::VACANT_LIGHT_REFUSED);
        }
        state.light_on = false;
        return state;
    }

    state.light_on = requested;
    if requested {
        log.info(messages::TURNING_ON_LIGHT);
    }
    state
}
