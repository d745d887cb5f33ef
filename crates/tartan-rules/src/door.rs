//! Vacancy door: the door may only be open in an occupied house
//!
//! Runs after the away-timer cascade and never reopens a door the cascade
//! closed while the house is vacant.

use tartan_core::{EvaluationLog, StateSnapshot};

use crate::messages;
use crate::policy::PassContext;

pub(crate) fn apply(
    mut state: StateSnapshot,
    pass: &PassContext,
    log: &mut EvaluationLog,
) -> StateSnapshot {
    let requested = pass.requested().door_open;

    if state.is_vacant() {
        if requested {
            log.info(messages::CLOSED_DOOR_VACANT);
        }
        state.door_open = false;
        return state;
    }

    state.door_open = requested;
    if requested {
        log.info(messages::DOOR_LEFT_OPEN);
    }
    state
}
