//! Security and alarm policy
//!
//! Two related signals are governed here: `alarm_armed` (the system is
//! enabled) and `alarm_sounding` (an active break-in indication).
//!
//! - A vacant house cannot be disarmed.
//! - A sounding alarm in an occupied house is silenced only by an exact
//!   passcode match, and cannot be disarmed while it keeps sounding.
//! - Break-in detection reads the door as it was at the start of the pass,
//!   before the cascade and the door policy closed it. Arming is read from the
//!   running state, so a house armed by the cascade this pass can trigger.

use tartan_core::{EvaluationLog, StateSnapshot};
use tracing::debug;

use crate::messages;
use crate::policy::PassContext;

pub(crate) fn apply(
    mut state: StateSnapshot,
    pass: &PassContext,
    log: &mut EvaluationLog,
) -> StateSnapshot {
    if state.is_vacant() {
        if !pass.armed_at_start() {
            log.info(messages::VACANT_DISARM_REFUSED);
        }
        state.alarm_armed = true;

        if state.alarm_armed && pass.door_open_at_start() && !state.alarm_sounding {
            log.info(messages::BREAK_IN_DETECTED);
            state.alarm_sounding = true;
        }
        return state;
    }

    if state.alarm_sounding {
        let passcode_matches = state.given_passcode == state.alarm_passcode;
        debug!(passcode_matches, "Alarm sounding in occupied house");

        if passcode_matches {
            log.info(messages::PASSCODE_ACCEPTED);
            state.alarm_sounding = false;
        } else {
            log.info(messages::PASSCODE_REJECTED);
            if !state.alarm_armed {
                log.info(messages::SOUNDING_DISARM_REFUSED);
                state.alarm_armed = true;
            }
        }
    }

    state
}
