//! Climate control
//!
//! Pure comparison of the current reading against the target, with no
//! hysteresis band. Humidity fields pass through untouched.

use std::cmp::Ordering;

use tartan_core::{EvaluationLog, HvacMode, StateSnapshot};
use tracing::trace;

use crate::messages;
use crate::policy::PassContext;

pub(crate) fn apply(
    mut state: StateSnapshot,
    pass: &PassContext,
    log: &mut EvaluationLog,
) -> StateSnapshot {
    let requested = pass.requested();
    trace!(
        reading = state.temperature_reading,
        target = state.target_temperature,
        "Comparing temperature"
    );

    match state.temperature_reading.cmp(&state.target_temperature) {
        Ordering::Less => {
            if !requested.heater_on {
                log.info(messages::TURNING_ON_HEATER);
            }
            state.hvac_mode = HvacMode::Heater;
            state.heater_on = true;
            state.chiller_on = false;
        }
        Ordering::Greater => {
            if !requested.chiller_on {
                log.info(messages::TURNING_ON_CHILLER);
            }
            state.hvac_mode = HvacMode::Chiller;
            state.chiller_on = true;
            state.heater_on = false;
        }
        Ordering::Equal => {
            if requested.heater_on || requested.chiller_on {
                log.info(messages::TARGET_REACHED);
            }
            state.heater_on = false;
            state.chiller_on = false;
        }
    }

    state
}
