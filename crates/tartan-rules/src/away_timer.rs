//! Away-timer cascade
//!
//! Idle until the house is found vacant, then armed: while vacancy persists
//! the light is forced off, the door closed and the alarm armed. Occupancy
//! returns the timer to idle and hands control back to the other policies.

use tartan_core::{EvaluationLog, StateSnapshot};
use tracing::debug;

use crate::messages;
use crate::policy::PassContext;

pub(crate) fn apply(
    mut state: StateSnapshot,
    _pass: &PassContext,
    log: &mut EvaluationLog,
) -> StateSnapshot {
    if state.proximity_occupied {
        if state.away_timer_active {
            log.info(messages::RESETTING_AWAY_TIMER);
            state.away_timer_active = false;
        }
        return state;
    }

    if !state.away_timer_active {
        log.info(messages::STARTING_AWAY_TIMER);
        state.away_timer_active = true;
    }

    debug!(
        light_on = state.light_on,
        door_open = state.door_open,
        alarm_armed = state.alarm_armed,
        "Applying away cascade"
    );
    state.light_on = false;
    state.door_open = false;
    state.alarm_armed = true;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: StateSnapshot) -> (StateSnapshot, EvaluationLog) {
        let mut log = EvaluationLog::new();
        let pass = PassContext::new(state.clone());
        (apply(state, &pass, &mut log), log)
    }

    #[test]
    fn test_vacancy_starts_timer_and_cascades() {
        let (state, log) = run(StateSnapshot {
            light_on: true,
            door_open: true,
            ..Default::default()
        });

        assert!(state.away_timer_active);
        assert!(!state.light_on);
        assert!(!state.door_open);
        assert!(state.alarm_armed);
        assert!(log.contains("Starting away timer"));
    }

    #[test]
    fn test_armed_timer_does_not_restart() {
        let (state, log) = run(StateSnapshot {
            away_timer_active: true,
            light_on: true,
            ..Default::default()
        });

        assert!(state.away_timer_active);
        assert!(!state.light_on);
        assert!(!log.contains("Starting away timer"));
    }

    #[test]
    fn test_occupancy_resets_timer_and_releases() {
        let (state, log) = run(StateSnapshot {
            proximity_occupied: true,
            away_timer_active: true,
            light_on: true,
            door_open: true,
            ..Default::default()
        });

        assert!(!state.away_timer_active);
        assert!(state.light_on);
        assert!(state.door_open);
        assert!(!state.alarm_armed);
        assert_eq!(log.len(), 1);
    }
}
