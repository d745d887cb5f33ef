//! Policy definitions and per-pass context
//!
//! Each policy is a transformation `StateSnapshot -> StateSnapshot`. The
//! pipeline runs them in [`Policy::ORDER`], so a policy sees the output of
//! every policy before it within the same pass.

use std::fmt;

use tartan_core::{EvaluationLog, StateSnapshot};

use crate::{alarm, away_timer, climate, door, lighting};

/// Values captured at the start of a pass
///
/// Policies read caller intent from here rather than from the snapshot they
/// are handed, which may already have been overridden by an earlier policy.
#[derive(Debug, Clone)]
pub struct PassContext {
    requested: StateSnapshot,
}

impl PassContext {
    /// Capture the normalized input of a pass
    pub fn new(requested: StateSnapshot) -> Self {
        Self { requested }
    }

    /// The normalized snapshot supplied by the caller
    pub fn requested(&self) -> &StateSnapshot {
        &self.requested
    }

    /// Door state observed before any policy ran
    pub fn door_open_at_start(&self) -> bool {
        self.requested.door_open
    }

    /// Alarm arming observed before any policy ran
    pub fn armed_at_start(&self) -> bool {
        self.requested.alarm_armed
    }
}

/// An automation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Detect vacancy and force the safe shutdown posture
    AwayTimer,

    /// Only allow the light on in an occupied house
    OccupancyLighting,

    /// Only allow the door open in an occupied house
    VacancyDoor,

    /// Arming lock, passcode disarm and break-in detection
    Alarm,

    /// Heater/chiller selection from temperature error
    Climate,
}

impl Policy {
    /// The fixed evaluation order
    pub const ORDER: [Policy; 5] = [
        Policy::AwayTimer,
        Policy::OccupancyLighting,
        Policy::VacancyDoor,
        Policy::Alarm,
        Policy::Climate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Policy::AwayTimer => "away_timer",
            Policy::OccupancyLighting => "occupancy_lighting",
            Policy::VacancyDoor => "vacancy_door",
            Policy::Alarm => "alarm",
            Policy::Climate => "climate",
        }
    }

    /// Apply this policy to `state`, producing the next snapshot
    pub fn apply(
        self,
        state: StateSnapshot,
        pass: &PassContext,
        log: &mut EvaluationLog,
    ) -> StateSnapshot {
        match self {
            Policy::AwayTimer => away_timer::apply(state, pass, log),
            Policy::OccupancyLighting => lighting::apply(state, pass, log),
            Policy::VacancyDoor => door::apply(state, pass, log),
            Policy::Alarm => alarm::apply(state, pass, log),
            Policy::Climate => climate::apply(state, pass, log),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
