//! Core types for the Tartan policy evaluator
//!
//! This crate provides the fundamental types shared by the rule engine, the
//! configuration loader and the command line runner: the typed
//! [`StateSnapshot`], its loosely-typed boundary form [`RawSnapshot`], the
//! [`Field`] catalogue that links the two, and the [`EvaluationLog`] audit sink.

mod field;
mod log;
mod raw;
mod snapshot;

pub use field::{Field, FieldKind};
pub use log::{EvaluationLog, LogLevel, LogRecord};
pub use raw::RawSnapshot;
pub use snapshot::{HvacMode, InvariantViolation, StateSnapshot};

/// Default values for every snapshot field
///
/// These are used when constructing an initial snapshot and by the validation
/// guard whenever a raw value has to be substituted.
pub mod defaults {
    use super::HvacMode;

    pub const TEMPERATURE_READING: i64 = 20;
    pub const HUMIDITY_READING: i64 = 50;
    pub const TARGET_TEMPERATURE: i64 = 70;
    pub const HUMIDIFIER_ON: bool = false;
    pub const DOOR_OPEN: bool = true;
    pub const LIGHT_ON: bool = false;
    pub const PROXIMITY_OCCUPIED: bool = false;
    pub const ALARM_ARMED: bool = false;
    pub const ALARM_SOUNDING: bool = false;
    pub const HEATER_ON: bool = false;
    pub const CHILLER_ON: bool = false;
    pub const AWAY_TIMER_ACTIVE: bool = false;
    pub const HVAC_MODE: HvacMode = HvacMode::Heater;
    pub const ALARM_PASSCODE: &str = "1234";
    pub const GIVEN_PASSCODE: &str = "1234";
}
