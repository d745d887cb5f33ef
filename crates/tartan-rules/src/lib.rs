//! Policy Evaluation Engine
//!
//! This crate computes the next state of the house from the current one by
//! running a fixed, ordered set of automation policies in a single pass.
//!
//! # Architecture
//!
//! ```text
//! RawSnapshot → VALIDATION GUARD → AWAY TIMER → LIGHTING → DOOR → ALARM → CLIMATE → StateSnapshot
//! ```
//!
//! - **Validation guard**: turns loosely-typed input into a [`StateSnapshot`],
//!   substituting fail-safe defaults for anything it cannot interpret
//! - **Policies**: each one is a `StateSnapshot -> StateSnapshot` step that
//!   sees the output of the steps before it
//! - **Pipeline**: [`evaluate`] and [`evaluate_raw`] run the whole pass and
//!   append every decision to a caller-owned [`EvaluationLog`]
//!
//! Evaluation is pure and synchronous. The engine holds no state between
//! passes, so independent houses can be evaluated concurrently as long as
//! each uses its own snapshot and log.
//!
//! [`StateSnapshot`]: tartan_core::StateSnapshot
//! [`EvaluationLog`]: tartan_core::EvaluationLog

pub mod guard;
pub mod pipeline;
pub mod policy;

mod alarm;
mod away_timer;
mod climate;
mod door;
mod lighting;

pub use guard::{validate, Validated, ValidationError};
pub use pipeline::{evaluate, evaluate_raw};
pub use policy::{PassContext, Policy};

/// Log phrases downstream consumers may match against
pub mod messages {
    pub const STARTING_AWAY_TIMER: &str = "Starting away timer";
    pub const RESETTING_AWAY_TIMER: &str = "House occupied, resetting away timer";

    /// Logged on every occupied pass that requests the light on. A snapshot
    /// carries no earlier light value, so a settled house that keeps its light
    /// on logs this again on each pass.
    pub const TURNING_ON_LIGHT: &str = "Turning on light";
    pub const VACANT_LIGHT_REFUSED: &str = "House vacant, unable to turn on light";

    pub const CLOSED_DOOR_VACANT: &str = "Closed door because house vacant";
    pub const DOOR_LEFT_OPEN: &str = "Door left open because house occupied";

    pub const VACANT_DISARM_REFUSED: &str = "House vacant, unable to disable alarm";
    pub const SOUNDING_DISARM_REFUSED: &str =
        "Alarm sounding, unable to disable alarm without valid passcode";
    pub const BREAK_IN_DETECTED: &str = "Break-in detected, sounding alarm";
    pub const PASSCODE_ACCEPTED: &str = "Valid passcode given, silencing alarm";
    pub const PASSCODE_REJECTED: &str = "Invalid passcode given, alarm still sounding";

    pub const TURNING_ON_HEATER: &str = "Turning on heater";
    pub const TURNING_ON_CHILLER: &str = "Turning on chiller";
    pub const TARGET_REACHED: &str = "Target temperature reached, climate control idle";
}
