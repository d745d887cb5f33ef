//! StateSnapshot type representing one point-in-time reading of the house

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults;

/// Selected climate mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum HvacMode {
    Heater,
    Chiller,
}

impl HvacMode {
    /// Parse a mode name, ignoring ASCII case
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("heater") {
            Some(HvacMode::Heater)
        } else if value.eq_ignore_ascii_case("chiller") {
            Some(HvacMode::Chiller)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HvacMode::Heater => "Heater",
            HvacMode::Chiller => "Chiller",
        }
    }
}

impl Default for HvacMode {
    fn default() -> Self {
        defaults::HVAC_MODE
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown hvac mode '{}'", s))
    }
}

impl TryFrom<String> for HvacMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A snapshot invariant that does not hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("heater and chiller are both on")]
    HeaterAndChiller,

    #[error("alarm is sounding while disarmed")]
    SoundingWhileDisarmed,

    #[error("door is open in a vacant house")]
    VacantDoorOpen,

    #[error("light is on in a vacant house")]
    VacantLightOn,
}

/// One point-in-time reading of the house
///
/// Holds sensor readings, actuator states and security settings. The
/// evaluator never mutates a snapshot it is given; every pass produces a new
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    /// Current measured temperature
    pub temperature_reading: i64,

    /// Current measured humidity
    pub humidity_reading: i64,

    /// Desired temperature
    pub target_temperature: i64,

    pub humidifier_on: bool,

    pub door_open: bool,

    pub light_on: bool,

    /// True iff a resident is detected present
    pub proximity_occupied: bool,

    /// Whether the alarm system is enabled
    pub alarm_armed: bool,

    /// Whether the alarm is actively signaling an intrusion
    pub alarm_sounding: bool,

    pub heater_on: bool,

    pub chiller_on: bool,

    /// Whether the away-timer cascade has fired
    pub away_timer_active: bool,

    pub hvac_mode: HvacMode,

    /// Configured disarm code
    pub alarm_passcode: String,

    /// Code presented by a user this tick
    pub given_passcode: String,
}

impl StateSnapshot {
    /// Whether nobody is detected in the house
    pub fn is_vacant(&self) -> bool {
        !self.proximity_occupied
    }

    /// Check the invariants every evaluated snapshot must satisfy
    ///
    /// Returns the first violation found. The vacancy lock on `alarm_armed` is
    /// a property of a transition rather than of a single snapshot and is not
    /// covered here.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.heater_on && self.chiller_on {
            return Err(InvariantViolation::HeaterAndChiller);
        }
        if self.alarm_sounding && !self.alarm_armed {
            return Err(InvariantViolation::SoundingWhileDisarmed);
        }
        if self.is_vacant() && self.door_open {
            return Err(InvariantViolation::VacantDoorOpen);
        }
        if self.is_vacant() && self.light_on {
            return Err(InvariantViolation::VacantLightOn);
        }
        Ok(())
    }
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            temperature_reading: defaults::TEMPERATURE_READING,
            humidity_reading: defaults::HUMIDITY_READING,
            target_temperature: defaults::TARGET_TEMPERATURE,
            humidifier_on: defaults::HUMIDIFIER_ON,
            door_open: defaults::DOOR_OPEN,
            light_on: defaults::LIGHT_ON,
            proximity_occupied: defaults::PROXIMITY_OCCUPIED,
            alarm_armed: defaults::ALARM_ARMED,
            alarm_sounding: defaults::ALARM_SOUNDING,
            heater_on: defaults::HEATER_ON,
            chiller_on: defaults::CHILLER_ON,
            away_timer_active: defaults::AWAY_TIMER_ACTIVE,
            hvac_mode: defaults::HVAC_MODE,
            alarm_passcode: defaults::ALARM_PASSCODE.to_string(),
            given_passcode: defaults::GIVEN_PASSCODE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hvac_mode_parse_ignores_case() {
        assert_eq!(HvacMode::parse("HEATER"), Some(HvacMode::Heater));
        assert_eq!(HvacMode::parse("Heater"), Some(HvacMode::Heater));
        assert_eq!(HvacMode::parse("chiller"), Some(HvacMode::Chiller));
        assert_eq!(HvacMode::parse("fan"), None);
    }

    #[test]
    fn test_hvac_mode_serde() {
        let json = serde_json::to_value(HvacMode::Chiller).unwrap();
        assert_eq!(json, serde_json::json!("Chiller"));

        let mode: HvacMode = serde_json::from_value(serde_json::json!("HEATER")).unwrap();
        assert_eq!(mode, HvacMode::Heater);

        assert!(serde_json::from_value::<HvacMode>(serde_json::json!("off")).is_err());
    }

    #[test]
    fn test_default_values() {
        let state = StateSnapshot::default();
        assert_eq!(state.temperature_reading, 20);
        assert_eq!(state.humidity_reading, 50);
        assert_eq!(state.target_temperature, 70);
        assert!(state.door_open);
        assert!(!state.proximity_occupied);
        assert_eq!(state.hvac_mode, HvacMode::Heater);
        assert_eq!(state.alarm_passcode, "1234");
        assert_eq!(state.given_passcode, "1234");
    }

    #[test]
    fn test_check_invariants() {
        let settled = StateSnapshot {
            door_open: false,
            ..Default::default()
        };
        assert_eq!(settled.check_invariants(), Ok(()));

        // Defaults describe a vacant house with the door open
        assert_eq!(
            StateSnapshot::default().check_invariants(),
            Err(InvariantViolation::VacantDoorOpen)
        );

        let both = StateSnapshot {
            door_open: false,
            heater_on: true,
            chiller_on: true,
            ..Default::default()
        };
        assert_eq!(
            both.check_invariants(),
            Err(InvariantViolation::HeaterAndChiller)
        );

        let sounding = StateSnapshot {
            door_open: false,
            alarm_sounding: true,
            ..Default::default()
        };
        assert_eq!(
            sounding.check_invariants(),
            Err(InvariantViolation::SoundingWhileDisarmed)
        );

        let light = StateSnapshot {
            door_open: false,
            light_on: true,
            ..Default::default()
        };
        assert_eq!(light.check_invariants(), Err(InvariantViolation::VacantLightOn));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let state: StateSnapshot =
            serde_json::from_value(serde_json::json!({"proximity_occupied": true})).unwrap();
        assert!(state.proximity_occupied);
        assert_eq!(state.target_temperature, 70);
    }
}
