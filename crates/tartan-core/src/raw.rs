//! Loosely-typed snapshot representation used at the input boundary

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Field, StateSnapshot};

/// A snapshot whose field values have not been validated yet
///
/// Values may be of any JSON type. The validation guard turns a raw snapshot
/// into a [`StateSnapshot`], substituting defaults for anything it cannot
/// interpret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSnapshot {
    values: Map<String, Value>,
}

impl RawSnapshot {
    /// Create an empty raw snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw value of a field, if present
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.values.get(field.key())
    }

    /// Set the raw value of a field
    pub fn set(&mut self, field: Field, value: impl Into<Value>) {
        self.values.insert(field.key().to_string(), value.into());
    }

    /// Set the raw value of a field, builder style
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove a field, returning its previous value
    pub fn remove(&mut self, field: Field) -> Option<Value> {
        self.values.remove(field.key())
    }

    /// Keys present in the map that do not name a known field
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|key| Field::from_key(key).is_none())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for RawSnapshot {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl From<&StateSnapshot> for RawSnapshot {
    fn from(snapshot: &StateSnapshot) -> Self {
        let mut raw = RawSnapshot::new();
        raw.set(Field::TemperatureReading, snapshot.temperature_reading);
        raw.set(Field::HumidityReading, snapshot.humidity_reading);
        raw.set(Field::TargetTemperature, snapshot.target_temperature);
        raw.set(Field::HumidifierOn, snapshot.humidifier_on);
        raw.set(Field::DoorOpen, snapshot.door_open);
        raw.set(Field::LightOn, snapshot.light_on);
        raw.set(Field::ProximityOccupied, snapshot.proximity_occupied);
        raw.set(Field::AlarmArmed, snapshot.alarm_armed);
        raw.set(Field::AlarmSounding, snapshot.alarm_sounding);
        raw.set(Field::HeaterOn, snapshot.heater_on);
        raw.set(Field::ChillerOn, snapshot.chiller_on);
        raw.set(Field::AwayTimerActive, snapshot.away_timer_active);
        raw.set(Field::HvacMode, snapshot.hvac_mode.as_str());
        raw.set(Field::AlarmPasscode, snapshot.alarm_passcode.as_str());
        raw.set(Field::GivenPasscode, snapshot.given_passcode.as_str());
        raw
    }
}
