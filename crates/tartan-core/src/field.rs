//! Field catalogue linking raw map keys to typed snapshot fields

use std::fmt;

/// Declared semantic type of a snapshot field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Boolean,
    /// Climate mode (`Heater` or `Chiller`)
    Mode,
    Text,
}

/// One named field of a [`StateSnapshot`](crate::StateSnapshot)
///
/// The set is closed: raw input keys that do not name one of these fields are
/// ignored at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TemperatureReading,
    HumidityReading,
    TargetTemperature,
    HumidifierOn,
    DoorOpen,
    LightOn,
    ProximityOccupied,
    AlarmArmed,
    AlarmSounding,
    HeaterOn,
    ChillerOn,
    AwayTimerActive,
    HvacMode,
    AlarmPasscode,
    GivenPasscode,
}

impl Field {
    /// Every field, in declaration order
    pub const ALL: [Field; 15] = [
        Field::TemperatureReading,
        Field::HumidityReading,
        Field::TargetTemperature,
        Field::HumidifierOn,
        Field::DoorOpen,
        Field::LightOn,
        Field::ProximityOccupied,
        Field::AlarmArmed,
        Field::AlarmSounding,
        Field::HeaterOn,
        Field::ChillerOn,
        Field::AwayTimerActive,
        Field::HvacMode,
        Field::AlarmPasscode,
        Field::GivenPasscode,
    ];

    /// Map key used in the raw representation
    pub const fn key(self) -> &'static str {
        match self {
            Field::TemperatureReading => "temperature_reading",
            Field::HumidityReading => "humidity_reading",
            Field::TargetTemperature => "target_temperature",
            Field::HumidifierOn => "humidifier_on",
            Field::DoorOpen => "door_open",
            Field::LightOn => "light_on",
            Field::ProximityOccupied => "proximity_occupied",
            Field::AlarmArmed => "alarm_armed",
            Field::AlarmSounding => "alarm_sounding",
            Field::HeaterOn => "heater_on",
            Field::ChillerOn => "chiller_on",
            Field::AwayTimerActive => "away_timer_active",
            Field::HvacMode => "hvac_mode",
            Field::AlarmPasscode => "alarm_passcode",
            Field::GivenPasscode => "given_passcode",
        }
    }

    /// Look up a field by its raw map key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Declared semantic type of this field
    pub const fn kind(self) -> FieldKind {
        match self {
            Field::TemperatureReading | Field::HumidityReading | Field::TargetTemperature => {
                FieldKind::Integer
            }
            Field::HvacMode => FieldKind::Mode,
            Field::AlarmPasscode | Field::GivenPasscode => FieldKind::Text,
            _ => FieldKind::Boolean,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("PROXIMITY_STATE"), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Field::TargetTemperature.kind(), FieldKind::Integer);
        assert_eq!(Field::AwayTimerActive.kind(), FieldKind::Boolean);
        assert_eq!(Field::HvacMode.kind(), FieldKind::Mode);
        assert_eq!(Field::GivenPasscode.kind(), FieldKind::Text);
    }
}
