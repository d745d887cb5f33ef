//! Input validation guard
//!
//! Normalizes a [`RawSnapshot`] into a fully-typed [`StateSnapshot`]. The guard
//! never fails: a value that cannot be interpreted as its declared type is
//! replaced by a fail-safe default and reported as a [`ValidationError`].

use serde_json::Value;
use tartan_core::{defaults, Field, FieldKind, HvacMode, RawSnapshot, StateSnapshot};
use thiserror::Error;
use tracing::{debug, trace};

/// A raw field value that could not be interpreted as its declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid proximity state")]
    InvalidProximity,

    #[error("Invalid away timer value")]
    InvalidAwayTimer,

    #[error("Invalid {field} value")]
    InvalidField { field: Field },
}

impl ValidationError {
    fn for_field(field: Field) -> Self {
        match field {
            Field::ProximityOccupied => ValidationError::InvalidProximity,
            Field::AwayTimerActive => ValidationError::InvalidAwayTimer,
            field => ValidationError::InvalidField { field },
        }
    }

    /// The field whose value was rejected
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidProximity => Field::ProximityOccupied,
            ValidationError::InvalidAwayTimer => Field::AwayTimerActive,
            ValidationError::InvalidField { field } => *field,
        }
    }
}

/// Outcome of validating a raw snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// The normalized snapshot, with substitutions applied
    pub snapshot: StateSnapshot,

    /// One entry per substituted field, in field order
    pub errors: Vec<ValidationError>,
}

impl Validated {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate and normalize a raw snapshot
///
/// Absent fields take their declared default silently. Present fields with an
/// incompatible representation take their default and produce an error. An
/// unreadable `given_passcode` becomes the empty string, so a malformed entry
/// can never match the configured code.
pub fn validate(raw: &RawSnapshot) -> Validated {
    for key in raw.unknown_keys() {
        debug!(key, "Ignoring unknown snapshot field");
    }

    let mut reader = FieldReader {
        raw,
        errors: Vec::new(),
    };

    let snapshot = StateSnapshot {
        temperature_reading: reader.integer(
            Field::TemperatureReading,
            defaults::TEMPERATURE_READING,
        ),
        humidity_reading: reader.integer(Field::HumidityReading, defaults::HUMIDITY_READING),
        target_temperature: reader.integer(
            Field::TargetTemperature,
            defaults::TARGET_TEMPERATURE,
        ),
        humidifier_on: reader.boolean(Field::HumidifierOn, defaults::HUMIDIFIER_ON),
        door_open: reader.boolean(Field::DoorOpen, defaults::DOOR_OPEN),
        light_on: reader.boolean(Field::LightOn, defaults::LIGHT_ON),
        proximity_occupied: reader.boolean(
            Field::ProximityOccupied,
            defaults::PROXIMITY_OCCUPIED,
        ),
        alarm_armed: reader.boolean(Field::AlarmArmed, defaults::ALARM_ARMED),
        alarm_sounding: reader.boolean(Field::AlarmSounding, defaults::ALARM_SOUNDING),
        heater_on: reader.boolean(Field::HeaterOn, defaults::HEATER_ON),
        chiller_on: reader.boolean(Field::ChillerOn, defaults::CHILLER_ON),
        away_timer_active: reader.boolean(Field::AwayTimerActive, defaults::AWAY_TIMER_ACTIVE),
        hvac_mode: reader.mode(Field::HvacMode, defaults::HVAC_MODE),
        alarm_passcode: reader.text(
            Field::AlarmPasscode,
            defaults::ALARM_PASSCODE,
            defaults::ALARM_PASSCODE,
        ),
        given_passcode: reader.text(Field::GivenPasscode, defaults::GIVEN_PASSCODE, ""),
    };

    Validated {
        snapshot,
        errors: reader.errors,
    }
}

/// A field value interpreted according to its [`FieldKind`]
#[derive(Debug)]
enum Decoded {
    Integer(i64),
    Boolean(bool),
    Mode(HvacMode),
    Text(String),
}

enum Reading {
    Absent,
    Unreadable,
    Decoded(Decoded),
}

fn decode(field: Field, value: &Value) -> Option<Decoded> {
    match field.kind() {
        FieldKind::Integer => parse_integer(value).map(Decoded::Integer),
        FieldKind::Boolean => parse_bool(value).map(Decoded::Boolean),
        FieldKind::Mode => parse_mode(value).map(Decoded::Mode),
        FieldKind::Text => parse_text(value).map(Decoded::Text),
    }
}

struct FieldReader<'a> {
    raw: &'a RawSnapshot,
    errors: Vec<ValidationError>,
}

impl FieldReader<'_> {
    fn read(&mut self, field: Field) -> Reading {
        let Some(value) = self.raw.get(field) else {
            trace!(%field, "Field absent, using default");
            return Reading::Absent;
        };

        match decode(field, value) {
            Some(decoded) => Reading::Decoded(decoded),
            None => {
                debug!(%field, %value, "Substituting fail-safe value");
                self.errors.push(ValidationError::for_field(field));
                Reading::Unreadable
            }
        }
    }

    fn integer(&mut self, field: Field, default: i64) -> i64 {
        match self.read(field) {
            Reading::Decoded(Decoded::Integer(n)) => n,
            _ => default,
        }
    }

    fn boolean(&mut self, field: Field, default: bool) -> bool {
        match self.read(field) {
            Reading::Decoded(Decoded::Boolean(b)) => b,
            _ => default,
        }
    }

    fn mode(&mut self, field: Field, default: HvacMode) -> HvacMode {
        match self.read(field) {
            Reading::Decoded(Decoded::Mode(mode)) => mode,
            _ => default,
        }
    }

    /// Text fields distinguish an absent value (`default`) from an unreadable one (`fail_safe`)
    fn text(&mut self, field: Field, default: &str, fail_safe: &str) -> String {
        match self.read(field) {
            Reading::Decoded(Decoded::Text(s)) => s,
            Reading::Unreadable => fail_safe.to_string(),
            _ => default.to_string(),
        }
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_mode(value: &Value) -> Option<HvacMode> {
    value.as_str().and_then(HvacMode::parse)
}

fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_snapshot_is_clean() {
        let raw = RawSnapshot::from(&StateSnapshot::default());
        let validated = validate(&raw);
        assert!(validated.is_clean());
        assert_eq!(validated.snapshot, StateSnapshot::default());
    }

    #[test]
    fn test_empty_snapshot_takes_defaults() {
        let validated = validate(&RawSnapshot::new());
        assert!(validated.is_clean());
        assert_eq!(validated.snapshot, StateSnapshot::default());
    }

    #[test]
    fn test_invalid_proximity_fails_vacant() {
        let raw = RawSnapshot::new().with(Field::ProximityOccupied, "invalid_value");
        let validated = validate(&raw);
        assert!(!validated.snapshot.proximity_occupied);
        assert_eq!(validated.errors, vec![ValidationError::InvalidProximity]);
        assert_eq!(
            validated.errors[0].to_string(),
            "Invalid proximity state"
        );
    }

    #[test]
    fn test_invalid_away_timer_is_inactive() {
        let raw = RawSnapshot::new().with(Field::AwayTimerActive, json!(3));
        let validated = validate(&raw);
        assert!(!validated.snapshot.away_timer_active);
        assert_eq!(validated.errors, vec![ValidationError::InvalidAwayTimer]);
        assert_eq!(validated.errors[0].to_string(), "Invalid away timer value");
    }

    #[test]
    fn test_other_fields_fall_back_to_defaults() {
        let raw = RawSnapshot::new()
            .with(Field::TemperatureReading, "warm")
            .with(Field::HvacMode, "fan")
            .with(Field::LightOn, json!(null))
            .with(Field::AlarmPasscode, json!([1, 2]));
        let validated = validate(&raw);

        assert_eq!(validated.snapshot.temperature_reading, 20);
        assert_eq!(validated.snapshot.hvac_mode, HvacMode::Heater);
        assert!(!validated.snapshot.light_on);
        assert_eq!(validated.snapshot.alarm_passcode, "1234");
        assert_eq!(validated.errors.len(), 4);
        assert_eq!(
            validated.errors[0].to_string(),
            "Invalid temperature_reading value"
        );
        assert_eq!(validated.errors[0].field(), Field::TemperatureReading);
    }

    #[test]
    fn test_lenient_representations() {
        let raw = RawSnapshot::new()
            .with(Field::ProximityOccupied, "TRUE")
            .with(Field::DoorOpen, "false")
            .with(Field::TargetTemperature, " 22 ")
            .with(Field::HvacMode, "CHILLER")
            .with(Field::AlarmPasscode, json!(4321));
        let validated = validate(&raw);

        assert!(validated.is_clean());
        assert!(validated.snapshot.proximity_occupied);
        assert!(!validated.snapshot.door_open);
        assert_eq!(validated.snapshot.target_temperature, 22);
        assert_eq!(validated.snapshot.hvac_mode, HvacMode::Chiller);
        assert_eq!(validated.snapshot.alarm_passcode, "4321");
    }

    #[test]
    fn test_unreadable_given_passcode_never_matches() {
        let raw = RawSnapshot::new().with(Field::GivenPasscode, json!(true));
        let validated = validate(&raw);
        assert_eq!(validated.snapshot.given_passcode, "");
        assert_ne!(
            validated.snapshot.given_passcode,
            validated.snapshot.alarm_passcode
        );
    }

    #[test]
    fn test_every_field_decodes_by_kind() {
        let mut raw = RawSnapshot::new();
        for field in Field::ALL {
            let value = match field.kind() {
                FieldKind::Integer => json!("7"),
                FieldKind::Boolean => json!("TRUE"),
                FieldKind::Mode => json!("chiller"),
                FieldKind::Text => json!(42),
            };
            raw.set(field, value);
        }
        let validated = validate(&raw);

        assert!(validated.is_clean());
        assert_eq!(validated.snapshot.target_temperature, 7);
        assert!(validated.snapshot.away_timer_active);
        assert_eq!(validated.snapshot.hvac_mode, HvacMode::Chiller);
        assert_eq!(validated.snapshot.given_passcode, "42");
    }

    #[test]
    fn test_every_field_rejects_a_list() {
        let mut raw = RawSnapshot::new();
        for field in Field::ALL {
            raw.set(field, json!([]));
        }
        let validated = validate(&raw);

        let rejected: Vec<Field> = validated.errors.iter().map(ValidationError::field).collect();
        assert_eq!(rejected, Field::ALL.to_vec());
        assert_eq!(validated.snapshot.given_passcode, "");
        assert_eq!(validated.snapshot.alarm_passcode, "1234");
    }

    #[test]
    fn test_fractional_number_is_not_an_integer() {
        let raw = RawSnapshot::new().with(Field::HumidityReading, json!(40.5));
        let validated = validate(&raw);
        assert_eq!(validated.snapshot.humidity_reading, 50);
        assert_eq!(
            validated.errors,
            vec![ValidationError::InvalidField {
                field: Field::HumidityReading
            }]
        );
    }
}
