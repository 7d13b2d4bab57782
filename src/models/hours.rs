use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Fields;

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
    pub closed: bool,
}

impl DayHours {
    fn open(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            closed: false,
        }
    }
}

/// Schedule served when no `settings/operatingHours` document exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            monday: DayHours::open("06:00", "22:00"),
            tuesday: DayHours::open("06:00", "22:00"),
            wednesday: DayHours::open("06:00", "22:00"),
            thursday: DayHours::open("06:00", "22:00"),
            friday: DayHours::open("06:00", "22:00"),
            saturday: DayHours::open("08:00", "20:00"),
            sunday: DayHours::open("08:00", "18:00"),
        }
    }
}

impl OperatingHours {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Check every weekday entry present in an update body.
///
/// Entries may be omitted; a present entry must carry `open`/`close` as
/// `HH:MM` and `closed` as a boolean. Other keys pass through untouched.
pub fn validate_update(body: &Fields) -> Result<(), BTreeMap<String, String>> {
    let mut errors = BTreeMap::new();

    for day in WEEKDAYS {
        let Some(entry) = body.get(day) else { continue };
        let Some(entry) = entry.as_object() else {
            errors.insert(day.to_string(), "expected an object".to_string());
            continue;
        };

        for key in ["open", "close"] {
            let valid = entry
                .get(key)
                .and_then(Value::as_str)
                .map_or(false, |s| NaiveTime::parse_from_str(s, "%H:%M").is_ok());
            if !valid {
                errors.insert(format!("{}.{}", day, key), "expected time as HH:MM".to_string());
            }
        }

        if !entry.get("closed").map_or(false, Value::is_boolean) {
            errors.insert(format!("{}.closed", day), "expected a boolean".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
