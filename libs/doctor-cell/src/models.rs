use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Doctor record as stored in the `doctors` collection.
///
/// Availability keys are calendar dates, so a record carrying a malformed
/// date key is rejected at deserialization time. Slot labels are free text
/// authored by the doctor and are not checked for overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub location: String,
    #[serde(default)]
    pub availability: BTreeMap<NaiveDate, Vec<String>>,
    #[serde(default)]
    pub image: String,
}

impl Doctor {
    /// Slot labels offered on `date`, in the order the doctor listed them.
    pub fn slots_on(&self, date: NaiveDate) -> &[String] {
        self.availability
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn offers_slot(&self, date: NaiveDate, slot: &str) -> bool {
        self.slots_on(date).iter().any(|s| s == slot)
    }

    /// Dates with at least one slot, earliest first.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.availability
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }
}

/// Store-assigned ids come back as numbers from some tables and strings from others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> de::Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer identifier")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDoctorsRequest {
    #[serde(default, alias = "relevantDoctorSpecializations")]
    pub specializations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSlots {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub slots: Vec<String>,
}
