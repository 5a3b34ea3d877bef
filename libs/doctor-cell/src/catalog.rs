//! Built-in doctor catalog.
//!
//! Backs the in-memory [`CatalogDoctorSource`](crate::services::source::CatalogDoctorSource)
//! and is what `POST /doctors/seed` writes into an empty store. Availability is
//! laid out over the week following the start date, so the catalog always has
//! bookable slots.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, Utc};

use crate::models::Doctor;

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x400";

struct Entry {
    id: u32,
    name: &'static str,
    specialization: &'static str,
    location: &'static str,
    /// Days after the catalog's start date, with the slots offered that day.
    availability: &'static [(u64, &'static [&'static str])],
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1,
        name: "Dr. Evelyn Reed",
        specialization: "Cardiology",
        location: "Heart & Vascular Institute",
        availability: &[
            (1, &["09:00 AM", "11:00 AM", "02:00 PM"]),
            (2, &["10:00 AM", "03:00 PM"]),
            (3, &["09:00 AM", "11:00 AM"]),
        ],
    },
    Entry {
        id: 2,
        name: "Dr. Marcus Thorne",
        specialization: "Dermatology",
        location: "The Skin Health Center",
        availability: &[
            (1, &["09:30 AM", "11:30 AM"]),
            (3, &["01:00 PM", "04:00 PM"]),
            (4, &["10:00 AM", "12:00 PM"]),
        ],
    },
    Entry {
        id: 3,
        name: "Dr. Elena Petrova",
        specialization: "Neurology",
        location: "City General Hospital - Neurology Wing",
        availability: &[
            (3, &["08:00 AM", "10:00 AM"]),
            (4, &["11:00 AM", "02:30 PM"]),
            (5, &["08:00 AM", "10:00 AM"]),
        ],
    },
    Entry {
        id: 4,
        name: "Dr. Samuel Chen",
        specialization: "Orthopedics",
        location: "Metro Orthopedic Institute",
        availability: &[
            (2, &["09:00 AM", "01:00 PM"]),
            (5, &["10:00 AM", "03:00 PM"]),
            (6, &["09:00 AM", "11:30 AM"]),
        ],
    },
    Entry {
        id: 5,
        name: "Dr. Isabella Vance",
        specialization: "Gastroenterology",
        location: "Midtown Digestive Health",
        availability: &[
            (4, &["09:00 AM", "11:00 AM"]),
            (6, &["02:00 PM", "04:00 PM"]),
            (7, &["09:00 AM", "11:00 AM"]),
        ],
    },
    Entry {
        id: 6,
        name: "Dr. Liam Gallagher",
        specialization: "General Practitioner",
        location: "Community Health Clinic",
        availability: &[
            (1, &["10:00 AM", "12:00 PM", "03:00 PM"]),
            (2, &["09:00 AM", "11:00 AM"]),
            (3, &["02:00 PM", "04:00 PM"]),
        ],
    },
    Entry {
        id: 7,
        name: "Dr. Anya Sharma",
        specialization: "Oncology",
        location: "Hope Cancer Center",
        availability: &[
            (3, &["10:30 AM", "01:30 PM"]),
            (5, &["09:00 AM", "12:00 PM"]),
            (7, &["11:00 AM", "02:00 PM"]),
        ],
    },
    Entry {
        id: 8,
        name: "Dr. Ben Carter",
        specialization: "Pediatrics",
        location: "Children First Pediatrics",
        availability: &[
            (1, &["09:00 AM", "10:00 AM", "11:00 AM"]),
            (4, &["02:00 PM", "03:00 PM", "04:00 PM"]),
            (6, &["09:00 AM", "10:00 AM"]),
        ],
    },
];

/// The eight reference doctors, in catalog order, with availability starting tomorrow (UTC).
pub fn builtin_doctors() -> Vec<Doctor> {
    builtin_doctors_from(Utc::now().date_naive())
}

/// Same catalog with availability laid out relative to `start`.
pub fn builtin_doctors_from(start: NaiveDate) -> Vec<Doctor> {
    ENTRIES.iter().map(|entry| entry.to_doctor(start)).collect()
}

impl Entry {
    fn to_doctor(&self, start: NaiveDate) -> Doctor {
        let availability: BTreeMap<NaiveDate, Vec<String>> = self
            .availability
            .iter()
            .filter_map(|(offset, slots)| {
                let date = start.checked_add_days(Days::new(*offset))?;
                Some((date, slots.iter().map(|s| s.to_string()).collect()))
            })
            .collect();

        Doctor {
            id: self.id.to_string(),
            name: self.name.to_string(),
            specialization: self.specialization.to_string(),
            location: self.location.to_string(),
            availability,
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete() {
        let doctors = builtin_doctors();
        assert_eq!(doctors.len(), 8);
        assert!(doctors.iter().all(|d| d.availability.len() == 3));
        assert_eq!(
            doctors.iter().filter(|d| d.specialization == "General Practitioner").count(),
            1
        );
    }

    #[test]
    fn test_availability_follows_start_date() {
        let start = NaiveDate::from_ymd_opt(2030, 3, 1).unwrap();
        let doctors = builtin_doctors_from(start);

        let gp = doctors.iter().find(|d| d.id == "6").unwrap();
        let dates: Vec<String> = gp.available_dates().iter().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2030-03-02", "2030-03-03", "2030-03-04"]);
        assert_eq!(gp.slots_on(NaiveDate::from_ymd_opt(2030, 3, 2).unwrap()), ["10:00 AM", "12:00 PM", "03:00 PM"]);
    }

    #[test]
    fn test_default_catalog_is_bookable() {
        let today = Utc::now().date_naive();
        assert!(builtin_doctors()
            .iter()
            .all(|d| d.availability.keys().all(|date| *date > today)));
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<String> = builtin_doctors().into_iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
