pub mod doctor;
pub mod matching;
pub mod source;

pub use doctor::{DoctorSeedService, DoctorService};
pub use matching::{match_doctors, normalize_specialization, DoctorMatchingService, MatchOutcome};
pub use source::{CatalogDoctorSource, DoctorSource, StoreDoctorSource};
