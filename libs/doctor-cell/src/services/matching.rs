// libs/doctor-cell/src/services/matching.rs
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::models::Doctor;
use crate::services::source::DoctorSource;

/// Specialization label of the fallback pool, compared case-insensitively.
pub const GENERAL_PRACTITIONER: &str = "general practitioner";

/// One stemming rule: a lower-case suffix and how many trailing characters to
/// drop when a candidate ends with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    pub suffix: &'static str,
    pub truncate: usize,
}

/// Checked in order; the first rule whose suffix matches wins and no further
/// rule is applied.
pub const SUFFIX_RULES: &[SuffixRule] = &[
    // cardiologist -> cardiolog
    SuffixRule { suffix: "logist", truncate: 3 },
    // dentist -> dent
    SuffixRule { suffix: "ist", truncate: 3 },
    // pediatrician -> pediatric
    SuffixRule { suffix: "ian", truncate: 3 },
    // orthopedics -> orthopedic
    SuffixRule { suffix: "s", truncate: 1 },
];

/// Lower-case a candidate and strip at most one suffix from [`SUFFIX_RULES`].
///
/// Surrounding whitespace is trimmed before lower-casing, which goes beyond a
/// plain lower-case-and-strip: `" Cardiologist"` still matches "Cardiology"
/// instead of falling back. This is a heuristic, not a stemmer: it can under-
/// or over-strip words it was not written for.
pub fn normalize_specialization(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();

    match SUFFIX_RULES.iter().find(|rule| lower.ends_with(rule.suffix)) {
        // suffixes are ASCII and `truncate <= suffix.len()`, so this stays on a char boundary
        Some(rule) => lower[..lower.len() - rule.truncate].to_string(),
        None => lower,
    }
}

pub fn is_general_practitioner(doctor: &Doctor) -> bool {
    doctor.specialization.to_lowercase() == GENERAL_PRACTITIONER
}

/// Result of matching candidates against a doctor collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub doctors: Vec<Doctor>,
    /// True when the general-practitioner pool was returned instead of specialists.
    pub used_fallback: bool,
}

impl MatchOutcome {
    pub fn into_doctors(self) -> Vec<Doctor> {
        self.doctors
    }
}

/// Doctors whose lower-cased specialization contains any normalized candidate.
///
/// When there are no usable candidates, or none of them match, every
/// "General Practitioner" is returned instead. Input order is preserved.
/// Never fails; an empty outcome means the collection has no general
/// practitioner either.
pub fn match_doctors<S: AsRef<str>>(candidates: &[S], doctors: &[Doctor]) -> MatchOutcome {
    let stems: Vec<String> = candidates
        .iter()
        .map(|candidate| normalize_specialization(candidate.as_ref()))
        // an empty stem is a substring of everything
        .filter(|stem| !stem.is_empty())
        .collect();

    debug!("Matching specialization stems {:?} against {} doctors", stems, doctors.len());

    let matched: Vec<Doctor> = doctors
        .iter()
        .filter(|doctor| {
            let specialization = doctor.specialization.to_lowercase();
            stems.iter().any(|stem| specialization.contains(stem.as_str()))
        })
        .cloned()
        .collect();

    if !matched.is_empty() {
        return MatchOutcome { doctors: matched, used_fallback: false };
    }

    MatchOutcome {
        doctors: doctors.iter().filter(|d| is_general_practitioner(d)).cloned().collect(),
        used_fallback: true,
    }
}

/// Runs the matcher over whatever collection the injected source holds at call time.
pub struct DoctorMatchingService {
    source: Arc<dyn DoctorSource>,
}

impl DoctorMatchingService {
    pub fn new(source: Arc<dyn DoctorSource>) -> Self {
        Self { source }
    }

    pub async fn find_doctors_for_specializations(
        &self,
        specializations: &[String],
    ) -> Result<MatchOutcome> {
        let doctors = self.source.list_doctors().await?;
        let outcome = match_doctors(specializations, &doctors);

        info!(
            "Matched {} of {} doctors for {:?} (fallback: {})",
            outcome.doctors.len(),
            doctors.len(),
            specializations,
            outcome.used_fallback
        );

        Ok(outcome)
    }
}
