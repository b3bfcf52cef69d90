use crate::models::{ExperienceLevel, WorkLocation};

/// Score for any (user, internship) level pair missing from the table
pub const DEFAULT_EXPERIENCE_SCORE: f64 = 0.5;

/// Experience compatibility, keyed by (user level, internship level).
///
/// Asymmetric on purpose: a reversed pair is not looked up, it falls to
/// [`DEFAULT_EXPERIENCE_SCORE`].
pub const EXPERIENCE_COMPATIBILITY: &[((ExperienceLevel, ExperienceLevel), f64)] = &[
    ((ExperienceLevel::Entry, ExperienceLevel::Entry), 1.0),
    ((ExperienceLevel::Entry, ExperienceLevel::Mid), 0.7),
    ((ExperienceLevel::Mid, ExperienceLevel::Mid), 1.0),
    ((ExperienceLevel::Mid, ExperienceLevel::Senior), 0.8),
    ((ExperienceLevel::Senior, ExperienceLevel::Senior), 1.0),
    ((ExperienceLevel::Senior, ExperienceLevel::Lead), 0.9),
    ((ExperienceLevel::Lead, ExperienceLevel::Lead), 1.0),
];

/// Look up the experience sub-score (0-1).
/// An unset level on either side never matches a table entry.
#[inline]
pub fn experience_score(user: Option<ExperienceLevel>, internship: Option<ExperienceLevel>) -> f64 {
    let (Some(user), Some(internship)) = (user, internship) else {
        return DEFAULT_EXPERIENCE_SCORE;
    };

    EXPERIENCE_COMPATIBILITY
        .iter()
        .find(|(pair, _)| *pair == (user, internship))
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_EXPERIENCE_SCORE)
}

/// Location sub-score (0-1). First matching rule wins:
/// 1. same work location -> 1.0
/// 2. remote posting and the user accepts remote work -> 0.9
/// 3. user willing to relocate -> 0.7
/// 4. otherwise -> 0.3
#[inline]
pub fn location_score(
    user_location: Option<WorkLocation>,
    internship_location: Option<WorkLocation>,
    remote_work: bool,
    willing_to_relocate: bool,
) -> f64 {
    if user_location == internship_location {
        1.0
    } else if internship_location == Some(WorkLocation::Remote) && remote_work {
        0.9
    } else if willing_to_relocate {
        0.7
    } else {
        0.3
    }
}
