use std::collections::HashSet;

use crate::models::{User, Internship, ScoringWeights, SubScores};
use crate::core::compatibility::{experience_score, location_score};

/// Calculate a match score (0-1) between a user and an internship
///
/// Scoring formula:
/// score = min(
///     skills_score * 0.40 +        # Share of required skills the user has
///     experience_score * 0.20 +    # Compatibility table lookup
///     location_score * 0.15 +      # Work location / remote / relocation
///     company_size_score * 0.10 +  # Preferred company size
///     job_type_score * 0.10 +      # Preferred job type
///     industry_score * 0.05,       # Preferred industries
///     1.0
/// )
pub fn calculate_match_score(
    user: &User,
    internship: &Internship,
    weights: &ScoringWeights,
) -> f64 {
    let sub_scores = calculate_sub_scores(user, internship);
    sub_scores.weighted(weights).clamp(0.0, 1.0)
}

/// Compute the six unweighted sub-scores. Never fails: unset or empty
/// fields fall back to the numeric defaults of each rule.
pub fn calculate_sub_scores(user: &User, internship: &Internship) -> SubScores {
    SubScores {
        skills: skills_score(&user.technical_skills, &internship.skills),
        experience: experience_score(user.experience_level, internship.experience_level),
        location: location_score(
            user.work_location,
            internship.work_location,
            user.remote_work,
            user.willing_to_relocate,
        ),
        company_size: preference_score(&user.company_size, &internship.company_size),
        job_type: preference_score(&user.job_type, &internship.job_type),
        industry: industry_score(&user.industry_preferences, &internship.industry),
    }
}

/// Fraction of the internship's skills the user has (0-1).
/// No credit at all when either side lists no skills.
#[inline]
pub fn skills_score(user_skills: &[String], internship_skills: &[String]) -> f64 {
    let user_set = lowercase_set(user_skills);
    let internship_set = lowercase_set(internship_skills);

    if user_set.is_empty() || internship_set.is_empty() {
        return 0.0;
    }

    let shared = internship_set.intersection(&user_set).count();
    shared as f64 / internship_set.len() as f64
}

/// Three-tier single-value preference (0-1): match 1.0, no preference 0.8, mismatch 0.5
#[inline]
pub fn preference_score(user_preference: &str, internship_value: &str) -> f64 {
    let preference = user_preference.trim();

    if preference.eq_ignore_ascii_case(internship_value.trim()) {
        1.0
    } else if preference.is_empty() {
        0.8
    } else {
        0.5
    }
}

/// Industry sub-score (0-1): listed 1.0, no preferences 0.8, otherwise 0.5
#[inline]
pub fn industry_score(user_industries: &[String], internship_industry: &str) -> f64 {
    let preferred = lowercase_set(user_industries);

    if preferred.contains(&internship_industry.to_lowercase()) {
        1.0
    } else if preferred.is_empty() {
        0.8
    } else {
        0.5
    }
}

fn lowercase_set(values: &[String]) -> HashSet<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, WorkLocation};
    use uuid::Uuid;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn create_test_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@example.com".to_string(),
            technical_skills: strings(&["Python", "JavaScript"]),
            experience_level: Some(ExperienceLevel::Entry),
            work_location: Some(WorkLocation::Hybrid),
            remote_work: true,
            willing_to_relocate: false,
            company_size: "startup".to_string(),
            job_type: "internship".to_string(),
            industry_preferences: strings(&["Technology"]),
            ..Default::default()
        }
    }

    fn create_test_internship() -> Internship {
        Internship {
            id: Uuid::new_v4(),
            title: "Backend Intern".to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            location: "Berlin".to_string(),
            job_type: "internship".to_string(),
            duration: "12 weeks".to_string(),
            salary: None,
            skills: strings(&["python", "sql"]),
            experience_level: Some(ExperienceLevel::Entry),
            work_location: Some(WorkLocation::Hybrid),
            company_size: "startup".to_string(),
            industry: "technology".to_string(),
            requirements: vec![],
            benefits: vec![],
            application_deadline: None,
            start_date: None,
            created_at: None,
        }
    }

    #[test]
    fn test_calculate_match_score() {
        let user = create_test_user();
        let internship = create_test_internship();
        let weights = ScoringWeights::default();

        let score = calculate_match_score(&user, &internship, &weights);

        // Only the skills factor is partial: 0.5 * 0.4 + 0.6
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_skills_score_is_case_insensitive() {
        let score = skills_score(&strings(&["PYTHON", "javascript"]), &strings(&["python", "SQL"]));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_skills_score_ignores_duplicates() {
        let score = skills_score(&strings(&["rust"]), &strings(&["Rust", "rust", "go"]));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_skills_score_empty_sides() {
        assert_eq!(skills_score(&strings(&["rust"]), &[]), 0.0);
        assert_eq!(skills_score(&[], &strings(&["rust"])), 0.0);
        assert_eq!(skills_score(&[], &[]), 0.0);
    }

    #[test]
    fn test_preference_score_tiers() {
        assert_eq!(preference_score("Startup", "startup"), 1.0);
        assert_eq!(preference_score("", "enterprise"), 0.8);
        assert_eq!(preference_score("large", "startup"), 0.5);
        // Both unset counts as a match
        assert_eq!(preference_score("", ""), 1.0);
    }

    #[test]
    fn test_industry_score_tiers() {
        assert_eq!(industry_score(&strings(&["FinTech"]), "fintech"), 1.0);
        assert_eq!(industry_score(&[], "fintech"), 0.8);
        assert_eq!(industry_score(&strings(&["health"]), "fintech"), 0.5);
    }

    #[test]
    fn test_score_is_capped() {
        let user = create_test_user();
        let mut internship = create_test_internship();
        internship.skills = strings(&["python"]);

        let heavy = ScoringWeights {
            skills: 1.0,
            experience: 1.0,
            location: 1.0,
            company_size: 1.0,
            job_type: 1.0,
            industry: 1.0,
        };

        assert_eq!(calculate_match_score(&user, &internship, &heavy), 1.0);
    }
}
