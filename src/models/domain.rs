use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Seniority of a candidate or of an internship posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" => Ok(ExperienceLevel::Entry),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            other => Err(format!(
                "unknown experience level '{}', expected one of: entry, mid, senior, lead",
                other
            )),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the work happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "work_location", rename_all = "lowercase")]
pub enum WorkLocation {
    Remote,
    Hybrid,
    Onsite,
    Flexible,
}

impl WorkLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLocation::Remote => "remote",
            WorkLocation::Hybrid => "hybrid",
            WorkLocation::Onsite => "onsite",
            WorkLocation::Flexible => "flexible",
        }
    }
}

impl FromStr for WorkLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(WorkLocation::Remote),
            "hybrid" => Ok(WorkLocation::Hybrid),
            "onsite" | "on-site" | "on_site" => Ok(WorkLocation::Onsite),
            "flexible" => Ok(WorkLocation::Flexible),
            other => Err(format!(
                "unknown work location '{}', expected one of: remote, hybrid, onsite, flexible",
                other
            )),
        }
    }
}

impl fmt::Display for WorkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize an optional enum, treating a missing value or an empty string as unset
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One education entry on a user's profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub field: String,
    pub institution: String,
    #[serde(default)]
    pub graduation_year: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
}

/// One past or current position on a user's profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Registered candidate with profile and matching preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub current_job_title: Option<String>,
    #[serde(default)]
    pub current_company: Option<String>,
    #[serde(default)]
    pub total_experience: Option<String>,
    #[serde(default)]
    pub expected_salary: Option<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub job_preferences: Vec<String>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub work_location: Option<WorkLocation>,
    #[serde(default)]
    pub remote_work: bool,
    #[serde(default)]
    pub willing_to_relocate: bool,
    /// Empty means no preference
    #[serde(default)]
    pub company_size: String,
    /// Empty means no preference
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub industry_preferences: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Internship posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub work_location: Option<WorkLocation>,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Internship enriched with its match percentage for one user.
///
/// Built per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub internship_id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    pub duration: String,
    pub salary: Option<String>,
    pub skills: Vec<String>,
    #[serde(rename = "experienceLevel")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(rename = "workLocation")]
    pub work_location: Option<WorkLocation>,
    #[serde(rename = "companySize")]
    pub company_size: String,
    pub industry: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    #[serde(rename = "applicationDeadline")]
    pub application_deadline: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Percentage in [0, 100], one decimal place
    #[serde(rename = "match")]
    pub match_percent: f64,
}

impl Recommendation {
    /// Carry the internship's display fields through and attach the score
    pub fn from_scored(internship: Internship, score: f64) -> Self {
        Self {
            internship_id: internship.id,
            title: internship.title,
            company: internship.company,
            description: internship.description,
            location: internship.location,
            job_type: internship.job_type,
            duration: internship.duration,
            salary: internship.salary,
            skills: internship.skills,
            experience_level: internship.experience_level,
            work_location: internship.work_location,
            company_size: internship.company_size,
            industry: internship.industry,
            requirements: internship.requirements,
            benefits: internship.benefits,
            application_deadline: internship.application_deadline,
            start_date: internship.start_date,
            match_percent: to_percentage(score),
        }
    }
}

/// Convert a [0, 1] score into a percentage rounded to one decimal
#[inline]
pub fn to_percentage(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}

/// Unweighted sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub company_size: f64,
    pub job_type: f64,
    pub industry: f64,
}

impl SubScores {
    /// Weighted sum, not yet capped
    pub fn weighted(&self, weights: &ScoringWeights) -> f64 {
        self.skills * weights.skills
            + self.experience * weights.experience
            + self.location * weights.location
            + self.company_size * weights.company_size
            + self.job_type * weights.job_type
            + self.industry * weights.industry
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub company_size: f64,
    pub job_type: f64,
    pub industry: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            experience: 0.20,
            location: 0.15,
            company_size: 0.10,
            job_type: 0.10,
            industry: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_parsing_is_lenient() {
        assert_eq!("Entry".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Entry));
        assert_eq!(" LEAD ".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Lead));
        assert_eq!("On-site".parse::<WorkLocation>(), Ok(WorkLocation::Onsite));
        assert!("intermediate".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn test_empty_enum_fields_deserialize_as_unset() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "title": "Data Intern",
            "company": "Acme",
            "experienceLevel": "",
            "workLocation": "Remote"
        });

        let internship: Internship = serde_json::from_value(json).unwrap();
        assert_eq!(internship.experience_level, None);
        assert_eq!(internship.work_location, Some(WorkLocation::Remote));
        assert!(internship.skills.is_empty());
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(to_percentage(0.0), 0.0);
        assert_eq!(to_percentage(1.0), 100.0);
        assert_eq!(to_percentage(0.73456), 73.5);
        assert_eq!(to_percentage(0.4012), 40.1);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        let sum = w.skills + w.experience + w.location + w.company_size + w.job_type + w.industry;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommendation_serializes_match_key() {
        let internship = Internship {
            id: Uuid::nil(),
            title: "Backend Intern".to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            location: String::new(),
            job_type: "internship".to_string(),
            duration: "12 weeks".to_string(),
            salary: None,
            skills: vec![],
            experience_level: Some(ExperienceLevel::Entry),
            work_location: None,
            company_size: String::new(),
            industry: String::new(),
            requirements: vec![],
            benefits: vec![],
            application_deadline: None,
            start_date: None,
            created_at: None,
        };

        let value = serde_json::to_value(Recommendation::from_scored(internship, 0.5)).unwrap();
        assert_eq!(value["match"], 50.0);
        assert_eq!(value["jobType"], "internship");
        assert_eq!(value["experienceLevel"], "entry");
    }
}
