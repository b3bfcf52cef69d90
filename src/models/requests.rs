use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{
    empty_as_none, Education, ExperienceLevel, Internship, User, WorkExperience, WorkLocation,
};

/// Query string for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsQuery {
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(alias = "topN")]
    pub top_n: Option<i64>,
}

/// Registration payload, also used to replace a user's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
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
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub industry_preferences: Vec<String>,
}

impl RegisterRequest {
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            location: self.location,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            bio: self.bio,
            current_job_title: self.current_job_title,
            current_company: self.current_company,
            total_experience: self.total_experience,
            expected_salary: self.expected_salary,
            education: self.education,
            work_experience: self.work_experience,
            soft_skills: self.soft_skills,
            languages: self.languages,
            portfolio: self.portfolio,
            linkedin: self.linkedin,
            github: self.github,
            website: self.website,
            job_preferences: self.job_preferences,
            technical_skills: self.technical_skills,
            experience_level: self.experience_level,
            work_location: self.work_location,
            remote_work: self.remote_work,
            willing_to_relocate: self.willing_to_relocate,
            company_size: self.company_size.unwrap_or_default(),
            job_type: self.job_type.unwrap_or_default(),
            industry_preferences: self.industry_preferences,
            created_at: Some(chrono::Utc::now()),
        }
    }
}

/// Look up a registered user by email. No credentials are checked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
}

/// Payload for creating an internship posting
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InternshipRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub salary: Option<String>,
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
}

impl InternshipRequest {
    pub fn into_internship(self, id: Uuid) -> Internship {
        Internship {
            id,
            title: self.title,
            company: self.company,
            description: self.description,
            location: self.location,
            job_type: self.job_type,
            duration: self.duration,
            salary: self.salary,
            skills: self.skills,
            experience_level: self.experience_level,
            work_location: self.work_location,
            company_size: self.company_size,
            industry: self.industry,
            requirements: self.requirements,
            benefits: self.benefits,
            application_deadline: self.application_deadline,
            start_date: self.start_date,
            created_at: Some(chrono::Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let json = serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "not-an-email",
        });
        let req: RegisterRequest = serde_json::from_value(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_defaults_to_no_preference() {
        let json = serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "experienceLevel": "",
            "companySize": null,
        });
        let req: RegisterRequest = serde_json::from_value(json).unwrap();
        assert!(req.validate().is_ok());

        let user = req.into_user(Uuid::nil());
        assert_eq!(user.experience_level, None);
        assert_eq!(user.company_size, "");
        assert!(!user.remote_work);
        assert!(user.industry_preferences.is_empty());
    }

    #[test]
    fn test_register_request_keeps_full_profile() {
        let json = serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "gender": "female",
            "education": [{
                "degree": "BSc",
                "field": "Mathematics",
                "institution": "University of London",
                "graduationYear": "1835"
            }],
            "workExperience": [{
                "company": "Analytical Engines Ltd",
                "position": "Programmer",
                "startDate": "1842-01",
                "current": true
            }],
            "softSkills": ["writing"],
            "languages": ["English", "French"],
            "github": "https://github.com/ada",
            "jobPreferences": ["research"],
        });
        let user = serde_json::from_value::<RegisterRequest>(json).unwrap().into_user(Uuid::nil());

        assert_eq!(user.gender.as_deref(), Some("female"));
        assert_eq!(user.education[0].graduation_year.as_deref(), Some("1835"));
        assert_eq!(user.education[0].gpa, None);
        assert!(user.work_experience[0].current);
        assert_eq!(user.work_experience[0].end_date, None);
        assert_eq!(user.languages, vec!["English", "French"]);
        assert_eq!(user.soft_skills, vec!["writing"]);
        assert_eq!(user.github.as_deref(), Some("https://github.com/ada"));
        assert_eq!(user.job_preferences, vec!["research"]);
    }

    #[test]
    fn test_login_request_validation() {
        let ok: LoginRequest = serde_json::from_value(serde_json::json!({ "email": "a@b.co" })).unwrap();
        assert!(ok.validate().is_ok());

        let bad: LoginRequest = serde_json::from_value(serde_json::json!({ "email": "nope" })).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_internship_request_rejects_unknown_level() {
        let json = serde_json::json!({
            "title": "Intern",
            "company": "Acme",
            "experienceLevel": "guru",
        });
        assert!(serde_json::from_value::<InternshipRequest>(json).is_err());
    }
}
