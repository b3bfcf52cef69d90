// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{User, Education, WorkExperience, Internship, ExperienceLevel, WorkLocation, Recommendation, SubScores, ScoringWeights, to_percentage};
pub use requests::{RecommendationsQuery, RegisterRequest, LoginRequest, InternshipRequest};
pub use responses::{RecommendationsResponse, HealthResponse, ErrorResponse, CreatedUserResponse, CreatedInternshipResponse, SeedResponse, StatusResponse, CorsInfoResponse};
