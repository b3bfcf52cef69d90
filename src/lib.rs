//! Intern Match - internship matching and recommendation service
//!
//! Stores user profiles and internship postings and ranks postings for a
//! user with a weighted multi-factor compatibility score.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, RecommendError, calculate_match_score, calculate_sub_scores};
pub use models::{User, Internship, Recommendation, ScoringWeights, ExperienceLevel, WorkLocation};
pub use services::{RecordStore, StoreError, InMemoryStore, PostgresStore};
