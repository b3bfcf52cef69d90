// Core algorithm exports
pub mod compatibility;
pub mod matcher;
pub mod scoring;

pub use compatibility::{experience_score, location_score, EXPERIENCE_COMPATIBILITY, DEFAULT_EXPERIENCE_SCORE};
pub use matcher::{Matcher, MatchResult, RecommendError};
pub use scoring::{calculate_match_score, calculate_sub_scores};
