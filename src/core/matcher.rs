use thiserror::Error;

use crate::models::{User, Internship, Recommendation, ScoringWeights};
use crate::core::scoring::calculate_match_score;
use crate::services::store::{parse_id, RecordStore, StoreError};

/// Result of the ranking process
#[derive(Debug)]
pub struct MatchResult {
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
}

/// Errors returned by [`Matcher::recommend`]
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Record store failures, passed through untouched
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Recommendation orchestrator: scores every internship for a user and
/// keeps the best `top_n`
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score and rank internships for a user
    ///
    /// No internship is filtered out. Results are ordered by match
    /// percentage (descending), then by internship id (ascending) so equal
    /// scores come back in a reproducible order.
    ///
    /// # Arguments
    /// * `user` - The user to recommend for
    /// * `internships` - Every internship in the catalog
    /// * `top_n` - Maximum number of recommendations to return
    pub fn rank(&self, user: &User, internships: Vec<Internship>, top_n: usize) -> MatchResult {
        let total_candidates = internships.len();

        let mut recommendations: Vec<Recommendation> = internships
            .into_iter()
            .map(|internship| {
                let score = calculate_match_score(user, &internship, &self.weights);
                Recommendation::from_scored(internship, score)
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.match_percent
                .total_cmp(&a.match_percent)
                .then_with(|| a.internship_id.cmp(&b.internship_id))
        });

        recommendations.truncate(top_n);

        MatchResult {
            recommendations,
            total_candidates,
        }
    }

    /// Load a user and the internship catalog from the store and rank
    ///
    /// Fails with `InvalidArgument` for a negative `top_n`, and with the
    /// store's `InvalidId` / `NotFound` when the user id can't be resolved.
    /// An empty catalog is not an error.
    pub async fn recommend(
        &self,
        store: &dyn RecordStore,
        user_id: &str,
        top_n: i64,
    ) -> Result<MatchResult, RecommendError> {
        let top_n = usize::try_from(top_n).map_err(|_| {
            RecommendError::InvalidArgument(format!("top_n must be >= 0, got {}", top_n))
        })?;

        let id = parse_id(user_id)?;
        let user = store.get_user(id).await?;
        let internships = store.list_internships().await?;

        tracing::debug!("Scoring {} internships for user {}", internships.len(), id);

        Ok(self.rank(&user, internships, top_n))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
