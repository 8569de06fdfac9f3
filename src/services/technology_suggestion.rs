use crate::db;
use crate::models::Technology;
use crate::services::{FuzzyMatcher, Result};
use crate::views::technology::Suggestion;
use async_trait::async_trait;
use sqlx::PgPool;
use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

/// Containment matches pulled before scoring.
pub const NARROW_CANDIDATE_CAP: i64 = 100;
/// Extra candidates pulled when the narrow set is thin.
pub const WIDEN_CANDIDATE_CAP: i64 = 50;
pub const MIN_SCORE: u8 = 60;
pub const MAX_RESULTS_CEILING: usize = 50;
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Where suggestion candidates come from. Only active technologies are returned.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Names containing the query, or contained in it, case-insensitively.
    async fn containing(&self, query: &str, limit: i64) -> Result<Vec<Technology>>;

    /// Any other technologies, by name, skipping `exclude`.
    async fn additional(&self, exclude: &[Uuid], limit: i64) -> Result<Vec<Technology>>;
}

pub struct PgCandidateSource {
    pool: PgPool,
}

impl PgCandidateSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateSource for PgCandidateSource {
    async fn containing(&self, query: &str, limit: i64) -> Result<Vec<Technology>> {
        Ok(db::technology::fetch_containing(&self.pool, query, limit).await?)
    }

    async fn additional(&self, exclude: &[Uuid], limit: i64) -> Result<Vec<Technology>> {
        Ok(db::technology::fetch_active_excluding(&self.pool, exclude, limit).await?)
    }
}

pub struct TechnologySuggestionService {
    source: Arc<dyn CandidateSource>,
    matcher: FuzzyMatcher,
}

impl TechnologySuggestionService {
    pub fn new(source: Arc<dyn CandidateSource>) -> Self {
        Self::with_matcher(source, FuzzyMatcher::new())
    }

    pub fn with_matcher(source: Arc<dyn CandidateSource>, matcher: FuzzyMatcher) -> Self {
        Self { source, matcher }
    }

    #[tracing::instrument(name = "Suggest technologies.", skip(self))]
    pub async fn suggest(&self, query: &str, max_results: usize) -> Result<Vec<Suggestion>> {
        let query = query.trim();
        let max_results = max_results.clamp(1, MAX_RESULTS_CEILING);

        let mut candidates = self.source.containing(query, NARROW_CANDIDATE_CAP).await?;
        if candidates.len() < 2 * max_results {
            let gathered: Vec<Uuid> = candidates.iter().map(|t| t.id).collect();
            let extra = self.source.additional(&gathered, WIDEN_CANDIDATE_CAP).await?;
            candidates.extend(extra);
        }

        tracing::debug!("Scoring {} candidates", candidates.len());
        Ok(rank(&self.matcher, query, candidates, max_results))
    }
}

/// Scores, drops anything under [`MIN_SCORE`], orders by score then name and
/// keeps at most `max_results` entries.
pub fn rank(
    matcher: &FuzzyMatcher,
    query: &str,
    candidates: Vec<Technology>,
    max_results: usize,
) -> Vec<Suggestion> {
    let mut seen = std::collections::HashSet::new();
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .filter(|technology| seen.insert(technology.id))
        .filter_map(|technology| {
            let score = matcher.score(query, &technology.name);
            (score >= MIN_SCORE).then(|| Suggestion::new(technology, score))
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| compare_names(&a.name, &b.name))
    });
    suggestions.truncate(max_results.min(MAX_RESULTS_CEILING));
    suggestions
}

fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
