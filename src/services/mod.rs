pub mod caller;
pub mod errors;
pub mod fuzzy;
pub mod stack_history;
pub mod stack_pipeline;
pub mod stack_query;
pub mod technology_catalog;
pub mod technology_suggestion;

pub use caller::Caller;
pub use errors::{Result, ServiceError};
pub use fuzzy::{FuzzyMatcher, ScoringStrategy};
pub use stack_history::VersionHistoryStore;
pub use stack_pipeline::{StackDraft, StackMutationPipeline};
pub use stack_query::{StackListing, StackQuery};
pub use technology_catalog::TechnologyCatalog;
pub use technology_suggestion::{CandidateSource, PgCandidateSource, TechnologySuggestionService};
