pub mod models;
pub mod patterns;
pub mod processor;
pub mod suggestions;

pub use models::{ParsedVoiceQuery, QueryFilters, SortField, SortOrder};
pub use patterns::{COMMAND_PREFIXES, STOPWORDS};
pub use processor::VoiceQueryProcessor;
pub use suggestions::{generate_suggestions, CANNED_SUGGESTIONS};
