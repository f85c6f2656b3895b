pub mod models;
pub mod ranker;

pub use models::RecommendationRequest;
pub use ranker::Recommender;
