pub mod recommendation;
pub mod records;
pub mod show;
pub mod tvmaze;

pub use recommendation::{
    CriteriaScores, RecommendationPage, RecommendationRequest, RecommendedShow,
    RecommendedShowView, ScoredCandidate,
};
pub use records::{PersonRecord, RoleRecord, ShowRecord};
pub use show::{CastMember, Genre, GenreId, PersonId, PersonRole, Show, ShowId, ShowView};
