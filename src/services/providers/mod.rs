/// External catalog source abstraction
///
/// The importer pulls shows and their cast/crew from an external catalog through
/// [`ShowSource`]. TVMaze is the only source today; keeping it behind a trait
/// lets the ingestion pipeline be exercised without network access.
use crate::{
    error::AppResult,
    models::tvmaze::{TvMazeCastCredit, TvMazeCrewCredit, TvMazeShow},
};

pub mod tvmaze;

pub use tvmaze::TvMazeProvider;

/// Trait for external show catalog sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ShowSource: Send + Sync {
    /// Fetch one page of the source's show index
    ///
    /// Returns an empty list once `page` is past the last page.
    async fn fetch_show_page(&self, page: u32) -> AppResult<Vec<TvMazeShow>>;

    /// Fetch the main cast of a show by its source id
    async fn fetch_cast(&self, source_show_id: i64) -> AppResult<Vec<TvMazeCastCredit>>;

    /// Fetch the crew of a show by its source id
    async fn fetch_crew(&self, source_show_id: i64) -> AppResult<Vec<TvMazeCrewCredit>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
