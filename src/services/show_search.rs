use crate::{
    error::{AppError, AppResult},
    models::Show,
    services::catalog::Catalog,
};

/// Maximum number of shows returned by a name search
pub const SEARCH_LIMIT: usize = 12;

/// Service function for show search by name
///
/// Delegates to the configured Catalog, keeping HTTP routing free of query rules.
pub async fn search_shows(catalog: &dyn Catalog, query: &str) -> AppResult<Vec<Show>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let shows = catalog.search_by_name(query, SEARCH_LIMIT).await?;

    tracing::info!(query = %query, results = shows.len(), "Show search completed");

    Ok(shows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::MockCatalog;

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let mut mock = MockCatalog::new();
        mock.expect_search_by_name().times(0);

        let result = search_shows(&mock, "   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_query_is_trimmed_and_limited() {
        let mut mock = MockCatalog::new();
        mock.expect_search_by_name()
            .withf(|query, limit| query == "wire" && *limit == SEARCH_LIMIT)
            .times(1)
            .returning(|_, _| {
                Ok(vec![Show {
                    id: 1,
                    name: "The Wire".to_string(),
                    ..Default::default()
                }])
            });

        let shows = search_shows(&mock, "  wire ").await.unwrap();
        assert_eq!(shows.len(), 1);
    }
}
