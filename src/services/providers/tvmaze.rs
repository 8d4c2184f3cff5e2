/// TVMaze API provider
///
/// Public, keyless API. Endpoints used:
/// 1. Show index: /shows?page=N → 250 shows per page, 404 past the last page
/// 2. Cast: /shows/{id}/cast
/// 3. Crew: /shows/{id}/crew
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::tvmaze::{TvMazeCastCredit, TvMazeCrewCredit, TvMazeShow},
    services::providers::ShowSource,
};

#[derive(Clone)]
pub struct TvMazeProvider {
    http_client: HttpClient,
    api_url: String,
}

impl TvMazeProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn show_page_url(&self) -> String {
        format!("{}/shows", self.api_url)
    }

    fn credits_url(&self, source_show_id: i64, kind: &str) -> String {
        format!("{}/shows/{}/{}", self.api_url, source_show_id, kind)
    }

    /// GET a JSON document; `Ok(None)` when the resource does not exist
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<Option<T>> {
        let response = self.http_client.get(url).query(query).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = %status,
                body = %body,
                "TVMaze request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        Ok(Some(response.json().await?))
    }
}

#[async_trait::async_trait]
impl ShowSource for TvMazeProvider {
    async fn fetch_show_page(&self, page: u32) -> AppResult<Vec<TvMazeShow>> {
        let shows: Vec<TvMazeShow> = self
            .get_json(&self.show_page_url(), &[("page", page.to_string())])
            .await?
            .unwrap_or_default();

        tracing::info!(
            page,
            shows = shows.len(),
            provider = self.name(),
            "Show page fetched"
        );

        Ok(shows)
    }

    async fn fetch_cast(&self, source_show_id: i64) -> AppResult<Vec<TvMazeCastCredit>> {
        let cast: Vec<TvMazeCastCredit> = self
            .get_json(&self.credits_url(source_show_id, "cast"), &[])
            .await?
            .unwrap_or_default();

        tracing::debug!(source_show_id, cast = cast.len(), "Cast fetched");
        Ok(cast)
    }

    async fn fetch_crew(&self, source_show_id: i64) -> AppResult<Vec<TvMazeCrewCredit>> {
        let crew: Vec<TvMazeCrewCredit> = self
            .get_json(&self.credits_url(source_show_id, "crew"), &[])
            .await?
            .unwrap_or_default();

        tracing::debug!(source_show_id, crew = crew.len(), "Crew fetched");
        Ok(crew)
    }

    fn name(&self) -> &'static str {
        "tvmaze"
    }
}
