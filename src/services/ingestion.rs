use std::ops::RangeInclusive;
use std::time::Instant;

use crate::{
    error::AppResult,
    models::{
        tvmaze::{TvMazeMapper, TvMazeShow},
        PersonRecord, RoleRecord, ShowId,
    },
    services::{catalog::CatalogWriter, providers::ShowSource},
};

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub pages: u32,
    pub shows: usize,
    pub people: usize,
    pub failed: usize,
}

/// Imports show index pages from an external source into the catalog
///
/// Pages are processed in order and the run stops at the first empty page.
/// Shows and people are upserted by their source ids, so re-running an import
/// updates existing rows. A failure on one show is logged and counted; a failure
/// to fetch a page aborts the run.
pub async fn import_pages(
    source: &dyn ShowSource,
    writer: &dyn CatalogWriter,
    pages: RangeInclusive<u32>,
    with_people: bool,
) -> AppResult<ImportSummary> {
    let start = Instant::now();
    let mapper = TvMazeMapper::new()?;
    let mut summary = ImportSummary::default();

    tracing::info!(
        provider = source.name(),
        from_page = *pages.start(),
        to_page = *pages.end(),
        with_people,
        "Starting catalog import"
    );

    for page in pages {
        let shows = source.fetch_show_page(page).await?;
        if shows.is_empty() {
            tracing::info!(page, "Reached the end of the show index");
            break;
        }
        summary.pages += 1;

        for show in &shows {
            match import_show(source, writer, &mapper, show, with_people).await {
                Ok(people) => {
                    summary.shows += 1;
                    summary.people += people;
                }
                Err(e) => {
                    tracing::warn!(
                        source_show_id = show.id,
                        error = %e,
                        "Failed to import show"
                    );
                    summary.failed += 1;
                }
            }
        }
    }

    tracing::info!(
        pages = summary.pages,
        shows = summary.shows,
        people = summary.people,
        failed = summary.failed,
        processing_time_ms = start.elapsed().as_millis(),
        "Catalog import completed"
    );

    Ok(summary)
}

/// Imports one show, returning the number of people written
async fn import_show(
    source: &dyn ShowSource,
    writer: &dyn CatalogWriter,
    mapper: &TvMazeMapper,
    show: &TvMazeShow,
    with_people: bool,
) -> AppResult<usize> {
    let show_id = writer.upsert_show(&mapper.show_record(show)).await?;
    writer.sync_genres(show_id, &show.genres).await?;

    if !with_people {
        return Ok(0);
    }

    import_people(source, writer, show.id, show_id).await
}

async fn import_people(
    source: &dyn ShowSource,
    writer: &dyn CatalogWriter,
    source_show_id: i64,
    show_id: ShowId,
) -> AppResult<usize> {
    let cast = source.fetch_cast(source_show_id).await?;
    let crew = source.fetch_crew(source_show_id).await?;

    let mut roles = Vec::with_capacity(cast.len() + crew.len());

    // The cast endpoint lists the main cast only.
    for credit in &cast {
        let person_id = writer
            .upsert_person(&PersonRecord::from(&credit.person))
            .await?;
        roles.push(RoleRecord {
            person_id,
            role: "cast".to_string(),
            character_name: credit.character_name(),
            main_cast: true,
        });
    }

    for credit in &crew {
        let person_id = writer
            .upsert_person(&PersonRecord::from(&credit.person))
            .await?;
        roles.push(RoleRecord {
            person_id,
            role: credit.role(),
            character_name: None,
            main_cast: false,
        });
    }

    writer.replace_roles(show_id, &roles).await?;

    Ok(roles.len())
}
