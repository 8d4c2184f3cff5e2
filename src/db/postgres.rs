use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    error::AppResult,
    models::{
        Genre, PersonId, PersonRecord, PersonRole, RoleRecord, Show, ShowId, ShowRecord,
    },
    services::catalog::{CandidateFilter, Catalog, CatalogWriter},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the catalog schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Catalog migrations applied");
    Ok(())
}

const SHOW_COLUMNS: &str = r#"
    s.id, s.name, s.type, s.language, s.status, s.runtime, s.premiered, s.rating,
    s.weight, s.official_site, s.network, s.web_channel, s.externals_imdb,
    s.image_medium, s.image_original, s.summary
"#;

#[derive(Debug, sqlx::FromRow)]
struct ShowRow {
    id: i64,
    name: String,
    #[sqlx(rename = "type")]
    show_type: Option<String>,
    language: Option<String>,
    status: Option<String>,
    runtime: Option<i32>,
    premiered: Option<NaiveDate>,
    rating: Option<f64>,
    weight: Option<f64>,
    official_site: Option<String>,
    network: Option<String>,
    web_channel: Option<String>,
    externals_imdb: Option<String>,
    image_medium: Option<String>,
    image_original: Option<String>,
    summary: Option<String>,
}

impl ShowRow {
    fn into_show(self, genres: Vec<Genre>, people: Vec<PersonRole>) -> Show {
        Show {
            id: self.id,
            name: self.name,
            show_type: self.show_type,
            language: self.language,
            status: self.status,
            runtime: self.runtime,
            premiered: self.premiered,
            rating: self.rating,
            weight: self.weight,
            official_site: self.official_site,
            network: self.network,
            web_channel: self.web_channel,
            externals_imdb: self.externals_imdb,
            image_medium: self.image_medium,
            image_original: self.image_original,
            summary: self.summary,
            genres,
            people,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GenreRow {
    show_id: i64,
    id: i64,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    show_id: i64,
    person_id: i64,
    name: String,
    role: String,
    character_name: Option<String>,
    main_cast: bool,
    image_medium: Option<String>,
}

/// Escapes LIKE wildcards so user input is matched literally
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads genres and person roles for a batch of shows with two queries
    async fn hydrate(&self, rows: Vec<ShowRow>) -> AppResult<Vec<Show>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ShowId> = rows.iter().map(|row| row.id).collect();

        let genre_rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT gs.show_id, g.id, g.name
            FROM genre_show gs
            JOIN genres g ON g.id = gs.genre_id
            WHERE gs.show_id = ANY($1)
            ORDER BY gs.show_id, g.name
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let role_rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT sp.show_id, p.id AS person_id, p.name, sp.role, sp.character_name,
                   sp.main_cast, p.image_medium
            FROM show_person sp
            JOIN people p ON p.id = sp.person_id
            WHERE sp.show_id = ANY($1)
            ORDER BY sp.show_id, sp.position
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let mut genres: HashMap<ShowId, Vec<Genre>> = HashMap::new();
        for row in genre_rows {
            genres.entry(row.show_id).or_default().push(Genre {
                id: row.id,
                name: row.name,
            });
        }

        let mut people: HashMap<ShowId, Vec<PersonRole>> = HashMap::new();
        for row in role_rows {
            people.entry(row.show_id).or_default().push(PersonRole {
                person_id: row.person_id,
                name: row.name,
                role: row.role,
                character_name: row.character_name,
                main_cast: row.main_cast,
                image_medium: row.image_medium,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_show(
                    genres.remove(&id).unwrap_or_default(),
                    people.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl Catalog for PgCatalog {
    async fn fetch_shows_by_ids(&self, ids: &[ShowId]) -> AppResult<Vec<Show>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM shows s WHERE s.id = ANY($1) ORDER BY s.id",
            SHOW_COLUMNS
        );
        let rows = sqlx::query_as::<_, ShowRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }

    async fn fetch_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Show>> {
        if !filter.has_criteria() {
            return Ok(Vec::new());
        }

        // An empty array makes its EXISTS clause false, so one statement covers
        // genre-only, person-only and combined filters.
        let sql = format!(
            r#"
            SELECT {}
            FROM shows s
            WHERE NOT (s.id = ANY($1))
              AND (
                EXISTS (
                    SELECT 1 FROM genre_show gs
                    WHERE gs.show_id = s.id AND gs.genre_id = ANY($2)
                )
                OR EXISTS (
                    SELECT 1 FROM show_person sp
                    WHERE sp.show_id = s.id AND sp.person_id = ANY($3)
                )
              )
            ORDER BY s.weight DESC NULLS LAST, s.id
            LIMIT $4
            "#,
            SHOW_COLUMNS
        );

        let pool_size = i64::try_from(filter.pool_size).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, ShowRow>(&sql)
            .bind(&filter.exclude_ids[..])
            .bind(&filter.genre_ids[..])
            .bind(&filter.person_ids[..])
            .bind(pool_size)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(candidates = rows.len(), "Candidate pool fetched");

        self.hydrate(rows).await
    }

    async fn search_by_name(&self, query: &str, limit: usize) -> AppResult<Vec<Show>> {
        let sql = format!(
            "SELECT {} FROM shows s WHERE s.name ILIKE $1 ORDER BY s.name LIMIT $2",
            SHOW_COLUMNS
        );
        let rows = sqlx::query_as::<_, ShowRow>(&sql)
            .bind(like_pattern(query))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }
}

#[async_trait::async_trait]
impl CatalogWriter for PgCatalog {
    async fn upsert_show(&self, record: &ShowRecord) -> AppResult<ShowId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO shows (
                on_source_id, name, type, language, status, runtime, premiered,
                official_site, schedule_time, schedule_days, rating, weight, network,
                network_country, web_channel, externals_imdb, externals_thetvdb,
                externals_tvrage, image_medium, image_original, summary, on_source_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22)
            ON CONFLICT (on_source_id) DO UPDATE SET
                name = EXCLUDED.name,
                type = EXCLUDED.type,
                language = EXCLUDED.language,
                status = EXCLUDED.status,
                runtime = EXCLUDED.runtime,
                premiered = EXCLUDED.premiered,
                official_site = EXCLUDED.official_site,
                schedule_time = EXCLUDED.schedule_time,
                schedule_days = EXCLUDED.schedule_days,
                rating = EXCLUDED.rating,
                weight = EXCLUDED.weight,
                network = EXCLUDED.network,
                network_country = EXCLUDED.network_country,
                web_channel = EXCLUDED.web_channel,
                externals_imdb = EXCLUDED.externals_imdb,
                externals_thetvdb = EXCLUDED.externals_thetvdb,
                externals_tvrage = EXCLUDED.externals_tvrage,
                image_medium = EXCLUDED.image_medium,
                image_original = EXCLUDED.image_original,
                summary = EXCLUDED.summary,
                on_source_updated = EXCLUDED.on_source_updated,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(record.source_id)
        .bind(&record.name)
        .bind(&record.show_type)
        .bind(&record.language)
        .bind(&record.status)
        .bind(record.runtime)
        .bind(record.premiered)
        .bind(&record.official_site)
        .bind(&record.schedule_time)
        .bind(&record.schedule_days)
        .bind(record.rating)
        .bind(record.weight)
        .bind(&record.network)
        .bind(&record.network_country)
        .bind(&record.web_channel)
        .bind(&record.externals_imdb)
        .bind(record.externals_thetvdb)
        .bind(record.externals_tvrage)
        .bind(&record.image_medium)
        .bind(&record.image_original)
        .bind(&record.summary)
        .bind(record.source_updated)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn sync_genres(&self, show_id: ShowId, genre_names: &[String]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM genre_show WHERE show_id = $1")
            .bind(show_id)
            .execute(&mut *tx)
            .await?;

        for name in genre_names {
            let genre_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO genres (name) VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id
                "#,
            )
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO genre_show (show_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(show_id)
            .bind(genre_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn upsert_person(&self, record: &PersonRecord) -> AppResult<PersonId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO people (
                on_source_id, name, country, birthday, deathday, gender,
                image_medium, image_original, on_source_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (on_source_id) DO UPDATE SET
                name = EXCLUDED.name,
                country = EXCLUDED.country,
                birthday = EXCLUDED.birthday,
                deathday = EXCLUDED.deathday,
                gender = EXCLUDED.gender,
                image_medium = EXCLUDED.image_medium,
                image_original = EXCLUDED.image_original,
                on_source_updated = EXCLUDED.on_source_updated,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(record.source_id)
        .bind(&record.name)
        .bind(&record.country)
        .bind(record.birthday)
        .bind(record.deathday)
        .bind(&record.gender)
        .bind(&record.image_medium)
        .bind(&record.image_original)
        .bind(record.source_updated)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn replace_roles(&self, show_id: ShowId, roles: &[RoleRecord]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM show_person WHERE show_id = $1")
            .bind(show_id)
            .execute(&mut *tx)
            .await?;

        for (position, role) in roles.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO show_person (show_id, person_id, role, character_name, main_cast, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(show_id)
            .bind(role.person_id)
            .bind(&role.role)
            .bind(&role.character_name)
            .bind(role.main_cast)
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
