use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

use super::records::{PersonRecord, ShowRecord};

// ============================================================================
// TVMaze API Types
// ============================================================================

/// Show object returned by `GET /shows?page=N`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvMazeShow {
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub show_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub average_runtime: Option<i32>,
    #[serde(default)]
    pub premiered: Option<String>,
    #[serde(default)]
    pub official_site: Option<String>,
    #[serde(default)]
    pub schedule: Option<TvMazeSchedule>,
    #[serde(default)]
    pub rating: Option<TvMazeRating>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub network: Option<TvMazeNetwork>,
    #[serde(default)]
    pub web_channel: Option<TvMazeNetwork>,
    #[serde(default)]
    pub externals: Option<TvMazeExternals>,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub updated: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvMazeSchedule {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeRating {
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeNetwork {
    pub name: String,
    #[serde(default)]
    pub country: Option<TvMazeCountry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeCountry {
    pub code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeExternals {
    pub tvrage: Option<i64>,
    pub thetvdb: Option<i64>,
    pub imdb: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazePerson {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country: Option<TvMazeCountry>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
    #[serde(default)]
    pub updated: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeCharacter {
    pub name: String,
}

/// Entry of `GET /shows/{id}/cast`
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeCastCredit {
    pub person: TvMazePerson,
    #[serde(default)]
    pub character: Option<TvMazeCharacter>,
}

/// Entry of `GET /shows/{id}/crew`
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeCrewCredit {
    #[serde(rename = "type")]
    pub crew_type: String,
    pub person: TvMazePerson,
}

// ============================================================================
// Mapping into catalog records
// ============================================================================

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn lowered(value: Option<&str>) -> Option<String> {
    clean(value).map(|v| v.to_lowercase())
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

fn parse_timestamp(value: Option<i64>) -> Option<DateTime<Utc>> {
    value.and_then(|ts| DateTime::from_timestamp(ts, 0))
}

/// Maps TVMaze shows into catalog records, stripping HTML from summaries
pub struct TvMazeMapper {
    tag_pattern: Regex,
}

impl TvMazeMapper {
    pub fn new() -> AppResult<Self> {
        let tag_pattern = Regex::new(r"<[^>]*>")
            .map_err(|e| AppError::Internal(format!("failed to compile tag pattern: {}", e)))?;
        Ok(Self { tag_pattern })
    }

    pub fn strip_tags(&self, html: &str) -> Option<String> {
        let text = self.tag_pattern.replace_all(html, "");
        clean(Some(text.as_ref()))
    }

    pub fn show_record(&self, show: &TvMazeShow) -> ShowRecord {
        let schedule = show.schedule.clone().unwrap_or_default();

        ShowRecord {
            source_id: show.id,
            name: show.name.trim().to_string(),
            show_type: lowered(show.show_type.as_deref()),
            language: lowered(show.language.as_deref()),
            status: lowered(show.status.as_deref()),
            runtime: show.runtime.or(show.average_runtime),
            premiered: parse_date(show.premiered.as_deref()),
            official_site: clean(show.official_site.as_deref()),
            schedule_time: clean(Some(schedule.time.as_str())),
            schedule_days: (!schedule.days.is_empty()).then_some(schedule.days),
            rating: show.rating.as_ref().and_then(|r| r.average),
            weight: show.weight,
            network: show.network.as_ref().map(|n| n.name.clone()),
            network_country: show
                .network
                .as_ref()
                .and_then(|n| n.country.as_ref())
                .and_then(|c| clean(c.code.as_deref())),
            web_channel: show.web_channel.as_ref().map(|w| w.name.clone()),
            externals_imdb: show
                .externals
                .as_ref()
                .and_then(|e| clean(e.imdb.as_deref())),
            externals_thetvdb: show.externals.as_ref().and_then(|e| e.thetvdb),
            externals_tvrage: show.externals.as_ref().and_then(|e| e.tvrage),
            image_medium: show.image.as_ref().and_then(|i| i.medium.clone()),
            image_original: show.image.as_ref().and_then(|i| i.original.clone()),
            summary: show.summary.as_deref().and_then(|s| self.strip_tags(s)),
            source_updated: parse_timestamp(show.updated),
        }
    }
}

impl From<&TvMazePerson> for PersonRecord {
    fn from(person: &TvMazePerson) -> Self {
        Self {
            source_id: person.id,
            name: person.name.trim().to_string(),
            country: person
                .country
                .as_ref()
                .and_then(|c| clean(c.code.as_deref())),
            birthday: parse_date(person.birthday.as_deref()),
            deathday: parse_date(person.deathday.as_deref()),
            gender: lowered(person.gender.as_deref()),
            image_medium: person.image.as_ref().and_then(|i| i.medium.clone()),
            image_original: person.image.as_ref().and_then(|i| i.original.clone()),
            source_updated: parse_timestamp(person.updated),
        }
    }
}

impl TvMazeCrewCredit {
    /// Crew function used as the role name, e.g. `executive producer`
    pub fn role(&self) -> String {
        lowered(Some(self.crew_type.as_str())).unwrap_or_else(|| "crew".to_string())
    }
}

impl TvMazeCastCredit {
    pub fn character_name(&self) -> Option<String> {
        self.character
            .as_ref()
            .and_then(|c| clean(Some(c.name.as_str())))
    }
}
