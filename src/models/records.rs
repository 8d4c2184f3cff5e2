use chrono::{DateTime, NaiveDate, Utc};

use super::show::PersonId;

/// Show attributes as written to the catalog by the importer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowRecord {
    pub source_id: i64,
    pub name: String,
    pub show_type: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
    pub runtime: Option<i32>,
    pub premiered: Option<NaiveDate>,
    pub official_site: Option<String>,
    pub schedule_time: Option<String>,
    pub schedule_days: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub weight: Option<f64>,
    pub network: Option<String>,
    pub network_country: Option<String>,
    pub web_channel: Option<String>,
    pub externals_imdb: Option<String>,
    pub externals_thetvdb: Option<i64>,
    pub externals_tvrage: Option<i64>,
    pub image_medium: Option<String>,
    pub image_original: Option<String>,
    pub summary: Option<String>,
    pub source_updated: Option<DateTime<Utc>>,
}

/// Person attributes as written to the catalog by the importer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonRecord {
    pub source_id: i64,
    pub name: String,
    pub country: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub deathday: Option<NaiveDate>,
    pub gender: Option<String>,
    pub image_medium: Option<String>,
    pub image_original: Option<String>,
    pub source_updated: Option<DateTime<Utc>>,
}

/// A person's appearance in a show, keyed by the catalog person id
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    pub person_id: PersonId,
    pub role: String,
    pub character_name: Option<String>,
    pub main_cast: bool,
}
