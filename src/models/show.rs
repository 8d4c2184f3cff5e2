use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type ShowId = i64;
pub type GenreId = i64;
pub type PersonId = i64;

/// Number of person roles rendered in a show view
const CAST_PREVIEW_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// One appearance of a person in a show, either cast or crew
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRole {
    pub person_id: PersonId,
    pub name: String,
    /// `cast` for performers, otherwise the crew function (e.g. `creator`)
    pub role: String,
    pub character_name: Option<String>,
    /// Lead / main cast member
    pub main_cast: bool,
    pub image_medium: Option<String>,
}

/// A TV show as stored in the catalog, with its genres and person roles loaded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    #[serde(rename = "type")]
    pub show_type: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
    /// Episode runtime in minutes
    pub runtime: Option<i32>,
    pub premiered: Option<NaiveDate>,
    /// Average rating on a 0-10 scale
    pub rating: Option<f64>,
    /// Popularity weight
    pub weight: Option<f64>,
    pub official_site: Option<String>,
    pub network: Option<String>,
    pub web_channel: Option<String>,
    pub externals_imdb: Option<String>,
    pub image_medium: Option<String>,
    pub image_original: Option<String>,
    pub summary: Option<String>,
    pub genres: Vec<Genre>,
    pub people: Vec<PersonRole>,
}

impl Show {
    pub fn premiere_year(&self) -> Option<i32> {
        self.premiered.map(|date| date.year())
    }

    pub fn genre_ids(&self) -> HashSet<GenreId> {
        self.genres.iter().map(|genre| genre.id).collect()
    }

    pub fn person_ids(&self) -> HashSet<PersonId> {
        self.people.iter().map(|role| role.person_id).collect()
    }
}

/// Cast entry as rendered to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub character: String,
    pub image_medium: Option<String>,
}

/// Client-facing rendering of a show: all attributes, genre names and a cast preview
#[derive(Debug, Clone, Serialize)]
pub struct ShowView {
    pub id: ShowId,
    pub name: String,
    #[serde(rename = "type")]
    pub show_type: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
    pub runtime: Option<i32>,
    pub premiered: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub weight: Option<f64>,
    pub official_site: Option<String>,
    pub network: Option<String>,
    pub web_channel: Option<String>,
    pub externals_imdb: Option<String>,
    pub image_medium: Option<String>,
    pub image_original: Option<String>,
    pub summary: Option<String>,
    pub genres: Vec<String>,
    pub cast: Vec<CastMember>,
}

impl From<&Show> for ShowView {
    fn from(show: &Show) -> Self {
        let mut genres: Vec<String> = Vec::with_capacity(show.genres.len());
        for genre in &show.genres {
            if !genres.contains(&genre.name) {
                genres.push(genre.name.clone());
            }
        }

        let cast = show
            .people
            .iter()
            .take(CAST_PREVIEW_LEN)
            .map(|role| CastMember {
                name: if role.name.is_empty() {
                    "Unknown".to_string()
                } else {
                    role.name.clone()
                },
                character: role.character_name.clone().unwrap_or_default(),
                image_medium: role.image_medium.clone(),
            })
            .collect();

        Self {
            id: show.id,
            name: show.name.clone(),
            show_type: show.show_type.clone(),
            language: show.language.clone(),
            status: show.status.clone(),
            runtime: show.runtime,
            premiered: show.premiered,
            rating: show.rating,
            weight: show.weight,
            official_site: show.official_site.clone(),
            network: show.network.clone(),
            web_channel: show.web_channel.clone(),
            externals_imdb: show.externals_imdb.clone(),
            image_medium: show.image_medium.clone(),
            image_original: show.image_original.clone(),
            summary: show.summary.clone(),
            genres,
            cast,
        }
    }
}
