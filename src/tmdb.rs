use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::{CandidateDetail, CandidateSummary, NewMovie},
};

/// Read-only client for the movie metadata service. No retries, no caching.
pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        Self { client, api_key, base_url, image_base_url }
    }

    /// Title search. No matches is an empty list.
    pub async fn search(&self, title: &str) -> AppResult<Vec<CandidateSummary>> {
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        debug!(%title, "searching movie database");

        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.results.into_iter().map(CandidateSummary::from).collect())
    }

    pub async fn fetch(&self, external_id: i64) -> AppResult<CandidateDetail> {
        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), external_id);
        debug!(external_id, "fetching movie detail");

        let resp = self.client.get(url).query(&[("api_key", self.api_key.as_str())]).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("upstream movie {external_id}")));
        }

        let movie: TmdbMovie = resp.error_for_status()?.json().await?;
        Ok(movie.into())
    }

    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url.trim_end_matches('/'), poster_path)
    }

    /// Maps an upstream detail onto the fields of a new, unrated record.
    pub fn to_new_movie(&self, detail: CandidateDetail) -> AppResult<NewMovie> {
        let year = detail.year().ok_or_else(|| {
            AppError::Upstream(format!("\"{}\" has no release date", detail.title))
        })?;
        let poster_path = detail
            .poster_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AppError::Upstream(format!("\"{}\" has no poster", detail.title)))?;

        Ok(NewMovie {
            img_url: self.poster_url(poster_path),
            title: detail.title,
            year,
            description: detail.overview,
            ranking: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: i64,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

impl From<TmdbMovie> for CandidateSummary {
    fn from(m: TmdbMovie) -> Self {
        Self {
            external_id: m.id,
            title: m.title,
            release_date: m.release_date.filter(|d| !d.trim().is_empty()),
            poster_path: m.poster_path,
            overview: m.overview.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(
            reqwest::Client::new(),
            "key".to_string(),
            "http://localhost".to_string(),
            "https://image.tmdb.org/t/p/w500/".to_string(),
        )
    }

    fn inception() -> CandidateDetail {
        CandidateSummary {
            external_id: 27205,
            title: "Inception".to_string(),
            release_date: Some("2010-07-15".to_string()),
            poster_path: Some("/inception.jpg".to_string()),
            overview: "Dreams within dreams.".to_string(),
        }
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception", "release_date": "2010-07-15",
                 "poster_path": "/inception.jpg", "overview": "Dreams.", "vote_average": 8.4},
                {"id": 1, "title": "Inception: The Cobol Job", "release_date": "",
                 "poster_path": null, "overview": null}
            ],
            "total_results": 2
        }"#;

        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        let results: Vec<CandidateSummary> =
            resp.results.into_iter().map(CandidateSummary::from).collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].external_id, 27205);
        assert_eq!(results[0].year(), Some(2010));
        assert_eq!(results[1].release_date, None);
        assert_eq!(results[1].year(), None);
        assert_eq!(results[1].overview, "");
    }

    #[test]
    fn test_to_new_movie_maps_year_and_poster() {
        let new = client().to_new_movie(inception()).unwrap();
        assert_eq!(new.title, "Inception");
        assert_eq!(new.year, 2010);
        assert_eq!(new.description, "Dreams within dreams.");
        assert_eq!(new.img_url, "https://image.tmdb.org/t/p/w500/inception.jpg");
        assert_eq!(new.ranking, None);
    }

    #[test]
    fn test_to_new_movie_requires_release_date_and_poster() {
        let no_date = CandidateSummary { release_date: None, ..inception() };
        assert!(matches!(client().to_new_movie(no_date), Err(AppError::Upstream(_))));

        let no_poster = CandidateSummary { poster_path: None, ..inception() };
        assert!(matches!(client().to_new_movie(no_poster), Err(AppError::Upstream(_))));
    }
}
