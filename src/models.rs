use serde::Serialize;

use crate::entities::movie;

/// A movie on the local list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieRecord {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: Option<f64>,
    pub ranking: Option<i32>,
    pub review: Option<String>,
    pub img_url: String,
}

impl From<movie::Model> for MovieRecord {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            description: m.description,
            rating: m.rating,
            ranking: m.ranking,
            review: m.review,
            img_url: m.img_url,
        }
    }
}

/// Fields for a freshly staged record. Rating and review start unset.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub ranking: Option<i32>,
    pub img_url: String,
}

/// One search hit from the metadata service.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub external_id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: String,
}

impl CandidateSummary {
    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(year_from_release_date)
    }
}

/// Full detail for a single upstream movie.
pub type CandidateDetail = CandidateSummary;

/// Leading year of a `YYYY-MM-DD` release date.
pub fn year_from_release_date(date: &str) -> Option<i32> {
    let year = date.trim().split('-').next()?;
    if year.len() != 4 {
        return None;
    }
    year.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_from_release_date() {
        assert_eq!(year_from_release_date("2010-07-15"), Some(2010));
        assert_eq!(year_from_release_date("1999"), Some(1999));
        assert_eq!(year_from_release_date(""), None);
        assert_eq!(year_from_release_date("soon"), None);
        assert_eq!(year_from_release_date("10-07-15"), None);
    }
}
