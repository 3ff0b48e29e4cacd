use std::collections::BTreeMap;

use serde::Deserialize;

/// Field name to messages, keyed alphabetically. Empty means the submission is valid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn extend(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

pub const REQUIRED: &str = "This field is required.";
pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 10.0;

#[derive(Debug, Default, Deserialize)]
pub struct RatingForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidRating {
    pub rating: f64,
    pub review: String,
}

impl RatingForm {
    pub fn validate(&self) -> Result<ValidRating, FieldErrors> {
        let mut errors = FieldErrors::default();

        let rating = self.rating.trim();
        let parsed = if rating.is_empty() {
            errors.add("rating", REQUIRED);
            None
        } else {
            match rating.parse::<f64>() {
                Ok(v) if !v.is_finite() => {
                    errors.add("rating", "Not a valid float value.");
                    None
                },
                Ok(v) if !(RATING_MIN..=RATING_MAX).contains(&v) => {
                    errors.add("rating", "Number must be between 1 and 10.");
                    None
                },
                Ok(v) => Some(v),
                Err(_) => {
                    errors.add("rating", "Not a valid float value.");
                    None
                },
            }
        };

        let review = self.review.trim();
        if review.is_empty() {
            errors.add("review", REQUIRED);
        }

        errors.into_result(|| ValidRating {
            rating: parsed.unwrap_or_default(),
            review: review.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TitleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl TitleForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", REQUIRED);
        }
        errors.into_result(|| title.to_string())
    }
}
