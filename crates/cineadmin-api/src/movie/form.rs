//! Movie form input and validation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::cinema::{AccessToken, CategoryId, CategoryRef, DirectorId, NewMovie, ReferenceRecord};

/// Date format accepted for `releaseDate`.
const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// URL schemes accepted for `trailerUrl`.
const TRAILER_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Raw movie form input, exactly as the operator typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieForm {
    /// Movie title.
    pub movie_name: String,
    /// Summary text.
    pub description: String,
    /// Running time in minutes, unparsed.
    pub duration: String,
    /// Release date, unparsed.
    pub release_date: String,
    /// Trailer link; empty means none.
    pub trailer_url: String,
    /// Selected category.
    pub category_id: String,
    /// Selected director; `None` and `""` both mean "not selected".
    pub director_id: Option<String>,
    /// Free-text director name used when no director is selected.
    pub director_name: String,
    /// Whether the movie is currently showing.
    pub is_in_vision: bool,
}

impl Default for MovieForm {
    fn default() -> Self {
        Self {
            movie_name: String::new(),
            description: String::new(),
            duration: String::new(),
            release_date: String::new(),
            trailer_url: String::new(),
            category_id: String::new(),
            director_id: None,
            director_name: String::new(),
            is_in_vision: true,
        }
    }
}

/// How the movie's director is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorChoice {
    /// An existing director picked from the list.
    Resolved(DirectorId),
    /// A director known only by name; must be created before the movie.
    Unresolved(String),
}

/// A validated movie, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    /// Movie title.
    pub movie_name: String,
    /// Summary text.
    pub description: String,
    /// Running time in minutes (> 0).
    pub duration: u32,
    /// Release date.
    pub release_date: NaiveDate,
    /// Trailer link.
    pub trailer_url: Option<Url>,
    /// Selected category (known to exist).
    pub category_id: CategoryId,
    /// Director, resolved or not.
    pub director: DirectorChoice,
    /// Whether the movie is currently showing.
    pub is_in_vision: bool,
}

impl MovieDraft {
    /// Builds the `movies/add` body once the director is resolved.
    #[must_use]
    pub fn into_new_movie(self, director_id: DirectorId, token: AccessToken) -> NewMovie {
        let director_name = match self.director {
            DirectorChoice::Resolved(_) => None,
            DirectorChoice::Unresolved(name) => Some(name),
        };
        NewMovie {
            movie_name: self.movie_name,
            description: self.description,
            duration: self.duration,
            release_date: self.release_date,
            trailer_url: self.trailer_url,
            category_id: self.category_id,
            director_id,
            director_name,
            is_in_vision: self.is_in_vision,
            user_access_token: token,
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the offending field (e.g. `"duration"`).
    pub field: &'static str,
    /// Operator-facing message.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid movie form: {}", join_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// All field errors, in form order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns `true` if `field` failed validation.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Returns the trimmed value, or `None` for empty/whitespace-only input.
fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parses minutes the way a numeric form field does: `"155"`, `"155.0"` and
/// `"1e2"` are all whole numbers.
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn parse_duration(raw: &str) -> Result<u32, String> {
    let value = non_blank(raw).ok_or("Duration is required")?;
    let minutes = value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or("Duration must be a number")?;
    if minutes <= 0.0 {
        return Err(String::from("Duration must be greater than 0"));
    }
    if minutes.fract() != 0.0 {
        return Err(String::from("Duration must be a whole number of minutes"));
    }
    if minutes > f64::from(u32::MAX) {
        return Err(String::from("Duration is too large"));
    }
    // whole, positive and within range after the checks above
    Ok(minutes as u32)
}

fn parse_release_date(raw: &str) -> Result<NaiveDate, String> {
    let value = non_blank(raw).ok_or("Release date is required")?;
    NaiveDate::parse_from_str(value, RELEASE_DATE_FORMAT)
        .map_err(|_| String::from("Release date must be a valid date (YYYY-MM-DD)"))
}

fn parse_trailer_url(raw: &str) -> Result<Option<Url>, String> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };
    match Url::parse(value) {
        Ok(url) if TRAILER_SCHEMES.contains(&url.scheme()) && url.has_host() => Ok(Some(url)),
        _ => Err(String::from("Please enter a valid URL")),
    }
}

fn parse_category(raw: &str, categories: &[CategoryRef]) -> Result<CategoryId, String> {
    let value = non_blank(raw).ok_or("Please select a category")?;
    categories
        .iter()
        .find(|c| c.id() == value)
        .map(|c| c.category_id.clone())
        .ok_or_else(|| format!("Unknown category '{value}'"))
}

impl MovieForm {
    /// Interprets the director fields; `None` and `""` ids both mean "not selected".
    fn director_choice(&self) -> Result<DirectorChoice, String> {
        if let Some(id) = self.director_id.as_deref().filter(|id| !id.is_empty()) {
            return Ok(DirectorChoice::Resolved(DirectorId::new(id)));
        }
        non_blank(&self.director_name)
            .map(|name| DirectorChoice::Unresolved(String::from(name)))
            .ok_or_else(|| String::from("Select a director or enter a director name"))
    }

    /// Validates the form against the loaded categories.
    ///
    /// All fields are checked; every failure is reported.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` listing each invalid field.
    pub fn validate(&self, categories: &[CategoryRef]) -> Result<MovieDraft, ValidationErrors> {
        let mut errors = Vec::new();

        let movie_name = non_blank(&self.movie_name).map(String::from);
        if movie_name.is_none() {
            errors.push(FieldError::new("movieName", "Movie name is required"));
        }
        let description = non_blank(&self.description).map(String::from);
        if description.is_none() {
            errors.push(FieldError::new("description", "Description is required"));
        }
        let duration = parse_duration(&self.duration)
            .map_err(|m| errors.push(FieldError::new("duration", m)))
            .ok();
        let release_date = parse_release_date(&self.release_date)
            .map_err(|m| errors.push(FieldError::new("releaseDate", m)))
            .ok();
        let trailer_url = parse_trailer_url(&self.trailer_url)
            .map_err(|m| errors.push(FieldError::new("trailerUrl", m)))
            .ok();
        let category_id = parse_category(&self.category_id, categories)
            .map_err(|m| errors.push(FieldError::new("categoryId", m)))
            .ok();
        let director = self
            .director_choice()
            .map_err(|m| errors.push(FieldError::new("directorName", m)))
            .ok();

        match (
            movie_name,
            description,
            duration,
            release_date,
            trailer_url,
            category_id,
            director,
        ) {
            (
                Some(movie_name),
                Some(description),
                Some(duration),
                Some(release_date),
                Some(trailer_url),
                Some(category_id),
                Some(director),
            ) if errors.is_empty() => Ok(MovieDraft {
                movie_name,
                description,
                duration,
                release_date,
                trailer_url,
                category_id,
                director,
                is_in_vision: self.is_in_vision,
            }),
            _ => Err(ValidationErrors { errors }),
        }
    }
}
