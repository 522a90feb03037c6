//! Reference data loading (actors, cities, categories, directors).

use std::fmt;

use anyhow::Result;
use tracing::instrument;

use super::api::LocalCinemaApi;
use super::types::{ActorRef, CategoryRef, CityRef, DirectorRef};

/// Which reference list a record or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `actors/getall`.
    Actors,
    /// `cities/getall`.
    Cities,
    /// `categories/getall`.
    Categories,
    /// `directors/getall`.
    Directors,
}

impl ReferenceKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 4] = [
        Self::Actors,
        Self::Cities,
        Self::Categories,
        Self::Directors,
    ];

    /// Lowercase plural name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Actors => "actors",
            Self::Cities => "cities",
            Self::Categories => "categories",
            Self::Directors => "directors",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference lists used to populate the movie form's selectors.
///
/// A list whose fetch failed is left empty and its kind is recorded in
/// `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    /// All actors.
    pub actors: Vec<ActorRef>,
    /// All cities.
    pub cities: Vec<CityRef>,
    /// All categories.
    pub categories: Vec<CategoryRef>,
    /// All directors.
    pub directors: Vec<DirectorRef>,
    /// Lists that could not be fetched.
    pub failures: Vec<ReferenceKind>,
}

impl ReferenceData {
    /// Returns `true` if every list was fetched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Keeps the fetched list, or logs the failure and falls back to an empty one.
fn settle<T>(
    kind: ReferenceKind,
    result: Result<Vec<T>>,
    failures: &mut Vec<ReferenceKind>,
) -> Vec<T> {
    match result {
        Ok(records) => {
            tracing::debug!(kind = %kind, count = records.len(), "reference list loaded");
            records
        }
        Err(e) => {
            tracing::warn!(kind = %kind, error = %format!("{e:#}"), "failed to load reference list");
            failures.push(kind);
            Vec::new()
        }
    }
}

/// Fetches all four reference lists concurrently.
///
/// The requests are independent; a failure in one never affects the others.
/// This function itself never fails.
#[instrument(skip_all)]
pub async fn load_reference_data(api: &(impl LocalCinemaApi + Sync)) -> ReferenceData {
    let (actors, cities, categories, directors) = tokio::join!(
        api.list_actors(),
        api.list_cities(),
        api.list_categories(),
        api.list_directors(),
    );

    let mut failures = Vec::new();
    let actors = settle(ReferenceKind::Actors, actors, &mut failures);
    let cities = settle(ReferenceKind::Cities, cities, &mut failures);
    let categories = settle(ReferenceKind::Categories, categories, &mut failures);
    let directors = settle(ReferenceKind::Directors, directors, &mut failures);

    tracing::info!(
        actors = actors.len(),
        cities = cities.len(),
        categories = categories.len(),
        directors = directors.len(),
        failed = failures.len(),
        "reference data loaded"
    );

    ReferenceData {
        actors,
        cities,
        categories,
        directors,
        failures,
    }
}
