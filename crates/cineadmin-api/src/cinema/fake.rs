//! In-memory `LocalCinemaApi` used by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::{Result, bail};

use super::api::LocalCinemaApi;
use super::reference::ReferenceKind;
use super::types::{
    ActorRef, CategoryRef, CityRef, CreatedDirector, CreatedMovie, DirectorId, DirectorRef,
    MovieId, NewDirector, NewMovie,
};

/// A mutating request seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `create_director` was called.
    CreateDirector(NewDirector),
    /// `create_movie` was called.
    CreateMovie(NewMovie),
}

/// Fake backend with canned reference data and scripted creation results.
#[derive(Debug)]
pub struct FakeCinemaApi {
    categories: Vec<CategoryRef>,
    directors: Vec<DirectorRef>,
    actors: Vec<ActorRef>,
    cities: Vec<CityRef>,
    failing_lists: HashSet<ReferenceKind>,
    director_result: Option<DirectorId>,
    movie_result: MovieResult,
    calls: Mutex<Vec<Call>>,
}

/// Scripted outcome of `create_movie`.
#[derive(Debug, Clone)]
pub enum MovieResult {
    Created(MovieId),
    Empty,
    Fail,
}

impl FakeCinemaApi {
    /// Fake loaded with the JSON fixtures; director creation returns `dir9`,
    /// movie creation returns `mov42`.
    pub fn seeded() -> Self {
        Self {
            categories: fixture(include_str!("../../../../fixtures/cinema/categories.json")),
            directors: fixture(include_str!("../../../../fixtures/cinema/directors.json")),
            actors: fixture(include_str!("../../../../fixtures/cinema/actors.json")),
            cities: fixture(include_str!("../../../../fixtures/cinema/cities.json")),
            failing_lists: HashSet::new(),
            director_result: Some(DirectorId::new("dir9")),
            movie_result: MovieResult::Created(MovieId::new("mov42")),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_list(mut self, kind: ReferenceKind) -> Self {
        self.failing_lists.insert(kind);
        self
    }

    pub fn failing_director(mut self) -> Self {
        self.director_result = None;
        self
    }

    pub fn movie_result(mut self, result: MovieResult) -> Self {
        self.movie_result = result;
        self
    }

    /// Mutating calls in the order they were made.
    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(clippy::unwrap_used)]
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn list<T: Clone>(&self, kind: ReferenceKind, records: &[T]) -> Result<Vec<T>> {
        if self.failing_lists.contains(&kind) {
            bail!("connection refused: {kind}/getall");
        }
        Ok(records.to_vec())
    }
}

#[allow(clippy::unwrap_used)]
fn fixture<T: serde::de::DeserializeOwned>(json: &str) -> Vec<T> {
    serde_json::from_str(json).unwrap()
}

impl LocalCinemaApi for FakeCinemaApi {
    async fn list_actors(&self) -> Result<Vec<ActorRef>> {
        self.list(ReferenceKind::Actors, &self.actors)
    }

    async fn list_cities(&self) -> Result<Vec<CityRef>> {
        self.list(ReferenceKind::Cities, &self.cities)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRef>> {
        self.list(ReferenceKind::Categories, &self.categories)
    }

    async fn list_directors(&self) -> Result<Vec<DirectorRef>> {
        self.list(ReferenceKind::Directors, &self.directors)
    }

    async fn create_director(&self, director: &NewDirector) -> Result<CreatedDirector> {
        self.record(Call::CreateDirector(director.clone()));
        match &self.director_result {
            Some(id) => Ok(CreatedDirector {
                director_id: id.clone(),
                director_name: Some(director.director_name.clone()),
            }),
            None => bail!("cinema API error (HTTP 500) on directors/add"),
        }
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<Option<CreatedMovie>> {
        self.record(Call::CreateMovie(movie.clone()));
        match &self.movie_result {
            MovieResult::Created(id) => Ok(Some(CreatedMovie {
                movie_id: id.clone(),
                movie_name: Some(movie.movie_name.clone()),
            })),
            MovieResult::Empty => Ok(None),
            MovieResult::Fail => bail!("cinema API error (HTTP 500) on movies/add"),
        }
    }
}
