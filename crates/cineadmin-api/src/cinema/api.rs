//! `CinemaApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    ActorRef, CategoryRef, CityRef, CreatedDirector, CreatedMovie, DirectorRef, NewDirector,
    NewMovie,
};

/// Cinema backend API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CinemaApi: Send)]
pub trait LocalCinemaApi {
    /// Lists all actors.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn list_actors(&self) -> Result<Vec<ActorRef>>;

    /// Lists all cities.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn list_cities(&self) -> Result<Vec<CityRef>>;

    /// Lists all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn list_categories(&self) -> Result<Vec<CategoryRef>>;

    /// Lists all directors.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn list_directors(&self) -> Result<Vec<DirectorRef>>;

    /// Creates a director from a free-text name.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the backend rejects the
    /// director, or the response carries no director.
    async fn create_director(&self, director: &NewDirector) -> Result<CreatedDirector>;

    /// Creates a movie. `Ok(None)` means the backend answered with an empty body.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails, or the
    /// backend rejects the movie.
    async fn create_movie(&self, movie: &NewMovie) -> Result<Option<CreatedMovie>>;
}
