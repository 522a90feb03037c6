//! Cinema backend client module.
//!
//! Handles HTTP requests to the movie service: reference lists
//! (actors, cities, categories, directors) and director/movie creation.

mod api;
mod client;
#[cfg(test)]
pub(crate) mod fake;
mod reference;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CinemaApi, LocalCinemaApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CinemaClient, CinemaClientBuilder, DEFAULT_BASE_URL};
pub use reference::{ReferenceData, ReferenceKind, load_reference_data};
pub use types::{
    AccessToken, ActorId, ActorRef, CategoryId, CategoryRef, CityId, CityRef, CreatedDirector,
    CreatedMovie, DirectorId, DirectorRef, MovieId, NewDirector, NewMovie, ReferenceRecord,
};
