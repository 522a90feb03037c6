//! Movie submission pipeline.
//!
//! `resolve director → create movie → next page`. Each step is fallible and
//! the first failure ends the pipeline.

use thiserror::Error;
use tracing::instrument;

use super::form::{DirectorChoice, MovieDraft, MovieForm, ValidationErrors};
use crate::cinema::{
    AccessToken, CategoryRef, CreatedDirector, CreatedMovie, DirectorId, LocalCinemaApi, MovieId,
    NewDirector,
};

/// Boxed error carried from the backend client.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a movie submission did not produce a movie.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form did not validate; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Creating the director failed; the movie was not sent.
    #[error("failed to create director '{name}'")]
    DirectorCreation {
        /// Name that was submitted.
        name: String,
        /// Backend error.
        #[source]
        source: BoxError,
    },

    /// Creating the movie failed.
    #[error("failed to create movie{}", orphan_note(.orphaned_director.as_ref()))]
    MovieCreation {
        /// Director created earlier in this submission, now without a movie.
        orphaned_director: Option<DirectorId>,
        /// Backend error.
        #[source]
        source: BoxError,
    },

    /// The backend accepted the request but returned no movie.
    #[error("backend returned no movie{}", orphan_note(.orphaned_director.as_ref()))]
    EmptyMovieResponse {
        /// Director created earlier in this submission, now without a movie.
        orphaned_director: Option<DirectorId>,
    },
}

fn orphan_note(director: Option<&DirectorId>) -> String {
    director.map_or_else(String::new, |id| {
        format!(" (director {id} was created and is left without a movie)")
    })
}

impl SubmitError {
    /// Director created during this submission that no movie refers to.
    #[must_use]
    pub const fn orphaned_director(&self) -> Option<&DirectorId> {
        match self {
            Self::MovieCreation {
                orphaned_director, ..
            }
            | Self::EmptyMovieResponse { orphaned_director } => orphaned_director.as_ref(),
            Self::Invalid(_) | Self::DirectorCreation { .. } => None,
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Director created along the way, if the draft named a new one.
    pub created_director: Option<CreatedDirector>,
    /// The created movie.
    pub movie: CreatedMovie,
    /// Follow-up page for assigning actors.
    pub next_page: String,
}

/// Path of the actor-assignment page for a movie.
#[must_use]
pub fn actor_assignment_path(movie_id: &MovieId) -> String {
    format!("/addMovie/{movie_id}")
}

/// Returns the director id to use, creating the director first if needed.
async fn resolve_director(
    api: &(impl LocalCinemaApi + Sync),
    choice: &DirectorChoice,
    token: &AccessToken,
) -> Result<(DirectorId, Option<CreatedDirector>), SubmitError> {
    match choice {
        DirectorChoice::Resolved(id) => {
            tracing::info!(director_id = %id, "using existing director");
            Ok((id.clone(), None))
        }
        DirectorChoice::Unresolved(name) => {
            tracing::info!(director_name = %name, "adding new director");
            let request = NewDirector {
                director_name: name.clone(),
                token: token.clone(),
            };
            match api.create_director(&request).await {
                Ok(created) => {
                    tracing::info!(director_id = %created.director_id, "director added");
                    Ok((created.director_id.clone(), Some(created)))
                }
                Err(e) => {
                    tracing::error!(error = %format!("{e:#}"), "error adding director");
                    Err(SubmitError::DirectorCreation {
                        name: name.clone(),
                        source: e.into(),
                    })
                }
            }
        }
    }
}

/// Submits a validated draft.
///
/// Creates the director first when the draft only names one, then creates
/// the movie with the resolved director id. A director created here is not
/// removed if the movie fails; its id is reported in the error instead.
///
/// # Errors
///
/// Returns `SubmitError::DirectorCreation`, `SubmitError::MovieCreation`, or
/// `SubmitError::EmptyMovieResponse`.
#[instrument(skip_all, fields(movie_name = %draft.movie_name))]
pub async fn submit_movie(
    api: &(impl LocalCinemaApi + Sync),
    draft: MovieDraft,
    token: &AccessToken,
) -> Result<Submission, SubmitError> {
    let (director_id, created_director) = resolve_director(api, &draft.director, token).await?;
    let orphaned_director = created_director.as_ref().map(|d| d.director_id.clone());

    let movie = draft.into_new_movie(director_id, token.clone());
    let created = match api.create_movie(&movie).await {
        Ok(created) => created,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "error adding movie");
            return Err(SubmitError::MovieCreation {
                orphaned_director,
                source: e.into(),
            });
        }
    };

    let Some(movie) = created else {
        tracing::error!("movie service returned an empty response");
        return Err(SubmitError::EmptyMovieResponse { orphaned_director });
    };

    let next_page = actor_assignment_path(&movie.movie_id);
    tracing::info!(movie_id = %movie.movie_id, next_page = %next_page, "movie added");

    Ok(Submission {
        created_director,
        movie,
        next_page,
    })
}

/// Validates the form, then submits it.
///
/// Nothing is sent when validation fails.
///
/// # Errors
///
/// Returns `SubmitError::Invalid` on validation failure, otherwise the errors
/// of [`submit_movie`].
pub async fn submit_form(
    api: &(impl LocalCinemaApi + Sync),
    form: &MovieForm,
    categories: &[CategoryRef],
    token: &AccessToken,
) -> Result<Submission, SubmitError> {
    let draft = form.validate(categories).inspect_err(|e| {
        tracing::warn!(errors = e.errors().len(), "movie form rejected");
    })?;
    submit_movie(api, draft, token).await
}
