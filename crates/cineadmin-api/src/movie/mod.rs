//! Movie creation: form validation and the submission pipeline.

mod form;
mod submit;

pub use form::{DirectorChoice, FieldError, MovieDraft, MovieForm, ValidationErrors};
pub use submit::{SubmitError, Submission, actor_assignment_path, submit_form, submit_movie};
