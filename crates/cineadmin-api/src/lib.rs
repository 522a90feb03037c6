//! API client library for cineadmin.
//!
//! Talks to the cinema backend, validates movie forms and runs the
//! movie submission pipeline.

/// Cinema backend client and reference data.
pub mod cinema;

/// Movie form validation and submission.
pub mod movie;

/// Static pages shown to end users.
pub mod pages;
