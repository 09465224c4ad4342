//! Core library for the Cinedex movie catalog.
//!
//! Holds the domain model (movies, people, categories and their
//! many-to-many relations), the Postgres-backed catalog repository with
//! get-or-create normalization, the metadata-provider port with its
//! IMDb REST adapter, and the import service that ties them together.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod providers;
pub mod validate;

pub use error::{CatalogError, Result};
