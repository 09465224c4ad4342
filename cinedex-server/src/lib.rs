//! # Cinedex Server
//!
//! HTTP API for the Cinedex movie catalog.
//!
//! ## Overview
//!
//! The server exposes:
//!
//! - **Catalog reads**: movie list with category filtering, movie detail
//!   with directors, producers, actors, and categories
//! - **Provider search**: title search against the IMDb metadata API
//! - **Import**: add a movie by IMDb identifier, normalizing related
//!   entities through get-or-create
//!
//! ## Architecture
//!
//! Built on Axum with PostgreSQL for persistent storage (via
//! `cinedex-core`) and reqwest for the metadata provider.

pub mod category_handlers;
pub mod config;
pub mod errors;
pub mod movie_handlers;
pub mod routes;
pub mod state;
