//! Catalog persistence and the movie import flow.

pub mod import;
pub mod ports;
pub mod postgres;

pub use import::MovieImportService;
pub use ports::{CatalogRepository, MovieFilters, MovieRelations};
pub use postgres::PostgresCatalogRepository;
