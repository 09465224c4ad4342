use std::{fmt, sync::Arc};

use cinedex_core::catalog::{CatalogRepository, MovieImportService};
use cinedex_core::providers::MetadataProvider;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub importer: Arc<MovieImportService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        let importer =
            Arc::new(MovieImportService::new(catalog.clone(), provider));
        Self { catalog, importer }
    }
}
