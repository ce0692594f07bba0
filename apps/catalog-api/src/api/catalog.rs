//! Catalog API routes

use axum::Router;
use domain_catalog::{
    handlers, storage::GridFsAttachmentStore, CatalogService, MongoCatalogRepository,
};

use crate::state::AppState;

/// Create the catalog router
pub fn router(state: &AppState) -> Router {
    let repository = MongoCatalogRepository::new(&state.db);
    let attachments = GridFsAttachmentStore::new(&state.db);
    let service = CatalogService::new(repository, attachments);
    handlers::router(service)
}

/// Initialize catalog indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoCatalogRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
