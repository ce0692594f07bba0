//! Catalog Domain
//!
//! This module provides a complete domain implementation for an e-commerce
//! product catalog backed by MongoDB, with product images held in GridFS.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (multipart forms, JSON)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, reference resolution, attachment lifecycle
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────┐
//! │ Repository / Store  │  ← Data access (traits + MongoDB/GridFS implementations)
//! └──────┬──────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers,
//!     mongodb::MongoCatalogRepository,
//!     service::CatalogService,
//!     storage::GridFsAttachmentStore,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! // Create a repository, an attachment store, and the service
//! let repository = MongoCatalogRepository::new(&db);
//! let attachments = GridFsAttachmentStore::new(&db);
//! let service = CatalogService::new(repository, attachments);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod resolver;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, DeleteResponse, ImageUpload, ListParams, NewCategory, NewProduct, NewTag, Product,
    ProductDetails, ProductPage, ProductPatch, Tag,
};
pub use mongodb::MongoCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
pub use storage::{AttachmentStore, GridFsAttachmentStore, StoredImage};
