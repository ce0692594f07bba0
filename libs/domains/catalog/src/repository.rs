use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, Product, ProductChanges, ProductQuery, Tag};

/// Repository trait for catalog persistence
///
/// Covers products together with their category and tag reference
/// collections, since reference resolution and response expansion always
/// span all three.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a new product document
    async fn insert_product(&self, product: &Product) -> CatalogResult<()>;

    /// Fetch a product by ID
    async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Apply a field-level patch and return the updated product
    ///
    /// Returns None when no product with the given ID exists.
    async fn patch_product(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> CatalogResult<Option<Product>>;

    /// Delete a product by ID, returning whether a document was removed
    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool>;

    /// List products matching a resolved query, paginated
    async fn list_products(&self, query: ProductQuery) -> CatalogResult<Vec<Product>>;

    /// Count products matching a resolved query, ignoring pagination
    async fn count_products(&self, query: ProductQuery) -> CatalogResult<u64>;

    /// Find one category whose name case-insensitively contains the candidate
    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>>;

    /// Fetch categories by ID set
    async fn find_categories(&self, ids: Vec<Uuid>) -> CatalogResult<Vec<Category>>;

    /// List all categories
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Insert a new category
    async fn insert_category(&self, category: &Category) -> CatalogResult<()>;

    /// Rename a category, returning the updated record
    async fn update_category(&self, id: Uuid, name: &str) -> CatalogResult<Option<Category>>;

    /// Delete a category by ID, returning whether a document was removed
    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool>;

    /// Find all tags whose name exactly matches any of the given names
    async fn find_tags_by_names(&self, names: Vec<String>) -> CatalogResult<Vec<Tag>>;

    /// Fetch tags by ID set
    async fn find_tags(&self, ids: Vec<Uuid>) -> CatalogResult<Vec<Tag>>;

    /// List all tags
    async fn list_tags(&self) -> CatalogResult<Vec<Tag>>;

    /// Insert a new tag
    async fn insert_tag(&self, tag: &Tag) -> CatalogResult<()>;

    /// Rename a tag, returning the updated record
    async fn update_tag(&self, id: Uuid, name: &str) -> CatalogResult<Option<Tag>>;

    /// Delete a tag by ID, returning whether a document was removed
    async fn delete_tag(&self, id: Uuid) -> CatalogResult<bool>;
}
