//! Catalog service - business logic layer
//!
//! Orchestrates reference resolution, attachment storage, and record
//! persistence. The attachment lifecycle is strictly sequential within a
//! request: a new binary is stored before the record is written, and a
//! superseded binary is deleted only after the record change is confirmed.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, ImageUpload, ListParams, NewCategory, NewProduct, NewTag, Product, ProductChanges,
    ProductDetails, ProductPage, ProductPatch, ProductQuery, Tag,
};
use crate::repository::CatalogRepository;
use crate::resolver::resolve_refs;
use crate::storage::{AttachmentStore, StoredImage};

/// Catalog service over a repository and an attachment store
pub struct CatalogService<R: CatalogRepository, S: AttachmentStore> {
    repository: Arc<R>,
    attachments: Arc<S>,
}

impl<R: CatalogRepository, S: AttachmentStore> CatalogService<R, S> {
    /// Create a new CatalogService
    pub fn new(repository: R, attachments: S) -> Self {
        Self {
            repository: Arc::new(repository),
            attachments: Arc::new(attachments),
        }
    }

    /// Create a new product, optionally storing an uploaded image first
    #[instrument(skip(self, input, upload), fields(product_name = %input.name))]
    pub async fn create_product(
        &self,
        input: NewProduct,
        upload: Option<ImageUpload>,
    ) -> CatalogResult<Product> {
        input.validate()?;

        // Resolution never fails the request; misses drop the field
        let refs = resolve_refs(
            self.repository.as_ref(),
            input.category.as_deref(),
            Some(&input.tags),
        )
        .await?;

        let image = match upload {
            Some(file) => Some(
                self.attachments
                    .store(&file.filename, &file.content_type, file.bytes)
                    .await?,
            ),
            None => None,
        };

        let product = Product::new(input, refs.category, refs.tags.unwrap_or_default(), image);

        if let Err(err) = self.repository.insert_product(&product).await {
            // The stored binary must not outlive a failed insert
            if let Some(ref id) = product.image {
                self.discard_attachment(id).await;
            }
            return Err(err);
        }

        Ok(product)
    }

    /// Partially update a product, optionally replacing its image
    ///
    /// The old attachment is deleted only after the new one is durably
    /// stored and the patch has been confirmed.
    #[instrument(skip(self, patch, upload))]
    pub async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
        upload: Option<ImageUpload>,
    ) -> CatalogResult<Product> {
        patch.validate()?;

        let refs = resolve_refs(
            self.repository.as_ref(),
            patch.category.as_deref(),
            patch.tags.as_deref(),
        )
        .await?;

        let mut changes = ProductChanges {
            name: patch.name,
            description: patch.description,
            price: patch.price,
            stock: patch.stock,
            category: refs.category,
            tags: refs.tags,
            image: None,
        };

        let Some(file) = upload else {
            return self
                .repository
                .patch_product(id, changes)
                .await?
                .ok_or(CatalogError::ProductNotFound(id));
        };

        let new_image = self
            .attachments
            .store(&file.filename, &file.content_type, file.bytes)
            .await?;

        // Capture the superseded attachment id before the patch commits
        let previous = match self.repository.find_product(id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.discard_attachment(&new_image).await;
                return Err(CatalogError::ProductNotFound(id));
            }
            Err(err) => {
                self.discard_attachment(&new_image).await;
                return Err(err);
            }
        };

        changes.image = Some(new_image.clone());
        let updated = match self.repository.patch_product(id, changes).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.discard_attachment(&new_image).await;
                return Err(CatalogError::ProductNotFound(id));
            }
            Err(err) => {
                self.discard_attachment(&new_image).await;
                return Err(err);
            }
        };

        if let Some(ref old_image) = previous.image {
            self.discard_attachment(old_image).await;
        }

        Ok(updated)
    }

    /// Delete a product and best-effort delete its attachment
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        let product = self
            .repository
            .find_product(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(ref image) = product.image {
            self.discard_attachment(image).await;
        }

        if !self.repository.delete_product(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }
        Ok(())
    }

    /// Fetch one product with expanded category and tag records
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductDetails> {
        let product = self
            .repository
            .find_product(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut expanded = self.expand(vec![product]).await?;
        expanded
            .pop()
            .ok_or_else(|| CatalogError::Internal("expansion produced no record".to_string()))
    }

    /// List products with filtering, pagination, and expansion
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: ListParams) -> CatalogResult<ProductPage> {
        let mut query = ProductQuery {
            skip: params.skip,
            limit: params.limit,
            ..Default::default()
        };

        if let Some(q) = params.q.filter(|q| !q.is_empty()) {
            query.name_contains = Some(q);
        }

        // Filter-side resolution mirrors the write path: misses are ignored
        let refs = resolve_refs(
            self.repository.as_ref(),
            params.category.as_deref(),
            Some(&params.tags),
        )
        .await?;
        query.category = refs.category;
        query.tags = refs.tags;

        let count = self.repository.count_products(query.clone()).await?;
        let products = self.repository.list_products(query).await?;
        let data = self.expand(products).await?;

        Ok(ProductPage { data, count })
    }

    /// Read an image attachment by identifier
    #[instrument(skip(self))]
    pub async fn read_image(&self, id: &str) -> CatalogResult<StoredImage> {
        self.attachments.read(id).await
    }

    /// Create a new category
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: NewCategory) -> CatalogResult<Category> {
        input.validate()?;
        let category = Category {
            id: Uuid::now_v7(),
            name: input.name,
        };
        self.repository.insert_category(&category).await?;
        Ok(category)
    }

    /// List all categories
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    /// Rename a category
    #[instrument(skip(self, input))]
    pub async fn update_category(&self, id: Uuid, input: NewCategory) -> CatalogResult<Category> {
        input.validate()?;
        self.repository
            .update_category(id, &input.name)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// Delete a category; products referencing it are not cascaded
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_category(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }

    /// Create a new tag
    #[instrument(skip(self, input), fields(tag_name = %input.name))]
    pub async fn create_tag(&self, input: NewTag) -> CatalogResult<Tag> {
        input.validate()?;
        let tag = Tag {
            id: Uuid::now_v7(),
            name: input.name,
        };
        self.repository.insert_tag(&tag).await?;
        Ok(tag)
    }

    /// List all tags
    #[instrument(skip(self))]
    pub async fn list_tags(&self) -> CatalogResult<Vec<Tag>> {
        self.repository.list_tags().await
    }

    /// Rename a tag
    #[instrument(skip(self, input))]
    pub async fn update_tag(&self, id: Uuid, input: NewTag) -> CatalogResult<Tag> {
        input.validate()?;
        self.repository
            .update_tag(id, &input.name)
            .await?
            .ok_or(CatalogError::TagNotFound(id))
    }

    /// Delete a tag; products referencing it are not cascaded
    #[instrument(skip(self))]
    pub async fn delete_tag(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_tag(id).await? {
            return Err(CatalogError::TagNotFound(id));
        }
        Ok(())
    }

    /// Best-effort attachment deletion: failures are logged and swallowed
    async fn discard_attachment(&self, id: &str) {
        if let Err(err) = self.attachments.delete(id).await {
            tracing::warn!(attachment_id = %id, error = %err, "Failed to delete attachment");
        }
    }

    /// Expand category/tag references across a batch of products
    async fn expand(&self, products: Vec<Product>) -> CatalogResult<Vec<ProductDetails>> {
        let mut category_ids: Vec<Uuid> = products.iter().filter_map(|p| p.category).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let mut tag_ids: Vec<Uuid> = products.iter().flat_map(|p| p.tags.clone()).collect();
        tag_ids.sort_unstable();
        tag_ids.dedup();

        let categories: HashMap<Uuid, Category> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            self.repository
                .find_categories(category_ids)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        let tags: HashMap<Uuid, Tag> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            self.repository
                .find_tags(tag_ids)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect()
        };

        Ok(products
            .into_iter()
            .map(|product| ProductDetails {
                id: product.id,
                name: product.name,
                description: product.description,
                price: product.price,
                stock: product.stock,
                category: product.category.and_then(|id| categories.get(&id).cloned()),
                tags: product
                    .tags
                    .iter()
                    .filter_map(|id| tags.get(id).cloned())
                    .collect(),
                image: product.image,
                created_at: product.created_at,
                updated_at: product.updated_at,
            })
            .collect())
    }
}

impl<R: CatalogRepository, S: AttachmentStore> Clone for CatalogService<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            attachments: Arc::clone(&self.attachments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogRepository;
    use crate::storage::MockAttachmentStore;
    use chrono::Utc;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn sample_product(image: Option<String>) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::now_v7(),
            name: "Kopi Arabica".to_string(),
            description: "Single origin".to_string(),
            price: 4500,
            stock: 10,
            category: None,
            tags: Vec::new(),
            image,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_upload() -> ImageUpload {
        ImageUpload {
            filename: "kopi.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn no_ref_lookups(repo: &mut MockCatalogRepository) {
        repo.expect_find_category_by_name().never();
        repo.expect_find_tags_by_names().never();
    }

    #[tokio::test]
    async fn test_create_without_file_has_null_image() {
        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        repo.expect_insert_product()
            .withf(|p| p.image.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let mut store = MockAttachmentStore::new();
        store.expect_store().never();

        let service = CatalogService::new(repo, store);
        let input = NewProduct {
            name: "Kopi Arabica".to_string(),
            price: 4500,
            ..Default::default()
        };

        let product = service.create_product(input, None).await.unwrap();
        assert!(product.image.is_none());
    }

    #[tokio::test]
    async fn test_create_with_unresolvable_category_succeeds_without_field() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_category_by_name()
            .with(eq("nonexistent"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert_product()
            .withf(|p| p.category.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let input = NewProduct {
            name: "Kopi Arabica".to_string(),
            price: 4500,
            category: Some("nonexistent".to_string()),
            ..Default::default()
        };

        let product = service.create_product(input, None).await.unwrap();
        assert!(product.category.is_none());
    }

    #[tokio::test]
    async fn test_create_with_file_stores_before_insert() {
        let mut seq = Sequence::new();

        let mut store = MockAttachmentStore::new();
        store
            .expect_store()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok("65f0c0ffee0123456789abcd".to_string()));

        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        repo.expect_insert_product()
            .withf(|p| p.image.as_deref() == Some("65f0c0ffee0123456789abcd"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = CatalogService::new(repo, store);
        let input = NewProduct {
            name: "Kopi Arabica".to_string(),
            price: 4500,
            ..Default::default()
        };

        let product = service
            .create_product(input, Some(sample_upload()))
            .await
            .unwrap();
        assert_eq!(product.image.as_deref(), Some("65f0c0ffee0123456789abcd"));
    }

    #[tokio::test]
    async fn test_create_insert_failure_deletes_stored_attachment() {
        let mut store = MockAttachmentStore::new();
        store
            .expect_store()
            .times(1)
            .returning(|_, _, _| Ok("65f0c0ffee0123456789abcd".to_string()));
        store
            .expect_delete()
            .with(eq("65f0c0ffee0123456789abcd"))
            .times(1)
            .returning(|_| Ok(()));

        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        repo.expect_insert_product()
            .times(1)
            .returning(|_| Err(CatalogError::Database("write failed".to_string())));

        let service = CatalogService::new(repo, store);
        let input = NewProduct {
            name: "Kopi Arabica".to_string(),
            price: 4500,
            ..Default::default()
        };

        let err = service
            .create_product(input, Some(sample_upload()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_with_field_details() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_insert_product().never();

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let input = NewProduct {
            name: String::new(),
            price: 4500,
            ..Default::default()
        };

        let err = service.create_product(input, None).await.unwrap_err();
        match err {
            CatalogError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_without_file_leaves_image_untouched() {
        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        let existing = sample_product(Some("65f0c0ffee0123456789abcd".to_string()));
        let id = existing.id;
        repo.expect_patch_product()
            .withf(|_, changes| changes.image.is_none() && changes.price == Some(5000))
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));

        let mut store = MockAttachmentStore::new();
        store.expect_store().never();
        store.expect_delete().never();

        let service = CatalogService::new(repo, store);
        let patch = ProductPatch {
            price: Some(5000),
            ..Default::default()
        };

        service.update_product(id, patch, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_replaces_image_and_deletes_old_after_patch() {
        let existing = sample_product(Some("000000000000000000000001".to_string()));
        let id = existing.id;
        let mut updated = existing.clone();
        updated.image = Some("000000000000000000000002".to_string());

        let mut seq = Sequence::new();
        let mut store = MockAttachmentStore::new();
        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);

        store
            .expect_store()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok("000000000000000000000002".to_string()));
        repo.expect_find_product()
            .with(eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_patch_product()
            .withf(|_, changes| {
                changes.image.as_deref() == Some("000000000000000000000002")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _| Ok(Some(updated.clone())));
        // Old attachment goes only after the patch is confirmed
        store
            .expect_delete()
            .with(eq("000000000000000000000001"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = CatalogService::new(repo, store);
        let result = service
            .update_product(id, ProductPatch::default(), Some(sample_upload()))
            .await
            .unwrap();
        assert_eq!(result.image.as_deref(), Some("000000000000000000000002"));
    }

    #[tokio::test]
    async fn test_update_patch_failure_deletes_new_image_keeps_old() {
        let existing = sample_product(Some("000000000000000000000001".to_string()));
        let id = existing.id;

        let mut store = MockAttachmentStore::new();
        store
            .expect_store()
            .times(1)
            .returning(|_, _, _| Ok("000000000000000000000002".to_string()));
        // Only the new attachment is discarded
        store
            .expect_delete()
            .with(eq("000000000000000000000002"))
            .times(1)
            .returning(|_| Ok(()));

        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        repo.expect_find_product()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_patch_product()
            .times(1)
            .returning(|_, _| Err(CatalogError::Database("write failed".to_string())));

        let service = CatalogService::new(repo, store);
        let err = service
            .update_product(id, ProductPatch::default(), Some(sample_upload()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
    }

    #[tokio::test]
    async fn test_update_cleanup_failure_is_swallowed() {
        let existing = sample_product(Some("000000000000000000000001".to_string()));
        let id = existing.id;
        let mut updated = existing.clone();
        updated.image = Some("000000000000000000000002".to_string());

        let mut store = MockAttachmentStore::new();
        store
            .expect_store()
            .times(1)
            .returning(|_, _, _| Ok("000000000000000000000002".to_string()));
        store
            .expect_delete()
            .times(1)
            .returning(|_| Err(CatalogError::Storage("chunks missing".to_string())));

        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        repo.expect_find_product()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_patch_product()
            .times(1)
            .returning(move |_, _| Ok(Some(updated.clone())));

        let service = CatalogService::new(repo, store);
        // Old-attachment deletion failure never surfaces to the caller
        let result = service
            .update_product(id, ProductPatch::default(), Some(sample_upload()))
            .await
            .unwrap();
        assert_eq!(result.image.as_deref(), Some("000000000000000000000002"));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found_repeatedly() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product().times(2).returning(|_| Ok(None));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let id = Uuid::now_v7();

        for _ in 0..2 {
            let err = service.delete_product(id).await.unwrap_err();
            assert!(matches!(err, CatalogError::ProductNotFound(_)));
        }
    }

    #[tokio::test]
    async fn test_delete_product_removes_attachment_best_effort() {
        let existing = sample_product(Some("65f0c0ffee0123456789abcd".to_string()));
        let id = existing.id;

        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_delete_product()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let mut store = MockAttachmentStore::new();
        store
            .expect_delete()
            .with(eq("65f0c0ffee0123456789abcd"))
            .times(1)
            .returning(|_| Err(CatalogError::Storage("unreachable".to_string())));

        let service = CatalogService::new(repo, store);
        // Attachment deletion failure does not block the record deletion
        service.delete_product(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_counts_before_pagination() {
        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        repo.expect_count_products()
            .withf(|query| query.skip == 0 && query.limit == 10)
            .times(1)
            .returning(|_| Ok(15));
        repo.expect_list_products()
            .withf(|query| query.skip == 0 && query.limit == 10)
            .times(1)
            .returning(|_| Ok((0..10).map(|_| sample_product(None)).collect()));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let page = service.list_products(ListParams::default()).await.unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.count, 15);
    }

    #[tokio::test]
    async fn test_list_skip_past_first_page_returns_remainder() {
        let mut repo = MockCatalogRepository::new();
        no_ref_lookups(&mut repo);
        repo.expect_count_products()
            .withf(|query| query.skip == 10)
            .times(1)
            .returning(|_| Ok(15));
        repo.expect_list_products()
            .withf(|query| query.skip == 10 && query.limit == 10)
            .times(1)
            .returning(|_| Ok((0..5).map(|_| sample_product(None)).collect()));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let params = ListParams {
            skip: 10,
            ..Default::default()
        };
        let page = service.list_products(params).await.unwrap();
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.count, 15);
    }

    #[tokio::test]
    async fn test_list_resolves_filter_names_and_ignores_misses() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_category_by_name()
            .with(eq("minuman"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_tags_by_names()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        // Unresolved filters must not constrain the query
        repo.expect_count_products()
            .withf(|query| query.category.is_none() && query.tags.is_none())
            .times(1)
            .returning(|_| Ok(0));
        repo.expect_list_products()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let params = ListParams {
            category: Some("minuman".to_string()),
            tags: vec!["unknown".to_string()],
            ..Default::default()
        };
        let page = service.list_products(params).await.unwrap();
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_get_product_expands_references() {
        let category = Category {
            id: Uuid::now_v7(),
            name: "Minuman".to_string(),
        };
        let tag = Tag {
            id: Uuid::now_v7(),
            name: "panas".to_string(),
        };
        let mut product = sample_product(None);
        product.category = Some(category.id);
        product.tags = vec![tag.id];
        let id = product.id;

        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product()
            .times(1)
            .returning(move |_| Ok(Some(product.clone())));
        let category_clone = category.clone();
        repo.expect_find_categories()
            .times(1)
            .returning(move |_| Ok(vec![category_clone.clone()]));
        let tag_clone = tag.clone();
        repo.expect_find_tags()
            .times(1)
            .returning(move |_| Ok(vec![tag_clone.clone()]));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let details = service.get_product(id).await.unwrap();
        assert_eq!(details.category.unwrap().name, "Minuman");
        assert_eq!(details.tags.len(), 1);
        assert_eq!(details.tags[0].name, "panas");
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product().times(1).returning(|_| Ok(None));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let err = service.get_product(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_category_validates_name_length() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_insert_category().never();

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let err = service
            .create_category(NewCategory {
                name: "ab".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_missing_tag_is_not_found() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_update_tag().times(1).returning(|_, _| Ok(None));

        let service = CatalogService::new(repo, MockAttachmentStore::new());
        let err = service
            .update_tag(
                Uuid::now_v7(),
                NewTag {
                    name: "panas".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::TagNotFound(_)));
    }
}
