//! MongoDB implementation of CatalogRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, Product, ProductChanges, ProductQuery, Tag};
use crate::repository::CatalogRepository;

/// MongoDB implementation of the CatalogRepository
pub struct MongoCatalogRepository {
    products: Collection<Product>,
    categories: Collection<Category>,
    tags: Collection<Tag>,
}

impl MongoCatalogRepository {
    /// Create a new MongoCatalogRepository over the standard collections
    pub fn new(db: &Database) -> Self {
        Self {
            products: db.collection::<Product>("products"),
            categories: db.collection::<Category>("categories"),
            tags: db.collection::<Tag>("tags"),
        }
    }

    /// Initialize indexes for common query shapes
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let product_indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_created".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "tags": 1 })
                .options(IndexOptions::builder().name("idx_tags".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];
        self.products.create_indexes(product_indexes).await?;

        let name_index = |index_name: &str| {
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .name(index_name.to_string())
                        .build(),
                )
                .build()
        };
        self.categories
            .create_index(name_index("idx_category_name"))
            .await?;
        self.tags.create_index(name_index("idx_tag_name")).await?;

        tracing::info!("Catalog indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Build a MongoDB filter document from a resolved query
    fn build_filter(query: &ProductQuery) -> Document {
        let mut filter = doc! {};

        if let Some(ref q) = query.name_contains {
            filter.insert("name", doc! { "$regex": q, "$options": "i" });
        }

        if let Some(category) = query.category {
            filter.insert("category", to_bson(&category).unwrap_or(Bson::Null));
        }

        if let Some(ref tags) = query.tags {
            filter.insert("tags", doc! { "$in": to_bson(tags).unwrap_or(Bson::Null) });
        }

        filter
    }

    /// Build a `$set` update document from present fields only
    fn build_update(changes: &ProductChanges) -> Document {
        let mut set = doc! {};

        if let Some(ref name) = changes.name {
            set.insert("name", name);
        }
        if let Some(ref description) = changes.description {
            set.insert("description", description);
        }
        if let Some(price) = changes.price {
            set.insert("price", price);
        }
        if let Some(stock) = changes.stock {
            set.insert("stock", stock);
        }
        if let Some(category) = changes.category {
            set.insert("category", to_bson(&category).unwrap_or(Bson::Null));
        }
        if let Some(ref tags) = changes.tags {
            set.insert("tags", to_bson(tags).unwrap_or(Bson::Null));
        }
        if let Some(ref image) = changes.image {
            set.insert("image", image);
        }
        set.insert("updated_at", chrono::Utc::now().to_rfc3339());

        doc! { "$set": set }
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
        self.products.insert_one(product).await?;
        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let product = self.products.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self, changes))]
    async fn patch_product(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> CatalogResult<Option<Product>> {
        let update = Self::build_update(&changes);
        let product = self
            .products
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?;

        if product.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.products.delete_one(Self::id_filter(id)).await?;
        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn list_products(&self, query: ProductQuery) -> CatalogResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let filter = Self::build_filter(&query);
        let options = mongodb::options::FindOptions::builder()
            .skip(query.skip)
            .limit(query.limit)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.products.find(filter).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count_products(&self, query: ProductQuery) -> CatalogResult<u64> {
        let filter = Self::build_filter(&query);
        let count = self.products.count_documents(filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let filter = doc! { "name": { "$regex": name, "$options": "i" } };
        let category = self.categories.find_one(filter).await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn find_categories(&self, ids: Vec<Uuid>) -> CatalogResult<Vec<Category>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "_id": { "$in": to_bson(&ids).unwrap_or(Bson::Null) } };
        let cursor = self.categories.find(filter).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        use futures_util::TryStreamExt;

        let cursor = self
            .categories
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        Ok(categories)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn insert_category(&self, category: &Category) -> CatalogResult<()> {
        self.categories.insert_one(category).await?;
        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_category(&self, id: Uuid, name: &str) -> CatalogResult<Option<Category>> {
        let category = self
            .categories
            .find_one_and_update(Self::id_filter(id), doc! { "$set": { "name": name } })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.categories.delete_one(Self::id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn find_tags_by_names(&self, names: Vec<String>) -> CatalogResult<Vec<Tag>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "name": { "$in": names } };
        let cursor = self.tags.find(filter).await?;
        let tags: Vec<Tag> = cursor.try_collect().await?;
        Ok(tags)
    }

    #[instrument(skip(self))]
    async fn find_tags(&self, ids: Vec<Uuid>) -> CatalogResult<Vec<Tag>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "_id": { "$in": to_bson(&ids).unwrap_or(Bson::Null) } };
        let cursor = self.tags.find(filter).await?;
        let tags: Vec<Tag> = cursor.try_collect().await?;
        Ok(tags)
    }

    #[instrument(skip(self))]
    async fn list_tags(&self) -> CatalogResult<Vec<Tag>> {
        use futures_util::TryStreamExt;

        let cursor = self.tags.find(doc! {}).sort(doc! { "name": 1 }).await?;
        let tags: Vec<Tag> = cursor.try_collect().await?;
        Ok(tags)
    }

    #[instrument(skip(self, tag), fields(tag_id = %tag.id))]
    async fn insert_tag(&self, tag: &Tag) -> CatalogResult<()> {
        self.tags.insert_one(tag).await?;
        tracing::info!(tag_id = %tag.id, "Tag created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_tag(&self, id: Uuid, name: &str) -> CatalogResult<Option<Tag>> {
        let tag = self
            .tags
            .find_one_and_update(Self::id_filter(id), doc! { "$set": { "name": name } })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(tag)
    }

    #[instrument(skip(self))]
    async fn delete_tag(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.tags.delete_one(Self::id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let query = ProductQuery::default();
        let filter = MongoCatalogRepository::build_filter(&query);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_build_filter_with_name_search() {
        let query = ProductQuery {
            name_contains: Some("kopi".to_string()),
            ..Default::default()
        };
        let filter = MongoCatalogRepository::build_filter(&query);
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "kopi");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_filter_with_category() {
        let query = ProductQuery {
            category: Some(Uuid::now_v7()),
            ..Default::default()
        };
        let filter = MongoCatalogRepository::build_filter(&query);
        assert!(filter.contains_key("category"));
        assert!(!filter.contains_key("name"));
    }

    #[test]
    fn test_build_filter_with_tags() {
        let query = ProductQuery {
            tags: Some(vec![Uuid::now_v7(), Uuid::now_v7()]),
            ..Default::default()
        };
        let filter = MongoCatalogRepository::build_filter(&query);
        let tags = filter.get_document("tags").unwrap();
        assert_eq!(tags.get_array("$in").unwrap().len(), 2);
    }

    #[test]
    fn test_build_update_only_sets_present_fields() {
        let changes = ProductChanges {
            price: Some(2500),
            ..Default::default()
        };
        let update = MongoCatalogRepository::build_update(&changes);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_i64("price").unwrap(), 2500);
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("image"));
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn test_build_update_with_image_replacement() {
        let changes = ProductChanges {
            image: Some("65f0c0ffee0123456789abcd".to_string()),
            ..Default::default()
        };
        let update = MongoCatalogRepository::build_update(&changes);
        let set = update.get_document("$set").unwrap();
        assert_eq!(
            set.get_str("image").unwrap(),
            "65f0c0ffee0123456789abcd"
        );
    }
}
