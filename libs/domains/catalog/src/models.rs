use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Category entity - a named grouping referenced by products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Category name
    pub name: String,
}

/// Tag entity - a named label referenced by products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Tag name
    pub name: String,
}

/// Product entity - represents a catalog item stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    #[serde(default)]
    pub description: String,
    /// Price in cents (for precision)
    pub price: i64,
    /// Current stock quantity
    #[serde(default)]
    pub stock: i32,
    /// Reference to the product's category, absent when unresolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Uuid>,
    /// References to the product's tags
    #[serde(default)]
    pub tags: Vec<Uuid>,
    /// Identifier of the stored image attachment, or null
    pub image: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product (decoded from multipart text fields)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    /// Category name, resolved to an identifier before persistence
    pub category: Option<String>,
    /// Tag names, resolved to identifiers before persistence
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for partially updating a product
///
/// Only fields present in the request are changed; all others keep
/// their previous values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProductPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    /// Category name, resolved to an identifier before persistence
    pub category: Option<String>,
    /// Tag names, resolved to identifiers before persistence
    pub tags: Option<Vec<String>>,
}

/// Field-level changes applied to a product record with `$set`
///
/// References here are already resolved; an absent field is left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    pub category: Option<Uuid>,
    pub tags: Option<Vec<Uuid>>,
    pub image: Option<String>,
}

/// DTO for creating or renaming a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewCategory {
    #[validate(length(min = 3, max = 20))]
    pub name: String,
}

/// DTO for creating or renaming a tag
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewTag {
    #[validate(length(min = 1, max = 20))]
    pub name: String,
}

/// An uploaded image as delivered by the multipart decoder
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ListParams {
    /// Number of results to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Case-insensitive substring match on product name
    pub q: Option<String>,
    /// Category name, resolved or silently ignored
    pub category: Option<String>,
    /// Tag names, resolved or silently ignored
    #[serde(default, alias = "tags[]")]
    pub tags: Vec<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            q: None,
            category: None,
            tags: Vec::new(),
        }
    }
}

/// Resolved filter passed to the repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub name_contains: Option<String>,
    pub category: Option<Uuid>,
    pub tags: Option<Vec<Uuid>>,
    pub skip: u64,
    pub limit: i64,
}

/// Product with category and tag references expanded to full records
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetails {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of products with the pre-pagination total
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductPage {
    pub data: Vec<ProductDetails>,
    pub count: u64,
}

/// Confirmation message returned by delete endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

fn default_limit() -> i64 {
    10
}

impl Product {
    /// Build a product from a create DTO and its resolved references
    pub fn new(
        input: NewProduct,
        category: Option<Uuid>,
        tags: Vec<Uuid>,
        image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category,
            tags,
            image,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_new_product_without_image_has_null_image() {
        let input = NewProduct {
            name: "Kopi Arabica".to_string(),
            price: 4500,
            ..Default::default()
        };
        let product = Product::new(input, None, Vec::new(), None);
        assert!(product.image.is_none());
        assert!(product.category.is_none());
        assert!(product.tags.is_empty());
    }

    #[test]
    fn test_new_product_validation_rejects_empty_name() {
        let input = NewProduct {
            name: String::new(),
            price: 100,
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_new_product_validation_rejects_negative_price() {
        let input = NewProduct {
            name: "Teh Melati".to_string(),
            price: -1,
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_category_name_length_bounds() {
        assert!(NewCategory { name: "ab".to_string() }.validate().is_err());
        assert!(NewCategory { name: "abc".to_string() }.validate().is_ok());
        assert!(NewCategory {
            name: "a".repeat(21)
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_unresolved_category_is_omitted_from_bson() {
        let input = NewProduct {
            name: "Kopi Robusta".to_string(),
            price: 3000,
            ..Default::default()
        };
        let product = Product::new(input, None, Vec::new(), None);
        let doc = mongodb::bson::to_document(&product).unwrap();
        assert!(!doc.contains_key("category"));
    }

    #[test]
    fn test_list_params_default_pagination() {
        let params = ListParams::default();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 10);
    }
}
