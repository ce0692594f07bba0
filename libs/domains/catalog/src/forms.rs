//! Multipart form decoding for product endpoints
//!
//! Product create and update accept `multipart/form-data` so an image
//! file can travel alongside the scalar fields. Field decoding is
//! permissive: unknown parts are skipped and missing parts fall back to
//! defaults so validation can report per-field errors afterwards.

use axum::extract::Multipart;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{ImageUpload, NewProduct, ProductPatch};

/// Raw fields decoded from a product multipart request
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<ImageUpload>,
}

/// Decode a product form from a multipart stream
pub async fn parse_product_form(multipart: &mut Multipart) -> CatalogResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| CatalogError::Invalid(format!("Malformed multipart body: {err}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| {
                        CatalogError::Invalid(format!("Failed to read image field: {err}"))
                    })?
                    .to_vec();
                form.image = Some(ImageUpload {
                    filename,
                    content_type,
                    bytes,
                });
            }
            "name" => form.name = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "price" => {
                let raw = read_text(field).await?;
                form.price = Some(raw.parse().map_err(|_| {
                    CatalogError::Invalid(format!("Invalid price value: {raw}"))
                })?);
            }
            "stock" => {
                let raw = read_text(field).await?;
                form.stock = Some(raw.parse().map_err(|_| {
                    CatalogError::Invalid(format!("Invalid stock value: {raw}"))
                })?);
            }
            "category" => form.category = Some(read_text(field).await?),
            "tags" | "tags[]" => form.tags.push(read_text(field).await?),
            // Unknown fields are ignored rather than rejected
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> CatalogResult<String> {
    field
        .text()
        .await
        .map_err(|err| CatalogError::Invalid(format!("Failed to read form field: {err}")))
}

impl ProductForm {
    /// Interpret the form as a create request
    ///
    /// Missing fields default so that structural validation downstream
    /// reports them per field instead of the decoder failing opaquely.
    pub fn into_new_product(self) -> (NewProduct, Option<ImageUpload>) {
        let input = NewProduct {
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price.unwrap_or(0),
            stock: self.stock.unwrap_or(0),
            category: self.category,
            tags: self.tags,
        };
        (input, self.image)
    }

    /// Interpret the form as a partial update
    pub fn into_patch(self) -> (ProductPatch, Option<ImageUpload>) {
        let patch = ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            tags: if self.tags.is_empty() {
                None
            } else {
                Some(self.tags)
            },
        };
        (patch, self.image)
    }
}
