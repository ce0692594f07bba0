//! HTTP handlers for the Catalog API

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_extra::extract::Query;
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::forms::parse_product_form;
use crate::models::{
    Category, DeleteResponse, ListParams, NewCategory, NewProduct, NewTag, Product,
    ProductDetails, ProductPage, ProductPatch, Tag,
};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;
use crate::storage::AttachmentStore;

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        get_image,
        list_categories,
        create_category,
        update_category,
        delete_category,
        list_tags,
        create_tag,
        update_tag,
        delete_tag,
    ),
    components(
        schemas(
            Product, NewProduct, ProductPatch, ProductDetails, ProductPage,
            Category, NewCategory, Tag, NewTag, DeleteResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints"),
        (name = "Categories", description = "Category management endpoints"),
        (name = "Tags", description = "Tag management endpoints"),
        (name = "Images", description = "Product image retrieval")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints
pub fn router<R, S>(service: CatalogService<R, S>) -> Router
where
    R: CatalogRepository + 'static,
    S: AttachmentStore + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .route("/images/{id}", get(get_image))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            axum::routing::put(update_category).delete(delete_category),
        )
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/tags/{id}",
            axum::routing::put(update_tag).delete(delete_tag),
        )
        .with_state(shared_service)
}

/// List products with filtering, pagination, and expanded references
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ListParams),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    Query(params): Query<ListParams>,
) -> CatalogResult<Json<ProductPage>> {
    let page = service.list_products(params).await?;
    Ok(Json(page))
}

/// Create a new product from a multipart form, optionally with an image
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body(content = NewProduct, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    mut multipart: Multipart,
) -> CatalogResult<Json<Product>> {
    let form = parse_product_form(&mut multipart).await?;
    let (input, upload) = form.into_new_product();
    let product = service.create_product(input, upload).await?;
    Ok(Json(product))
}

/// Get a product by ID with expanded category and tags
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductDetails>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Partially update a product from a multipart form
#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body(content = ProductPatch, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    UuidPath(id): UuidPath,
    mut multipart: Multipart,
) -> CatalogResult<Json<Product>> {
    let form = parse_product_form(&mut multipart).await?;
    let (patch, upload) = form.into_patch();
    let product = service.update_product(id, patch, upload).await?;
    Ok(Json(product))
}

/// Delete a product and its stored image
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeleteResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<DeleteResponse>> {
    service.delete_product(id).await?;
    Ok(Json(DeleteResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// Download a product image by its storage identifier
#[utoipa::path(
    get,
    path = "/images/{id}",
    tag = "Images",
    params(
        ("id" = String, Path, description = "Image storage identifier")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_image<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> CatalogResult<impl IntoResponse> {
    let image = service.read_image(&id).await?;
    let content_type = image
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(([(header::CONTENT_TYPE, content_type)], image.bytes))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
) -> CatalogResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body = NewCategory,
    responses(
        (status = 200, description = "Category created successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    ValidatedJson(input): ValidatedJson<NewCategory>,
) -> CatalogResult<Json<Category>> {
    let category = service.create_category(input).await?;
    Ok(Json(category))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = NewCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<NewCategory>,
) -> CatalogResult<Json<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(Json(category))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted successfully", body = DeleteResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<DeleteResponse>> {
    service.delete_category(id).await?;
    Ok(Json(DeleteResponse {
        message: "Category deleted successfully".to_string(),
    }))
}

/// List all tags
#[utoipa::path(
    get,
    path = "/tags",
    tag = "Tags",
    responses(
        (status = 200, description = "List of tags", body = Vec<Tag>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tags<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
) -> CatalogResult<Json<Vec<Tag>>> {
    let tags = service.list_tags().await?;
    Ok(Json(tags))
}

/// Create a new tag
#[utoipa::path(
    post,
    path = "/tags",
    tag = "Tags",
    request_body = NewTag,
    responses(
        (status = 200, description = "Tag created successfully", body = Tag),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_tag<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    ValidatedJson(input): ValidatedJson<NewTag>,
) -> CatalogResult<Json<Tag>> {
    let tag = service.create_tag(input).await?;
    Ok(Json(tag))
}

/// Rename a tag
#[utoipa::path(
    put,
    path = "/tags/{id}",
    tag = "Tags",
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    request_body = NewTag,
    responses(
        (status = 200, description = "Tag updated successfully", body = Tag),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_tag<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<NewTag>,
) -> CatalogResult<Json<Tag>> {
    let tag = service.update_tag(id, input).await?;
    Ok(Json(tag))
}

/// Delete a tag
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = "Tags",
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag deleted successfully", body = DeleteResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_tag<R: CatalogRepository, S: AttachmentStore>(
    State(service): State<Arc<CatalogService<R, S>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<DeleteResponse>> {
    service.delete_tag(id).await?;
    Ok(Json(DeleteResponse {
        message: "Tag deleted successfully".to_string(),
    }))
}
