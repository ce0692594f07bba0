//! Reference resolution for category and tag names
//!
//! Write payloads and list filters carry human-readable names. Resolution
//! replaces them with canonical identifiers; a name that matches nothing is
//! dropped rather than failing the request.

use uuid::Uuid;

use crate::error::CatalogResult;
use crate::repository::CatalogRepository;

/// Resolved relational fields for a product payload
///
/// `None` means the field was absent or did not resolve, and must stay
/// out of the persisted payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRefs {
    pub category: Option<Uuid>,
    pub tags: Option<Vec<Uuid>>,
}

/// Resolve a category name and a tag name list against the repository
///
/// The category matches one record whose name case-insensitively contains
/// the candidate; tags match by exact name. Misses are silent.
pub async fn resolve_refs<R: CatalogRepository + ?Sized>(
    repository: &R,
    category: Option<&str>,
    tags: Option<&[String]>,
) -> CatalogResult<ResolvedRefs> {
    let mut resolved = ResolvedRefs::default();

    if let Some(name) = category {
        if !name.is_empty() {
            if let Some(category) = repository.find_category_by_name(name).await? {
                resolved.category = Some(category.id);
            }
        }
    }

    if let Some(names) = tags {
        if !names.is_empty() {
            let found = repository.find_tags_by_names(names.to_vec()).await?;
            if !found.is_empty() {
                resolved.tags = Some(found.into_iter().map(|tag| tag.id).collect());
            }
        }
    }

    Ok(resolved)
}
