//! Product catalog port.

use async_trait::async_trait;

use crate::domain::{PageRequest, ProductPage, ResourceId};
use crate::error::ApiError;

/// Backend operations on the product collection.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Fetch one page of products.
    async fn list_products(&self, request: PageRequest) -> Result<ProductPage, ApiError>;

    /// Delete a product. The backend must enforce its own authorization.
    async fn delete_product(&self, product_id: &ResourceId) -> Result<(), ApiError>;
}
