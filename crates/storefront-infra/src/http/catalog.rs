//! Product endpoints under `{base}/product`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use storefront_core::ApiError;
use storefront_core::domain::{PageRequest, ProductPage, ResourceId};
use storefront_core::ports::ProductApi;
use storefront_shared::dto::ProductQuery;

/// [`ProductApi`] over the backend's REST endpoints.
pub struct HttpProductApi {
    client: Arc<super::ApiClient>,
}

impl HttpProductApi {
    pub fn new(client: Arc<super::ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self, request: PageRequest) -> Result<ProductPage, ApiError> {
        let query = ProductQuery {
            page: request.page,
            limit: request.limit,
        };
        // The listing route is registered with a trailing slash.
        let builder = self
            .client
            .prepare(Method::GET, &["product", ""])
            .await
            .map(|b| b.query(&query));
        self.client.send_json("fetching products", builder).await
    }

    async fn delete_product(&self, product_id: &ResourceId) -> Result<(), ApiError> {
        let builder = self
            .client
            .prepare(Method::DELETE, &["product", product_id.as_str()])
            .await;
        self.client.send_unit("deleting product", builder).await
    }
}
