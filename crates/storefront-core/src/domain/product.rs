use serde::{Deserialize, Serialize};

use super::{Price, ResourceId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub image_url: String,
}

/// Catalog product as listed in the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// First image URL, if the product has any images.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|img| img.image_url.as_str())
    }
}

/// One page of the product listing.
///
/// `limit` and `page` are only present when the server echoes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub data: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}
