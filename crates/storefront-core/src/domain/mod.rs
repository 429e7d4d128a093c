//! Domain entities - transient projections of server-owned state.

mod comment;
mod pagination;
mod post;
mod product;
mod scalar;

pub use comment::Comment;
pub use pagination::{Cursor, DEFAULT_PAGE_LIMIT, PageRequest};
pub use post::{LikeState, Post};
pub use product::{Category, Product, ProductImage, ProductPage};
pub use scalar::{Price, ResourceId};
