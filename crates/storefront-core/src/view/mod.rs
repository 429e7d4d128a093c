//! View state - what a screen holds between backend calls.

mod forum_feed;
mod product_list;

pub use forum_feed::ForumFeed;
pub use product_list::{
    DeleteOutcome, FetchOutcome, ListSnapshot, ListStatus, NO_IMAGE_PLACEHOLDER, ProductListView,
    ProductRow,
};
