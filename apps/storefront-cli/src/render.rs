//! Plain-text rendering of view state.

use std::fmt::Write;

use storefront_core::domain::{Comment, Cursor, LikeState, Post};
use storefront_core::view::{ListSnapshot, ListStatus};

/// `Page N of M`. An empty collection still reads as one page.
pub fn page_footer(cursor: &Cursor) -> String {
    format!(
        "Page {} of {} ({} products)",
        cursor.page(),
        cursor.total_pages().max(1),
        cursor.total()
    )
}

pub fn product_table(snapshot: &ListSnapshot) -> String {
    let mut out = String::new();
    match &snapshot.status {
        ListStatus::Idle => out.push_str("Nothing loaded yet.\n"),
        ListStatus::Loading => out.push_str("Loading...\n"),
        ListStatus::Errored(err) => {
            let _ = writeln!(out, "Could not load products: {}", err.message);
        }
        ListStatus::Loaded if snapshot.rows.is_empty() => out.push_str("No products.\n"),
        ListStatus::Loaded => {
            let _ = writeln!(
                out,
                "{:>4}  {:<10}  {:<28}  {:<14}  {:<32}  {:>12}  {:>5}  {}",
                "#", "ID", "Name", "Category", "Description", "Price", "Qty", "Image"
            );
            for row in &snapshot.rows {
                let _ = writeln!(
                    out,
                    "{:>4}  {:<10}  {:<28}  {:<14}  {:<32}  {:>12}  {:>5}  {}",
                    row.number,
                    row.product_id.as_str(),
                    truncate(&row.name, 28),
                    truncate(&row.category, 14),
                    truncate(&row.description, 32),
                    row.price,
                    row.quantity,
                    row.image
                );
            }
        }
    }
    out.push_str(&page_footer(&snapshot.cursor));
    out
}

pub fn post_list(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts yet.".to_string();
    }
    let mut out = String::new();
    for post in posts {
        let _ = writeln!(
            out,
            "[{}] {} ({} likes)",
            post.id, post.title, post.like_count
        );
        let _ = writeln!(out, "    {}", post.content);
    }
    out.trim_end().to_string()
}

pub fn comment_list(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments yet.".to_string();
    }
    comments
        .iter()
        .map(|c| format!("  - {}", c.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn like_summary(post_id: &str, like: &LikeState) -> String {
    let mut out = format!("Liked post {post_id}");
    if let Some(count) = like.like_count {
        let _ = write!(out, " ({count} likes)");
    }
    if let Some(message) = &like.message {
        let _ = write!(out, ": {message}");
    }
    out
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
