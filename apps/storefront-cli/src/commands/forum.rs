use clap::Subcommand;

use storefront_core::domain::ResourceId;

use crate::render;
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum ForumCommand {
    /// List posts
    Posts,
    /// Publish a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Like a post
    Like { id: String },
    /// Comment on a post and show the updated thread
    Comment {
        id: String,
        #[arg(long)]
        content: String,
    },
    /// Show a post's comments
    Comments { id: String },
}

pub async fn run(command: ForumCommand, state: &AppState) -> anyhow::Result<()> {
    let feed = state.feed();
    match command {
        ForumCommand::Posts => {
            feed.load().await?;
            println!("{}", render::post_list(&feed.posts().await));
        }
        ForumCommand::Create { title, content } => {
            let post = feed.publish(&title, &content).await?;
            println!("Published post {}", post.id);
        }
        ForumCommand::Like { id } => {
            let id = ResourceId::new(id);
            let like = feed.like(&id).await?;
            println!("{}", render::like_summary(id.as_str(), &like));
        }
        ForumCommand::Comment { id, content } => {
            let thread = feed.comment(&ResourceId::new(id), &content).await?;
            println!("{}", render::comment_list(&thread));
        }
        ForumCommand::Comments { id } => {
            let thread = feed.comments(&ResourceId::new(id)).await?;
            println!("{}", render::comment_list(&thread));
        }
    }
    Ok(())
}
