//! Post commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use sonet_graph::Neo4jStore;
use sonet_service::SocialGraphService;

use super::sentiment_badge;

#[derive(Subcommand)]
pub enum PostCommands {
    /// Publish a post for a user
    Create {
        /// Authoring user id
        user_id: String,
        /// Post content (words are joined with spaces)
        #[arg(required = true)]
        content: Vec<String>,
    },

    /// List one user's posts, newest first
    List {
        /// Authoring user id
        user_id: String,
    },

    /// Soft-delete a post (hidden from the feed, record kept)
    Delete {
        /// Post id
        post_id: String,
    },
}

pub async fn execute(cmd: PostCommands, service: &SocialGraphService<Neo4jStore>) -> Result<()> {
    match cmd {
        PostCommands::Create { user_id, content } => {
            let content = content.join(" ");
            let post = service.create_post(&user_id, &content).await?;
            println!(
                "{} {} [{}]",
                "Posted".green().bold(),
                post.post_id.dimmed(),
                sentiment_badge(post.sentiment)
            );
            Ok(())
        }
        PostCommands::List { user_id } => {
            let posts = service.user_posts(&user_id).await?;
            if posts.is_empty() {
                println!("{}", "No posts yet.".dimmed());
                return Ok(());
            }
            for post in &posts {
                println!(
                    "{} {} [{}]",
                    post.created_at.dimmed(),
                    post.post_id.dimmed(),
                    sentiment_badge(post.sentiment)
                );
                println!("  {}", post.content);
            }
            Ok(())
        }
        PostCommands::Delete { post_id } => {
            service.delete_post(&post_id).await?;
            println!("{} {}", "Deleted".yellow().bold(), post_id.dimmed());
            Ok(())
        }
    }
}
