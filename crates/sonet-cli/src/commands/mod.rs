//! CLI command definitions and handlers.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};

use sonet_core::Sentiment;
use sonet_graph::{GraphClient, GraphConfig, Neo4jStore};
use sonet_service::SocialGraphService;

pub mod post;
pub mod user;

/// Sonet - social graph over Neo4j with similar-content relationships
#[derive(Parser)]
#[command(name = "sonet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Neo4j bolt URI
    #[arg(long, global = true, env = "SONET_NEO4J_URI")]
    pub uri: Option<String>,

    /// Neo4j user
    #[arg(long, global = true, env = "SONET_NEO4J_USER")]
    pub user: Option<String>,

    /// Neo4j password
    #[arg(long, global = true, env = "SONET_NEO4J_PASSWORD")]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the graph schema (constraints and indexes)
    Init,

    /// Manage users
    #[command(subcommand)]
    User(user::UserCommands),

    /// Manage posts
    #[command(subcommand)]
    Post(post::PostCommands),

    /// Show the newest posts across all users
    Feed {
        /// Maximum number of posts to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show node and relationship counts
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.graph_config();
        let client = GraphClient::connect(&config).await?;

        match self.command {
            Commands::Init => cmd_init(&client).await,
            Commands::Status => cmd_status(&client).await,
            Commands::Feed { limit } => cmd_feed(&service(client), limit).await,
            Commands::User(cmd) => user::execute(cmd, &service(client)).await,
            Commands::Post(cmd) => post::execute(cmd, &service(client)).await,
        }
    }

    fn graph_config(&self) -> GraphConfig {
        let defaults = GraphConfig::default();
        GraphConfig {
            uri: self.uri.clone().unwrap_or(defaults.uri),
            user: self.user.clone().unwrap_or(defaults.user),
            password: self.password.clone().unwrap_or(defaults.password),
        }
    }
}

fn service(client: GraphClient) -> SocialGraphService<Neo4jStore> {
    SocialGraphService::new(Arc::new(Neo4jStore::new(client)))
}

/// Colorize a sentiment tag for terminal output.
pub(crate) fn sentiment_badge(sentiment: Sentiment) -> ColoredString {
    match sentiment {
        Sentiment::Positive => "positive".green(),
        Sentiment::Negative => "negative".red(),
        Sentiment::Neutral => "neutral".normal(),
    }
}

async fn cmd_init(client: &GraphClient) -> Result<()> {
    sonet_graph::schema::initialize_schema(client).await?;
    println!("{}", "Schema initialized.".green().bold());
    Ok(())
}

async fn cmd_status(client: &GraphClient) -> Result<()> {
    let counts = client.counts().await?;

    println!("{}", "Graph status".bold());
    println!("  Users:            {}", counts.users);
    println!("  Posts:            {}", counts.posts);
    println!("  Similarity edges: {}", counts.similarity_edges);
    Ok(())
}

async fn cmd_feed(service: &SocialGraphService<Neo4jStore>, limit: usize) -> Result<()> {
    let entries = service.recent_posts(Some(limit)).await?;

    if entries.is_empty() {
        println!("{}", "No posts yet.".dimmed());
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{} {} [{}]",
            entry.post.created_at.dimmed(),
            entry.user_name.cyan(),
            sentiment_badge(entry.post.sentiment)
        );
        println!("  {}", entry.post.content);
    }
    Ok(())
}
