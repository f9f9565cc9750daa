//! User management commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use sonet_graph::Neo4jStore;
use sonet_service::SocialGraphService;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create or update a user (the name is last-write-wins)
    Add {
        /// Externally assigned user id
        id: String,
        /// Display name
        name: String,
    },

    /// List users, ordered by name
    List,
}

pub async fn execute(cmd: UserCommands, service: &SocialGraphService<Neo4jStore>) -> Result<()> {
    match cmd {
        UserCommands::Add { id, name } => {
            let user = service.register_user(&id, &name).await?;
            println!(
                "{} {} ({})",
                "Registered".green().bold(),
                user.name,
                user.user_id.dimmed()
            );
            Ok(())
        }
        UserCommands::List => {
            let users = service.list_users().await?;
            if users.is_empty() {
                println!("{}", "No users yet.".dimmed());
                return Ok(());
            }
            for user in &users {
                println!("{} ({})", user.name, user.user_id.dimmed());
            }
            Ok(())
        }
    }
}
