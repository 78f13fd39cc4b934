use crate::output::print_json;
use anyhow::{Context, Result};
use clap::Subcommand;
use parcours_core::case::Case;
use parcours_core::message::MessageKind;
use parcours_core::types::{MessageTopic, Role};
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum MessageSubcommand {
    /// Append a comment to a case thread
    Add {
        /// Case slug
        slug: String,

        /// Author role (marcel, franchir, gilles, admin)
        #[arg(long)]
        role: Role,

        /// Thread topic (medical, commercial, system)
        #[arg(long, default_value = "medical")]
        topic: MessageTopic,

        /// Message body
        #[arg(long)]
        body: String,

        /// Author display name
        #[arg(long)]
        author: Option<String>,
    },
    /// List a case thread
    List {
        /// Case slug
        slug: String,

        /// Only this topic
        #[arg(long)]
        topic: Option<MessageTopic>,
    },
}

pub fn run(root: &Path, subcommand: MessageSubcommand, json: bool) -> Result<()> {
    match subcommand {
        MessageSubcommand::Add {
            slug,
            role,
            topic,
            body,
            author,
        } => {
            let mut case =
                Case::load(root, &slug).with_context(|| format!("case '{slug}' not found"))?;
            let id = case.add_message(
                author,
                role,
                topic,
                MessageKind::Comment,
                None,
                body,
                None,
            );
            case.save(root)?;
            if json {
                print_json(&serde_json::json!({ "id": id }))?;
            } else {
                println!("Added message {id} to '{slug}'");
            }
            Ok(())
        }
        MessageSubcommand::List { slug, topic } => {
            let case =
                Case::load(root, &slug).with_context(|| format!("case '{slug}' not found"))?;
            let messages: Vec<_> = match topic {
                Some(t) => case.messages_for_topic(t).into_iter().cloned().collect(),
                None => case.messages.clone(),
            };

            if json {
                return print_json(&messages);
            }

            if messages.is_empty() {
                println!("No messages.");
                return Ok(());
            }
            for m in &messages {
                let author = m.author_name.as_deref().unwrap_or(m.author_role.as_str());
                if let Some(ref title) = m.title {
                    println!("[{}] {author} ({}): {title}", m.id, m.topic);
                    println!("     {}", m.body);
                } else {
                    println!("[{}] {author} ({}): {}", m.id, m.topic, m.body);
                }
            }
            Ok(())
        }
    }
}
