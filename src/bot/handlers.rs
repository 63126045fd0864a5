use anyhow::Result;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

/// Supported commands for the bot
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Greet the user
    #[command(description = "Greet the user.")]
    Start,
}

/// Build the greeting text for a user's first name.
///
/// A message can arrive without user information (e.g. a channel
/// post), in which case we fall back to a generic greeting instead of
/// failing the handler.
fn greeting(first_name: Option<&str>) -> String {
    match first_name {
        Some(name) if !name.is_empty() => format!("Hello {name}"),
        _ => "Hello there".to_string(),
    }
}

/// Handle `/start`: reply in the same chat with a personal greeting.
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    let text = greeting(msg.from.as_ref().map(|u| u.first_name.as_str()));

    info!("Replying to /start in chat {}", msg.chat.id);
    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}
