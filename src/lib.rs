// lib.rs - User Interaction Toolbox
// Helpers for answering Discord slash commands: a validated view of the
// invoking guild, member and voice channel, emoji-tagged replies, and a
// catch-all error responder.
//
// Command registration and dispatch stay with the bot; it builds a
// UserInteraction for each interaction it receives:
//
//     let ctx = UserInteraction::new(DiscordInteraction::new(&ctx, interaction)).init().await?;
//     match ctx.voice_channel() {
//         Ok(channel) => { ctx.edit_with_emoji(format!("Joining {}", channel.name), ResponseEmoji::Success).await?; }
//         Err(e) => { ctx.oops(e).await; }
//     }

pub mod config;
pub mod context;
pub mod discord;
pub mod emoji;
pub mod error;
pub mod platform;
pub mod reply;

pub use config::InteractionConfig;
pub use context::UserInteraction;
pub use discord::{DiscordInteraction, DiscordMember};
pub use emoji::{EmojiSet, ResponseEmoji};
pub use error::{BoxError, InteractionError};
pub use platform::{CommandSource, GuildMember, InteractionKind};
pub use reply::{ReplyEmbed, ReplyPayload};
