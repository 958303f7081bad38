// context.rs - User Interaction Toolbox
// Wraps a single command interaction to make replying, error reporting and
// reaching the guild, member and voice channel easier.
//
// Key Features:
// - Two-phase setup: `new` never does I/O, `init` defers the reply
// - Accessors that validate once and fail with a typed error
// - Emoji-prefixed edits and follow-ups
// - `oops` as the last-resort error responder for a command
//
// Used by: command handlers, wrapping DiscordInteraction (discord.rs)

// ============================================================================
// IMPORTS
// ============================================================================

use crate::config::InteractionConfig;
use crate::emoji::ResponseEmoji;
use crate::error::{InteractionError, Result};
use crate::platform::{CommandSource, GuildMember, InteractionKind};
use crate::reply::ReplyPayload;
use chrono::{DateTime, Duration, Utc};
use log::{debug, error};
use std::fmt;

pub const UNKNOWN_ERROR_MESSAGE: &str =
    "There was a problem executing your request. The reason is unknown.";

pub struct UserInteraction<S: CommandSource> {
    interaction: S,
    invoked_at: DateTime<Utc>,
    config: InteractionConfig,
}

impl<S: CommandSource> UserInteraction<S> {
    pub fn new(interaction: S) -> Self {
        Self::with_config(interaction, InteractionConfig::default())
    }

    pub fn with_config(interaction: S, config: InteractionConfig) -> Self {
        Self {
            interaction,
            invoked_at: Utc::now(),
            config,
        }
    }

    // ============================================================================
    // INITIALISATION
    // ============================================================================

    /// Tell Discord a reply is coming, using the configured visibility.
    pub async fn init(self) -> Result<Self> {
        let ephemeral = self.config.ephemeral_replies;
        self.init_with(ephemeral).await
    }

    /// Tell Discord a reply is coming. With `ephemeral` the reply is only
    /// shown to the invoking user.
    pub async fn init_with(self, ephemeral: bool) -> Result<Self> {
        let command_name = match self.command_name() {
            Ok(name) if !name.is_empty() => name.to_string(),
            _ => return Err(InteractionError::CommandNameUnavailable),
        };

        debug!(
            "[INTERACTION] Deferring /{} (ephemeral: {})",
            command_name,
            ephemeral
        );
        self.interaction.defer_reply(ephemeral).await?;

        Ok(self)
    }

    // ============================================================================
    // ACCESSORS
    // ============================================================================

    pub fn raw_interaction(&self) -> &S {
        &self.interaction
    }

    /// When the command was received.
    pub fn invoked_at(&self) -> DateTime<Utc> {
        self.invoked_at
    }

    pub fn elapsed(&self) -> Duration {
        Utc::now() - self.invoked_at
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn guild(&self) -> Result<&S::Guild> {
        self.interaction.guild().ok_or(InteractionError::NotInGuild)
    }

    /// The invoking guild member.
    pub fn author(&self) -> Result<&S::Member> {
        self.interaction
            .member()
            .ok_or(InteractionError::MemberUnavailable)
    }

    pub fn command_name(&self) -> Result<&str> {
        if self.interaction.kind() != InteractionKind::Command {
            return Err(InteractionError::NotACommand);
        }

        self.interaction
            .command_name()
            .ok_or(InteractionError::NotACommand)
    }

    /// The voice channel the author is connected to.
    pub fn voice_channel(&self) -> Result<&<S::Member as GuildMember>::VoiceChannel> {
        self.author()?
            .voice_channel()
            .ok_or(InteractionError::NotInVoiceChannel)
    }

    // ============================================================================
    // REPLIES
    // ============================================================================

    /// Send a new follow-up message, prefixed with `emoji` when one is given.
    pub async fn follow_up_with_emoji(
        &self,
        message: impl Into<ReplyPayload>,
        emoji: Option<ResponseEmoji>,
    ) -> Result<S::Message> {
        let mut payload = message.into();
        if let Some(emoji) = emoji {
            payload.prefix_content(self.config.emojis.glyph(emoji));
        }

        let message = self.interaction.follow_up(payload).await?;
        debug!(
            "[INTERACTION] Follow-up sent {}ms after invocation",
            self.elapsed().num_milliseconds()
        );
        Ok(message)
    }

    /// Edit the deferred reply, prefixed with `emoji`.
    pub async fn edit_with_emoji(
        &self,
        message: impl Into<ReplyPayload>,
        emoji: ResponseEmoji,
    ) -> Result<S::Message> {
        let mut payload = message.into();
        payload.prefix_content(self.config.emojis.glyph(emoji));

        let message = self.interaction.edit_reply(payload).await?;
        debug!(
            "[INTERACTION] Reply edited {}ms after invocation",
            self.elapsed().num_milliseconds()
        );
        Ok(message)
    }

    /// Tell the user something went wrong and log the error.
    ///
    /// Never fails; if the edit itself is rejected that is logged too and
    /// `None` comes back.
    pub async fn oops<E>(&self, error: E) -> Option<S::Message>
    where
        E: fmt::Display + fmt::Debug,
    {
        error!("❌ [INTERACTION] Command failed: {:?}", error);

        let text = error_text(&error.to_string(), self.config.error_message_limit);
        match self.edit_with_emoji(text, ResponseEmoji::Danger).await {
            Ok(message) => Some(message),
            Err(e) => {
                error!("❌ [INTERACTION] Failed to report error to user: {}", e);
                None
            }
        }
    }
}

impl<S: CommandSource + fmt::Debug> fmt::Debug for UserInteraction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInteraction")
            .field("interaction", &self.interaction)
            .field("invoked_at", &self.invoked_at)
            .finish()
    }
}

/// User-facing text for an error: its trimmed message cut to `limit`
/// characters, or the generic fallback when there is nothing to show.
fn error_text(message: &str, limit: usize) -> String {
    let message = message.trim();
    if message.is_empty() {
        return UNKNOWN_ERROR_MESSAGE.to_string();
    }

    match message.char_indices().nth(limit) {
        Some((cut, _)) => message[..cut].to_string(),
        None => message.to_string(),
    }
}
