// platform.rs - Platform Interface
// The handful of fields and calls UserInteraction needs from a chat
// platform's command interaction. discord.rs implements it over serenity;
// tests implement it in memory.

// ============================================================================
// IMPORTS
// ============================================================================

use crate::error::BoxError;
use crate::reply::ReplyPayload;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Ping,
    Command,
    Autocomplete,
    Component,
    ModalSubmit,
}

/// A guild member as seen by an interaction.
pub trait GuildMember: Send + Sync {
    type VoiceChannel: Send + Sync;

    /// Channel the member is currently connected to, if any.
    fn voice_channel(&self) -> Option<&Self::VoiceChannel>;
}

/// One inbound interaction.
///
/// Reply calls follow the platform's lifecycle: one `defer_reply`, then any
/// number of `edit_reply` / `follow_up`. Callers serialize them.
#[async_trait]
pub trait CommandSource: Send + Sync {
    type Guild: Send + Sync;
    type Member: GuildMember;
    type Message: Send;

    fn kind(&self) -> InteractionKind;

    /// Registered command name, for command interactions.
    fn command_name(&self) -> Option<&str>;

    fn guild(&self) -> Option<&Self::Guild>;

    fn member(&self) -> Option<&Self::Member>;

    async fn defer_reply(&self, ephemeral: bool) -> Result<(), BoxError>;

    async fn edit_reply(&self, payload: ReplyPayload) -> Result<Self::Message, BoxError>;

    async fn follow_up(&self, payload: ReplyPayload) -> Result<Self::Message, BoxError>;
}
