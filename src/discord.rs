// discord.rs - Serenity Adapter
// Implements CommandSource for serenity's Interaction so UserInteraction can
// wrap real Discord events.
//
// Key Features:
// - Snapshots the guild and the invoker's voice channel from the cache
// - Defers, edits and follows up through the raw interaction endpoints
//
// Used by: command handlers, through UserInteraction::new(DiscordInteraction::new(..))

// ============================================================================
// IMPORTS
// ============================================================================

use crate::error::{BoxError, InteractionError};
use crate::platform::{CommandSource, GuildMember, InteractionKind};
use crate::reply::{ReplyPayload, EPHEMERAL_FLAG};
use async_trait::async_trait;
use serenity::{
    client::Context,
    http::Http,
    model::{
        application::interaction::Interaction,
        channel::{Channel, GuildChannel, Message},
        guild::{Guild, Member},
        id::{ChannelId, GuildId, UserId},
        voice::VoiceState,
    },
};
use log::warn;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Interaction response type for "thinking..." replies that are edited later.
const DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE: u8 = 5;

// ============================================================================
// MEMBER
// ============================================================================

pub struct DiscordMember {
    member: Member,
    voice_channel: Option<GuildChannel>,
}

impl DiscordMember {
    pub fn member(&self) -> &Member {
        &self.member
    }
}

impl GuildMember for DiscordMember {
    type VoiceChannel = GuildChannel;

    fn voice_channel(&self) -> Option<&GuildChannel> {
        self.voice_channel.as_ref()
    }
}

// ============================================================================
// INTERACTION
// ============================================================================

pub struct DiscordInteraction {
    http: Arc<Http>,
    interaction: Interaction,
    guild: Option<Guild>,
    member: Option<DiscordMember>,
}

impl DiscordInteraction {
    /// Wrap an interaction, resolving its guild from the client cache.
    pub fn new(ctx: &Context, interaction: Interaction) -> Self {
        let guild = guild_id(&interaction).and_then(|id| {
            let guild = ctx.cache.guild(id);
            if guild.is_none() {
                warn!("⚠️ [DISCORD] Guild {} not in cache, treating interaction as guild-less", id);
            }
            guild
        });

        Self::from_parts(ctx.http.clone(), interaction, guild)
    }

    /// Wrap an interaction with an already resolved guild.
    pub fn from_parts(http: Arc<Http>, interaction: Interaction, guild: Option<Guild>) -> Self {
        let member = member(&interaction).map(|member| {
            let voice_channel = guild
                .as_ref()
                .and_then(|guild| resolve_voice_channel(guild, member));

            DiscordMember {
                member: member.clone(),
                voice_channel,
            }
        });

        Self {
            http,
            interaction,
            guild,
            member,
        }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    fn reply_target(&self) -> Result<(u64, &str), BoxError> {
        match &self.interaction {
            Interaction::ApplicationCommand(i) => Ok((i.id.0, i.token.as_str())),
            Interaction::MessageComponent(i) => Ok((i.id.0, i.token.as_str())),
            Interaction::ModalSubmit(i) => Ok((i.id.0, i.token.as_str())),
            _ => Err(InteractionError::UnsupportedReply(self.kind()).into()),
        }
    }
}

fn guild_id(interaction: &Interaction) -> Option<GuildId> {
    match interaction {
        Interaction::ApplicationCommand(i) => i.guild_id,
        Interaction::MessageComponent(i) => i.guild_id,
        Interaction::Autocomplete(i) => i.guild_id,
        Interaction::ModalSubmit(i) => i.guild_id,
        _ => None,
    }
}

fn member(interaction: &Interaction) -> Option<&Member> {
    match interaction {
        Interaction::ApplicationCommand(i) => i.member.as_ref(),
        Interaction::MessageComponent(i) => i.member.as_ref(),
        Interaction::Autocomplete(i) => i.member.as_ref(),
        Interaction::ModalSubmit(i) => i.member.as_ref(),
        _ => None,
    }
}

/// The channel `member` is connected to according to the guild's voice states.
fn resolve_voice_channel(guild: &Guild, member: &Member) -> Option<GuildChannel> {
    voice_channel_of(member.user.id, &guild.voice_states, &guild.channels)
}

fn voice_channel_of(
    user_id: UserId,
    voice_states: &HashMap<UserId, VoiceState>,
    channels: &HashMap<ChannelId, Channel>,
) -> Option<GuildChannel> {
    let channel_id = voice_states.get(&user_id)?.channel_id?;

    match channels.get(&channel_id)? {
        Channel::Guild(channel) => Some(channel.clone()),
        _ => None,
    }
}

/// Body for deferring a reply.
pub fn defer_body(ephemeral: bool) -> Value {
    let data = if ephemeral {
        json!({ "flags": EPHEMERAL_FLAG })
    } else {
        json!({})
    };

    json!({
        "type": DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE,
        "data": data,
    })
}

#[async_trait]
impl CommandSource for DiscordInteraction {
    type Guild = Guild;
    type Member = DiscordMember;
    type Message = Message;

    fn kind(&self) -> InteractionKind {
        match &self.interaction {
            Interaction::ApplicationCommand(_) => InteractionKind::Command,
            Interaction::MessageComponent(_) => InteractionKind::Component,
            Interaction::Autocomplete(_) => InteractionKind::Autocomplete,
            Interaction::ModalSubmit(_) => InteractionKind::ModalSubmit,
            _ => InteractionKind::Ping,
        }
    }

    fn command_name(&self) -> Option<&str> {
        match &self.interaction {
            Interaction::ApplicationCommand(i) => Some(i.data.name.as_str()),
            _ => None,
        }
    }

    fn guild(&self) -> Option<&Guild> {
        self.guild.as_ref()
    }

    fn member(&self) -> Option<&DiscordMember> {
        self.member.as_ref()
    }

    async fn defer_reply(&self, ephemeral: bool) -> Result<(), BoxError> {
        let (id, token) = self.reply_target()?;
        self.http
            .create_interaction_response(id, token, &defer_body(ephemeral))
            .await?;
        Ok(())
    }

    async fn edit_reply(&self, payload: ReplyPayload) -> Result<Message, BoxError> {
        let (_, token) = self.reply_target()?;
        let message = self
            .http
            .edit_original_interaction_response(token, &payload.to_json())
            .await?;
        Ok(message)
    }

    async fn follow_up(&self, payload: ReplyPayload) -> Result<Message, BoxError> {
        let (_, token) = self.reply_target()?;
        let message = self
            .http
            .create_followup_message(token, &payload.to_json())
            .await?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD_ID: &str = "700000000000000001";
    const USER_ID: &str = "700000000000000002";
    const VOICE_CHANNEL_ID: &str = "700000000000000003";

    fn user_json() -> Value {
        json!({
            "id": USER_ID,
            "username": "ferris",
            "discriminator": "0001",
            "avatar": null,
            "bot": false
        })
    }

    fn member_json() -> Value {
        json!({
            "user": user_json(),
            "guild_id": GUILD_ID,
            "nick": null,
            "roles": [],
            "joined_at": "2021-01-01T00:00:00.000000+00:00",
            "deaf": false,
            "mute": false,
            "pending": false
        })
    }

    fn interaction_json(kind: u8, data: Option<Value>) -> Value {
        let mut value = json!({
            "id": "800000000000000001",
            "application_id": "800000000000000002",
            "type": kind,
            "guild_id": GUILD_ID,
            "channel_id": "800000000000000003",
            "member": member_json(),
            "user": user_json(),
            "token": "interaction-token",
            "version": 1,
            "locale": "en-US",
            "guild_locale": "en-US"
        });
        if let Some(data) = data {
            value["data"] = data;
        }
        value
    }

    fn command_data(name: &str) -> Value {
        json!({
            "id": "800000000000000004",
            "name": name,
            "type": 1,
            "options": [],
            "resolved": {}
        })
    }

    fn ping() -> Interaction {
        serde_json::from_value(json!({
            "id": "800000000000000001",
            "application_id": "800000000000000002",
            "type": 1,
            "token": "interaction-token",
            "version": 1
        }))
        .unwrap()
    }

    fn application_command(name: &str) -> Interaction {
        serde_json::from_value(interaction_json(2, Some(command_data(name)))).unwrap()
    }

    fn autocomplete(name: &str) -> Interaction {
        serde_json::from_value(interaction_json(4, Some(command_data(name)))).unwrap()
    }

    fn modal_submit() -> Interaction {
        let data = json!({ "custom_id": "feedback", "components": [] });
        serde_json::from_value(interaction_json(5, Some(data))).unwrap()
    }

    fn wrap(interaction: Interaction) -> DiscordInteraction {
        DiscordInteraction::from_parts(Arc::new(Http::new("")), interaction, None)
    }

    fn voice_state(channel_id: Option<&str>) -> VoiceState {
        serde_json::from_value(json!({
            "channel_id": channel_id,
            "guild_id": GUILD_ID,
            "user_id": USER_ID,
            "session_id": "voice-session",
            "deaf": false,
            "mute": false,
            "self_deaf": false,
            "self_mute": false,
            "self_stream": false,
            "self_video": false,
            "suppress": false,
            "request_to_speak_timestamp": null
        }))
        .unwrap()
    }

    fn voice_channel() -> Channel {
        serde_json::from_value(json!({
            "id": VOICE_CHANNEL_ID,
            "guild_id": GUILD_ID,
            "type": 2,
            "name": "Music",
            "position": 0,
            "permission_overwrites": [],
            "nsfw": false,
            "bitrate": 64000,
            "user_limit": 0
        }))
        .unwrap()
    }

    fn user_id() -> UserId {
        UserId(USER_ID.parse().unwrap())
    }

    fn channel_id() -> ChannelId {
        ChannelId(VOICE_CHANNEL_ID.parse().unwrap())
    }

    #[test]
    fn test_defer_body_ephemeral() {
        assert_eq!(
            defer_body(true),
            json!({ "type": 5, "data": { "flags": 64 } })
        );
    }

    #[test]
    fn test_defer_body_public() {
        assert_eq!(defer_body(false), json!({ "type": 5, "data": {} }));
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(wrap(ping()).kind(), InteractionKind::Ping);
        assert_eq!(wrap(application_command("play")).kind(), InteractionKind::Command);
        assert_eq!(wrap(autocomplete("play")).kind(), InteractionKind::Autocomplete);
        assert_eq!(wrap(modal_submit()).kind(), InteractionKind::ModalSubmit);
    }

    #[test]
    fn test_command_name_only_for_application_commands() {
        assert_eq!(wrap(application_command("play")).command_name(), Some("play"));
        assert_eq!(wrap(autocomplete("play")).command_name(), None);
        assert_eq!(wrap(modal_submit()).command_name(), None);
        assert_eq!(wrap(ping()).command_name(), None);
    }

    #[test]
    fn test_member_without_cached_guild() {
        let interaction = wrap(application_command("play"));
        let member = interaction.member().unwrap();

        assert_eq!(member.member().user.id, user_id());
        assert!(member.voice_channel().is_none());
        assert!(interaction.guild().is_none());
        assert!(wrap(ping()).member().is_none());
    }

    #[test]
    fn test_reply_target_rejects_ping_and_autocomplete() {
        for interaction in [ping(), autocomplete("play")] {
            let wrapped = wrap(interaction);
            let err = wrapped.reply_target().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Cannot reply to {:?} interactions", wrapped.kind())
            );
        }

        let command = wrap(application_command("play"));
        let (id, token) = command.reply_target().unwrap();
        assert_eq!(id, 800000000000000001);
        assert_eq!(token, "interaction-token");
    }

    #[tokio::test]
    async fn test_defer_autocomplete_fails_without_request() {
        let wrapped = wrap(autocomplete("play"));
        let err = wrapped.defer_reply(true).await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot reply to Autocomplete interactions");
    }

    #[test]
    fn test_voice_channel_resolved_from_voice_state() {
        let voice_states = HashMap::from([(user_id(), voice_state(Some(VOICE_CHANNEL_ID)))]);
        let channels = HashMap::from([(channel_id(), voice_channel())]);

        let channel = voice_channel_of(user_id(), &voice_states, &channels).unwrap();
        assert_eq!(channel.id, channel_id());
        assert_eq!(channel.name, "Music");
    }

    #[test]
    fn test_voice_channel_missing_from_guild_channels() {
        let voice_states = HashMap::from([(user_id(), voice_state(Some(VOICE_CHANNEL_ID)))]);
        let channels = HashMap::new();

        assert!(voice_channel_of(user_id(), &voice_states, &channels).is_none());
    }

    #[test]
    fn test_voice_state_without_channel() {
        let voice_states = HashMap::from([(user_id(), voice_state(None))]);
        let channels = HashMap::from([(channel_id(), voice_channel())]);

        assert!(voice_channel_of(user_id(), &voice_states, &channels).is_none());
        assert!(voice_channel_of(user_id(), &HashMap::new(), &channels).is_none());
    }
}
