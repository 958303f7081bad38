// error.rs - Interaction Error Types
// Every failure the interaction helper can surface, from accessor gates
// to platform errors and configuration problems.

// ============================================================================
// IMPORTS
// ============================================================================

use crate::platform::InteractionKind;
use thiserror::Error;

/// Boxed error used at the platform boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("Unable to retrieve command name.")]
    CommandNameUnavailable,

    #[error("This command can only be run in a Guild.")]
    NotInGuild,

    #[error("Unable to retrieve guild member.")]
    MemberUnavailable,

    #[error("Unable to fetch command name.")]
    NotACommand,

    #[error("Must be connected to a voice channel to continue!")]
    NotInVoiceChannel,

    #[error("Cannot reply to {0:?} interactions")]
    UnsupportedReply(InteractionKind),

    #[error(transparent)]
    Platform(BoxError),

    #[error("botconfig.txt file not found in any expected location (., .., ../.., src/)")]
    ConfigNotFound,

    #[error("Invalid value '{value}' for setting '{key}' in botconfig.txt")]
    ConfigInvalid { key: String, value: String },
}

impl From<BoxError> for InteractionError {
    fn from(error: BoxError) -> Self {
        InteractionError::Platform(error)
    }
}

pub type Result<T> = std::result::Result<T, InteractionError>;
