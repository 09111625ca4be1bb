//! Domain error types.

use thiserror::Error;

use crate::ids::{ActorId, ChannelKey};

/// Top-level domain error type.
///
/// The initiative state machine and the registry never fail; these errors
/// come from the command layer that guards them.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The caller lacks the role or turn required for the command.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The command needs a running rotation and there is none.
    #[error("no active initiative in channel {0}")]
    InitiativeNotActive(ChannelKey),

    /// A rotation is already running in the channel.
    #[error("an initiative is already running in channel {0}")]
    InitiativeAlreadyActive(ChannelKey),

    /// The channel's player pool has no members.
    #[error("the player pool for channel {0} is empty")]
    EmptyPool(ChannelKey),

    /// The actor is not a member of the channel's player pool.
    #[error("actor {actor_id} is not in the player pool for channel {key}")]
    NotInPool {
        /// The channel whose pool was checked.
        key: ChannelKey,
        /// The actor that was missing.
        actor_id: ActorId,
    },

    /// A validation error in request or domain input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (e.g. a poisoned lock).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
