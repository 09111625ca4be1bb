//! Query handlers for the turn rotation context.
//!
//! Queries read through the registry without creating entries for
//! channels that have never been touched.

use std::sync::Mutex;

use popcorn_core::error::DomainError;
use popcorn_core::ids::{ActorId, ChannelKey};
use serde::Serialize;

use crate::application::command_handlers::lock;
use crate::domain::manager::InitiativeManager;
use crate::domain::pool::PlayerPool;

/// Read-only view of a channel's pool and rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitiativeStatusView {
    /// The channel this view describes.
    pub key: ChannelKey,
    /// Pool members, sorted by identifier.
    pub pool: Vec<ActorId>,
    /// Whether a rotation is running.
    pub active: bool,
    /// The actor holding the turn.
    pub current_actor: Option<ActorId>,
    /// Actors still waiting for a turn.
    pub participants: Vec<ActorId>,
    /// Actors that have held the turn, in order.
    pub history: Vec<ActorId>,
}

/// Retrieves the status of a channel.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the manager lock is poisoned.
pub fn get_status(
    key: ChannelKey,
    manager: &Mutex<InitiativeManager>,
) -> Result<InitiativeStatusView, DomainError> {
    let manager = lock(manager)?;
    let pool = manager
        .peek_player_pool(key)
        .map(PlayerPool::sorted)
        .unwrap_or_default();

    let view = match manager.peek_initiative(key) {
        Some(initiative) => InitiativeStatusView {
            key,
            pool,
            active: initiative.is_active(),
            current_actor: initiative.current_actor(),
            participants: initiative.participants().to_vec(),
            history: initiative.history().to_vec(),
        },
        None => InitiativeStatusView {
            key,
            pool,
            active: false,
            current_actor: None,
            participants: Vec::new(),
            history: Vec::new(),
        },
    };
    Ok(view)
}
