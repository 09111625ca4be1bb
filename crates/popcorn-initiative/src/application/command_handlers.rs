//! Command handlers for the turn rotation context.
//!
//! Each handler checks the caller's rights and the channel's state, then
//! drives the [`InitiativeManager`]. The manager lock is held for the whole
//! handler so commands against a channel never interleave.

use std::sync::{Mutex, MutexGuard};

use popcorn_core::caller::ManagerRoles;
use popcorn_core::command::Command;
use popcorn_core::error::DomainError;
use popcorn_core::ids::ActorId;
use serde::Serialize;
use tracing::info;

use crate::domain::commands::{
    AddToPool, ClearInitiative, ClearPool, EndInitiative, JoinInitiative, ListPool, PassTurn,
    RemoveFromPool, StartInitiative,
};
use crate::domain::manager::InitiativeManager;
use crate::domain::pool::PlayerPool;

/// What happened when the turn was passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The turn moved to `next` within the current rotation.
    Passed {
        /// The actor now holding the turn.
        next: ActorId,
    },
    /// Everyone had acted, so the pool was dealt again.
    NewRound {
        /// The actor going first in the new round.
        first: ActorId,
    },
    /// The pool was empty, so the rotation ended.
    Ended,
}

/// Locks the manager, mapping a poisoned lock to an infrastructure error.
pub(crate) fn lock(
    manager: &Mutex<InitiativeManager>,
) -> Result<MutexGuard<'_, InitiativeManager>, DomainError> {
    manager.lock().map_err(|e| {
        DomainError::Infrastructure(format!("initiative manager mutex poisoned: {e}"))
    })
}

fn log_command(command: &dyn Command) {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        channel = %command.channel(),
        caller = %command.caller().actor_id,
        "handling command"
    );
}

fn require_manager(
    command: &dyn Command,
    roles: &ManagerRoles,
    action: &str,
) -> Result<(), DomainError> {
    if roles.is_manager(command.caller()) {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied(format!(
            "a manager role ({}) is required to {action}",
            roles.names().join(" or ")
        )))
    }
}

/// Handles `AddToPool`. Returns true if the actor was not already a member.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager.
pub fn handle_add_to_pool(
    command: &AddToPool,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<bool, DomainError> {
    log_command(command);
    require_manager(command, roles, "manage the player pool")?;

    let mut manager = lock(manager)?;
    let added = !manager.player_pool(command.key).contains(command.actor_id);
    manager.add_to_pool(command.key, command.actor_id);
    Ok(added)
}

/// Handles `RemoveFromPool`. Returns true if the actor was a member.
///
/// Removing an actor from the pool does not pull it out of a running
/// rotation.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager.
pub fn handle_remove_from_pool(
    command: &RemoveFromPool,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<bool, DomainError> {
    log_command(command);
    require_manager(command, roles, "manage the player pool")?;

    let mut manager = lock(manager)?;
    let removed = manager.player_pool(command.key).contains(command.actor_id);
    manager.remove_from_pool(command.key, command.actor_id);
    Ok(removed)
}

/// Handles `ListPool`, returning members sorted by identifier.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager.
pub fn handle_list_pool(
    command: &ListPool,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<Vec<ActorId>, DomainError> {
    log_command(command);
    require_manager(command, roles, "view the player pool")?;

    let manager = lock(manager)?;
    Ok(manager
        .peek_player_pool(command.key)
        .map(PlayerPool::sorted)
        .unwrap_or_default())
}

/// Handles `ClearPool`.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager.
pub fn handle_clear_pool(
    command: &ClearPool,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<(), DomainError> {
    log_command(command);
    require_manager(command, roles, "manage the player pool")?;

    lock(manager)?.clear_pool(command.key);
    Ok(())
}

/// Handles `JoinInitiative`: adds the actor to the pool and, while a
/// rotation is running, to its waiting participants.
///
/// Returns true if the actor joined the running rotation. The actor holding
/// the turn is never queued behind itself.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager.
pub fn handle_join_initiative(
    command: &JoinInitiative,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<bool, DomainError> {
    log_command(command);
    require_manager(command, roles, "add players")?;

    let mut manager = lock(manager)?;
    manager.add_to_pool(command.key, command.actor_id);

    let initiative = manager.initiative(command.key);
    if !initiative.is_active() {
        return Ok(false);
    }
    if initiative.current_actor() != Some(command.actor_id) {
        initiative.add_participant(command.actor_id);
    }
    Ok(true)
}

/// Handles `StartInitiative`: deals the pool into a fresh rotation and
/// returns who goes first.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager,
/// `DomainError::InitiativeAlreadyActive` if a rotation is running,
/// `DomainError::EmptyPool` if the pool has no members, and
/// `DomainError::NotInPool` if the requested first actor is not a member.
pub fn handle_start_initiative(
    command: &StartInitiative,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<ActorId, DomainError> {
    log_command(command);
    require_manager(command, roles, "start the initiative")?;

    let key = command.key;
    let mut manager = lock(manager)?;
    if manager.initiative(key).is_active() {
        return Err(DomainError::InitiativeAlreadyActive(key));
    }

    let pool = manager.player_pool(key);
    if pool.is_empty() {
        return Err(DomainError::EmptyPool(key));
    }
    if let Some(actor_id) = command.first_actor {
        if !pool.contains(actor_id) {
            return Err(DomainError::NotInPool { key, actor_id });
        }
    }

    let first = manager
        .initialize_initiative_from_pool(key, command.first_actor)
        .ok_or(DomainError::EmptyPool(key))?;
    info!(channel = %key, first = %first, "initiative started");
    Ok(first)
}

/// Handles `PassTurn`.
///
/// With a nominee, the turn goes to the nominee; a nominee that already
/// acted is re-admitted if it is still in the pool. A manager nominating
/// after everyone has acted starts a new round with the nominee first,
/// adding the nominee to the pool if needed.
///
/// Without a nominee, a random waiting participant takes the turn. Once
/// everyone has acted the pool is dealt again, or the rotation ends if the
/// pool is empty.
///
/// # Errors
///
/// Returns `DomainError::InitiativeNotActive` if no rotation is running,
/// `DomainError::PermissionDenied` if the caller is neither a manager nor
/// the current actor, and `DomainError::NotInPool` if the nominee is
/// neither waiting nor in the pool.
pub fn handle_pass_turn(
    command: &PassTurn,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<TurnOutcome, DomainError> {
    log_command(command);

    let key = command.key;
    let mut manager = lock(manager)?;
    let initiative = manager.initiative(key);
    let Some(current) = initiative.current_actor() else {
        return Err(DomainError::InitiativeNotActive(key));
    };
    let has_participants = initiative.has_participants();

    let is_manager = roles.is_manager(&command.caller);
    if !is_manager && command.caller.actor_id != current {
        return Err(DomainError::PermissionDenied(format!(
            "only the current actor ({current}) or a manager can pass the turn"
        )));
    }

    let outcome = match command.nominee {
        Some(nominee) if is_manager && !has_participants => {
            manager.add_to_pool(key, nominee);
            let first = manager
                .initialize_initiative_from_pool(key, Some(nominee))
                .ok_or(DomainError::EmptyPool(key))?;
            TurnOutcome::NewRound { first }
        }
        Some(nominee) => {
            let in_pool = manager.player_pool(key).contains(nominee);
            let initiative = manager.initiative(key);
            if !initiative.participants().contains(&nominee) {
                if !in_pool {
                    return Err(DomainError::NotInPool {
                        key,
                        actor_id: nominee,
                    });
                }
                initiative.add_participant(nominee);
            }
            initiative.set_current_actor(nominee);
            TurnOutcome::Passed { next: nominee }
        }
        None if !has_participants => {
            if let Some(first) = manager.initialize_initiative_from_pool(key, None) {
                TurnOutcome::NewRound { first }
            } else {
                manager.initiative(key).reset();
                TurnOutcome::Ended
            }
        }
        None => {
            if let Some(next) = manager.select_random_participant(key) {
                manager.initiative(key).set_current_actor(next);
                TurnOutcome::Passed { next }
            } else {
                manager.initiative(key).reset();
                TurnOutcome::Ended
            }
        }
    };

    info!(channel = %key, ?outcome, "turn passed");
    Ok(outcome)
}

/// Handles `EndInitiative`.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager
/// and `DomainError::InitiativeNotActive` if no rotation is running.
pub fn handle_end_initiative(
    command: &EndInitiative,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<(), DomainError> {
    log_command(command);
    require_manager(command, roles, "end the initiative")?;

    let mut manager = lock(manager)?;
    let initiative = manager.initiative(command.key);
    if !initiative.is_active() {
        return Err(DomainError::InitiativeNotActive(command.key));
    }
    initiative.reset();
    Ok(())
}

/// Handles `ClearInitiative`. Succeeds whether or not a rotation exists.
///
/// # Errors
///
/// Returns `DomainError::PermissionDenied` if the caller is not a manager.
pub fn handle_clear_initiative(
    command: &ClearInitiative,
    roles: &ManagerRoles,
    manager: &Mutex<InitiativeManager>,
) -> Result<(), DomainError> {
    log_command(command);
    require_manager(command, roles, "clear the initiative")?;

    lock(manager)?.clear_initiative(command.key);
    Ok(())
}
