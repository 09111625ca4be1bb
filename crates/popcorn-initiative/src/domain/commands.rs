//! Commands for the turn rotation context.

use popcorn_core::caller::Caller;
use popcorn_core::command::Command;
use popcorn_core::ids::{ActorId, ChannelKey};
use uuid::Uuid;

macro_rules! impl_command {
    ($ty:ty, $name:literal) => {
        impl Command for $ty {
            fn command_type(&self) -> &'static str {
                $name
            }

            fn correlation_id(&self) -> Uuid {
                self.correlation_id
            }

            fn channel(&self) -> ChannelKey {
                self.key
            }

            fn caller(&self) -> &Caller {
                &self.caller
            }
        }
    };
}

/// Command to add an actor to the channel's player pool.
#[derive(Debug, Clone)]
pub struct AddToPool {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
    /// The actor to add.
    pub actor_id: ActorId,
}

/// Command to remove an actor from the channel's player pool.
#[derive(Debug, Clone)]
pub struct RemoveFromPool {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
    /// The actor to remove.
    pub actor_id: ActorId,
}

/// Command to list the channel's player pool.
#[derive(Debug, Clone)]
pub struct ListPool {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
}

/// Command to empty the channel's player pool.
#[derive(Debug, Clone)]
pub struct ClearPool {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
}

/// Command to add an actor to the pool and, if a rotation is running, to
/// its waiting participants.
#[derive(Debug, Clone)]
pub struct JoinInitiative {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
    /// The actor joining.
    pub actor_id: ActorId,
}

/// Command to start a rotation from the channel's pool.
#[derive(Debug, Clone)]
pub struct StartInitiative {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
    /// Who should go first; random when absent.
    pub first_actor: Option<ActorId>,
}

/// Command to pass the turn, to a nominee or at random.
#[derive(Debug, Clone)]
pub struct PassTurn {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
    /// The nominated next actor.
    pub nominee: Option<ActorId>,
}

/// Command to end a running rotation.
#[derive(Debug, Clone)]
pub struct EndInitiative {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
}

/// Command to clear the channel's rotation whether or not it is running.
#[derive(Debug, Clone)]
pub struct ClearInitiative {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target channel.
    pub key: ChannelKey,
    /// Who issued the command.
    pub caller: Caller,
}

impl_command!(AddToPool, "popcorn.add_to_pool");
impl_command!(RemoveFromPool, "popcorn.remove_from_pool");
impl_command!(ListPool, "popcorn.list_pool");
impl_command!(ClearPool, "popcorn.clear_pool");
impl_command!(JoinInitiative, "popcorn.join_initiative");
impl_command!(StartInitiative, "popcorn.start_initiative");
impl_command!(PassTurn, "popcorn.pass_turn");
impl_command!(EndInitiative, "popcorn.end_initiative");
impl_command!(ClearInitiative, "popcorn.clear_initiative");
