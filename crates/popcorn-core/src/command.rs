//! Command abstractions.

use uuid::Uuid;

use crate::caller::Caller;
use crate::ids::ChannelKey;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The channel the command targets.
    fn channel(&self) -> ChannelKey;

    /// The actor that issued the command.
    fn caller(&self) -> &Caller;
}
