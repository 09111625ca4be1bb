//! Caller fixtures.

use popcorn_core::caller::{Caller, GM_ROLE_NAME};
use popcorn_core::ids::ActorId;

/// A caller holding the GM role.
#[must_use]
pub fn manager(actor_id: u64) -> Caller {
    Caller::new(ActorId(actor_id), vec![GM_ROLE_NAME.to_owned()])
}

/// A caller with no manager role.
#[must_use]
pub fn player(actor_id: u64) -> Caller {
    Caller::new(ActorId(actor_id), vec!["Player".to_owned()])
}
