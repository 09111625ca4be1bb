//! Caller identity and manager-role policy.
//!
//! Hosts resolve who issued a command into a [`Caller`]: the actor's
//! identifier plus the names of the roles it holds. Whether those roles
//! grant administrative rights is decided by [`ManagerRoles`].

use serde::{Deserialize, Serialize};

use crate::ids::ActorId;

/// Role name granted full control over pools and rotations.
pub const GM_ROLE_NAME: &str = "GM";

/// Secondary role name with the same rights as [`GM_ROLE_NAME`].
pub const POPCORN_MANAGER_ROLE_NAME: &str = "Popcorn Manager";

/// The actor issuing a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The actor's identifier.
    pub actor_id: ActorId,
    /// Names of the roles the actor holds in the community.
    pub roles: Vec<String>,
}

impl Caller {
    /// Creates a caller holding the given roles.
    #[must_use]
    pub fn new(actor_id: ActorId, roles: Vec<String>) -> Self {
        Self { actor_id, roles }
    }
}

/// The set of role names treated as managers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerRoles {
    names: Vec<String>,
}

impl ManagerRoles {
    /// Creates a policy from explicit role names. Blank names are dropped.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Returns the configured role names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true if the caller holds at least one manager role.
    #[must_use]
    pub fn is_manager(&self, caller: &Caller) -> bool {
        caller
            .roles
            .iter()
            .any(|role| self.names.iter().any(|name| name == role))
    }
}

impl Default for ManagerRoles {
    fn default() -> Self {
        Self::new([GM_ROLE_NAME, POPCORN_MANAGER_ROLE_NAME])
    }
}
