//! Shared application state.

use std::sync::{Arc, Mutex};

use popcorn_core::caller::ManagerRoles;
use popcorn_initiative::domain::manager::InitiativeManager;

/// Application state shared across all request handlers.
///
/// The registry sits behind one mutex; handlers hold it for a single
/// command and never across an `.await`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The per-channel rotation and pool registry.
    pub manager: Arc<Mutex<InitiativeManager>>,
    /// Role names that grant manager rights.
    pub roles: Arc<ManagerRoles>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(manager: InitiativeManager, roles: ManagerRoles) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
            roles: Arc::new(roles),
        }
    }
}
