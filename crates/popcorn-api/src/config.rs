//! Server configuration read from the environment.

use std::net::SocketAddr;

use popcorn_core::caller::ManagerRoles;
use popcorn_core::rng::SystemRng;

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Role names granting manager rights (`POPCORN_MANAGER_ROLES`).
    pub manager_roles: ManagerRoles,
    /// Optional fixed seed for the random source (`POPCORN_RNG_SEED`).
    pub rng_seed: Option<u64>,
}

impl ApiConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

        let manager_roles = match lookup("POPCORN_MANAGER_ROLES") {
            Some(raw) => {
                let roles = ManagerRoles::new(raw.split(','));
                if roles.names().is_empty() {
                    return Err(AppError::Config(
                        "POPCORN_MANAGER_ROLES must name at least one role".to_string(),
                    ));
                }
                roles
            }
            None => ManagerRoles::default(),
        };

        let rng_seed = lookup("POPCORN_RNG_SEED")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    AppError::Config(format!("POPCORN_RNG_SEED must be a valid u64: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            manager_roles,
            rng_seed,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` does not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// Builds the random source, seeded when a seed is configured.
    #[must_use]
    pub fn rng(&self) -> SystemRng {
        match self.rng_seed {
            Some(seed) => SystemRng::seeded(seed),
            None => SystemRng::from_os_rng(),
        }
    }
}
