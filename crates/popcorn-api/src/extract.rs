//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use popcorn_core::caller::Caller;
use popcorn_core::error::DomainError;
use popcorn_core::ids::ActorId;

use crate::error::ApiError;

/// Header carrying the calling actor's identifier.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header carrying the calling actor's role names, comma separated.
pub const ACTOR_ROLES_HEADER: &str = "x-actor-roles";

/// The caller resolved from request headers.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Caller);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .ok_or_else(|| invalid(format!("missing {ACTOR_ID_HEADER} header")))?;
        let actor_id = raw_id
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .ok_or_else(|| invalid(format!("{ACTOR_ID_HEADER} must be an unsigned integer")))?;

        let roles = match parts.headers.get(ACTOR_ROLES_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| invalid(format!("{ACTOR_ROLES_HEADER} must be visible ASCII")))?
                .split(',')
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(str::to_owned)
                .collect(),
            None => Vec::new(),
        };

        Ok(Self(Caller::new(ActorId(actor_id), roles)))
    }
}

fn invalid(message: String) -> ApiError {
    ApiError(DomainError::Validation(message))
}
