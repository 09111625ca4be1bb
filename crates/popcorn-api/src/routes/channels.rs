//! Routes for per-channel pools and rotations.
//!
//! Every path is scoped by `/{community_id}/{channel_id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use popcorn_core::ids::{ActorId, ChannelKey};
use popcorn_initiative::application::command_handlers::{self, TurnOutcome};
use popcorn_initiative::application::query_handlers::{self, InitiativeStatusView};
use popcorn_initiative::domain::commands;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::CallerIdentity;
use crate::state::AppState;

/// Path parameters identifying a channel.
#[derive(Debug, Deserialize)]
pub struct ChannelPath {
    /// The community scope.
    pub community_id: u64,
    /// The channel scope.
    pub channel_id: u64,
}

impl ChannelPath {
    fn key(&self) -> ChannelKey {
        ChannelKey::new(self.community_id, self.channel_id)
    }
}

/// Path parameters identifying a pool member.
#[derive(Debug, Deserialize)]
pub struct PoolMemberPath {
    /// The community scope.
    pub community_id: u64,
    /// The channel scope.
    pub channel_id: u64,
    /// The pool member.
    pub actor_id: u64,
}

/// Request body naming one actor.
#[derive(Debug, Deserialize)]
pub struct ActorRequest {
    /// The actor to act on.
    pub actor_id: ActorId,
}

/// Request body for POST /start. An absent body means no preference.
#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    /// Who should go first; random when absent.
    #[serde(default)]
    pub first_actor_id: Option<ActorId>,
}

/// Request body for POST /next. An absent body means a random pass.
#[derive(Debug, Default, Deserialize)]
pub struct NextRequest {
    /// The nominated next actor; random when absent.
    #[serde(default)]
    pub nominee_id: Option<ActorId>,
}

/// Response body listing pool members.
#[derive(Debug, Serialize)]
pub struct PoolResponse {
    /// Pool members, sorted by identifier.
    pub members: Vec<ActorId>,
}

/// Response body after adding to or removing from the pool.
#[derive(Debug, Serialize)]
pub struct PoolChangeResponse {
    /// The affected actor.
    pub actor_id: ActorId,
    /// Whether the pool changed.
    pub changed: bool,
}

/// Response body after POST /participants.
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    /// The joining actor.
    pub actor_id: ActorId,
    /// Whether the actor joined a running rotation (as well as the pool).
    pub joined_rotation: bool,
}

/// Response body after POST /start.
#[derive(Debug, Serialize)]
pub struct StartResponse {
    /// The actor going first.
    pub first_actor_id: ActorId,
}

/// GET /pool
#[instrument(skip(state, caller))]
async fn list_pool(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<Json<PoolResponse>, ApiError> {
    let command = commands::ListPool {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
    };
    let members = command_handlers::handle_list_pool(&command, &state.roles, &state.manager)?;
    Ok(Json(PoolResponse { members }))
}

/// POST /pool
#[instrument(skip(state, caller, request), fields(actor_id = %request.actor_id))]
async fn add_to_pool(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
    Json(request): Json<ActorRequest>,
) -> Result<Json<PoolChangeResponse>, ApiError> {
    let command = commands::AddToPool {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
        actor_id: request.actor_id,
    };
    let changed = command_handlers::handle_add_to_pool(&command, &state.roles, &state.manager)?;
    Ok(Json(PoolChangeResponse {
        actor_id: request.actor_id,
        changed,
    }))
}

/// DELETE /pool/{actor_id}
#[instrument(skip(state, caller))]
async fn remove_from_pool(
    State(state): State<AppState>,
    Path(path): Path<PoolMemberPath>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<Json<PoolChangeResponse>, ApiError> {
    let actor_id = ActorId(path.actor_id);
    let command = commands::RemoveFromPool {
        correlation_id: Uuid::new_v4(),
        key: ChannelKey::new(path.community_id, path.channel_id),
        caller,
        actor_id,
    };
    let changed =
        command_handlers::handle_remove_from_pool(&command, &state.roles, &state.manager)?;
    Ok(Json(PoolChangeResponse { actor_id, changed }))
}

/// DELETE /pool
#[instrument(skip(state, caller))]
async fn clear_pool(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<StatusCode, ApiError> {
    let command = commands::ClearPool {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
    };
    command_handlers::handle_clear_pool(&command, &state.roles, &state.manager)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /participants
#[instrument(skip(state, caller, request), fields(actor_id = %request.actor_id))]
async fn join_initiative(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
    Json(request): Json<ActorRequest>,
) -> Result<Json<JoinResponse>, ApiError> {
    let command = commands::JoinInitiative {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
        actor_id: request.actor_id,
    };
    let joined_rotation =
        command_handlers::handle_join_initiative(&command, &state.roles, &state.manager)?;
    Ok(Json(JoinResponse {
        actor_id: request.actor_id,
        joined_rotation,
    }))
}

/// POST /start
#[instrument(skip(state, caller, request))]
async fn start_initiative(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
    request: Option<Json<StartRequest>>,
) -> Result<Json<StartResponse>, ApiError> {
    let command = commands::StartInitiative {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
        first_actor: request.map(|Json(body)| body).unwrap_or_default().first_actor_id,
    };
    let first_actor_id =
        command_handlers::handle_start_initiative(&command, &state.roles, &state.manager)?;
    Ok(Json(StartResponse { first_actor_id }))
}

/// POST /next
#[instrument(skip(state, caller, request))]
async fn pass_turn(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
    request: Option<Json<NextRequest>>,
) -> Result<Json<TurnOutcome>, ApiError> {
    let command = commands::PassTurn {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
        nominee: request.map(|Json(body)| body).unwrap_or_default().nominee_id,
    };
    let outcome = command_handlers::handle_pass_turn(&command, &state.roles, &state.manager)?;
    Ok(Json(outcome))
}

/// POST /end
#[instrument(skip(state, caller))]
async fn end_initiative(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<StatusCode, ApiError> {
    let command = commands::EndInitiative {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
    };
    command_handlers::handle_end_initiative(&command, &state.roles, &state.manager)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /initiative
#[instrument(skip(state, caller))]
async fn clear_initiative(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<StatusCode, ApiError> {
    let command = commands::ClearInitiative {
        correlation_id: Uuid::new_v4(),
        key: path.key(),
        caller,
    };
    command_handlers::handle_clear_initiative(&command, &state.roles, &state.manager)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /status
#[instrument(skip(state))]
async fn status(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
) -> Result<Json<InitiativeStatusView>, ApiError> {
    let view = query_handlers::get_status(path.key(), &state.manager)?;
    Ok(Json(view))
}

/// Returns the router for channel-scoped routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{community_id}/{channel_id}/pool",
            get(list_pool).post(add_to_pool).delete(clear_pool),
        )
        .route(
            "/{community_id}/{channel_id}/pool/{actor_id}",
            delete(remove_from_pool),
        )
        .route("/{community_id}/{channel_id}/participants", post(join_initiative))
        .route("/{community_id}/{channel_id}/start", post(start_initiative))
        .route("/{community_id}/{channel_id}/next", post(pass_turn))
        .route("/{community_id}/{channel_id}/end", post(end_initiative))
        .route("/{community_id}/{channel_id}/initiative", delete(clear_initiative))
        .route("/{community_id}/{channel_id}/status", get(status))
}
