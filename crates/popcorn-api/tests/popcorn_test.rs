//! Integration tests for the popcorn turn rotation routes.

mod common;

use axum::http::StatusCode;
use common::{GM, PLAYER};
use popcorn_test_support::SequenceRng;
use serde_json::{Value, json};

const CHANNEL: &str = "/api/v1/channels/10/20";

fn uri(path: &str) -> String {
    format!("{CHANNEL}{path}")
}

async fn fill_pool(app: &axum::Router, ids: &[u64]) {
    for id in ids {
        let (status, _) = common::send(
            app,
            "POST",
            &uri("/pool"),
            1,
            GM,
            Some(&json!({ "actor_id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_popcorn_full_session_lifecycle() {
    let (app, _) = common::build_test_app();
    fill_pool(&app, &[4, 2, 3]).await;

    // GET /pool — sorted membership
    let (status, json) = common::send(&app, "GET", &uri("/pool"), 1, GM, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["members"], json!([2, 3, 4]));

    // Players cannot start a rotation.
    let (status, json) =
        common::send(&app, "POST", &uri("/start"), 3, PLAYER, Some(&json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "permission_denied");

    // GM starts with actor 3.
    let (status, json) = common::send(
        &app,
        "POST",
        &uri("/start"),
        1,
        GM,
        Some(&json!({ "first_actor_id": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["first_actor_id"], 3);

    // A second start is rejected.
    let (status, json) =
        common::send(&app, "POST", &uri("/start"), 1, GM, Some(&json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "initiative_already_active");

    // Only the current actor (or a manager) may pass.
    let (status, _) =
        common::send(&app, "POST", &uri("/next"), 2, PLAYER, Some(&json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Actor 3 nominates 4.
    let (status, json) = common::send(
        &app,
        "POST",
        &uri("/next"),
        3,
        PLAYER,
        Some(&json!({ "nominee_id": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "outcome": "passed", "next": 4 }));

    // Actor 4 passes at random; only 2 is left waiting.
    let (status, json) =
        common::send(&app, "POST", &uri("/next"), 4, PLAYER, Some(&json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "outcome": "passed", "next": 2 }));

    // Everyone has acted: the pool is dealt again.
    let (status, json) =
        common::send(&app, "POST", &uri("/next"), 2, PLAYER, Some(&json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "new_round");
    let first = json["first"].as_u64().unwrap();
    assert!([2, 3, 4].contains(&first));

    // GET /status — history keeps each actor once across rounds.
    let (status, json) = common::get_json(&app, &uri("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active"], true);
    assert_eq!(json["current_actor"], first);
    assert_eq!(json["participants"].as_array().unwrap().len(), 2);
    assert_eq!(json["history"], json!([3, 4, 2]));

    // GM ends the rotation; the pool survives.
    let (status, json) = common::send(&app, "POST", &uri("/end"), 1, GM, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(json, Value::Null);

    let (_, json) = common::get_json(&app, &uri("/status")).await;
    assert_eq!(json["active"], false);
    assert_eq!(json["history"], json!([]));
    assert_eq!(json["pool"], json!([2, 3, 4]));

    let (status, json) = common::send(&app, "POST", &uri("/end"), 1, GM, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "initiative_not_active");
}

#[tokio::test]
async fn test_popcorn_random_start_uses_injected_rng() {
    // Index 1 of the dealt pool goes first, then index 0 of the rest.
    let (app, state) = common::build_test_app_with_rng(SequenceRng::new(vec![1, 0]));
    fill_pool(&app, &[2, 3, 4]).await;

    let (status, json) =
        common::send(&app, "POST", &uri("/start"), 1, GM, Some(&json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let first = json["first_actor_id"].as_u64().unwrap();

    let (_, status_json) = common::get_json(&app, &uri("/status")).await;
    let waiting: Vec<u64> = status_json["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect();
    assert_eq!(waiting.len(), 2);
    assert!(!waiting.contains(&first));

    let (_, json) = common::send(&app, "POST", &uri("/next"), 1, GM, Some(&json!({}))).await;
    assert_eq!(json["next"].as_u64().unwrap(), waiting[0]);
    assert_eq!(state.manager.lock().unwrap().channel_count(), 1);
}

#[tokio::test]
async fn test_popcorn_join_mid_rotation_and_pool_changes() {
    let (app, _) = common::build_test_app();
    fill_pool(&app, &[2]).await;
    common::send(
        &app,
        "POST",
        &uri("/start"),
        1,
        GM,
        Some(&json!({ "first_actor_id": 2 })),
    )
    .await;

    // POST /participants joins the running rotation.
    let (status, json) = common::send(
        &app,
        "POST",
        &uri("/participants"),
        1,
        GM,
        Some(&json!({ "actor_id": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["joined_rotation"], true);

    // A nominee outside both pool and rotation is rejected.
    let (status, json) = common::send(
        &app,
        "POST",
        &uri("/next"),
        2,
        PLAYER,
        Some(&json!({ "nominee_id": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "not_in_pool");

    // DELETE /pool/{actor_id}
    let (status, json) = common::send(&app, "DELETE", &uri("/pool/5"), 1, GM, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["changed"], true);

    // Actor 5 still waits in the rotation and can take the turn.
    let (_, json) = common::send(&app, "POST", &uri("/next"), 2, PLAYER, Some(&json!({}))).await;
    assert_eq!(json, json!({ "outcome": "passed", "next": 5 }));

    // With the pool cleared, the exhausted rotation ends.
    let (status, _) = common::send(&app, "DELETE", &uri("/pool"), 1, GM, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = common::send(&app, "POST", &uri("/next"), 5, PLAYER, Some(&json!({}))).await;
    assert_eq!(json, json!({ "outcome": "ended" }));

    let (_, json) = common::get_json(&app, &uri("/status")).await;
    assert_eq!(json["active"], false);
}

#[tokio::test]
async fn test_popcorn_channels_are_isolated() {
    let (app, _) = common::build_test_app();
    fill_pool(&app, &[2, 3]).await;
    common::send(&app, "POST", &uri("/start"), 1, GM, Some(&json!({}))).await;

    let (_, json) = common::get_json(&app, "/api/v1/channels/10/21/status").await;
    assert_eq!(json["active"], false);
    assert_eq!(json["pool"], json!([]));

    let (_, json) = common::get_json(&app, "/api/v1/channels/11/20/status").await;
    assert_eq!(json["active"], false);

    let (_, json) = common::get_json(&app, &uri("/status")).await;
    assert_eq!(json["active"], true);
}

#[tokio::test]
async fn test_popcorn_custom_role_header_parsing() {
    let (app, _) = common::build_test_app();

    // Extra roles and whitespace around the manager role are accepted.
    let (status, _) = common::send(
        &app,
        "POST",
        &uri("/pool"),
        1,
        "Player,  Popcorn Manager ",
        Some(&json!({ "actor_id": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Role matching is case sensitive.
    let (status, _) = common::send(
        &app,
        "POST",
        &uri("/pool"),
        1,
        "gm",
        Some(&json!({ "actor_id": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
