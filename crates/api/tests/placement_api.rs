//! Integration tests for the slot placement surface: place, move, remove,
//! undo, and the error codes the frontend branches on.

mod common;

use axum::http::StatusCode;
use common::{delete, expect_status, get, post_json, put_json, seed_unit, seed_wine};
use serde_json::json;
use sqlx::PgPool;

fn slot(unit: i64, shelf: i16, column: i16, depth: &str) -> serde_json::Value {
    json!({
        "storage_unit_id": unit,
        "shelf": shelf,
        "column": column,
        "depth": depth,
    })
}

// ---------------------------------------------------------------------------
// Placing and moving
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn place_returns_key_and_label(pool: PgPool) {
    let app = common::build_test_app(pool);
    let wine = seed_wine(&app, "Barolo 2018").await;
    let unit = seed_unit(&app, "Kitchen fridge", false).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot"),
        slot(unit, 3, 5, "front"),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["key"], "3:5:1");
    assert_eq!(json["data"]["label"], "S3 · C5 · Front");
    assert_eq!(json["data"]["assignment"]["wine_id"], wine);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn occupied_slot_returns_slot_occupied_code(pool: PgPool) {
    let app = common::build_test_app(pool);
    let first = seed_wine(&app, "Chianti").await;
    let second = seed_wine(&app, "Rioja").await;
    let unit = seed_unit(&app, "Rack", false).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{first}/slot"),
        slot(unit, 1, 1, "front"),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{second}/slot"),
        slot(unit, 1, 1, "front"),
    )
    .await;
    let json = expect_status(response, StatusCode::CONFLICT).await;

    assert_eq!(json["code"], "SLOT_OCCUPIED");
    assert!(json["error"].as_str().unwrap().contains("S1 · C1"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stacking_disabled_blocks_back_until_enabled(pool: PgPool) {
    let app = common::build_test_app(pool);
    let front = seed_wine(&app, "Front bottle").await;
    let back = seed_wine(&app, "Back bottle").await;
    let unit = seed_unit(&app, "Fridge", false).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{front}/slot"),
        slot(unit, 2, 2, "front"),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    // Back of the same column is blocked while stacking is off.
    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{back}/slot"),
        slot(unit, 2, 2, "back"),
    )
    .await;
    let json = expect_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "SLOT_OCCUPIED");
    assert!(json["error"].as_str().unwrap().contains("stacking"));

    // Enable stacking on the unit; the same placement now succeeds.
    let response = put_json(
        app.clone(),
        &format!("/api/v1/storage-units/{unit}"),
        json!({ "stacking_enabled": true }),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{back}/slot"),
        slot(unit, 2, 2, "back"),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["key"], "2:2:2");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn move_relocates_instead_of_duplicating(pool: PgPool) {
    let app = common::build_test_app(pool);
    let wine = seed_wine(&app, "Wanderer").await;
    let unit = seed_unit(&app, "Rack", false).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot"),
        slot(unit, 1, 1, "front"),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot"),
        slot(unit, 4, 4, "front"),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    // Only the new position shows up in the unit's occupancy.
    let response = get(app.clone(), &format!("/api/v1/storage-units/{unit}/occupancy")).await;
    let json = expect_status(response, StatusCode::OK).await;
    let keys = json["data"]["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0], "4:4:1");
    assert_eq!(json["data"]["front_count"], 1);
    assert_eq!(json["data"]["back_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_grid_coordinate_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let wine = seed_wine(&app, "Too high").await;
    let unit = seed_unit(&app, "Small unit", false).await;

    // seed_unit creates a 6x8 grid; shelf 7 is outside it.
    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot"),
        slot(unit, 7, 1, "front"),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Removal and undo
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn remove_unplaced_wine_returns_not_placed_code(pool: PgPool) {
    let app = common::build_test_app(pool);
    let wine = seed_wine(&app, "Shelfless").await;

    let response = delete(app.clone(), &format!("/api/v1/wines/{wine}/slot")).await;
    let json = expect_status(response, StatusCode::NOT_FOUND).await;

    assert_eq!(json["code"], "NOT_PLACED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_reverses_a_removal(pool: PgPool) {
    let app = common::build_test_app(pool);
    let wine = seed_wine(&app, "Comeback").await;
    let unit = seed_unit(&app, "Rack", false).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot"),
        slot(unit, 5, 5, "front"),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = delete(app.clone(), &format!("/api/v1/wines/{wine}/slot")).await;
    expect_status(response, StatusCode::OK).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot/undo"),
        json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["undone"], "remove");
    assert_eq!(json["data"]["restored"]["shelf"], 5);
    assert_eq!(json["data"]["restored"]["column_position"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_with_empty_history_returns_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let wine = seed_wine(&app, "Untouched").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot/undo"),
        json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::CONFLICT).await;

    assert_eq!(json["code"], "NOTHING_TO_UNDO");
}

// ---------------------------------------------------------------------------
// Storage unit lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unit_with_placed_wines_is_refused(pool: PgPool) {
    let app = common::build_test_app(pool);
    let wine = seed_wine(&app, "Anchor").await;
    let unit = seed_unit(&app, "Occupied rack", false).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/wines/{wine}/slot"),
        slot(unit, 1, 1, "front"),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = delete(app.clone(), &format!("/api/v1/storage-units/{unit}")).await;
    let json = expect_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");

    // Clearing the slot makes deletion possible.
    let response = delete(app.clone(), &format!("/api/v1/wines/{wine}/slot")).await;
    expect_status(response, StatusCode::OK).await;

    let response = delete(app.clone(), &format!("/api/v1/storage-units/{unit}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
