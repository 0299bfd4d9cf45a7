//! Shared fixtures for cellar integration tests.

use sqlx::PgPool;
use vinoteca_core::slot::{Depth, SlotCoordinate};
use vinoteca_core::types::DbId;
use vinoteca_db::models::storage_unit::{CreateStorageUnit, UpdateStorageUnit};
use vinoteca_db::models::wine::CreateWine;
use vinoteca_db::repositories::{StorageUnitRepo, WineRepo};

pub async fn seed_wine(pool: &PgPool, name: &str) -> DbId {
    WineRepo::create(
        pool,
        &CreateWine {
            name: name.to_string(),
            producer: None,
            vintage: None,
            region: None,
            grape_variety: None,
            notes: None,
            rating: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn seed_unit(pool: &PgPool, name: &str, stacking_enabled: bool) -> DbId {
    StorageUnitRepo::create(
        pool,
        &CreateStorageUnit {
            name: name.to_string(),
            shelf_count: 6,
            column_count: 8,
            stacking_enabled: Some(stacking_enabled),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn set_stacking(pool: &PgPool, unit_id: DbId, enabled: bool) {
    StorageUnitRepo::update(
        pool,
        unit_id,
        &UpdateStorageUnit {
            stacking_enabled: Some(enabled),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
}

pub fn coord(shelf: i16, column: i16, depth: Depth) -> SlotCoordinate {
    SlotCoordinate::new(shelf, column, depth).unwrap()
}
