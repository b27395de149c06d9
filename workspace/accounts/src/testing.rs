//! Shared fixtures for the accounts tests.

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use crate::manager::UserManager;
use crate::password::{HashingParams, PasswordHasher};

/// Argon2 with the smallest accepted costs, so tests do not spend seconds hashing.
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(HashingParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Minimal Argon2 parameters should be valid")
}

pub fn birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 15).unwrap()
}

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    db.execute_unprepared("PRAGMA foreign_keys = ON;")
        .await
        .expect("Failed to enable foreign keys");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn setup_manager() -> UserManager {
    UserManager::new(setup_db().await, fast_hasher())
}
