#[cfg(test)]
pub mod test_utils {
    use crate::cache::FollowCountsCache;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use accounts::{ExtraFields, HashingParams, PasswordHasher, UserManager};
    use axum::Router;
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use model::entities::user;
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const ALICE_EMAIL: &str = "alice@example.com";
    pub const BOB_EMAIL: &str = "bob@example.com";
    pub const TEST_PASSWORD: &str = "correct horse battery staple";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
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

    pub fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1992, 6, 1).unwrap()
    }

    /// Create AppState for testing, with Alice and Bob already registered.
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        // Smallest Argon2 costs keep hashing out of the test runtime
        let hasher = PasswordHasher::new(HashingParams {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Minimal Argon2 parameters should be valid");
        let manager = UserManager::new(db.clone(), hasher);

        manager
            .create_user(
                ALICE_EMAIL,
                Some(TEST_PASSWORD),
                ExtraFields::new(birth_date()).with_name("Alice", "Anders"),
            )
            .await
            .expect("Failed to create Alice");
        manager
            .create_user(
                BOB_EMAIL,
                Some(TEST_PASSWORD),
                ExtraFields::new(birth_date()).with_name("Bob", "Brown"),
            )
            .await
            .expect("Failed to create Bob");

        let cache = FollowCountsCache::new(100, Duration::from_secs(60));

        AppState { db, manager, cache }
    }

    pub async fn user_id(state: &AppState, email: &str) -> i32 {
        let found: Option<user::Model> = state
            .manager
            .find_by_email(email)
            .await
            .expect("Lookup by email failed");
        found.expect("Seeded user is missing").id
    }

    /// Test subscriber writing to STDERR. `RUST_LOG` picks the level, WARN otherwise.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Router over a fresh database, plus the state behind it
    pub async fn setup_test_app_with_state() -> (Router, AppState) {
        let state = setup_test_app_state().await;
        (create_router(state.clone()), state)
    }

    pub async fn setup_test_app() -> Router {
        setup_test_app_with_state().await.0
    }
}
