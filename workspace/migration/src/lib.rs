pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_create_users::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    #[tokio::test]
    async fn test_up_and_down() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        Migrator::up(&db, None).await?;
        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("users").await?);
        assert!(manager.has_table("user_followers").await?);
        assert!(manager.has_column("users", "email").await?);

        Migrator::down(&db, None).await?;
        assert!(!manager.has_table("users").await?);
        assert!(!manager.has_table("user_followers").await?);
        Ok(())
    }
}
