pub mod follows;
pub mod health;
pub mod users;
