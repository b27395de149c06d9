use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// A single follow edge: `follower_id` follows `user_id`.
/// The pair is the primary key, so an edge is stored at most once.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_followers")]
pub struct Model {
    /// The user being followed.
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    /// The user doing the following.
    #[sea_orm(primary_key, auto_increment = false)]
    pub follower_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Follower,
}

impl ActiveModelBehavior for ActiveModel {}
