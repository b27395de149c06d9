use super::user_follower;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Location stored when the user does not provide one.
pub const DEFAULT_LOCATION: &str = "India";

/// Placeholder biography stored when the user does not provide one.
pub const DEFAULT_BIO: &str = "Lorem ipsum dolor sit amet consectetur adipisicing elit. \
Dolorum deserunt cum consectetur ratione quisquam accusamus ipsum, voluptates repellendus \
obcaecati? Minima?";

pub const MAX_NAME_LENGTH: usize = 150;
pub const MAX_LOCATION_LENGTH: usize = 30;
pub const MAX_BIO_LENGTH: usize = 500;

/// Gender of a user. Stored as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Gender {
    #[sea_orm(string_value = "others")]
    Others,
    #[default]
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Others => "others",
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "others" => Ok(Gender::Others),
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!(
                "Invalid gender '{}'. Expected one of: others, male, female",
                other
            )),
        }
    }
}

/// Represents a user of the social network.
/// The email address is the login identifier; there is no username.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id PHC string, or an unusable marker starting with `!`.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    /// Set once the account has been verified by staff.
    pub verified: bool,
    pub profile_picture_url: String,
    pub cover_picture_url: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Inactive users cannot authenticate.
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Walks from a user to the users following them.
pub struct FollowersLink;

impl Linked for FollowersLink {
    type FromEntity = Entity;

    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            user_follower::Relation::User.def().rev(),
            user_follower::Relation::Follower.def(),
        ]
    }
}

/// Walks from a user to the users they follow.
pub struct FollowingLink;

impl Linked for FollowingLink {
    type FromEntity = Entity;

    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            user_follower::Relation::Follower.def().rev(),
            user_follower::Relation::User.def(),
        ]
    }
}

impl Model {
    /// "First Last", the name shown for the user.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Number of users following this user.
    pub async fn n_followers(&self, db: &impl ConnectionTrait) -> Result<u64, DbErr> {
        user_follower::Entity::find()
            .filter(user_follower::Column::UserId.eq(self.id))
            .count(db)
            .await
    }

    /// Number of users this user follows.
    pub async fn n_following(&self, db: &impl ConnectionTrait) -> Result<u64, DbErr> {
        user_follower::Entity::find()
            .filter(user_follower::Column::FollowerId.eq(self.id))
            .count(db)
            .await
    }

    /// Users following this user, ordered by id.
    pub async fn followers(&self, db: &impl ConnectionTrait) -> Result<Vec<Model>, DbErr> {
        self.find_linked(FollowersLink)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Users this user follows, ordered by id.
    pub async fn following(&self, db: &impl ConnectionTrait) -> Result<Vec<Model>, DbErr> {
        self.find_linked(FollowingLink)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
