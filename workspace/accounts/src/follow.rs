//! Follow graph operations over the `user_followers` edge table.
//!
//! An edge `(user_id, follower_id)` means `follower_id` follows `user_id`.
//! "followers of X" reads edges by `user_id`, "following of X" reads them by
//! `follower_id`.

use chrono::Utc;
use model::entities::{user, user_follower};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::{debug, info, instrument, trace};

use crate::error::{AccountsError, Result};

/// Follower/following totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowCounts {
    pub followers: u64,
    pub following: u64,
}

async fn load_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<user::Model> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(AccountsError::UserNotFound(user_id))
}

/// Makes `follower_id` follow `followee_id`.
///
/// Returns `true` when a new edge was stored and `false` when it already existed.
#[instrument(skip(db))]
pub async fn follow<C: ConnectionTrait>(db: &C, follower_id: i32, followee_id: i32) -> Result<bool> {
    if follower_id == followee_id {
        return Err(AccountsError::validation("A user cannot follow themselves"));
    }
    load_user(db, follower_id).await?;
    load_user(db, followee_id).await?;

    let edge = user_follower::ActiveModel {
        user_id: Set(followee_id),
        follower_id: Set(follower_id),
        created_at: Set(Utc::now()),
    };

    trace!("Inserting follow edge");
    let inserted = user_follower::Entity::insert(edge)
        .on_conflict(
            OnConflict::columns([
                user_follower::Column::UserId,
                user_follower::Column::FollowerId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if inserted > 0 {
        info!("User {} now follows user {}", follower_id, followee_id);
        Ok(true)
    } else {
        debug!("User {} already follows user {}", follower_id, followee_id);
        Ok(false)
    }
}

/// Removes the edge if present. Returns `true` when an edge was deleted.
#[instrument(skip(db))]
pub async fn unfollow<C: ConnectionTrait>(
    db: &C,
    follower_id: i32,
    followee_id: i32,
) -> Result<bool> {
    let result = user_follower::Entity::delete_many()
        .filter(user_follower::Column::UserId.eq(followee_id))
        .filter(user_follower::Column::FollowerId.eq(follower_id))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!("User {} unfollowed user {}", follower_id, followee_id);
        Ok(true)
    } else {
        debug!("User {} was not following user {}", follower_id, followee_id);
        Ok(false)
    }
}

pub async fn is_following<C: ConnectionTrait>(
    db: &C,
    follower_id: i32,
    followee_id: i32,
) -> Result<bool> {
    let edge = user_follower::Entity::find_by_id((followee_id, follower_id))
        .one(db)
        .await?;
    Ok(edge.is_some())
}

/// Follower and following totals for `user_id`. Fails with `UserNotFound`
/// for an unknown id.
pub async fn follow_counts<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<FollowCounts> {
    let target = load_user(db, user_id).await?;
    Ok(FollowCounts {
        followers: target.n_followers(db).await?,
        following: target.n_following(db).await?,
    })
}

/// Users following `user_id`, ordered by id.
pub async fn followers<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<user::Model>> {
    let target = load_user(db, user_id).await?;
    Ok(target.followers(db).await?)
}

/// Users `user_id` follows, ordered by id.
pub async fn following<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<user::Model>> {
    let target = load_user(db, user_id).await?;
    Ok(target.following(db).await?)
}
