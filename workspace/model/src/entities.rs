//! This file serves as the root for all SeaORM entity modules.
//! The account model uses the email address as the login identifier and
//! stores the follow graph as an explicit edge table.

pub mod user;
pub mod user_follower;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::user::Entity as User;
    pub use super::user::Gender;
    pub use super::user_follower::Entity as UserFollower;
}
