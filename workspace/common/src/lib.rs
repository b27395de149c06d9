//! Common transport-layer types shared between the HTTP API and its clients.
//! These structs are the request/response payloads of the user and follow
//! endpoints, so a client can deserialize API responses without duplicating shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ===================== Users =====================

/// Gender as sent over the wire (lowercase).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenderDto {
    Others,
    Male,
    Female,
}

/// Request body for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct CreateUserRequest {
    /// Login email (must be unique)
    #[validate(email)]
    pub email: String,
    /// Plaintext password. Omit to create an account that cannot log in yet.
    pub password: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    /// Defaults to `male`
    pub gender: Option<GenderDto>,
    pub birth_date: NaiveDate,
    /// Defaults to `India`
    #[validate(length(max = 30))]
    pub location: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(url)]
    pub profile_picture_url: Option<String>,
    #[validate(url)]
    pub cover_picture_url: Option<String>,
}

/// Request body for updating a user's profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq, Default)]
pub struct UpdateUserRequest {
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub gender: Option<GenderDto>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 30))]
    pub location: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(url)]
    pub profile_picture_url: Option<String>,
    #[validate(url)]
    pub cover_picture_url: Option<String>,
    pub verified: Option<bool>,
    pub is_active: Option<bool>,
}

/// User response model. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub gender: GenderDto,
    pub birth_date: NaiveDate,
    pub location: String,
    pub bio: String,
    pub verified: bool,
    pub profile_picture_url: String,
    pub cover_picture_url: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    /// Number of users following this user
    pub n_followers: u64,
    /// Number of users this user follows
    pub n_following: u64,
}

/// Short form used in follower/following lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserSummaryDto {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub profile_picture_url: String,
}

// ===================== Follows =====================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FollowCountsDto {
    pub user_id: i32,
    pub followers: u64,
    pub following: u64,
}

/// Outcome of a follow or unfollow request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FollowStatusDto {
    pub follower_id: i32,
    pub followee_id: i32,
    /// Whether the edge exists after the request
    pub following: bool,
    /// False when the request did not change anything
    pub changed: bool,
}
