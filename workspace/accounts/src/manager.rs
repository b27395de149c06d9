//! User creation and lookup.
//!
//! Every account is created through [`UserManager`], which normalises the
//! email, applies the staff/superuser rules and hashes the password before
//! the record is persisted.

use chrono::{NaiveDate, Utc};
use model::entities::user::{
    self, DEFAULT_BIO, DEFAULT_LOCATION, Gender, MAX_BIO_LENGTH, MAX_LOCATION_LENGTH,
    MAX_NAME_LENGTH,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::auth::Credentials;
use crate::error::{AccountsError, Result};
use crate::password::PasswordHasher;

/// Fields supplied alongside email and password when creating a user.
///
/// `birth_date` is required on every creation path. The flag fields are
/// `Option` so that "explicitly false" can be told apart from "not given".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraFields {
    pub birth_date: NaiveDate,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub cover_picture_url: Option<String>,
    pub verified: Option<bool>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl ExtraFields {
    pub fn new(birth_date: NaiveDate) -> Self {
        Self {
            birth_date,
            first_name: None,
            last_name: None,
            gender: None,
            location: None,
            bio: None,
            profile_picture_url: None,
            cover_picture_url: None,
            verified: None,
            is_active: None,
            is_staff: None,
            is_superuser: None,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }
}

/// Partial update of the editable profile fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub cover_picture_url: Option<String>,
    pub verified: Option<bool>,
    pub is_active: Option<bool>,
}

fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max {
        return Err(AccountsError::validation(format!(
            "{field} must be at most {max} characters (got {length})"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct UserManager {
    db: DatabaseConnection,
    hasher: PasswordHasher,
}

impl UserManager {
    pub fn new(db: DatabaseConnection, hasher: PasswordHasher) -> Self {
        Self { db, hasher }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Trims surrounding whitespace and lower-cases the domain part of an
    /// email address. The local part is case sensitive and is kept as given.
    pub fn normalize_email(email: &str) -> String {
        let email = email.trim();
        match email.rsplit_once('@') {
            Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
            None => email.to_string(),
        }
    }

    /// Create and save a regular user.
    ///
    /// A `None` password stores an unusable password: the account exists but
    /// cannot log in until a password is set.
    #[instrument(skip(self, password, fields))]
    pub async fn create_user(
        &self,
        email: &str,
        password: Option<&str>,
        mut fields: ExtraFields,
    ) -> Result<user::Model> {
        trace!("Entering create_user");
        fields.is_staff.get_or_insert(false);
        fields.is_superuser.get_or_insert(false);
        self.create(email, password, fields).await
    }

    /// Create and save a superuser. Staff and superuser flags default to true
    /// and may not be overridden to false; first and last name are required.
    #[instrument(skip(self, password, fields))]
    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        mut fields: ExtraFields,
    ) -> Result<user::Model> {
        trace!("Entering create_superuser");
        if !*fields.is_staff.get_or_insert(true) {
            return Err(AccountsError::validation("Superuser must have is_staff=True."));
        }
        if !*fields.is_superuser.get_or_insert(true) {
            return Err(AccountsError::validation(
                "Superuser must have is_superuser=True.",
            ));
        }

        for (label, value) in [
            ("first name", &fields.first_name),
            ("last name", &fields.last_name),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                return Err(AccountsError::validation(format!(
                    "Superuser must have a {label}."
                )));
            }
        }

        self.create(email, Some(password), fields).await
    }

    async fn create(
        &self,
        email: &str,
        password: Option<&str>,
        fields: ExtraFields,
    ) -> Result<user::Model> {
        let email = Self::normalize_email(email);
        if email.is_empty() {
            return Err(AccountsError::validation("The given email must be set"));
        }
        debug!("Normalized email: {}", email);

        let first_name = fields.first_name.unwrap_or_default();
        let last_name = fields.last_name.unwrap_or_default();
        let location = fields.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let bio = fields.bio.unwrap_or_else(|| DEFAULT_BIO.to_string());
        check_length("first_name", &first_name, MAX_NAME_LENGTH)?;
        check_length("last_name", &last_name, MAX_NAME_LENGTH)?;
        check_length("location", &location, MAX_LOCATION_LENGTH)?;
        check_length("bio", &bio, MAX_BIO_LENGTH)?;

        let password = match password {
            Some(raw) => self.hasher.hash(raw)?,
            None => {
                debug!("No password given, storing an unusable password");
                self.hasher.make_unusable()
            }
        };

        let new_user = user::ActiveModel {
            email: Set(email.clone()),
            password: Set(password),
            first_name: Set(first_name),
            last_name: Set(last_name),
            gender: Set(fields.gender.unwrap_or_default()),
            birth_date: Set(fields.birth_date),
            location: Set(location),
            bio: Set(bio),
            verified: Set(fields.verified.unwrap_or(false)),
            profile_picture_url: Set(fields.profile_picture_url.unwrap_or_default()),
            cover_picture_url: Set(fields.cover_picture_url.unwrap_or_default()),
            is_staff: Set(fields.is_staff.unwrap_or(false)),
            is_superuser: Set(fields.is_superuser.unwrap_or(false)),
            is_active: Set(fields.is_active.unwrap_or(true)),
            date_joined: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };

        trace!("Attempting to insert new user into database");
        match new_user.insert(&self.db).await {
            Ok(created) => {
                info!(
                    "User created with ID: {}, email: {}, staff: {}, superuser: {}",
                    created.id, created.email, created.is_staff, created.is_superuser
                );
                Ok(created)
            }
            Err(db_error) => {
                error!("Failed to create user '{}': {}", email, db_error);
                Err(db_error.into())
            }
        }
    }

    pub async fn get(&self, user_id: i32) -> Result<user::Model> {
        user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(AccountsError::UserNotFound(user_id))
    }

    /// Looks a user up by login email. The domain part is matched case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let email = Self::normalize_email(email);
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    pub async fn list(&self) -> Result<Vec<user::Model>> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Returns the user when `email`/`password` match an active account and
    /// records the login time. Any mismatch yields `Ok(None)`.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<user::Model>> {
        let Some(found) = self.find_by_email(email).await? else {
            // Keep response time independent of whether the email exists.
            self.hasher.hash(password)?;
            debug!("Authentication failed: unknown email");
            return Ok(None);
        };

        if !found.check_password(&self.hasher, password)? {
            warn!("Authentication failed for user {}", found.id);
            return Ok(None);
        }

        let mut active: user::ActiveModel = found.into();
        active.last_login = Set(Some(Utc::now()));
        let logged_in = active.update(&self.db).await?;
        info!("User {} authenticated", logged_in.id);
        Ok(Some(logged_in))
    }

    /// Replaces the stored password. `None` makes the password unusable.
    #[instrument(skip(self, password))]
    pub async fn set_password(&self, user_id: i32, password: Option<&str>) -> Result<user::Model> {
        let existing = self.get(user_id).await?;
        let hash = match password {
            Some(raw) => self.hasher.hash(raw)?,
            None => self.hasher.make_unusable(),
        };

        let mut active: user::ActiveModel = existing.into();
        active.password = Set(hash);
        let updated = active.update(&self.db).await?;
        info!("Password updated for user {}", user_id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, user_id: i32, changes: ProfileChanges) -> Result<user::Model> {
        let existing = self.get(user_id).await?;
        let mut active: user::ActiveModel = existing.clone().into();
        let mut updated_fields = Vec::new();

        if let Some(first_name) = changes.first_name {
            check_length("first_name", &first_name, MAX_NAME_LENGTH)?;
            active.first_name = Set(first_name);
            updated_fields.push("first_name");
        }
        if let Some(last_name) = changes.last_name {
            check_length("last_name", &last_name, MAX_NAME_LENGTH)?;
            active.last_name = Set(last_name);
            updated_fields.push("last_name");
        }
        if let Some(gender) = changes.gender {
            active.gender = Set(gender);
            updated_fields.push("gender");
        }
        if let Some(birth_date) = changes.birth_date {
            active.birth_date = Set(birth_date);
            updated_fields.push("birth_date");
        }
        if let Some(location) = changes.location {
            check_length("location", &location, MAX_LOCATION_LENGTH)?;
            active.location = Set(location);
            updated_fields.push("location");
        }
        if let Some(bio) = changes.bio {
            check_length("bio", &bio, MAX_BIO_LENGTH)?;
            active.bio = Set(bio);
            updated_fields.push("bio");
        }
        if let Some(url) = changes.profile_picture_url {
            active.profile_picture_url = Set(url);
            updated_fields.push("profile_picture_url");
        }
        if let Some(url) = changes.cover_picture_url {
            active.cover_picture_url = Set(url);
            updated_fields.push("cover_picture_url");
        }
        if let Some(verified) = changes.verified {
            active.verified = Set(verified);
            updated_fields.push("verified");
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
            updated_fields.push("is_active");
        }

        if updated_fields.is_empty() {
            debug!("No fields to update for user ID: {}", user_id);
            return Ok(existing);
        }

        debug!("Updating fields: {}", updated_fields.join(", "));
        let updated = active.update(&self.db).await?;
        info!("User with ID {} updated", user_id);
        Ok(updated)
    }

    /// Deletes the user. Follow edges go with it through the cascading foreign keys.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: i32) -> Result<()> {
        let result = user::Entity::delete_by_id(user_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            warn!("User with ID {} not found for deletion", user_id);
            return Err(AccountsError::UserNotFound(user_id));
        }
        info!("User with ID {} deleted", user_id);
        Ok(())
    }
}
