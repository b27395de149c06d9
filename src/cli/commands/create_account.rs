use accounts::{ExtraFields, PasswordHasher, UserManager};
use anyhow::{Context, Result, bail};
use sea_orm::Database;
use tracing::{debug, info, trace};

use crate::cli::AccountArgs;
use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Regular,
    Superuser,
}

fn extra_fields(args: &AccountArgs) -> ExtraFields {
    let mut fields = ExtraFields::new(args.birth_date);
    fields.first_name = args.first_name.clone();
    fields.last_name = args.last_name.clone();
    fields.gender = args.gender;
    fields.location = args.location.clone();
    fields
}

/// Creates a user or superuser from the command line and prints its id.
pub async fn create_account(args: &AccountArgs, kind: AccountKind) -> Result<()> {
    trace!("Entering create_account function");
    let settings = Settings::load(args.database.database_url.as_deref(), None)?;
    debug!("Database URL: {}", settings.database_url);

    let db = Database::connect(&settings.database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", settings.database_url))?;
    let manager = UserManager::new(db, PasswordHasher::new(settings.hashing_params())?);
    let fields = extra_fields(args);

    let created = match kind {
        AccountKind::Regular => {
            manager
                .create_user(&args.email, args.password.as_deref(), fields)
                .await?
        }
        AccountKind::Superuser => {
            let Some(password) = args.password.as_deref() else {
                bail!("A superuser needs a password (--password or SOCIALITE_ACCOUNT_PASSWORD)");
            };
            manager.create_superuser(&args.email, password, fields).await?
        }
    };

    info!("Created {:?} account {} <{}>", kind, created.id, created.email);
    println!("{}", created.id);
    Ok(())
}
