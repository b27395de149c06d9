use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::Password))
                    .col(string_len(Users::FirstName, 150).default(""))
                    .col(string_len(Users::LastName, 150).default(""))
                    .col(string_len(Users::Gender, 10).default("male"))
                    .col(date(Users::BirthDate))
                    .col(string_len(Users::Location, 30).default("India"))
                    .col(text(Users::Bio))
                    .col(boolean(Users::Verified).default(false))
                    .col(string(Users::ProfilePictureUrl).default(""))
                    .col(string(Users::CoverPictureUrl).default(""))
                    .col(boolean(Users::IsStaff).default(false))
                    .col(boolean(Users::IsSuperuser).default(false))
                    .col(boolean(Users::IsActive).default(true))
                    .col(timestamp_with_time_zone(Users::DateJoined))
                    .col(timestamp_with_time_zone_null(Users::LastLogin))
                    .to_owned(),
            )
            .await?;

        // Create user_followers table (follow edges, stored once per pair)
        manager
            .create_table(
                Table::create()
                    .table(UserFollowers::Table)
                    .if_not_exists()
                    .col(integer(UserFollowers::UserId))
                    .col(integer(UserFollowers::FollowerId))
                    .col(timestamp_with_time_zone(UserFollowers::CreatedAt))
                    .primary_key(
                        Index::create()
                            .name("pk_user_followers")
                            .col(UserFollowers::UserId)
                            .col(UserFollowers::FollowerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_followers_user")
                            .from(UserFollowers::Table, UserFollowers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_followers_follower")
                            .from(UserFollowers::Table, UserFollowers::FollowerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The primary key covers lookups by user_id; this covers "who does X follow"
        manager
            .create_index(
                Index::create()
                    .name("idx_user_followers_follower_id")
                    .table(UserFollowers::Table)
                    .col(UserFollowers::FollowerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(UserFollowers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Password,
    FirstName,
    LastName,
    Gender,
    BirthDate,
    Location,
    Bio,
    Verified,
    ProfilePictureUrl,
    CoverPictureUrl,
    IsStaff,
    IsSuperuser,
    IsActive,
    DateJoined,
    LastLogin,
}

#[derive(DeriveIden)]
enum UserFollowers {
    Table,
    UserId,
    FollowerId,
    CreatedAt,
}
