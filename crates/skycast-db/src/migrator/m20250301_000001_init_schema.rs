//! Initial schema migration

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. Create users table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Username, 255).not_null().unique_key())
                    .col(string_len(User::PasswordHash, 255).not_null())
                    .col(string_len_null(User::Name, 255))
                    .col(string_len_null(User::Location, 255))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_username")
                    .table(User::Table)
                    .col(User::Username)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. Create saved_cities table (composite primary key = set)
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(SavedCity::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SavedCity::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(SavedCity::City)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SavedCity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(SavedCity::UserId)
                            .col(SavedCity::City),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_cities_user_id")
                            .from(SavedCity::Table, SavedCity::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_saved_cities_user_id")
                    .table(SavedCity::Table)
                    .col(SavedCity::UserId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. Create searches table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Search::Table)
                    .if_not_exists()
                    .col(uuid(Search::Id).primary_key())
                    .col(string_len(Search::City, 255).not_null())
                    .col(
                        timestamp_with_time_zone(Search::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. Create weather_reports cache table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(WeatherReport::Table)
                    .if_not_exists()
                    .col(uuid(WeatherReport::Id).primary_key())
                    .col(
                        string_len(WeatherReport::City, 255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(string_len(WeatherReport::WeatherType, 64).not_null())
                    .col(double(WeatherReport::Temperature).not_null())
                    .col(string_len_null(WeatherReport::Description, 255))
                    .col(ColumnDef::new(WeatherReport::Humidity).integer().null())
                    .col(ColumnDef::new(WeatherReport::WindSpeed).double().null())
                    .col(
                        timestamp_with_time_zone(WeatherReport::FetchedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_weather_reports_city")
                    .table(WeatherReport::Table)
                    .col(WeatherReport::City)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherReport::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Search::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SavedCity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    PasswordHash,
    Name,
    Location,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SavedCity {
    #[sea_orm(iden = "saved_cities")]
    Table,
    UserId,
    City,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Search {
    #[sea_orm(iden = "searches")]
    Table,
    Id,
    City,
    CreatedAt,
}

#[derive(DeriveIden)]
enum WeatherReport {
    #[sea_orm(iden = "weather_reports")]
    Table,
    Id,
    City,
    WeatherType,
    Temperature,
    Description,
    Humidity,
    WindSpeed,
    FetchedAt,
}
