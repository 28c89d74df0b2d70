use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(User::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(User::Id)
                        .uuid()
                        .not_null()
                        .primary_key()
                        .extra("DEFAULT gen_random_uuid()".to_string())
                )
                .col(ColumnDef::new(User::FirstName).string_len(50).not_null())
                .col(ColumnDef::new(User::LastName).string_len(50).not_null())
                .col(ColumnDef::new(User::Email).string().null())
                .col(ColumnDef::new(User::Country).string_len(100).not_null())
                .col(ColumnDef::new(User::Phone).string_len(20).not_null())
                .col(ColumnDef::new(User::PasswordHash).string().not_null())
                .col(ColumnDef::new(User::Balance).decimal_len(20, 8).not_null().default(0))
                .col(ColumnDef::new(User::Profit).decimal_len(20, 8).not_null().default(0))
                .col(
                    ColumnDef::new(User::WithdrawalsPending)
                        .decimal_len(20, 8)
                        .not_null()
                        .default(0)
                )
                .col(
                    ColumnDef::new(User::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .col(
                    ColumnDef::new(User::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_user_phone")
                .table(User::Table)
                .col(User::Phone)
                .unique()
                .to_owned()
        ).await?;

        // Nullable column: Postgres allows multiple NULLs under a unique index
        manager.create_index(
            Index::create()
                .name("idx_user_email")
                .table(User::Table)
                .col(User::Email)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Country,
    Phone,
    PasswordHash,
    Balance,
    Profit,
    WithdrawalsPending,
    CreatedAt,
    UpdatedAt,
}
