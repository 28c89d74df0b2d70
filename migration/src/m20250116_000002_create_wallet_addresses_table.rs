use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(WalletAddress::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(WalletAddress::Id)
                        .uuid()
                        .not_null()
                        .primary_key()
                        .extra("DEFAULT gen_random_uuid()".to_string())
                )
                .col(ColumnDef::new(WalletAddress::Currency).string_len(10).not_null())
                .col(ColumnDef::new(WalletAddress::Network).string_len(50).not_null())
                .col(ColumnDef::new(WalletAddress::Address).string_len(200).not_null())
                .col(ColumnDef::new(WalletAddress::UpdatedBy).string_len(50).not_null())
                .col(
                    ColumnDef::new(WalletAddress::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .col(
                    ColumnDef::new(WalletAddress::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_wallet_address_currency")
                .table(WalletAddress::Table)
                .col(WalletAddress::Currency)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WalletAddress::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WalletAddress {
    Table,
    Id,
    Currency,
    Network,
    Address,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
