use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Transaction::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Transaction::Id)
                        .uuid()
                        .not_null()
                        .primary_key()
                        .extra("DEFAULT gen_random_uuid()".to_string())
                )
                .col(ColumnDef::new(Transaction::UserId).uuid().not_null())
                .col(ColumnDef::new(Transaction::Kind).string_len(20).not_null())
                .col(ColumnDef::new(Transaction::Amount).decimal_len(20, 8).not_null())
                .col(ColumnDef::new(Transaction::Currency).string_len(10).null())
                .col(ColumnDef::new(Transaction::TxHash).string_len(100).null())
                .col(ColumnDef::new(Transaction::Status).string_len(20).not_null())
                .col(ColumnDef::new(Transaction::AdminNote).string().null())
                .col(ColumnDef::new(Transaction::Method).string_len(20).null())
                .col(ColumnDef::new(Transaction::BankAccountName).string().null())
                .col(ColumnDef::new(Transaction::BankAccountNumber).string().null())
                .col(ColumnDef::new(Transaction::BankName).string().null())
                .col(ColumnDef::new(Transaction::BankRoutingNumber).string().null())
                .col(ColumnDef::new(Transaction::CryptoAddress).string().null())
                .col(ColumnDef::new(Transaction::CryptoNetwork).string_len(50).null())
                .col(ColumnDef::new(Transaction::PaypalEmail).string().null())
                .col(
                    ColumnDef::new(Transaction::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .col(
                    ColumnDef::new(Transaction::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_transaction_user")
                        .from(Transaction::Table, Transaction::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transaction_user_id")
                .table(Transaction::Table)
                .col(Transaction::UserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transaction_status")
                .table(Transaction::Table)
                .col(Transaction::Status)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transaction_created_at")
                .table(Transaction::Table)
                .col(Transaction::CreatedAt)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transaction {
    Table,
    Id,
    UserId,
    Kind,
    Amount,
    Currency,
    TxHash,
    Status,
    AdminNote,
    Method,
    BankAccountName,
    BankAccountNumber,
    BankName,
    BankRoutingNumber,
    CryptoAddress,
    CryptoNetwork,
    PaypalEmail,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
