use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(AuditLog::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(AuditLog::Id)
                        .uuid()
                        .not_null()
                        .primary_key()
                        .extra("DEFAULT gen_random_uuid()".to_string())
                )
                .col(ColumnDef::new(AuditLog::Action).string_len(30).not_null())
                .col(ColumnDef::new(AuditLog::AdminName).string_len(50).not_null())
                .col(ColumnDef::new(AuditLog::TargetUserId).uuid().null())
                .col(ColumnDef::new(AuditLog::Note).string().not_null().default(""))
                .col(ColumnDef::new(AuditLog::Amount).decimal_len(20, 8).not_null().default(0))
                .col(
                    ColumnDef::new(AuditLog::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_audit_log_target_user")
                        .from(AuditLog::Table, AuditLog::TargetUserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_audit_log_target_user_id")
                .table(AuditLog::Table)
                .col(AuditLog::TargetUserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_audit_log_created_at")
                .table(AuditLog::Table)
                .col(AuditLog::CreatedAt)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AuditLog::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AuditLog {
    Table,
    Id,
    Action,
    AdminName,
    TargetUserId,
    Note,
    Amount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
