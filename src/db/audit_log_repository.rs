use sea_orm::{ DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, QueryOrder, Set };
use sea_orm::{ ConnectionTrait, QuerySelect };
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::enums::AuditAction;
use crate::error::Result;
use crate::db::entity::{ audit_log, AuditLog };

pub struct NewAuditEntry {
    pub action: AuditAction,
    pub admin_name: String,
    pub target_user_id: Option<Uuid>,
    pub note: String,
    pub amount: Decimal,
}

/// Append-only store of admin mutations. There are no update or delete paths.
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert on an explicit connection so the entry commits or rolls back
    /// together with the mutation it records.
    pub async fn insert_on<C: ConnectionTrait>(
        conn: &C,
        entry: NewAuditEntry
    ) -> Result<audit_log::Model> {
        let row = audit_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            action: Set(entry.action.as_str().to_string()),
            admin_name: Set(entry.admin_name),
            target_user_id: Set(entry.target_user_id),
            note: Set(entry.note),
            amount: Set(entry.amount),
            created_at: Set(chrono::Utc::now()),
        };

        let created = AuditLog::insert(row).exec_with_returning(conn).await?;
        Ok(created)
    }

    pub async fn append(&self, entry: NewAuditEntry) -> Result<audit_log::Model> {
        Self::insert_on(&self.db, entry).await
    }

    pub async fn find_recent(&self, limit: u64) -> Result<Vec<audit_log::Model>> {
        let logs = AuditLog::find()
            .order_by_desc(audit_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db).await?;

        Ok(logs)
    }

    pub async fn find_by_target_user(
        &self,
        user_id: Uuid,
        limit: u64
    ) -> Result<Vec<audit_log::Model>> {
        let logs = AuditLog::find()
            .filter(audit_log::Column::TargetUserId.eq(user_id))
            .order_by_desc(audit_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db).await?;

        Ok(logs)
    }
}
