use sea_orm::{ entity::prelude::*, ConnectionTrait, DatabaseConnection, QueryOrder, Set };
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{ AppError, Result };

pub mod entity;
pub use entity::*;

mod transaction_repository;
pub use transaction_repository::TransactionRepository;

mod audit_log_repository;
pub use audit_log_repository::{AuditLogRepository, NewAuditEntry};

mod wallet_address_repository;
pub use wallet_address_repository::WalletAddressRepository;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        first_name: String,
        last_name: String,
        email: Option<String>,
        country: String,
        phone: String,
        password_hash: String
    ) -> Result<entity::user::Model> {
        let now = chrono::Utc::now();
        let user = entity::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            country: Set(country),
            phone: Set(phone),
            password_hash: Set(password_hash),
            balance: Set(Decimal::ZERO),
            profit: Set(Decimal::ZERO),
            withdrawals_pending: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let user = user.insert(&self.db).await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<entity::user::Model> {
        Self::find_by_id_on(&self.db, id).await
    }

    /// Same lookup on an explicit connection, usable inside a transaction.
    pub async fn find_by_id_on<C: ConnectionTrait>(
        conn: &C,
        id: Uuid
    ) -> Result<entity::user::Model> {
        entity::user::Entity::find_by_id(id).one(conn).await?.ok_or(AppError::NotFound("User"))
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity
            ::find()
            .filter(entity::user::Column::Phone.eq(phone))
            .one(&self.db).await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity
            ::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&self.db).await?;

        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<entity::user::Model>> {
        let users = entity::user::Entity
            ::find()
            .order_by_desc(entity::user::Column::CreatedAt)
            .all(&self.db).await?;

        Ok(users)
    }
}
