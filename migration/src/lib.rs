pub use sea_orm_migration::prelude::*;

mod m20250115_000001_create_users_table;
mod m20250115_000002_create_transactions_table;
mod m20250116_000001_create_audit_logs_table;
mod m20250116_000002_create_wallet_addresses_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250115_000001_create_users_table::Migration),
            Box::new(m20250115_000002_create_transactions_table::Migration),
            Box::new(m20250116_000001_create_audit_logs_table::Migration),
            Box::new(m20250116_000002_create_wallet_addresses_table::Migration)
        ]
    }
}
