pub mod user;
pub mod transaction;
pub mod audit_log;
pub mod wallet_address;

pub use user::Entity as User;
pub use transaction::Entity as Transaction;
pub use audit_log::Entity as AuditLog;
pub use wallet_address::Entity as WalletAddress;
