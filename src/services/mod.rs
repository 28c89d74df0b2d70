pub mod account_service;
pub mod transaction_service;
pub mod approval_service;
pub mod wallet_directory_service;

pub use account_service::{AccountService, NewUser};
pub use transaction_service::TransactionService;
pub use approval_service::ApprovalService;
pub use wallet_directory_service::WalletDirectoryService;
