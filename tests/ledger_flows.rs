//! End-to-end ledger flows against a live PostgreSQL instance.
//!
//! Run with:
//!   TEST_DATABASE_URL=postgres://... cargo test -- --ignored

use std::sync::Arc;

use migration::MigratorTrait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use aspire_trade::db::{
    AuditLogRepository,
    TransactionRepository,
    UserRepository,
    WalletAddressRepository,
};
use aspire_trade::enums::{ AdjustDirection, AuditAction, Currency, MethodDetails, TxStatus };
use aspire_trade::error::AppError;
use aspire_trade::services::{
    AccountService,
    ApprovalService,
    NewUser,
    TransactionService,
    WalletDirectoryService,
};

struct TestEnv {
    accounts: Arc<AccountService>,
    transactions: Arc<TransactionService>,
    approvals: Arc<ApprovalService>,
    wallets: Arc<WalletDirectoryService>,
    users: Arc<UserRepository>,
    transaction_repo: Arc<TransactionRepository>,
    audit: Arc<AuditLogRepository>,
}

async fn test_env() -> TestEnv {
    let url = std::env
        ::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set for integration tests");

    let db = sea_orm::Database::connect(&url).await.expect("failed to connect");
    migration::Migrator::up(&db, None).await.expect("failed to migrate");

    let db = Arc::new(db);

    let users = Arc::new(UserRepository::new(db.as_ref().clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(db.as_ref().clone()));
    let audit = Arc::new(AuditLogRepository::new(db.as_ref().clone()));
    let wallet_repo = Arc::new(WalletAddressRepository::new(db.as_ref().clone()));

    TestEnv {
        accounts: Arc::new(AccountService::new(users.clone())),
        transactions: Arc::new(
            TransactionService::new(
                db.clone(),
                users.clone(),
                transaction_repo.clone(),
                dec!(0.01),
                dec!(1000000)
            )
        ),
        approvals: Arc::new(
            ApprovalService::new(db.clone(), users.clone(), transaction_repo.clone(), audit.clone())
        ),
        wallets: Arc::new(WalletDirectoryService::new(db.clone(), wallet_repo)),
        users,
        transaction_repo,
        audit,
    }
}

fn unique_phone() -> String {
    format!("{:015}", Uuid::new_v4().as_u128() % 1_000_000_000_000_000)
}

async fn register_user(env: &TestEnv, balance: Decimal) -> Uuid {
    let user = env.accounts
        .register(NewUser {
            first_name: "Test".to_string(),
            last_name: "Trader".to_string(),
            email: None,
            country: "Portugal".to_string(),
            phone: unique_phone(),
            password: "S3cure-pass!".to_string(),
        }).await
        .expect("registration failed");

    if balance > Decimal::ZERO {
        env.approvals
            .adjust_balance(user.id, balance, AdjustDirection::Credit, None, "Admin").await
            .expect("funding failed");
    }

    user.id
}

fn paypal_details() -> MethodDetails {
    MethodDetails::Paypal { email: "trader@example.com".to_string() }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn withdrawal_lifecycle_nets_pending_to_zero() {
    // Scenario A: balance 500, withdraw 200, approve.
    let env = test_env().await;
    let user_id = register_user(&env, dec!(500)).await;

    let record = env.transactions
        .request_withdrawal(user_id, dec!(200), paypal_details()).await
        .unwrap();

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.withdrawals_pending, dec!(200));
    assert_eq!(user.balance, dec!(500));

    env.approvals.approve_withdrawal(record.id, None, "Admin").await.unwrap();

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.balance, dec!(300));
    assert_eq!(user.withdrawals_pending, dec!(0));

    let logs = env.audit.find_by_target_user(user_id, 100).await.unwrap();
    let approvals: Vec<_> = logs
        .iter()
        .filter(|l| l.action == AuditAction::ApproveWithdrawal.as_str())
        .collect();
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].amount, dec!(200));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn rejected_withdrawal_releases_hold_only() {
    let env = test_env().await;
    let user_id = register_user(&env, dec!(500)).await;

    let record = env.transactions
        .request_withdrawal(user_id, dec!(200), paypal_details()).await
        .unwrap();

    env.approvals.reject_withdrawal(record.id, Some("docs missing".to_string()), "Admin").await.unwrap();

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.balance, dec!(500));
    assert_eq!(user.withdrawals_pending, dec!(0));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn deposit_approval_credits_balance() {
    // Scenario B: balance 0, deposit 1000, approve with note.
    let env = test_env().await;
    let user_id = register_user(&env, Decimal::ZERO).await;

    let record = env.transactions
        .request_deposit(user_id, dec!(1000), Currency::Btc, None).await
        .unwrap();
    assert_eq!(record.status, TxStatus::Pending.as_str());

    env.approvals.approve_deposit(record.id, Some("verified".to_string()), "Admin").await.unwrap();

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.balance, dec!(1000));

    let record = env.transaction_repo.find_by_id(record.id).await.unwrap();
    assert_eq!(record.status, TxStatus::Approved.as_str());
    assert_eq!(record.admin_note.as_deref(), Some("verified"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn rejected_deposit_leaves_balance_unchanged() {
    let env = test_env().await;
    let user_id = register_user(&env, dec!(50)).await;

    let record = env.transactions
        .request_deposit(user_id, dec!(1000), Currency::Eth, None).await
        .unwrap();

    env.approvals.reject_deposit(record.id, None, "Admin").await.unwrap();

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.balance, dec!(50));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn second_settlement_fails_already_processed() {
    // Scenario C: reject after approve must fail and change nothing.
    let env = test_env().await;
    let user_id = register_user(&env, dec!(500)).await;

    let record = env.transactions
        .request_withdrawal(user_id, dec!(200), paypal_details()).await
        .unwrap();

    env.approvals.approve_withdrawal(record.id, None, "Admin").await.unwrap();

    let err = env.approvals.reject_withdrawal(record.id, None, "Admin").await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyProcessed));

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.balance, dec!(300));
    assert_eq!(user.withdrawals_pending, dec!(0));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn concurrent_settlements_have_one_winner() {
    let env = test_env().await;
    let user_id = register_user(&env, dec!(500)).await;

    let record = env.transactions
        .request_withdrawal(user_id, dec!(200), paypal_details()).await
        .unwrap();

    let approve = env.approvals.approve_withdrawal(record.id, None, "Admin");
    let reject = env.approvals.reject_withdrawal(record.id, None, "Admin");
    let (a, r) = tokio::join!(approve, reject);

    assert_eq!(
        [a.is_ok(), r.is_ok()].iter().filter(|ok| **ok).count(),
        1,
        "exactly one transition must win"
    );

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.withdrawals_pending, dec!(0));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn withdrawal_boundary_and_insufficient_funds() {
    let env = test_env().await;
    let user_id = register_user(&env, dec!(300)).await;

    let err = env.transactions
        .request_withdrawal(user_id, dec!(300.01), paypal_details()).await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientFunds));

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.withdrawals_pending, dec!(0));

    // The full balance is withdrawable.
    env.transactions.request_withdrawal(user_id, dec!(300), paypal_details()).await.unwrap();

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.withdrawals_pending, dec!(300));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn debit_below_zero_is_rejected_not_clamped() {
    let env = test_env().await;
    let user_id = register_user(&env, dec!(100)).await;

    let err = env.approvals
        .adjust_balance(user_id, dec!(150), AdjustDirection::Debit, None, "Admin").await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAdjustment));

    let user = env.users.find_by_id(user_id).await.unwrap();
    assert_eq!(user.balance, dec!(100));

    let new_balance = env.approvals
        .adjust_balance(user_id, dec!(100), AdjustDirection::Debit, None, "Admin").await
        .unwrap();
    assert_eq!(new_balance, dec!(0));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn add_profit_raises_profit_and_balance() {
    // Scenario D: balance 100, profit 10, add 50.
    let env = test_env().await;
    let user_id = register_user(&env, Decimal::ZERO).await;

    env.approvals.add_profit(user_id, dec!(10), None, "Admin").await.unwrap();
    env.approvals
        .adjust_balance(user_id, dec!(90), AdjustDirection::Credit, None, "Admin").await
        .unwrap();

    let user = env.approvals.add_profit(user_id, dec!(50), Some("bonus".to_string()), "Admin").await.unwrap();
    assert_eq!(user.balance, dec!(150));
    assert_eq!(user.profit, dec!(60));

    let rows = env.transaction_repo.find_by_user(user_id, 50).await.unwrap();
    let profits: Vec<_> = rows
        .iter()
        .filter(|t| t.kind == "profit" && t.amount == dec!(50))
        .collect();
    assert_eq!(profits.len(), 1);
    assert_eq!(profits[0].status, TxStatus::Approved.as_str());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn every_admin_mutation_writes_one_audit_entry() {
    let env = test_env().await;
    let user_id = register_user(&env, Decimal::ZERO).await;

    env.approvals
        .adjust_balance(user_id, dec!(75), AdjustDirection::Credit, Some("seed".to_string()), "Admin").await
        .unwrap();
    env.approvals.add_profit(user_id, dec!(25), None, "Admin").await.unwrap();
    env.approvals.impersonate_user(user_id, "Admin").await.unwrap();

    let logs = env.audit.find_by_target_user(user_id, 100).await.unwrap();
    assert_eq!(logs.len(), 3);

    let adjust = logs
        .iter()
        .find(|l| l.action == AuditAction::AdjustBalance.as_str())
        .unwrap();
    assert_eq!(adjust.amount, dec!(75));
    assert_eq!(adjust.note, "seed");

    let impersonate = logs
        .iter()
        .find(|l| l.action == AuditAction::ImpersonateUser.as_str())
        .unwrap();
    assert_eq!(impersonate.amount, dec!(0));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set TEST_DATABASE_URL"]
async fn wallet_upsert_overwrites_in_place() {
    let env = test_env().await;

    env.wallets
        .upsert(
            Currency::Ltc,
            "Litecoin".to_string(),
            "ltc1qfirstaddressxxxxxxxx".to_string(),
            "Admin"
        ).await
        .unwrap();

    let updated = env.wallets
        .upsert(
            Currency::Ltc,
            "Litecoin".to_string(),
            "ltc1qsecondaddressxxxxxxx".to_string(),
            "Admin"
        ).await
        .unwrap();
    assert_eq!(updated.address, "ltc1qsecondaddressxxxxxxx");

    let wallets = env.wallets.list().await.unwrap();
    let ltc: Vec<_> = wallets
        .iter()
        .filter(|w| w.currency == "LTC")
        .collect();
    assert_eq!(ltc.len(), 1);
    assert_eq!(ltc[0].address, "ltc1qsecondaddressxxxxxxx");
}
