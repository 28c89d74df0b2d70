use aspire_trade::{ Config, Result };
use axum::{ Router, routing::{ get, post } };
use migration::MigratorTrait;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "aspire_trade=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| aspire_trade::AppError::Config(e.to_string()))?;

    // Initialize database connection
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(aspire_trade::AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None).await.map_err(aspire_trade::AppError::Database)?;

    tracing::info!("Migrations completed successfully");

    let db = Arc::new(db);

    // Initialize repositories
    let user_repo = Arc::new(aspire_trade::db::UserRepository::new(db.as_ref().clone()));
    let transaction_repo = Arc::new(
        aspire_trade::db::TransactionRepository::new(db.as_ref().clone())
    );
    let audit_repo = Arc::new(aspire_trade::db::AuditLogRepository::new(db.as_ref().clone()));
    let wallet_repo = Arc::new(aspire_trade::db::WalletAddressRepository::new(db.as_ref().clone()));

    // Initialize services
    let account_service = Arc::new(aspire_trade::services::AccountService::new(user_repo.clone()));

    let transaction_service = Arc::new(
        aspire_trade::services::TransactionService::new(
            db.clone(),
            user_repo.clone(),
            transaction_repo.clone(),
            config.min_request_amount,
            config.max_request_amount
        )
    );

    let approval_service = Arc::new(
        aspire_trade::services::ApprovalService::new(
            db.clone(),
            user_repo.clone(),
            transaction_repo.clone(),
            audit_repo.clone()
        )
    );

    let wallet_service = Arc::new(
        aspire_trade::services::WalletDirectoryService::new(db.clone(), wallet_repo.clone())
    );

    let config = Arc::new(config);

    // Create app state
    let app_state = aspire_trade::api::AppState::new(
        config.clone(),
        account_service,
        transaction_service,
        approval_service,
        wallet_service
    );

    // Build application router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(aspire_trade::api::auth::register))
        .route("/api/auth/login", post(aspire_trade::api::auth::login))
        .route("/api/user/me", get(aspire_trade::api::user::me))
        .route("/api/user/deposit", post(aspire_trade::api::user::create_deposit))
        .route("/api/user/withdraw", post(aspire_trade::api::user::create_withdrawal))
        .route("/api/user/transactions", get(aspire_trade::api::user::transactions))
        .route("/api/admin/users", get(aspire_trade::api::admin::list_users))
        .route("/api/admin/user/{id}", get(aspire_trade::api::admin::get_user))
        .route(
            "/api/admin/user/{id}/adjust-balance",
            post(aspire_trade::api::admin::adjust_balance)
        )
        .route("/api/admin/user/{id}/add-profit", post(aspire_trade::api::admin::add_profit))
        .route("/api/admin/impersonate/{id}", post(aspire_trade::api::admin::impersonate_user))
        .route("/api/admin/deposit/{id}/approve", post(aspire_trade::api::admin::approve_deposit))
        .route("/api/admin/deposit/{id}/reject", post(aspire_trade::api::admin::reject_deposit))
        .route(
            "/api/admin/withdraw/{id}/approve",
            post(aspire_trade::api::admin::approve_withdrawal)
        )
        .route(
            "/api/admin/withdraw/{id}/reject",
            post(aspire_trade::api::admin::reject_withdrawal)
        )
        .route(
            "/api/admin/transactions/pending",
            get(aspire_trade::api::admin::pending_transactions)
        )
        .route("/api/admin/logs", get(aspire_trade::api::admin::logs))
        .route("/api/wallets", get(aspire_trade::api::wallet::list_wallets))
        .route("/api/wallets/update", post(aspire_trade::api::wallet::update_wallet))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| aspire_trade::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| aspire_trade::AppError::Internal(e.to_string()))?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
