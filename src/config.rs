use std::env;

use anyhow::{bail, Context};
use rust_decimal::Decimal;

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_key: String,
    pub admin_name: String,
    pub server_host: String,
    pub server_port: u16,
    pub token_ttl_days: i64,
    pub min_request_amount: Decimal,
    pub max_request_amount: Decimal,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters");
        }

        let admin_key = env::var("ADMIN_KEY").context("ADMIN_KEY must be set")?;
        if admin_key.len() < 16 {
            bail!("ADMIN_KEY must be at least 16 characters");
        }

        let admin_name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("SERVER_PORT must be a valid port number")?;

        let token_ttl_days = env::var("TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .context("TOKEN_TTL_DAYS must be a whole number of days")?;

        let min_request_amount = env::var("MIN_REQUEST_AMOUNT")
            .unwrap_or_else(|_| "0.01".to_string())
            .parse::<Decimal>()
            .context("MIN_REQUEST_AMOUNT must be a decimal amount")?;

        let max_request_amount = env::var("MAX_REQUEST_AMOUNT")
            .unwrap_or_else(|_| "1000000".to_string())
            .parse::<Decimal>()
            .context("MAX_REQUEST_AMOUNT must be a decimal amount")?;

        if min_request_amount <= Decimal::ZERO || max_request_amount < min_request_amount {
            bail!("MIN_REQUEST_AMOUNT must be positive and not exceed MAX_REQUEST_AMOUNT");
        }

        Ok(Config {
            database_url,
            jwt_secret,
            admin_key,
            admin_name,
            server_host,
            server_port,
            token_ttl_days,
            min_request_amount,
            max_request_amount,
        })
    }
}
