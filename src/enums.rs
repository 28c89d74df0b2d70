use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ─── Currency ────────────────────────────────────────────────────────

/// Currencies accepted for deposits and wallet addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Btc,
    Eth,
    Usdt,
    Usdc,
    Ltc,
    Bch,
}

impl Currency {
    /// Canonical string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
            Currency::Usdt => "USDT",
            Currency::Usdc => "USDC",
            Currency::Ltc => "LTC",
            Currency::Bch => "BCH",
        }
    }

    pub fn all() -> &'static [Currency] {
        &[
            Currency::Btc,
            Currency::Eth,
            Currency::Usdt,
            Currency::Usdc,
            Currency::Ltc,
            Currency::Bch,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BTC" => Ok(Currency::Btc),
            "ETH" => Ok(Currency::Eth),
            "USDT" => Ok(Currency::Usdt),
            "USDC" => Ok(Currency::Usdc),
            "LTC" => Ok(Currency::Ltc),
            "BCH" => Ok(Currency::Bch),
            _ => Err(AppError::field(
                "currency",
                format!("Unsupported currency: {}. Supported: BTC, ETH, USDT, USDC, LTC, BCH", s),
            )),
        }
    }
}

// ─── TxKind ──────────────────────────────────────────────────────────

/// What a transaction row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Deposit,
    Withdrawal,
    Adjustment,
    Profit,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "deposit",
            TxKind::Withdrawal => "withdrawal",
            TxKind::Adjustment => "adjustment",
            TxKind::Profit => "profit",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(TxKind::Deposit),
            "withdrawal" => Ok(TxKind::Withdrawal),
            "adjustment" => Ok(TxKind::Adjustment),
            "profit" => Ok(TxKind::Profit),
            _ => Err(AppError::validation(format!("Invalid transaction kind: {}", s))),
        }
    }
}

// ─── TxStatus ────────────────────────────────────────────────────────

/// Lifecycle state of a transaction row. Transitions are one-way:
/// pending -> approved or pending -> rejected, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Pending,
    Approved,
    Rejected,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Approved => "approved",
            TxStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TxStatus::Pending),
            "approved" => Ok(TxStatus::Approved),
            "rejected" => Ok(TxStatus::Rejected),
            _ => Err(AppError::validation(format!("Invalid transaction status: {}", s))),
        }
    }
}

// ─── WithdrawalMethod ────────────────────────────────────────────────

/// Payout channel for a withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalMethod {
    Bank,
    Crypto,
    Paypal,
}

impl WithdrawalMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalMethod::Bank => "bank",
            WithdrawalMethod::Crypto => "crypto",
            WithdrawalMethod::Paypal => "paypal",
        }
    }
}

impl fmt::Display for WithdrawalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WithdrawalMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank" => Ok(WithdrawalMethod::Bank),
            "crypto" => Ok(WithdrawalMethod::Crypto),
            "paypal" => Ok(WithdrawalMethod::Paypal),
            _ => Err(AppError::field(
                "method",
                format!("Invalid withdrawal method: {}. Supported: bank, crypto, paypal", s),
            )),
        }
    }
}

/// Payout details for a withdrawal. One variant per method, so a request
/// can never carry two detail blocks at once.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodDetails {
    Bank {
        account_name: String,
        account_number: String,
        bank_name: String,
        routing_number: Option<String>,
    },
    Crypto {
        address: String,
        network: String,
    },
    Paypal {
        email: String,
    },
}

impl MethodDetails {
    pub fn method(&self) -> WithdrawalMethod {
        match self {
            MethodDetails::Bank { .. } => WithdrawalMethod::Bank,
            MethodDetails::Crypto { .. } => WithdrawalMethod::Crypto,
            MethodDetails::Paypal { .. } => WithdrawalMethod::Paypal,
        }
    }
}

// ─── AdjustDirection ─────────────────────────────────────────────────

/// Sign of a manual balance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustDirection {
    Credit,
    Debit,
}

impl AdjustDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustDirection::Credit => "credit",
            AdjustDirection::Debit => "debit",
        }
    }
}

impl fmt::Display for AdjustDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit" => Ok(AdjustDirection::Credit),
            "debit" => Ok(AdjustDirection::Debit),
            _ => Err(AppError::field(
                "direction",
                format!("Invalid direction: {}. Supported: credit, debit", s),
            )),
        }
    }
}

// ─── AuditAction ─────────────────────────────────────────────────────

/// Fixed set of admin actions recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    ApproveDeposit,
    RejectDeposit,
    ApproveWithdrawal,
    RejectWithdrawal,
    AddProfit,
    AdjustBalance,
    ImpersonateUser,
    UpdateWallet,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ApproveDeposit => "approve_deposit",
            AuditAction::RejectDeposit => "reject_deposit",
            AuditAction::ApproveWithdrawal => "approve_withdrawal",
            AuditAction::RejectWithdrawal => "reject_withdrawal",
            AuditAction::AddProfit => "add_profit",
            AuditAction::AdjustBalance => "adjust_balance",
            AuditAction::ImpersonateUser => "impersonate_user",
            AuditAction::UpdateWallet => "update_wallet",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve_deposit" => Ok(AuditAction::ApproveDeposit),
            "reject_deposit" => Ok(AuditAction::RejectDeposit),
            "approve_withdrawal" => Ok(AuditAction::ApproveWithdrawal),
            "reject_withdrawal" => Ok(AuditAction::RejectWithdrawal),
            "add_profit" => Ok(AuditAction::AddProfit),
            "adjust_balance" => Ok(AuditAction::AdjustBalance),
            "impersonate_user" => Ok(AuditAction::ImpersonateUser),
            "update_wallet" => Ok(AuditAction::UpdateWallet),
            _ => Err(AppError::validation(format!("Invalid audit action: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_rejects_unknown() {
        assert!("DOGE".parse::<Currency>().is_err());
        assert_eq!("usdt".parse::<Currency>().unwrap(), Currency::Usdt);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [TxStatus::Pending, TxStatus::Approved, TxStatus::Rejected] {
            assert_eq!(status.as_str().parse::<TxStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_method_details_match_method() {
        let details = MethodDetails::Paypal { email: "a@b.com".to_string() };
        assert_eq!(details.method(), WithdrawalMethod::Paypal);

        let details = MethodDetails::Crypto {
            address: "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".to_string(),
            network: "Bitcoin".to_string(),
        };
        assert_eq!(details.method(), WithdrawalMethod::Crypto);
    }
}
