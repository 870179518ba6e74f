//! Ledger transactions forming the sampled population.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use sampling_core::types::Transaction;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//! let tx = Transaction::new("JE-0001", date, -2_500.0)
//!     .with_account("4000", "Revenue")
//!     .with_risk_score(0.4);
//!
//! assert_eq!(tx.absolute_amount(), 2_500.0);
//! assert_eq!(tx.risk_score_or_zero(), 0.4);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One ledger line of the population.
///
/// Transactions are immutable once loaded; the engine only ever reads them
/// and copies them into [`SampleItem`](super::SampleItem)s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier within the population.
    pub id: String,
    /// Booking date.
    pub date: NaiveDate,
    /// General-ledger account number.
    #[serde(default)]
    pub account_number: String,
    /// General-ledger account name.
    #[serde(default)]
    pub account_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Signed amount in reporting currency.
    pub amount: f64,
    /// Optional risk score in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    /// Optional voucher reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher_ref: Option<String>,
}

impl Transaction {
    /// Creates a transaction with empty account and description fields.
    pub fn new(id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        Self {
            id: id.into(),
            date,
            account_number: String::new(),
            account_name: String::new(),
            description: String::new(),
            amount,
            risk_score: None,
            voucher_ref: None,
        }
    }

    /// Sets the account number and name.
    pub fn with_account(mut self, number: impl Into<String>, name: impl Into<String>) -> Self {
        self.account_number = number.into();
        self.account_name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the risk score.
    pub fn with_risk_score(mut self, score: f64) -> Self {
        self.risk_score = Some(score);
        self
    }

    /// Sets the voucher reference.
    pub fn with_voucher(mut self, voucher: impl Into<String>) -> Self {
        self.voucher_ref = Some(voucher.into());
        self
    }

    /// Absolute value of the amount.
    #[inline]
    pub fn absolute_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Risk score, or 0 when absent.
    #[inline]
    pub fn risk_score_or_zero(&self) -> f64 {
        self.risk_score.unwrap_or(0.0)
    }
}

/// Sum of absolute amounts over a slice of transactions.
pub fn absolute_sum(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::absolute_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[test]
    fn test_builder_fields() {
        let tx = Transaction::new("T1", date(), 100.0)
            .with_account("1200", "Receivables")
            .with_description("Invoice 42")
            .with_voucher("V-42");

        assert_eq!(tx.id, "T1");
        assert_eq!(tx.account_number, "1200");
        assert_eq!(tx.account_name, "Receivables");
        assert_eq!(tx.description, "Invoice 42");
        assert_eq!(tx.voucher_ref.as_deref(), Some("V-42"));
        assert_eq!(tx.risk_score, None);
        assert_eq!(tx.risk_score_or_zero(), 0.0);
    }

    #[test]
    fn test_absolute_sum_ignores_sign() {
        let txs = vec![
            Transaction::new("A", date(), -300.0),
            Transaction::new("B", date(), 200.0),
        ];
        assert_eq!(absolute_sum(&txs), 500.0);
        assert_eq!(absolute_sum(&[]), 0.0);
    }

    #[test]
    fn test_serde_camel_case_and_optional_fields() {
        let json = r#"{"id":"T9","date":"2024-06-30","amount":12.5,"riskScore":0.75}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.risk_score, Some(0.75));
        assert_eq!(tx.account_number, "");
        assert_eq!(tx.voucher_ref, None);

        let out = serde_json::to_string(&tx).unwrap();
        assert!(out.contains("\"riskScore\":0.75"));
        assert!(!out.contains("voucherRef"));
    }
}
