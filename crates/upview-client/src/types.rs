//! Wire types for the Up API
//!
//! Field names follow the JSON:API payloads returned by `/accounts` and the
//! per-account transaction links. Fields the view never reads are kept
//! optional so that new or missing attributes do not break decoding.

use chrono::{DateTime, FixedOffset};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Response envelope shared by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

// ==================== Money ====================

/// Minor-unit exponent of an ISO 4217 currency
pub fn minor_unit_exponent(currency_code: &str) -> u32 {
    match currency_code.to_ascii_uppercase().as_str() {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// A monetary quantity as Up reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    /// ISO 4217 currency code
    pub currency_code: String,
    /// Human readable decimal, e.g. "-4.50"
    pub value: String,
    /// Same quantity in the currency's smallest unit
    pub value_in_base_units: i64,
}

impl Amount {
    /// Build an amount from a decimal string, deriving the base-unit value
    pub fn from_value(currency_code: &str, value: &str) -> Self {
        let exponent = minor_unit_exponent(currency_code);
        let value_in_base_units = Decimal::from_str(value)
            .ok()
            .and_then(|d| (d * Decimal::from(10i64.pow(exponent))).trunc().to_i64())
            .unwrap_or(0);

        Self {
            currency_code: currency_code.to_string(),
            value: value.to_string(),
            value_in_base_units,
        }
    }

    pub fn exponent(&self) -> u32 {
        minor_unit_exponent(&self.currency_code)
    }

    /// Decimal value, falling back to the base units when `value` does not parse
    pub fn decimal(&self) -> Decimal {
        Decimal::from_str(self.value.trim()).unwrap_or_else(|_| self.base_units_decimal())
    }

    fn base_units_decimal(&self) -> Decimal {
        Decimal::new(self.value_in_base_units, self.exponent())
    }

    /// Whether `value` agrees with `value_in_base_units`
    pub fn is_consistent(&self) -> bool {
        Decimal::from_str(self.value.trim())
            .map(|d| d == self.base_units_decimal())
            .unwrap_or(false)
    }

    pub fn is_negative(&self) -> bool {
        let value = self.decimal();
        value.is_sign_negative() && !value.is_zero()
    }
}

// ==================== Accounts ====================

/// An account resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "type", default = "default_account_kind")]
    pub kind: String,
    pub id: String,
    pub attributes: AccountAttributes,
    pub relationships: AccountRelationships,
}

fn default_account_kind() -> String {
    "accounts".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAttributes {
    pub display_name: String,
    /// Grouping key, e.g. "SAVER" or "TRANSACTIONAL"
    pub account_type: String,
    #[serde(default)]
    pub ownership_type: Option<String>,
    pub balance: Amount,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRelationships {
    pub transactions: RelatedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedResource {
    #[serde(default)]
    pub links: Option<RelatedLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedLinks {
    pub related: String,
}

impl Account {
    /// URL of this account's transaction list
    pub fn transactions_link(&self) -> Option<&str> {
        self.relationships
            .transactions
            .links
            .as_ref()
            .map(|l| l.related.as_str())
    }

    pub fn display_name(&self) -> &str {
        &self.attributes.display_name
    }

    pub fn account_type(&self) -> &str {
        &self.attributes.account_type
    }

    pub fn balance(&self) -> &Amount {
        &self.attributes.balance
    }
}

// ==================== Transactions ====================

/// Settlement state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Held,
    Settled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Held => write!(f, "held"),
            TransactionStatus::Settled => write!(f, "settled"),
            TransactionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardPurchaseMethodKind {
    BarCode,
    Ocr,
    CardPin,
    CardDetails,
    CardOnFile,
    Ecommerce,
    MagneticStripe,
    Contactless,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPurchaseMethod {
    pub method: CardPurchaseMethodKind,
    #[serde(default)]
    pub card_number_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldInfo {
    pub amount: Amount,
    #[serde(default)]
    pub foreign_amount: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundUp {
    pub amount: Amount,
    #[serde(default)]
    pub boost_portion: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cashback {
    pub description: String,
    pub amount: Amount,
}

/// A transaction resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type", default = "default_transaction_kind")]
    pub kind: String,
    pub id: String,
    pub attributes: TransactionAttributes,
}

fn default_transaction_kind() -> String {
    "transactions".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAttributes {
    pub status: TransactionStatus,
    #[serde(default)]
    pub raw_text: Option<String>,
    pub description: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_categorizable: bool,
    #[serde(default)]
    pub hold_info: Option<HoldInfo>,
    #[serde(default)]
    pub round_up: Option<RoundUp>,
    #[serde(default)]
    pub cashback: Option<Cashback>,
    pub amount: Amount,
    #[serde(default)]
    pub foreign_amount: Option<Amount>,
    #[serde(default)]
    pub card_purchase_method: Option<CardPurchaseMethod>,
    #[serde(default)]
    pub settled_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
}

impl Transaction {
    pub fn description(&self) -> &str {
        &self.attributes.description
    }

    pub fn amount(&self) -> &Amount {
        &self.attributes.amount
    }

    pub fn is_settled(&self) -> bool {
        self.attributes.status == TransactionStatus::Settled
    }
}
