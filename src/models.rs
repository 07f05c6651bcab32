// models.rs
// Domain models for the persisted debt document and the command inputs.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of an obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DebtType {
    /// Someone owes the user.
    OwedToMe,
    /// The user owes someone.
    IOwe,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::OwedToMe => "owedToMe",
            DebtType::IOwe => "iOwe",
        }
    }
}

impl FromStr for DebtType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owedToMe" => Ok(DebtType::OwedToMe),
            "iOwe" => Ok(DebtType::IOwe),
            other => Err(format!("unknown debt type: {other}")),
        }
    }
}

/// Monthly repayment schedule attached to a debt.
///
/// `payments` and `custom_amounts` are indexed by month offset: index 0 is due
/// the calendar month after the debt's date. Both always hold `total_months`
/// entries once [`Installment::ensure_initialized`] has run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub total_months: u32,
    pub monthly_amount: Decimal,
    pub payments: Vec<bool>,
    #[serde(default)]
    pub custom_amounts: Vec<Decimal>,
}

/// One recorded obligation between the user and a counterparty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    pub person_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub installment: Option<Installment>,
}

/// Fields submitted by the debt form for create and update.
#[derive(Debug, Clone)]
pub struct DebtForm {
    pub debt_type: DebtType,
    pub person_name: String,
    /// Raw amount as typed, thousands separators allowed (`1.200.000`).
    pub amount: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// `Some(n)` when the installment flag is checked.
    pub installment_months: Option<u32>,
}

/// List filter over the debt collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebtFilter {
    #[default]
    All,
    OwedToMe,
    IOwe,
    Paid,
    Unpaid,
}

impl DebtFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtFilter::All => "all",
            DebtFilter::OwedToMe => "owedToMe",
            DebtFilter::IOwe => "iOwe",
            DebtFilter::Paid => "paid",
            DebtFilter::Unpaid => "unpaid",
        }
    }

    pub fn matches(&self, debt: &Debt) -> bool {
        match self {
            DebtFilter::All => true,
            DebtFilter::OwedToMe => debt.debt_type == DebtType::OwedToMe,
            DebtFilter::IOwe => debt.debt_type == DebtType::IOwe,
            DebtFilter::Paid => debt.paid,
            DebtFilter::Unpaid => !debt.paid,
        }
    }
}

impl FromStr for DebtFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(DebtFilter::All),
            "owedToMe" => Ok(DebtFilter::OwedToMe),
            "iOwe" => Ok(DebtFilter::IOwe),
            "paid" => Ok(DebtFilter::Paid),
            "unpaid" => Ok(DebtFilter::Unpaid),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

impl fmt::Display for DebtFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outstanding totals across all unpaid debts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balances {
    pub owed_to_me: Decimal,
    pub i_owe: Decimal,
    pub net: Decimal,
}
