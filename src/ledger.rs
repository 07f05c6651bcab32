// ledger.rs
// Installment ledger: per-month paid flags and amount overrides, and the
// figures derived from them (paid total, remaining balance, progress).

use std::fmt;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{DebtError, Result};
use crate::models::{Debt, Installment};

impl Installment {
    /// Fresh schedule: nothing paid, every month at the even share.
    pub fn new(amount: Decimal, total_months: u32) -> Self {
        let monthly_amount = even_share(amount, total_months);
        let len = total_months as usize;
        Self {
            total_months,
            monthly_amount,
            payments: vec![false; len],
            custom_amounts: vec![monthly_amount; len],
        }
    }

    /// Brings both arrays to exactly `total_months` entries. Missing overrides
    /// take the even share, missing payments are unpaid. Returns whether
    /// anything had to be repaired.
    pub fn ensure_initialized(&mut self) -> bool {
        let len = self.total_months as usize;
        let repaired = self.payments.len() != len || self.custom_amounts.len() != len;
        self.payments.resize(len, false);
        self.custom_amounts.resize(len, self.monthly_amount);
        repaired
    }

    /// Effective amount for month `i`. A zero override falls back to the
    /// even share, so clearing an input restores the default.
    pub fn resolved_amount(&self, i: usize) -> Decimal {
        self.custom_amounts
            .get(i)
            .copied()
            .filter(|amount| !amount.is_zero())
            .unwrap_or(self.monthly_amount)
    }

    /// Saturates at `Decimal::MAX` for documents carrying absurd overrides.
    pub fn paid_total(&self) -> Decimal {
        self.payments
            .iter()
            .enumerate()
            .filter(|(_, paid)| **paid)
            .fold(Decimal::ZERO, |total, (i, _)| {
                total.saturating_add(self.resolved_amount(i))
            })
    }

    pub fn paid_months(&self) -> usize {
        self.payments.iter().filter(|paid| **paid).count()
    }

    pub fn all_paid(&self) -> bool {
        self.payments.iter().all(|paid| *paid)
    }

    /// Flips month `i` and returns its new state.
    pub fn toggle(&mut self, i: usize) -> Result<bool> {
        self.check_index(i)?;
        self.payments[i] = !self.payments[i];
        Ok(self.payments[i])
    }

    pub fn set_custom_amount(&mut self, i: usize, amount: Decimal) -> Result<()> {
        self.check_index(i)?;
        self.ensure_initialized();
        self.custom_amounts[i] = amount;
        Ok(())
    }

    pub fn reset_to_even(&mut self) {
        self.custom_amounts = vec![self.monthly_amount; self.total_months as usize];
    }

    /// Schedule for an edited debt that keeps its payment history.
    ///
    /// Paid flags and real overrides stay on their indices; overrides equal to
    /// the old even share follow the new one. Growing appends unpaid months,
    /// shrinking is refused when it would drop a paid month.
    pub fn carry_over(&self, amount: Decimal, total_months: u32) -> Result<Installment> {
        let len = total_months as usize;
        if let Some(last_paid) = self.payments.iter().rposition(|paid| *paid) {
            if last_paid >= len {
                return Err(DebtError::validation(format!(
                    "month {} is already paid; cannot shorten the plan to {} months",
                    last_paid + 1,
                    total_months
                )));
            }
        }

        let monthly_amount = even_share(amount, total_months);
        let mut payments = self.payments.clone();
        payments.resize(len, false);
        let mut custom_amounts: Vec<Decimal> = self
            .custom_amounts
            .iter()
            .map(|custom| {
                if *custom == self.monthly_amount {
                    monthly_amount
                } else {
                    *custom
                }
            })
            .collect();
        custom_amounts.resize(len, monthly_amount);

        Ok(Installment {
            total_months,
            monthly_amount,
            payments,
            custom_amounts,
        })
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.payments.len() {
            return Err(DebtError::validation(format!(
                "month index {i} is outside a {}-month plan",
                self.total_months
            )));
        }
        Ok(())
    }
}

fn even_share(amount: Decimal, total_months: u32) -> Decimal {
    if total_months == 0 {
        return amount;
    }
    amount / Decimal::from(total_months)
}

/// Outstanding balance of one debt. With a ledger this is the nominal amount
/// minus paid months and may go negative under overrides.
pub fn remaining(debt: &Debt) -> Decimal {
    match &debt.installment {
        Some(ledger) => debt.amount.saturating_sub(ledger.paid_total()),
        None if debt.paid => Decimal::ZERO,
        None => debt.amount,
    }
}

/// Display-only progress; not clamped to 0..=100.
pub fn progress_percent(debt: &Debt) -> Decimal {
    let Some(ledger) = &debt.installment else {
        return if debt.paid {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    };
    if debt.amount.is_zero() {
        return Decimal::ZERO;
    }
    ledger
        .paid_total()
        .checked_div(debt.amount)
        .map_or(Decimal::MAX, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Calendar month a scheduled payment falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MonthLabel {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Month `i` falls due `i + 1` calendar months after the debt's month.
pub fn month_label(debt: &Debt, i: usize) -> MonthLabel {
    let base = i64::from(debt.date.year()) * 12 + i64::from(debt.date.month0());
    let target = base + 1 + i as i64;
    MonthLabel {
        year: target.div_euclid(12) as i32,
        month: target.rem_euclid(12) as u32 + 1,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub index: usize,
    pub due: MonthLabel,
    pub amount: Decimal,
    pub paid: bool,
}

/// Per-month timeline of an installment debt; empty for lump-sum debts.
pub fn schedule(debt: &Debt) -> Vec<ScheduleRow> {
    let Some(ledger) = &debt.installment else {
        return Vec::new();
    };
    ledger
        .payments
        .iter()
        .enumerate()
        .map(|(index, paid)| ScheduleRow {
            index,
            due: month_label(debt, index),
            amount: ledger.resolved_amount(index),
            paid: *paid,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSummary {
    pub total_months: u32,
    pub paid_months: usize,
    pub monthly_amount: Decimal,
    pub paid_total: Decimal,
    pub remaining: Decimal,
    pub progress_percent: Decimal,
}

pub fn summary(debt: &Debt) -> Option<InstallmentSummary> {
    let ledger = debt.installment.as_ref()?;
    Some(InstallmentSummary {
        total_months: ledger.total_months,
        paid_months: ledger.paid_months(),
        monthly_amount: ledger.monthly_amount,
        paid_total: ledger.paid_total(),
        remaining: remaining(debt),
        progress_percent: progress_percent(debt),
    })
}
