use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{DebtError, Result},
    input::{clean_opt, parse_amount},
    ledger::remaining,
    models::{Balances, Debt, DebtFilter, DebtForm, DebtType, Installment},
};

use super::AppState;

/// Largest amount accepted from a form or a month override.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Longest installment plan a form may request (50 years).
pub const MAX_INSTALLMENT_MONTHS: u32 = 600;

pub(super) fn check_amount_cap(amount: Decimal) -> Result<()> {
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(DebtError::validation(format!(
            "amount must not exceed {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// A form that passed validation.
struct ValidForm {
    debt_type: DebtType,
    person_name: String,
    amount: Decimal,
    date: NaiveDate,
    notes: Option<String>,
    months: Option<u32>,
}

fn validate(form: DebtForm) -> Result<ValidForm> {
    let person_name = form.person_name.trim().to_string();
    if person_name.is_empty() {
        return Err(DebtError::validation("person name is required"));
    }

    let amount = parse_amount(&form.amount);
    if amount <= Decimal::ZERO {
        return Err(DebtError::validation("amount must be greater than zero"));
    }
    check_amount_cap(amount)?;

    match form.installment_months {
        Some(0) => {
            return Err(DebtError::validation(
                "installment plan needs at least one month",
            ));
        }
        Some(months) if months > MAX_INSTALLMENT_MONTHS => {
            return Err(DebtError::validation(format!(
                "installment plan cannot exceed {MAX_INSTALLMENT_MONTHS} months"
            )));
        }
        _ => {}
    }

    Ok(ValidForm {
        debt_type: form.debt_type,
        person_name,
        amount,
        date: form.date,
        notes: clean_opt(form.notes),
        months: form.installment_months,
    })
}

fn position(debts: &[Debt], id: &str) -> Result<usize> {
    debts
        .iter()
        .position(|d| d.id == id)
        .ok_or_else(|| DebtError::NotFound(id.to_string()))
}

/// Debts matching `filter`, most recent date first; equal dates keep
/// insertion order.
pub fn filter_debts(debts: &[Debt], filter: DebtFilter) -> Vec<&Debt> {
    let mut items: Vec<&Debt> = debts.iter().filter(|d| filter.matches(d)).collect();
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

/// Sums the remaining balance of every debt not flagged paid, per direction.
pub fn aggregate(debts: &[Debt]) -> Balances {
    let (owed_to_me, i_owe) = debts.iter().filter(|d| !d.paid).fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(owed_to_me, i_owe), debt| match debt.debt_type {
            DebtType::OwedToMe => (owed_to_me.saturating_add(remaining(debt)), i_owe),
            DebtType::IOwe => (owed_to_me, i_owe.saturating_add(remaining(debt))),
        },
    );
    Balances {
        owed_to_me,
        i_owe,
        net: owed_to_me.saturating_sub(i_owe),
    }
}

impl AppState {
    pub fn get(&self, id: &str) -> Result<&Debt> {
        self.session.require()?;
        let idx = position(&self.debts, id)?;
        Ok(&self.debts[idx])
    }

    pub fn create(&mut self, form: DebtForm) -> Result<String> {
        self.session.require()?;
        let valid = validate(form)?;
        let id = Uuid::new_v4().to_string();
        let debt = Debt {
            id: id.clone(),
            debt_type: valid.debt_type,
            person_name: valid.person_name,
            amount: valid.amount,
            date: valid.date,
            notes: valid.notes,
            paid: false,
            created_at: Utc::now(),
            installment: valid.months.map(|m| Installment::new(valid.amount, m)),
        };

        self.mutate(|debts| {
            debts.push(debt);
            Ok(())
        })?;
        info!(debt_id = %id, "debt created");
        Ok(id)
    }

    /// Rebuilds the record from `form`, keeping `id` and `created_at`.
    ///
    /// An existing ledger keeps its payment history when the plan stays on;
    /// turning the plan off drops the ledger. With a ledger `paid` is
    /// re-derived from it, otherwise the previous flag is kept.
    pub fn update(&mut self, id: &str, form: DebtForm) -> Result<()> {
        self.session.require()?;
        position(&self.debts, id)?;
        let valid = validate(form)?;
        self.mutate(|debts| {
            let idx = position(debts, id)?;
            let existing = &debts[idx];
            let created_at = existing.created_at;

            let installment = match (valid.months, existing.installment.as_ref()) {
                (Some(months), Some(prev)) => Some(prev.carry_over(valid.amount, months)?),
                (Some(months), None) => Some(Installment::new(valid.amount, months)),
                (None, _) => None,
            };
            let paid = match &installment {
                Some(ledger) => ledger.all_paid(),
                None => existing.paid,
            };

            debts[idx] = Debt {
                id: id.to_string(),
                debt_type: valid.debt_type,
                person_name: valid.person_name,
                amount: valid.amount,
                date: valid.date,
                notes: valid.notes,
                paid,
                created_at,
                installment,
            };
            Ok(())
        })?;
        info!(debt_id = %id, "debt updated");
        Ok(())
    }

    /// Removes the record. A missing id is reported as `NotFound`.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.mutate(|debts| {
            let idx = position(debts, id)?;
            debts.remove(idx);
            Ok(())
        })?;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        info!(debt_id = %id, "debt deleted");
        Ok(())
    }

    /// Flips the stored `paid` flag only. For installment debts this leaves
    /// the ledger alone, so the flag may disagree with it until the next
    /// payment toggle re-derives it.
    pub fn toggle_paid(&mut self, id: &str) -> Result<bool> {
        let paid = self.mutate(|debts| {
            let idx = position(debts, id)?;
            debts[idx].paid = !debts[idx].paid;
            Ok(debts[idx].paid)
        })?;
        info!(debt_id = %id, paid, "paid flag toggled");
        Ok(paid)
    }

    pub fn list(&self, filter: DebtFilter) -> Result<Vec<&Debt>> {
        self.session.require()?;
        Ok(filter_debts(&self.debts, filter))
    }

    /// `list` with the filter currently selected.
    pub fn visible_debts(&self) -> Result<Vec<&Debt>> {
        self.list(self.filter)
    }

    pub fn aggregate_balances(&self) -> Result<Balances> {
        self.session.require()?;
        Ok(aggregate(&self.debts))
    }

    /// Loads a debt into the form; the next `submit` updates it.
    pub fn begin_edit(&mut self, id: &str) -> Result<&Debt> {
        self.session.require()?;
        let idx = position(&self.debts, id)?;
        self.editing = Some(id.to_string());
        Ok(&self.debts[idx])
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Form submission: updates the edit target if there is one, otherwise
    /// creates a new debt. Returns the id of the saved record.
    pub fn submit(&mut self, form: DebtForm) -> Result<String> {
        match self.editing.clone() {
            Some(id) => {
                self.update(&id, form)?;
                self.editing = None;
                Ok(id)
            }
            None => self.create(form),
        }
    }
}
