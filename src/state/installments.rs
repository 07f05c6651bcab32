use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    error::{DebtError, Result},
    input::parse_amount,
    ledger::{self, InstallmentSummary, ScheduleRow},
    models::{Debt, Installment},
};

use super::{AppState, debts::check_amount_cap};

fn ledger_mut<'a>(debt: &'a mut Debt) -> Result<&'a mut Installment> {
    let id = debt.id.clone();
    debt.installment
        .as_mut()
        .ok_or_else(|| DebtError::validation(format!("debt {id} has no installment plan")))
}

fn find_mut<'a>(debts: &'a mut [Debt], id: &str) -> Result<&'a mut Debt> {
    debts
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| DebtError::NotFound(id.to_string()))
}

impl AppState {
    /// Flips month `index` and re-derives the debt's `paid` flag from the
    /// ledger. Returns the new state of that month.
    pub fn toggle_payment(&mut self, id: &str, index: usize) -> Result<bool> {
        let (month_paid, debt_paid) = self.mutate(|debts| {
            let debt = find_mut(debts, id)?;
            let ledger = ledger_mut(debt)?;
            let month_paid = ledger.toggle(index)?;
            let all_paid = ledger.all_paid();
            debt.paid = all_paid;
            Ok((month_paid, all_paid))
        })?;
        debug!(debt_id = %id, index, month_paid, debt_paid, "installment payment toggled");
        Ok(month_paid)
    }

    /// Overrides month `index` with a leniently parsed amount (`"150.000"`
    /// reads as 150000, junk reads as zero). Payment flags are untouched.
    pub fn set_custom_amount(&mut self, id: &str, index: usize, raw: &str) -> Result<Decimal> {
        let amount = parse_amount(raw);
        check_amount_cap(amount)?;
        self.mutate(|debts| {
            let debt = find_mut(debts, id)?;
            ledger_mut(debt)?.set_custom_amount(index, amount)
        })?;
        debug!(debt_id = %id, index, %amount, "installment amount overridden");
        Ok(amount)
    }

    /// Puts every month back on the even share.
    pub fn reset_to_even(&mut self, id: &str) -> Result<()> {
        self.mutate(|debts| {
            let debt = find_mut(debts, id)?;
            ledger_mut(debt)?.reset_to_even();
            Ok(())
        })?;
        debug!(debt_id = %id, "installment reset to even split");
        Ok(())
    }

    pub fn installment_schedule(&self, id: &str) -> Result<Vec<ScheduleRow>> {
        let debt = self.get(id)?;
        if debt.installment.is_none() {
            return Err(DebtError::validation(format!(
                "debt {id} has no installment plan"
            )));
        }
        Ok(ledger::schedule(debt))
    }

    pub fn installment_summary(&self, id: &str) -> Result<Option<InstallmentSummary>> {
        Ok(ledger::summary(self.get(id)?))
    }
}
