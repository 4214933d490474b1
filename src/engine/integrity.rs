//! External-data integrity checks
//!
//! The engine trusts the store for ordering and soft-delete filtering, but
//! transfer pairing is a cross-record invariant worth verifying on load: a
//! broken pair silently corrupts account balances and the register view.

use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionId};

/// Verify the transfer-pairing invariant over a transaction set
///
/// Every transaction with `transfer_transaction_id` must have exactly one
/// counterpart that points back, lives on the named account, negates the
/// amount exactly, and carries no category (both legs). Violations surface
/// as [`LedgerError::DataInconsistency`]; no missing leg is ever
/// synthesized.
pub fn verify_transfer_pairs(transactions: &[Transaction]) -> LedgerResult<()> {
    let by_id: HashMap<TransactionId, &Transaction> =
        transactions.iter().map(|txn| (txn.id, txn)).collect();

    for txn in transactions {
        let Some(counterpart_id) = txn.transfer_transaction_id else {
            continue;
        };
        let counterpart = by_id.get(&counterpart_id).ok_or_else(|| {
            LedgerError::DataInconsistency(format!(
                "transfer counterpart {} of {} is missing",
                counterpart_id, txn.id
            ))
        })?;

        if counterpart.transfer_transaction_id != Some(txn.id) {
            return Err(LedgerError::DataInconsistency(format!(
                "transfer {} does not point back at {}",
                counterpart.id, txn.id
            )));
        }
        if txn.transfer_account_id != Some(counterpart.account_id)
            || counterpart.transfer_account_id != Some(txn.account_id)
        {
            return Err(LedgerError::DataInconsistency(format!(
                "transfer pair {} / {} has mismatched accounts",
                txn.id, counterpart.id
            )));
        }
        if counterpart.amount != -txn.amount {
            return Err(LedgerError::DataInconsistency(format!(
                "transfer pair {} / {} amounts do not negate ({} vs {})",
                txn.id, counterpart.id, txn.amount, counterpart.amount
            )));
        }
        if txn.category_id.is_some() || counterpart.category_id.is_some() {
            return Err(LedgerError::DataInconsistency(format!(
                "transfer pair {} / {} carries a category",
                txn.id, counterpart.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, BudgetId, CategoryId, Money, PayeeId};
    use chrono::NaiveDate;

    fn pair() -> (Transaction, Transaction) {
        Transaction::transfer_pair(
            BudgetId::new(),
            AccountId::new(),
            AccountId::new(),
            PayeeId::new(),
            PayeeId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            Money::from_cents(10000),
        )
    }

    #[test]
    fn test_well_formed_pair_passes() {
        let (from_leg, to_leg) = pair();
        assert!(verify_transfer_pairs(&[from_leg, to_leg]).is_ok());
    }

    #[test]
    fn test_missing_counterpart() {
        let (from_leg, _) = pair();
        let err = verify_transfer_pairs(&[from_leg]).unwrap_err();
        assert!(err.is_data_inconsistency());
    }

    #[test]
    fn test_amount_not_negated() {
        let (from_leg, mut to_leg) = pair();
        to_leg.amount = Money::from_cents(9999);
        let err = verify_transfer_pairs(&[from_leg, to_leg]).unwrap_err();
        assert!(err.to_string().contains("do not negate"));
    }

    #[test]
    fn test_categorized_leg_rejected() {
        let (from_leg, mut to_leg) = pair();
        to_leg.category_id = Some(CategoryId::new());
        assert!(verify_transfer_pairs(&[from_leg, to_leg]).is_err());
    }

    #[test]
    fn test_mismatched_accounts() {
        let (from_leg, mut to_leg) = pair();
        to_leg.account_id = AccountId::new();
        let err = verify_transfer_pairs(&[from_leg, to_leg]).unwrap_err();
        assert!(err.to_string().contains("mismatched accounts"));
    }
}
