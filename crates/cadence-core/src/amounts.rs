//! Recurring amount detection
//!
//! A second grouping axis next to description clustering: transactions that
//! share the exact same amount (to the cent) more than once.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{AmountGroup, Transaction};

/// Round an amount to whole cents (half to even)
pub fn to_cents(amount: f64) -> Result<i64> {
    if !amount.is_finite() {
        return Err(Error::Input(format!("Amount is not a number: {}", amount)));
    }
    Ok((amount * 100.0).round_ties_even() as i64)
}

/// Group transactions by rounded amount, keeping amounts seen more than once.
///
/// Groups come out in the order their amount first appears; indices within a
/// group are ascending.
pub fn detect_recurring_amounts(transactions: &[Transaction]) -> Result<Vec<AmountGroup>> {
    let mut order: Vec<i64> = Vec::new();
    let mut by_amount: HashMap<i64, Vec<usize>> = HashMap::new();

    for (idx, tx) in transactions.iter().enumerate() {
        let cents = to_cents(tx.amount)?;
        by_amount
            .entry(cents)
            .or_insert_with(|| {
                order.push(cents);
                Vec::new()
            })
            .push(idx);
    }

    Ok(order
        .into_iter()
        .filter_map(|cents| {
            let indices = by_amount.remove(&cents)?;
            (indices.len() > 1).then_some(AmountGroup {
                amount_cents: cents,
                indices,
            })
        })
        .collect())
}
