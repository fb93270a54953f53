//! Turn description groups into report rows

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::classify_frequency;
use crate::models::{DescriptionGroup, ReportRow, Transaction};

/// Most frequent category; ties go to the lexicographically smallest one
pub fn category_mode<'a>(categories: impl IntoIterator<Item = &'a str>) -> Result<&'a str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for category in categories {
        *counts.entry(category).or_insert(0) += 1;
    }

    // BTreeMap iterates in ascending key order, and we only replace the
    // current best on a strictly higher count
    let mut best: Option<(&str, usize)> = None;
    for (category, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((category, count));
        }
    }

    best.map(|(category, _)| category)
        .ok_or_else(|| Error::Invariant("category mode of an empty group".into()))
}

/// Build report rows for every group with more than one distinct transaction.
///
/// Repeated member indices count once. Rows are sorted by transaction count,
/// largest first; groups with equal counts keep their clustering order.
pub fn aggregate(groups: &[DescriptionGroup], transactions: &[Transaction]) -> Result<Vec<ReportRow>> {
    let mut rows = Vec::new();

    for group in groups {
        let members: BTreeSet<usize> = group.member_indices.iter().copied().collect();
        if members.len() <= 1 {
            debug!("Dropping group '{}' with {} member(s)", group.key, members.len());
            continue;
        }

        let members: Vec<&Transaction> = members
            .into_iter()
            .map(|idx| {
                transactions.get(idx).ok_or_else(|| {
                    Error::Invariant(format!(
                        "group '{}' references transaction {} of {}",
                        group.key,
                        idx,
                        transactions.len()
                    ))
                })
            })
            .collect::<Result<_>>()?;

        if let Some(bad) = members.iter().find(|tx| !tx.amount.is_finite()) {
            return Err(Error::Input(format!(
                "Amount is not a number for '{}' on {}",
                bad.original_description, bad.date
            )));
        }

        let category = category_mode(members.iter().map(|tx| tx.category.as_str()))?;
        let total_amount: f64 = members.iter().map(|tx| tx.amount).sum();
        let dates: Vec<_> = members.iter().map(|tx| tx.date).collect();

        rows.push(ReportRow {
            group_key: group.key.clone(),
            category: category.to_string(),
            transaction_count: members.len(),
            total_amount,
            frequency: classify_frequency(&dates),
        });
    }

    rows.sort_by(|a, b| b.transaction_count.cmp(&a.transaction_count));
    Ok(rows)
}
