//! Periodicity classification from transaction dates

use chrono::NaiveDate;

use crate::models::Frequency;

/// Classify the spacing of a set of dates.
///
/// Dates are sorted first, so input order does not matter. The mean gap
/// between consecutive dates picks the label; monthly and weekly need at
/// least three dates, annual needs two.
pub fn classify_frequency(dates: &[NaiveDate]) -> Frequency {
    if dates.len() < 2 {
        return Frequency::Irregular;
    }

    let mut sorted = dates.to_vec();
    sorted.sort();

    let gaps: Vec<i64> = sorted
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .collect();
    let avg_gap = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    let count = sorted.len();

    if (25.0..=35.0).contains(&avg_gap) && count >= 3 {
        Frequency::Monthly
    } else if (6.0..=8.0).contains(&avg_gap) && count >= 3 {
        Frequency::Weekly
    } else if (360.0..=370.0).contains(&avg_gap) && count >= 2 {
        Frequency::Annually
    } else {
        Frequency::Irregular
    }
}
