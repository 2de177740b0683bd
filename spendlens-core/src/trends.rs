//! Aggregate spending trends computed over categorized records.
//!
//! This is the query side of the API: the server aggregates whatever store it
//! holds instead of shelling out to an analytical warehouse.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::transaction::{Category, TransactionRecord};

/// One calendar month of activity. `month` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: String,
    /// Total debits, as a positive number.
    pub spend: f64,
    /// Total credits.
    pub income: f64,
    /// `income - spend`.
    pub net: f64,
    /// Debit totals per category, as positive numbers.
    pub by_category: BTreeMap<Category, f64>,
}

/// Projected net for a future month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: String,
    pub projected_net: f64,
}

/// Aggregate records into per-month summaries, ascending by month.
pub fn monthly_summary(records: &[TransactionRecord]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), MonthlySummary> = BTreeMap::new();

    for rec in records {
        let key = (rec.date.year(), rec.date.month());
        let entry = months.entry(key).or_insert_with(|| MonthlySummary {
            month: format!("{:04}-{:02}", key.0, key.1),
            spend: 0.0,
            income: 0.0,
            net: 0.0,
            by_category: BTreeMap::new(),
        });

        if rec.is_expense() {
            entry.spend += rec.amount.abs();
            if let Some(cat) = rec.category {
                *entry.by_category.entry(cat).or_insert(0.0) += rec.amount.abs();
            }
        } else {
            entry.income += rec.amount;
        }
        entry.net = entry.income - entry.spend;
    }

    months.into_values().collect()
}

/// Project net spend forward using a trailing three-month moving average.
/// With no observed months there is nothing to extrapolate from.
pub fn forecast(summaries: &[MonthlySummary], months_ahead: u32) -> Vec<ForecastPoint> {
    let Some(last) = summaries.last() else {
        return Vec::new();
    };
    let Some((mut year, mut month)) = parse_month(&last.month) else {
        return Vec::new();
    };

    let window = &summaries[summaries.len().saturating_sub(3)..];
    let avg_net = window.iter().map(|s| s.net).sum::<f64>() / window.len() as f64;

    let mut out = Vec::with_capacity(months_ahead as usize);
    for _ in 0..months_ahead {
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
        out.push(ForecastPoint {
            month: format!("{year:04}-{month:02}"),
            projected_net: avg_net,
        });
    }
    out
}

fn parse_month(label: &str) -> Option<(i32, u32)> {
    let (y, m) = label.split_once('-')?;
    let month: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((y.parse().ok()?, month))
}
