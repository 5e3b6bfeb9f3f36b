//! Period buckets and totals over expense/income lists.
//!
//! Everything here is evaluated against an explicit `now`, and calendar
//! comparisons happen in `now`'s time zone. Pages pass `Local::now()`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, TimeZone};

use crate::models::{Category, Timestamp, Transaction, TransactionKind};
use crate::money::{Money, SignedMoney};

pub const UNKNOWN_CATEGORY: &str = "Unknown category";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    Today,
    Week,
    Month,
    All,
}

impl Period {
    pub const EVERY: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::All];

    pub fn label(self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "Last 7 days",
            Period::Month => "This month",
            Period::All => "All time",
        }
    }
}

/// Whether a record created at `created_at` falls in `period`.
///
/// `Week` is the 7×24h window ending at `now` (time of day included), not a
/// calendar week. Records without a timestamp only ever count towards `All`.
pub fn contains<Tz: TimeZone>(
    period: Period,
    created_at: Option<&Timestamp>,
    now: &DateTime<Tz>,
) -> bool {
    if period == Period::All {
        return true;
    }
    let at = match created_at.and_then(|ts| ts.in_zone(&now.timezone())) {
        Some(at) => at,
        None => return false,
    };
    match period {
        Period::Today => at.date_naive() == now.date_naive(),
        Period::Week => {
            let window_start = now.clone() - Duration::days(7);
            at >= window_start && at <= *now
        }
        Period::Month => at.year() == now.year() && at.month() == now.month(),
        Period::All => true,
    }
}

pub fn bucket<'a, Tz: TimeZone>(
    items: &'a [Transaction],
    period: Period,
    now: &DateTime<Tz>,
) -> Vec<&'a Transaction> {
    items
        .iter()
        .filter(|tx| contains(period, tx.created_at.as_ref(), now))
        .collect()
}

pub fn total<'a>(items: impl IntoIterator<Item = &'a Transaction>) -> Money {
    items.into_iter().map(|tx| tx.amount).sum()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub today: Money,
    pub week: Money,
    pub month: Money,
    pub all: Money,
}

impl PeriodTotals {
    pub fn compute<Tz: TimeZone>(items: &[Transaction], now: &DateTime<Tz>) -> Self {
        Self {
            today: total(bucket(items, Period::Today, now)),
            week: total(bucket(items, Period::Week, now)),
            month: total(bucket(items, Period::Month, now)),
            all: total(items),
        }
    }

    pub fn get(&self, period: Period) -> Money {
        match period {
            Period::Today => self.today,
            Period::Week => self.week,
            Period::Month => self.month,
            Period::All => self.all,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category_id: i64,
    pub name: String,
    pub items: Vec<&'a Transaction>,
    pub total: Money,
}

/// Splits a bucket by category. Groups follow the order of `categories`;
/// records pointing at a category that is not in the list are still kept,
/// in their own groups after the known ones.
pub fn group_by_category<'a>(
    bucket: &[&'a Transaction],
    categories: &[Category],
) -> Vec<CategoryGroup<'a>> {
    let mut by_id: BTreeMap<i64, Vec<&'a Transaction>> = BTreeMap::new();
    for tx in bucket {
        by_id.entry(tx.category_id).or_default().push(*tx);
    }

    let mut groups = Vec::with_capacity(by_id.len());
    for category in categories {
        if let Some(items) = by_id.remove(&category.id) {
            groups.push(CategoryGroup {
                category_id: category.id,
                name: category.name.clone(),
                total: total(items.iter().copied()),
                items,
            });
        }
    }
    for (category_id, items) in by_id {
        groups.push(CategoryGroup {
            category_id,
            name: UNKNOWN_CATEGORY.to_string(),
            total: total(items.iter().copied()),
            items,
        });
    }
    groups
}

pub fn category_name(categories: &[Category], id: i64) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement<'a> {
    pub kind: TransactionKind,
    pub transaction: &'a Transaction,
}

/// The `limit` newest records of both kinds, newest first. Records without
/// a timestamp sort last.
pub fn recent<'a, Tz: TimeZone>(
    expenses: &'a [Transaction],
    income: &'a [Transaction],
    limit: usize,
    tz: &Tz,
) -> Vec<Movement<'a>> {
    let mut merged: Vec<(Option<DateTime<Tz>>, Movement<'a>)> = income
        .iter()
        .map(|tx| (TransactionKind::Income, tx))
        .chain(expenses.iter().map(|tx| (TransactionKind::Expense, tx)))
        .map(|(kind, tx)| {
            let key = tx.created_at.as_ref().and_then(|ts| ts.in_zone(tz));
            (key, Movement { kind, transaction: tx })
        })
        .collect();
    merged.sort_by(|a, b| b.0.cmp(&a.0));
    merged.into_iter().take(limit).map(|(_, m)| m).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overview {
    pub expenses: PeriodTotals,
    pub income: PeriodTotals,
    pub balance: SignedMoney,
}

impl Overview {
    pub fn compute<Tz: TimeZone>(
        expenses: &[Transaction],
        income: &[Transaction],
        now: &DateTime<Tz>,
    ) -> Self {
        let expenses = PeriodTotals::compute(expenses, now);
        let income = PeriodTotals::compute(income, now);
        Self {
            balance: income.all - expenses.all,
            expenses,
            income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn zone() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn now() -> DateTime<FixedOffset> {
        zone().with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
    }

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Timestamp {
        Timestamp::Naive(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
    }

    fn tx(id: i64, minor: i64, category_id: i64, created_at: Option<Timestamp>) -> Transaction {
        Transaction {
            id,
            amount: Money::from_minor(minor),
            description: Some(format!("tx {}", id)),
            category_id,
            created_at,
        }
    }

    fn categories() -> Vec<Category> {
        ["Food", "Rent", "Fun"]
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: i as i64 + 1,
                name: name.to_string(),
                description: None,
                color: None,
                icon: None,
            })
            .collect()
    }

    #[test]
    fn today_and_ten_days_ago() {
        let items = vec![
            tx(1, 10000, 1, Some(naive(2024, 5, 20, 9, 0, 0))),
            tx(2, 5000, 1, Some(naive(2024, 5, 10, 9, 0, 0))),
        ];
        let totals = PeriodTotals::compute(&items, &now());
        assert_eq!(totals.today, Money::from_minor(10000));
        assert_eq!(totals.week, Money::from_minor(10000));
        assert_eq!(totals.month, Money::from_minor(15000));
        assert_eq!(totals.all, Money::from_minor(15000));
    }

    #[test]
    fn all_bucket_is_everything() {
        let lists = vec![
            vec![],
            vec![tx(1, 1, 1, None)],
            vec![
                tx(1, 333, 1, None),
                tx(2, 1, 2, Some(naive(1999, 1, 1, 0, 0, 0))),
                tx(3, 99999, 3, Some(naive(2030, 12, 31, 23, 59, 59))),
            ],
        ];
        for items in lists {
            let expected: i64 = items.iter().map(|t| t.amount.minor()).sum();
            assert_eq!(bucket(&items, Period::All, &now()).len(), items.len());
            assert_eq!(total(bucket(&items, Period::All, &now())).minor(), expected);
        }
    }

    #[test]
    fn today_means_same_local_date() {
        let n = now();
        assert!(contains(Period::Today, Some(&naive(2024, 5, 20, 0, 0, 0)), &n));
        assert!(contains(Period::Today, Some(&naive(2024, 5, 20, 23, 59, 59)), &n));
        assert!(!contains(Period::Today, Some(&naive(2024, 5, 19, 23, 59, 59)), &n));
        assert!(!contains(Period::Today, Some(&naive(2023, 5, 20, 12, 0, 0)), &n));

        // 22:30 UTC on the 19th is 01:30 on the 20th at +03:00.
        let utc_evening = Timestamp::Zoned(
            Utc.with_ymd_and_hms(2024, 5, 19, 22, 30, 0)
                .unwrap()
                .fixed_offset(),
        );
        assert!(contains(Period::Today, Some(&utc_evening), &n));
    }

    #[test]
    fn week_is_a_rolling_seven_day_window() {
        let n = now();
        assert!(contains(Period::Week, Some(&naive(2024, 5, 13, 12, 0, 0)), &n));
        assert!(!contains(Period::Week, Some(&naive(2024, 5, 13, 11, 59, 59)), &n));
        assert!(contains(Period::Week, Some(&naive(2024, 5, 20, 12, 0, 0)), &n));
        assert!(!contains(Period::Week, Some(&naive(2024, 5, 20, 12, 0, 1)), &n));
    }

    #[test]
    fn week_is_a_subset_of_all() {
        let items: Vec<Transaction> = (0..30)
            .map(|day| tx(day, 100, 1, Some(naive(2024, 5, 1 + day as u32 % 28, 8, 0, 0))))
            .collect();
        let n = now();
        let week = bucket(&items, Period::Week, &n);
        let all = bucket(&items, Period::All, &n);
        assert!(week.iter().all(|w| all.iter().any(|a| a.id == w.id)));
        let start = n - Duration::days(7);
        for w in week {
            let at = w.created_at.unwrap().in_zone(&zone()).unwrap();
            assert!(at >= start && at <= n);
        }
    }

    #[test]
    fn month_ignores_other_years() {
        let n = now();
        assert!(contains(Period::Month, Some(&naive(2024, 5, 1, 0, 0, 0)), &n));
        assert!(contains(Period::Month, Some(&naive(2024, 5, 31, 0, 0, 0)), &n));
        assert!(!contains(Period::Month, Some(&naive(2023, 5, 20, 0, 0, 0)), &n));
        assert!(!contains(Period::Month, Some(&naive(2024, 4, 30, 23, 0, 0)), &n));
    }

    #[test]
    fn missing_timestamp_only_counts_for_all() {
        let n = now();
        for period in [Period::Today, Period::Week, Period::Month] {
            assert!(!contains(period, None, &n));
        }
        assert!(contains(Period::All, None, &n));
    }

    #[test]
    fn groups_partition_the_bucket() {
        let items = vec![
            tx(1, 100, 2, Some(naive(2024, 5, 20, 8, 0, 0))),
            tx(2, 250, 1, Some(naive(2024, 5, 20, 9, 0, 0))),
            tx(3, 50, 2, Some(naive(2024, 5, 20, 10, 0, 0))),
            tx(4, 75, 42, Some(naive(2024, 5, 20, 11, 0, 0))),
            tx(5, 999, 3, Some(naive(2024, 4, 1, 11, 0, 0))),
        ];
        let today = bucket(&items, Period::Today, &now());
        let groups = group_by_category(&today, &categories());

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Rent", UNKNOWN_CATEGORY]);
        assert_eq!(groups[1].total, Money::from_minor(150));
        assert_eq!(groups[2].category_id, 42);

        let grouped_count: usize = groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(grouped_count, today.len());
        let grouped_total: Money = groups.iter().map(|g| g.total).sum();
        assert_eq!(grouped_total, total(today.iter().copied()));
        for tx in &today {
            let owners = groups
                .iter()
                .filter(|g| g.items.iter().any(|i| i.id == tx.id))
                .count();
            assert_eq!(owners, 1);
        }
    }

    #[test]
    fn empty_bucket_has_no_groups() {
        assert!(group_by_category(&[], &categories()).is_empty());
    }

    #[test]
    fn category_name_falls_back() {
        assert_eq!(category_name(&categories(), 2), "Rent");
        assert_eq!(category_name(&categories(), 7), UNKNOWN_CATEGORY);
    }

    #[test]
    fn recent_merges_newest_first() {
        let expenses = vec![
            tx(1, 100, 1, Some(naive(2024, 5, 18, 8, 0, 0))),
            tx(2, 100, 1, None),
        ];
        let income = vec![
            tx(10, 500, 1, Some(naive(2024, 5, 19, 8, 0, 0))),
            tx(11, 500, 1, Some(naive(2024, 5, 1, 8, 0, 0))),
        ];
        let latest = recent(&expenses, &income, 3, &zone());
        let ids: Vec<(TransactionKind, i64)> =
            latest.iter().map(|m| (m.kind, m.transaction.id)).collect();
        assert_eq!(
            ids,
            vec![
                (TransactionKind::Income, 10),
                (TransactionKind::Expense, 1),
                (TransactionKind::Income, 11),
            ]
        );
    }

    #[test]
    fn overview_balance_can_go_negative() {
        let expenses = vec![tx(1, 30000, 1, Some(naive(2024, 5, 20, 8, 0, 0)))];
        let income = vec![tx(2, 10000, 1, Some(naive(2024, 5, 2, 8, 0, 0)))];
        let overview = Overview::compute(&expenses, &income, &now());
        assert_eq!(overview.expenses.today, Money::from_minor(30000));
        assert_eq!(overview.income.week, Money::ZERO);
        assert_eq!(overview.income.month, Money::from_minor(10000));
        assert_eq!(overview.balance.minor(), -20000);
        assert_eq!(overview.income.get(Period::All), Money::from_minor(10000));
    }
}
