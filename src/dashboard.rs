// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation over the transactions loaded for one month.
//!
//! Everything here is a pure function of the transaction and category lists;
//! nothing is cached between calls.

use crate::models::{Category, Kind, Transaction, TypeFilter};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_TOP_LIMIT: usize = 5;
pub const UNCATEGORIZED_LABEL: &str = "uncategorized";
pub const NO_EXPENSES_LABEL: &str = "no expenses";

/// Category id to display name. Absent ids render as `#<id>`.
#[derive(Debug, Clone, Default)]
pub struct CategoryNameIndex {
    names: HashMap<i64, String>,
}

impl CategoryNameIndex {
    pub fn get(&self, id: i64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn name_for(&self, id: i64) -> String {
        self.get(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", id))
    }

    /// Label for a transaction's category, including the uncategorized case.
    pub fn label_for(&self, category_id: Option<i64>) -> String {
        match category_id {
            Some(id) => self.name_for(id),
            None => UNCATEGORIZED_LABEL.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn build_category_name_index<'a, I>(categories: I) -> CategoryNameIndex
where
    I: IntoIterator<Item = &'a Category>,
{
    let mut names = HashMap::new();
    for c in categories {
        // later duplicates overwrite earlier ones
        names.insert(c.id, c.name.clone());
    }
    CategoryNameIndex { names }
}

pub fn filter_by_type<'a, I>(transactions: I, filter: TypeFilter) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| filter.matches(t.kind))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub balance: Decimal,
    pub count: usize,
    pub average_ticket: Decimal,
}

impl Summary {
    /// Income as a percentage of expenses, unrounded. `None` without expenses.
    pub fn income_expense_ratio(&self) -> Option<Decimal> {
        if self.expense_total.is_zero() {
            return None;
        }
        Some(self.income_total / self.expense_total * Decimal::ONE_HUNDRED)
    }
}

pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income_total = Decimal::ZERO;
    let mut expense_total = Decimal::ZERO;
    let mut count = 0usize;
    for t in transactions {
        match t.kind {
            Kind::Income => income_total += t.amount_or_zero(),
            Kind::Expense => expense_total += t.amount_or_zero(),
        }
        count += 1;
    }
    let average_ticket = if count > 0 {
        (income_total + expense_total) / Decimal::from(count)
    } else {
        Decimal::ZERO
    };
    Summary {
        income_total,
        expense_total,
        balance: income_total - expense_total,
        count,
        average_ticket,
    }
}

/// Display form of the ratio: a whole percentage or the "no expenses" sentinel.
pub fn ratio_label(ratio: Option<Decimal>) -> String {
    match ratio {
        Some(r) => format!(
            "{}%",
            r.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => NO_EXPENSES_LABEL.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub name: String,
    pub total: Decimal,
}

/// Sums amounts per category for one kind and keeps the `limit` largest.
///
/// Groups appear in first-encounter order before a stable sort, so equal
/// totals keep that order. Transactions without a category are skipped.
pub fn top_by_category<'a, I>(
    transactions: I,
    kind: Kind,
    index: &CategoryNameIndex,
    limit: usize,
) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut slots: HashMap<i64, usize> = HashMap::new();
    let mut totals: Vec<(i64, Decimal)> = Vec::new();

    for t in transactions.into_iter().filter(|t| t.kind == kind) {
        let Some(category_id) = t.category_id else {
            continue;
        };
        let slot = *slots.entry(category_id).or_insert_with(|| {
            totals.push((category_id, Decimal::ZERO));
            totals.len() - 1
        });
        totals[slot].1 += t.amount_or_zero();
    }

    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category_id, total)| CategoryTotal {
            category_id,
            name: index.name_for(category_id),
            total,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out.truncate(limit);
    out
}

/// The largest transaction of `kind`; the first one wins on ties.
pub fn largest_by_kind<'a, I>(transactions: I, kind: Kind) -> Option<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut best: Option<&'a Transaction> = None;
    for t in transactions.into_iter().filter(|t| t.kind == kind) {
        match best {
            Some(b) if t.amount_or_zero() <= b.amount_or_zero() => {}
            _ => best = Some(t),
        }
    }
    best
}

/// Newest first. Missing or unparseable dates count as the epoch.
pub fn sort_by_date_descending<'a, I>(transactions: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let epoch = NaiveDate::default();
    let mut out: Vec<&Transaction> = transactions.into_iter().collect();
    out.sort_by_key(|t| std::cmp::Reverse(t.parsed_date().unwrap_or(epoch)));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: String,
}

/// Everything the dashboard renders for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: TypeFilter,
    pub summary: Summary,
    pub ratio: Option<Decimal>,
    pub ratio_label: String,
    pub top_income: Vec<CategoryTotal>,
    pub top_expense: Vec<CategoryTotal>,
    pub largest_income: Option<Transaction>,
    pub largest_expense: Option<Transaction>,
    pub transactions: Vec<DashboardRow>,
}

impl DashboardView {
    pub fn build(
        transactions: &[Transaction],
        categories: &[Category],
        filter: TypeFilter,
        limit: usize,
    ) -> Self {
        let index = build_category_name_index(categories);
        let filtered = filter_by_type(transactions, filter);

        let summary = summarize(filtered.iter().copied());
        let ratio = summary.income_expense_ratio();
        let rows = sort_by_date_descending(filtered.iter().copied())
            .into_iter()
            .map(|t| DashboardRow {
                category: index.label_for(t.category_id),
                transaction: t.clone(),
            })
            .collect();

        DashboardView {
            filter,
            ratio_label: ratio_label(ratio),
            ratio,
            top_income: top_by_category(filtered.iter().copied(), Kind::Income, &index, limit),
            top_expense: top_by_category(filtered.iter().copied(), Kind::Expense, &index, limit),
            largest_income: largest_by_kind(filtered.iter().copied(), Kind::Income).cloned(),
            largest_expense: largest_by_kind(filtered.iter().copied(), Kind::Expense).cloned(),
            summary,
            transactions: rows,
        }
    }
}
