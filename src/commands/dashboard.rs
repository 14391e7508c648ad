// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{FinanceApi, load_month};
use crate::config::Config;
use crate::dashboard::{CategoryTotal, DashboardView};
use crate::models::{Transaction, YearMonth};
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonOutput<'a> {
    month: YearMonth,
    #[serde(flatten)]
    view: &'a DashboardView,
}

pub fn handle<A: FinanceApi>(api: &A, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let month = super::selected_month(sub)?;
    let filter = super::selected_filter(sub)?;
    let limit = sub
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(cfg.dashboard.top_limit);

    let snapshot = load_month(api, month)?;
    let view = DashboardView::build(&snapshot.transactions, &snapshot.categories, filter, limit);
    if sub.get_flag("json") {
        let out = JsonOutput { month, view: &view };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render(&view, month, &cfg.dashboard.currency_symbol));
    }
    Ok(())
}

/// Renders the dashboard as terminal text.
pub fn render(view: &DashboardView, month: YearMonth, symbol: &str) -> String {
    let s = &view.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard {} (type: {})", month, view.filter);
    let _ = writeln!(
        out,
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance"],
            vec![vec![
                fmt_money(&s.income_total, symbol),
                fmt_money(&s.expense_total, symbol),
                fmt_money(&s.balance, symbol),
            ]],
        )
    );
    let _ = writeln!(
        out,
        "Transactions this month: {}  |  Average ticket: {}  |  Income/expenses: {}",
        s.count,
        fmt_money(&s.average_ticket, symbol),
        view.ratio_label
    );

    render_top(&mut out, "Top expenses by category", &view.top_expense, symbol);
    render_top(&mut out, "Top income by category", &view.top_income, symbol);

    render_largest(&mut out, "Largest expense", view.largest_expense.as_ref(), symbol);
    render_largest(&mut out, "Largest income", view.largest_income.as_ref(), symbol);

    let _ = writeln!(out);
    if view.transactions.is_empty() {
        let _ = writeln!(out, "No transactions this month.");
    } else {
        let rows = view
            .transactions
            .iter()
            .map(|r| {
                vec![
                    r.transaction.date.clone().unwrap_or_default(),
                    r.transaction.kind.to_string(),
                    fmt_money(&r.transaction.amount_or_zero(), symbol),
                    r.category.clone(),
                    r.transaction.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        let _ = writeln!(
            out,
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Category", "Note"], rows)
        );
    }
    out
}

fn render_top(out: &mut String, title: &str, items: &[CategoryTotal], symbol: &str) {
    let _ = writeln!(out, "\n{}", title);
    if items.is_empty() {
        let _ = writeln!(out, "No categorized transactions yet.");
        return;
    }
    let rows = items
        .iter()
        .map(|c| vec![c.name.clone(), fmt_money(&c.total, symbol)])
        .collect();
    let _ = writeln!(out, "{}", pretty_table(&["Category", "Total"], rows));
}

fn render_largest(out: &mut String, title: &str, t: Option<&Transaction>, symbol: &str) {
    match t {
        Some(t) => {
            let _ = write!(
                out,
                "{}: {} on {}",
                title,
                fmt_money(&t.amount_or_zero(), symbol),
                t.date.as_deref().unwrap_or("unknown date")
            );
            match t.note.as_deref() {
                Some(note) => {
                    let _ = writeln!(out, " ({})", note);
                }
                None => {
                    let _ = writeln!(out);
                }
            }
        }
        None => {
            let _ = writeln!(out, "{}: none", title);
        }
    }
}
