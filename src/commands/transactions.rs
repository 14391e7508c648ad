// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FinanceApi;
use crate::config::Config;
use crate::dashboard::{build_category_name_index, filter_by_type, sort_by_date_descending};
use crate::models::{Category, Kind, NewTransaction};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;

pub fn handle<A: FinanceApi>(api: &A, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(api, cfg, sub)?,
        Some(("list", sub)) => list(api, cfg, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            api.delete_transaction(id)?;
            println!("Deleted transaction #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add<A: FinanceApi>(api: &A, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    // categories are only needed to resolve --category
    let categories = if sub.contains_id("category") {
        api.fetch_categories()?
    } else {
        Vec::new()
    };
    let new = build_new_transaction(sub, &categories, Local::now().date_naive())?;
    let id = api.create_transaction(&new)?;
    println!(
        "Recorded {} of {} on {} (#{})",
        new.kind,
        fmt_money(&new.amount, &cfg.dashboard.currency_symbol),
        new.date,
        id
    );
    Ok(())
}

/// Validates `tx add` arguments into the payload sent to the API.
pub fn build_new_transaction(
    sub: &clap::ArgMatches,
    categories: &[Category],
    today: NaiveDate,
) -> Result<NewTransaction> {
    let kind: Kind = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today,
    };
    let note = sub
        .get_one::<String>("note")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let category_id = match sub.get_one::<String>("category") {
        Some(c) => Some(resolve_category(categories, kind, c)?),
        None => None,
    };
    Ok(NewTransaction {
        kind,
        amount,
        date,
        note,
        category_id,
    })
}

/// Finds a category by id or case-insensitive name, rejecting a kind mismatch.
pub fn resolve_category(categories: &[Category], kind: Kind, needle: &str) -> Result<i64> {
    let needle = needle.trim();
    let by_id = needle
        .trim_start_matches('#')
        .parse::<i64>()
        .ok()
        .and_then(|id| categories.iter().find(|c| c.id == id));
    let found = by_id.or_else(|| {
        categories
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(needle))
            .find(|c| c.kind == kind)
            .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(needle)))
    });
    let category = found.ok_or_else(|| anyhow!("Category '{}' not found", needle))?;
    if category.kind != kind {
        bail!(
            "Category '{}' is for {} transactions, not {}",
            category.name,
            category.kind,
            kind
        );
    }
    Ok(category.id)
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub note: String,
}

/// The month's transactions, newest first, with resolved category labels.
pub fn query_rows<A: FinanceApi>(api: &A, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = super::selected_month(sub)?;
    let filter = super::selected_filter(sub)?;
    let transactions = api.fetch_transactions(&month)?;
    let categories = api.fetch_categories()?;
    let index = build_category_name_index(&categories);

    let filtered = filter_by_type(&transactions, filter);
    let data = sort_by_date_descending(filtered)
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.clone().unwrap_or_default(),
            r#type: t.kind.to_string(),
            amount: format!("{:.2}", t.amount_or_zero()),
            category: index.label_for(t.category_id),
            note: t.note.clone().unwrap_or_default(),
        })
        .collect();
    Ok(data)
}

fn list<A: FinanceApi>(api: &A, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(api, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions this month.");
        return Ok(());
    }
    let symbol = &cfg.dashboard.currency_symbol;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                format!("#{}", r.id),
                r.date.clone(),
                r.r#type.clone(),
                format!("{}{}", symbol, r.amount),
                r.category.clone(),
                r.note.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Type", "Amount", "Category", "Note"], rows)
    );
    Ok(())
}
