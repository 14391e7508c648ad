// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FinanceApi;
use crate::models::{Category, Kind, NewCategory, TypeFilter};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, bail};

pub fn handle<A: FinanceApi>(api: &A, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = new_category(
                sub.get_one::<String>("name").unwrap(),
                sub.get_one::<String>("type").unwrap(),
            )?;
            let created = api.create_category(&new)?;
            println!(
                "Added {} category '{}' (#{})",
                created.kind, created.name, created.id
            );
        }
        Some(("list", sub)) => {
            let filter: TypeFilter = super::selected_filter(sub)?;
            let items = list(api, filter)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                if items.is_empty() {
                    println!("No categories yet.");
                    return Ok(());
                }
                let rows = items
                    .iter()
                    .map(|c| vec![format!("#{}", c.id), c.name.clone(), c.kind.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Type"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn new_category(name: &str, kind: &str) -> Result<NewCategory> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Category name must not be empty");
    }
    Ok(NewCategory {
        name: name.to_string(),
        kind: kind.parse::<Kind>()?,
    })
}

pub fn list<A: FinanceApi>(api: &A, filter: TypeFilter) -> Result<Vec<Category>> {
    let mut items: Vec<Category> = api
        .fetch_categories()?
        .into_iter()
        .filter(|c| filter.matches(c.kind))
        .collect();
    items.sort_by(|a, b| {
        a.kind
            .as_str()
            .cmp(b.kind.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(items)
}
