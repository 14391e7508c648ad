// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{StubApi, cat, dec, tx};
use finboard::config::Config;
use finboard::models::Kind;
use finboard::{cli, commands::transactions};

fn setup() -> StubApi {
    let mut undated = tx(4, Kind::Income, "5", "", Some(9));
    undated.date = None;
    StubApi::default()
        .with_categories(vec![
            cat(1, "Food", Kind::Expense),
            cat(2, "Salary", Kind::Income),
        ])
        .with_month(
            "2025-01",
            vec![
                tx(1, Kind::Expense, "7", "2025-01-01", Some(1)),
                tx(2, Kind::Income, "1500", "2025-01-03", Some(2)),
                tx(3, Kind::Expense, "12.5", "2025-01-02", None),
                undated,
            ],
        )
}

fn add_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["finboard", "tx", "add"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("add", add_m)) = tx_m.subcommand() else {
        panic!("no add subcommand");
    };
    add_m.clone()
}

#[test]
fn list_sorted_with_labels() {
    let api = setup();
    let matches = cli::build_cli().get_matches_from(["finboard", "tx", "list", "--month", "2025-01"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&api, list_m).unwrap();
            let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![2, 3, 1, 4]);
            assert_eq!(rows[0].category, "Salary");
            assert_eq!(rows[1].category, "uncategorized");
            assert_eq!(rows[1].amount, "12.50");
            assert_eq!(rows[3].category, "#9");
            assert_eq!(rows[3].date, "");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_type_filter_applies() {
    let api = setup();
    let matches = cli::build_cli().get_matches_from([
        "finboard", "tx", "list", "--month", "2025-01", "--type", "expense",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let rows = transactions::query_rows(&api, list_m).unwrap();
    assert!(rows.iter().all(|r| r.r#type == "expense"));
    assert_eq!(rows.len(), 2);
}

#[test]
fn list_other_month_is_empty() {
    let api = setup();
    let matches =
        cli::build_cli().get_matches_from(["finboard", "tx", "list", "--month", "2025-02"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    assert!(transactions::query_rows(&api, list_m).unwrap().is_empty());
}

#[test]
fn add_builds_payload_with_defaults() {
    let api = setup();
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let sub = add_matches(&[
        "--type", "expense", "--amount", "12.50", "--category", "food", "--note", "   ",
    ]);
    let new = transactions::build_new_transaction(&sub, &api.categories, today).unwrap();
    assert_eq!(new.kind, Kind::Expense);
    assert_eq!(new.amount, dec("12.50"));
    assert_eq!(new.date, today);
    assert_eq!(new.note, None);
    assert_eq!(new.category_id, Some(1));
}

#[test]
fn add_rejects_bad_input() {
    let api = setup();
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    let zero = add_matches(&["--type", "expense", "--amount", "0"]);
    let err = transactions::build_new_transaction(&zero, &api.categories, today).unwrap_err();
    assert!(err.to_string().contains("greater than zero"));

    let bad_date = add_matches(&["--type", "expense", "--amount", "3", "--date", "2025-02-30"]);
    assert!(transactions::build_new_transaction(&bad_date, &api.categories, today).is_err());

    let mismatch = add_matches(&["--type", "expense", "--amount", "3", "--category", "Salary"]);
    let err = transactions::build_new_transaction(&mismatch, &api.categories, today).unwrap_err();
    assert!(err.to_string().contains("is for income transactions"));
}

#[test]
fn resolve_category_by_id_or_name() {
    let categories = vec![
        cat(1, "Food", Kind::Expense),
        cat(2, "Food", Kind::Income),
        cat(3, "Rent", Kind::Expense),
    ];
    assert_eq!(transactions::resolve_category(&categories, Kind::Income, "food").unwrap(), 2);
    assert_eq!(transactions::resolve_category(&categories, Kind::Expense, "#3").unwrap(), 3);
    assert_eq!(transactions::resolve_category(&categories, Kind::Expense, "3").unwrap(), 3);
    let err = transactions::resolve_category(&categories, Kind::Expense, "Travel").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn add_and_rm_reach_the_api() {
    let api = setup();
    let cfg = Config::default();

    let matches = cli::build_cli().get_matches_from([
        "finboard", "tx", "add", "--type", "income", "--amount", "100", "--date", "2025-01-31",
        "--category", "2",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    transactions::handle(&api, &cfg, tx_m).unwrap();

    let created = api.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].category_id, Some(2));
    assert_eq!(created[0].date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    drop(created);

    let matches = cli::build_cli().get_matches_from(["finboard", "tx", "rm", "4"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    transactions::handle(&api, &cfg, tx_m).unwrap();
    assert_eq!(*api.deleted.lock().unwrap(), vec![4]);
}
