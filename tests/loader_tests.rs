// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{StubApi, cat, month, tx};
use finboard::api::{ApiError, MonthSnapshot, load_month};
use finboard::loader::{Commit, MonthBoard};
use finboard::models::{Kind, TypeFilter};
use std::sync::mpsc;
use std::thread;

fn snapshot(m: &str, ids: &[i64]) -> MonthSnapshot {
    MonthSnapshot {
        transactions: ids
            .iter()
            .map(|id| tx(*id, Kind::Expense, "10", &format!("{}-10", m), None))
            .collect(),
        categories: vec![cat(1, "Food", Kind::Expense)],
    }
}

#[test]
fn stale_result_never_overwrites_newer_month() {
    let mut board = MonthBoard::new(month("2024-01"));
    let jan = board.begin(month("2024-01"));
    let feb = board.begin(month("2024-02"));

    assert!(!board.is_current(&jan));
    assert_eq!(board.commit(jan, Ok(snapshot("2024-01", &[1, 2]))), Commit::Stale);
    assert!(board.transactions().is_empty());
    assert_eq!(board.month(), month("2024-02"));
    assert!(board.is_loading());

    assert_eq!(board.commit(feb, Ok(snapshot("2024-02", &[3]))), Commit::Applied);
    assert_eq!(board.transactions()[0].id, 3);
    assert!(!board.is_loading());
}

#[test]
fn late_arrival_after_commit_is_discarded() {
    let mut board = MonthBoard::new(month("2024-01"));
    let jan = board.begin(month("2024-01"));
    let feb = board.begin(month("2024-02"));
    let mar = board.begin(month("2024-03"));

    assert_eq!(board.commit(mar, Ok(snapshot("2024-03", &[7]))), Commit::Applied);
    assert_eq!(board.commit(feb, Ok(snapshot("2024-02", &[5]))), Commit::Stale);
    assert_eq!(board.commit(jan, Ok(snapshot("2024-01", &[1]))), Commit::Stale);

    let view = board.view(TypeFilter::All, 5);
    assert_eq!(view.summary.count, 1);
    assert_eq!(view.transactions[0].transaction.id, 7);
}

#[test]
fn month_change_drops_rows_before_the_new_fetch_lands() {
    let mut board = MonthBoard::new(month("2024-01"));
    let t = board.begin(month("2024-01"));
    board.commit(t, Ok(snapshot("2024-01", &[1, 2])));
    assert_eq!(board.transactions().len(), 2);

    board.begin(month("2024-02"));
    assert!(board.transactions().is_empty());
    assert_eq!(board.categories().len(), 1);
}

#[test]
fn refresh_of_same_month_keeps_rows_while_loading() {
    let mut board = MonthBoard::new(month("2024-01"));
    let t = board.begin(month("2024-01"));
    board.commit(t, Ok(snapshot("2024-01", &[1, 2])));

    board.begin(month("2024-01"));
    assert_eq!(board.transactions().len(), 2);
}

#[test]
fn fetch_error_sets_banner_and_success_clears_it() {
    let mut board = MonthBoard::new(month("2024-01"));
    let t = board.begin(month("2024-01"));
    let err = ApiError::Status {
        status: 500,
        message: "database unavailable".into(),
    };
    assert_eq!(board.commit(t, Err(err)), Commit::Applied);
    assert_eq!(board.error(), Some("database unavailable"));
    assert!(board.transactions().is_empty());

    let t = board.begin(month("2024-01"));
    board.commit(t, Ok(snapshot("2024-01", &[1])));
    assert_eq!(board.error(), None);
    assert_eq!(board.transactions().len(), 1);
}

#[test]
fn stale_error_is_ignored_too() {
    let mut board = MonthBoard::new(month("2024-01"));
    let jan = board.begin(month("2024-01"));
    let feb = board.begin(month("2024-02"));
    board.commit(feb, Ok(snapshot("2024-02", &[3])));

    let err = ApiError::Unauthorized("Token has expired".into());
    assert_eq!(board.commit(jan, Err(err)), Commit::Stale);
    assert_eq!(board.error(), None);
}

#[test]
fn concurrent_fetches_settle_on_the_last_selected_month() {
    let api = StubApi::default()
        .with_month("2024-01", vec![tx(1, Kind::Expense, "10", "2024-01-10", None)])
        .with_month("2024-02", vec![tx(2, Kind::Expense, "20", "2024-02-10", None)])
        .with_delay("2024-01", 200);

    let mut board = MonthBoard::new(month("2024-01"));
    let (sender, receiver) = mpsc::channel();

    thread::scope(|scope| {
        for m in ["2024-01", "2024-02"] {
            let ticket = board.begin(month(m));
            let sender = sender.clone();
            let api = &api;
            scope.spawn(move || {
                sender.send((ticket, load_month(api, ticket.month()))).unwrap();
            });
        }
    });
    drop(sender);

    let mut outcomes = Vec::new();
    for (ticket, result) in receiver {
        outcomes.push((ticket.month(), board.commit(ticket, result)));
    }

    assert!(outcomes.contains(&(month("2024-01"), Commit::Stale)));
    assert!(outcomes.contains(&(month("2024-02"), Commit::Applied)));
    assert_eq!(board.month(), month("2024-02"));
    assert_eq!(board.transactions()[0].id, 2);
}

#[test]
fn load_month_surfaces_upstream_errors() {
    let api = StubApi {
        fail_with: Some("Missing Authorization Header".into()),
        ..Default::default()
    };
    let err = load_month(&api, month("2024-01")).unwrap_err();
    assert_eq!(err.to_string(), "Missing Authorization Header");
}
