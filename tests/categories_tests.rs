// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{StubApi, cat};
use finboard::commands::categories;
use finboard::models::{Kind, TypeFilter};

#[test]
fn new_category_trims_and_validates() {
    let c = categories::new_category("  Groceries ", "expense").unwrap();
    assert_eq!(c.name, "Groceries");
    assert_eq!(c.kind, Kind::Expense);

    let err = categories::new_category("   ", "income").unwrap_err();
    assert!(err.to_string().contains("must not be empty"));
    assert!(categories::new_category("Gift", "transfer").is_err());
}

#[test]
fn list_filters_and_sorts() {
    let api = StubApi::default().with_categories(vec![
        cat(1, "Rent", Kind::Expense),
        cat(2, "Salary", Kind::Income),
        cat(3, "Food", Kind::Expense),
    ]);
    let all = categories::list(&api, TypeFilter::All).unwrap();
    let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Rent", "Salary"]);

    let income = categories::list(&api, TypeFilter::Income).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].id, 2);
}
