// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use finboard::api::{ApiError, FinanceApi};
use finboard::models::{Category, Kind, NewCategory, NewTransaction, Transaction, YearMonth};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn tx(id: i64, kind: Kind, amount: &str, date: &str, category_id: Option<i64>) -> Transaction {
    Transaction {
        id,
        kind,
        amount: Some(dec(amount)),
        date: Some(date.to_string()),
        note: None,
        category_id,
    }
}

pub fn cat(id: i64, name: &str, kind: Kind) -> Category {
    Category {
        id,
        name: name.to_string(),
        kind,
    }
}

pub fn month(s: &str) -> YearMonth {
    s.parse().unwrap()
}

/// In-memory API. Months can be given an artificial latency.
#[derive(Default)]
pub struct StubApi {
    pub months: HashMap<YearMonth, Vec<Transaction>>,
    pub categories: Vec<Category>,
    pub delays: HashMap<YearMonth, Duration>,
    pub fail_with: Option<String>,
    pub created: Mutex<Vec<NewTransaction>>,
    pub deleted: Mutex<Vec<i64>>,
}

impl StubApi {
    pub fn with_month(mut self, m: &str, transactions: Vec<Transaction>) -> Self {
        self.months.insert(month(m), transactions);
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_delay(mut self, m: &str, millis: u64) -> Self {
        self.delays.insert(month(m), Duration::from_millis(millis));
        self
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        match &self.fail_with {
            Some(message) => Err(ApiError::Unauthorized(message.clone())),
            None => Ok(()),
        }
    }
}

impl FinanceApi for StubApi {
    fn fetch_transactions(&self, month: &YearMonth) -> Result<Vec<Transaction>, ApiError> {
        if let Some(d) = self.delays.get(month) {
            std::thread::sleep(*d);
        }
        self.check_failure()?;
        Ok(self.months.get(month).cloned().unwrap_or_default())
    }

    fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.check_failure()?;
        Ok(self.categories.clone())
    }

    fn create_transaction(&self, new: &NewTransaction) -> Result<i64, ApiError> {
        self.check_failure()?;
        let mut created = self.created.lock().unwrap();
        created.push(new.clone());
        Ok(100 + created.len() as i64)
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.check_failure()?;
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }

    fn create_category(&self, new: &NewCategory) -> Result<Category, ApiError> {
        self.check_failure()?;
        Ok(Category {
            id: 500,
            name: new.name.clone(),
            kind: new.kind,
        })
    }
}
