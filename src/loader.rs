// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Committed dashboard state guarded against out-of-order fetch results.
//!
//! Every fetch starts with [`MonthBoard::begin`], which bumps a generation
//! counter and hands out a [`FetchTicket`]. A result is only applied by
//! [`MonthBoard::commit`] if its ticket still carries the latest generation,
//! so a slow response for a month the user already left is dropped.

use crate::api::{ApiError, MonthSnapshot};
use crate::dashboard::DashboardView;
use crate::models::{Category, Transaction, TypeFilter, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    month: YearMonth,
}

impl FetchTicket {
    pub fn month(&self) -> YearMonth {
        self.month
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct MonthBoard {
    generation: u64,
    month: YearMonth,
    loading: bool,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    error: Option<String>,
}

impl MonthBoard {
    pub fn new(month: YearMonth) -> Self {
        Self {
            generation: 0,
            month,
            loading: false,
            transactions: Vec::new(),
            categories: Vec::new(),
            error: None,
        }
    }

    /// Selects `month` and starts a new fetch cycle.
    pub fn begin(&mut self, month: YearMonth) -> FetchTicket {
        self.generation += 1;
        if month != self.month {
            // rows belong to the old month; categories are not month scoped
            self.transactions.clear();
            self.month = month;
        }
        self.loading = true;
        tracing::debug!(generation = self.generation, %month, "fetch started");
        FetchTicket {
            generation: self.generation,
            month,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn commit(
        &mut self,
        ticket: FetchTicket,
        result: Result<MonthSnapshot, ApiError>,
    ) -> Commit {
        if !self.is_current(&ticket) {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                month = %ticket.month,
                "discarding stale fetch result"
            );
            return Commit::Stale;
        }
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.transactions = snapshot.transactions;
                self.categories = snapshot.categories;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(month = %ticket.month, error = %e, "fetch failed");
                // never leave the previous month's rows under the new month
                self.transactions.clear();
                self.categories.clear();
                self.error = Some(e.to_string());
            }
        }
        Commit::Applied
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn view(&self, filter: TypeFilter, limit: usize) -> DashboardView {
        DashboardView::build(&self.transactions, &self.categories, filter, limit)
    }
}
