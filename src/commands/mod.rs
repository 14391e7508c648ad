// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod browse;
pub mod categories;
pub mod dashboard;
pub mod transactions;

use crate::models::{TypeFilter, YearMonth};
use crate::utils::parse_month;
use anyhow::Result;

/// The `--month` argument, or the current month when absent.
pub fn selected_month(sub: &clap::ArgMatches) -> Result<YearMonth> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(YearMonth::current()),
    }
}

pub fn selected_filter(sub: &clap::ArgMatches) -> Result<TypeFilter> {
    match sub.get_one::<String>("type") {
        Some(t) => t.parse(),
        None => Ok(TypeFilter::All),
    }
}
