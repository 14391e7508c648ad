// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "FINBOARD_LOG";

/// Maps the number of `-v` flags to a level. Warnings are always shown.
pub fn level_for(verbosity: u8) -> filter::LevelFilter {
    match verbosity {
        0 => filter::LevelFilter::WARN,
        1 => filter::LevelFilter::INFO,
        2 => filter::LevelFilter::DEBUG,
        _ => filter::LevelFilter::TRACE,
    }
}

/// Logs go to stderr so tables and JSON on stdout stay machine readable.
/// `FINBOARD_LOG` takes precedence over the verbosity flag.
pub fn init(verbosity: u8) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).to_string()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter),
        )
        .init();
}
