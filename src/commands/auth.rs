// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{self, normalize_email};
use crate::config::Config;
use crate::session::Session;
use crate::utils::http_client;
use anyhow::{Context, Result, bail};

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => start_session(cfg, sub, true)?,
        Some(("login", sub)) => start_session(cfg, sub, false)?,
        Some(("logout", _)) => {
            if Session::end()? {
                tracing::info!("session ended");
                println!("Logged out.");
            } else {
                println!("No active session.");
            }
        }
        Some(("status", _)) => match Session::load()? {
            Some(s) => println!(
                "Logged in as {} at {} (since {})",
                s.email,
                s.api_url,
                s.created_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!("Not logged in."),
        },
        _ => {}
    }
    Ok(())
}

fn start_session(cfg: &Config, sub: &clap::ArgMatches, register: bool) -> Result<()> {
    let email = normalize_email(sub.get_one::<String>("email").unwrap());
    if email.is_empty() {
        bail!("Email must not be empty");
    }
    let password = match sub.get_one::<String>("password") {
        Some(p) => p.clone(),
        None => rpassword::prompt_password("Password: ").context("read password")?,
    };
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    let api_url = sub
        .get_one::<String>("api-url")
        .cloned()
        .unwrap_or_else(|| cfg.api.base_url.clone());

    let client = http_client(cfg.api.timeout_secs)?;
    let token = if register {
        api::register(&client, &api_url, &email, &password)?
    } else {
        api::login(&client, &api_url, &email, &password)?
    };

    let session = Session::start(&api_url, &email, token);
    session.save()?;
    tracing::info!(email = %session.email, api_url = %session.api_url, "session started");
    if register {
        println!("Registered and logged in as {}", session.email);
    } else {
        println!("Logged in as {}", session.email);
    }
    Ok(())
}
