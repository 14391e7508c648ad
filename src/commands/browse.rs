// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Interactive month browser.
//!
//! Month changes fetch on a background thread each. Results come back over a
//! channel and pass through [`MonthBoard::commit`], so a slow answer for a
//! month the user already left never replaces the current one.

use crate::api::{ApiError, FinanceApi, MonthSnapshot, load_month};
use crate::config::Config;
use crate::loader::{Commit, FetchTicket, MonthBoard};
use crate::models::{TypeFilter, YearMonth};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    Jump(YearMonth),
    Filter(TypeFilter),
    Refresh,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand> {
    let line = line.trim();
    let cmd = match line.to_lowercase().as_str() {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" => BrowseCommand::Prev,
        "r" | "refresh" => BrowseCommand::Refresh,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        "h" | "help" | "?" => BrowseCommand::Help,
        "all" | "income" | "expense" => BrowseCommand::Filter(line.parse()?),
        _ => BrowseCommand::Jump(line.parse::<YearMonth>()?),
    };
    Ok(cmd)
}

enum Event {
    Input(String),
    Eof,
    Loaded(FetchTicket, Result<MonthSnapshot, ApiError>),
}

const HELP: &str =
    "n/p: next/previous month, YYYY-MM: jump, all|income|expense: filter, r: refresh, q: quit";

pub fn handle<A: FinanceApi + Sync>(api: &A, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let mut board = MonthBoard::new(super::selected_month(sub)?);
    let mut filter = super::selected_filter(sub)?;
    let (tx, rx) = mpsc::channel::<Event>();

    spawn_stdin_reader(tx.clone());
    println!("{}", HELP);

    thread::scope(|scope| -> Result<()> {
        let month = board.month();
        start_fetch(scope, api, &mut board, month, &tx);
        prompt(&board);

        while let Ok(event) = rx.recv() {
            match event {
                Event::Loaded(ticket, result) => {
                    if board.commit(ticket, result) == Commit::Applied {
                        redraw(&board, filter, cfg);
                        prompt(&board);
                    }
                }
                Event::Eof => break,
                Event::Input(line) if line.trim().is_empty() => prompt(&board),
                Event::Input(line) => match parse_command(&line) {
                    Ok(BrowseCommand::Quit) => break,
                    Ok(BrowseCommand::Help) => {
                        println!("{}", HELP);
                        prompt(&board);
                    }
                    Ok(BrowseCommand::Filter(f)) => {
                        filter = f;
                        redraw(&board, filter, cfg);
                        prompt(&board);
                    }
                    Ok(BrowseCommand::Next) => {
                        let month = board.month().next();
                        start_fetch(scope, api, &mut board, month, &tx);
                        prompt(&board);
                    }
                    Ok(BrowseCommand::Prev) => {
                        let month = board.month().prev();
                        start_fetch(scope, api, &mut board, month, &tx);
                        prompt(&board);
                    }
                    Ok(BrowseCommand::Jump(month)) => {
                        start_fetch(scope, api, &mut board, month, &tx);
                        prompt(&board);
                    }
                    Ok(BrowseCommand::Refresh) => {
                        let month = board.month();
                        start_fetch(scope, api, &mut board, month, &tx);
                        prompt(&board);
                    }
                    Err(e) => {
                        println!("{} ({})", e, HELP);
                        prompt(&board);
                    }
                },
            }
        }
        Ok(())
    })
}

fn start_fetch<'scope, 'env, A: FinanceApi + Sync>(
    scope: &'scope Scope<'scope, 'env>,
    api: &'env A,
    board: &mut MonthBoard,
    month: YearMonth,
    tx: &Sender<Event>,
) {
    let ticket = board.begin(month);
    let tx = tx.clone();
    scope.spawn(move || {
        let result = load_month(api, ticket.month());
        // receiver gone means the browser already quit
        let _ = tx.send(Event::Loaded(ticket, result));
    });
}

fn spawn_stdin_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::Eof);
    });
}

fn redraw(board: &MonthBoard, filter: TypeFilter, cfg: &Config) {
    println!();
    if let Some(err) = board.error() {
        println!("! {}", err);
    }
    let view = board.view(filter, cfg.dashboard.top_limit);
    print!(
        "{}",
        super::dashboard::render(&view, board.month(), &cfg.dashboard.currency_symbol)
    );
}

fn prompt(board: &MonthBoard) {
    if board.is_loading() {
        print!("[{} loading…] > ", board.month());
    } else {
        print!("[{}] > ", board.month());
    }
    let _ = io::stdout().flush();
}
