// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::month;
use finboard::commands::browse::{BrowseCommand, parse_command};
use finboard::models::TypeFilter;

#[test]
fn navigation_commands_parse() {
    assert_eq!(parse_command("n").unwrap(), BrowseCommand::Next);
    assert_eq!(parse_command("next").unwrap(), BrowseCommand::Next);
    assert_eq!(parse_command(" prev ").unwrap(), BrowseCommand::Prev);
    assert_eq!(parse_command("r").unwrap(), BrowseCommand::Refresh);
    assert_eq!(parse_command("?").unwrap(), BrowseCommand::Help);
    assert_eq!(parse_command("Q").unwrap(), BrowseCommand::Quit);
    assert_eq!(parse_command("exit").unwrap(), BrowseCommand::Quit);
}

#[test]
fn month_jump_and_filter_parse() {
    assert_eq!(
        parse_command("2023-11").unwrap(),
        BrowseCommand::Jump(month("2023-11"))
    );
    assert_eq!(
        parse_command("Income").unwrap(),
        BrowseCommand::Filter(TypeFilter::Income)
    );
    assert_eq!(
        parse_command("all").unwrap(),
        BrowseCommand::Filter(TypeFilter::All)
    );
}

#[test]
fn unknown_input_is_rejected() {
    assert!(parse_command("2023-13").is_err());
    assert!(parse_command("later").is_err());
}
