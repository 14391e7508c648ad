// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use finboard::api::HttpApi;
use finboard::session::Session;
use finboard::{cli, commands, config, logging, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));
    let cfg = config::load_config()?;

    match matches.subcommand() {
        Some(("config", sub)) => match sub.subcommand() {
            Some(("init", _)) => config::init_config()?,
            Some(("show", _)) => print!("{}", toml::to_string_pretty(&cfg)?),
            _ => {}
        },
        Some(("auth", sub)) => commands::auth::handle(&cfg, sub)?,
        Some((name, sub)) => {
            let session = Session::require()?;
            let api = HttpApi::new(utils::http_client(cfg.api.timeout_secs)?, &session);
            match name {
                "category" => commands::categories::handle(&api, sub)?,
                "tx" => commands::transactions::handle(&api, &cfg, sub)?,
                "dashboard" => commands::dashboard::handle(&api, &cfg, sub)?,
                "browse" => commands::browse::handle(&api, &cfg, sub)?,
                _ => {}
            }
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
