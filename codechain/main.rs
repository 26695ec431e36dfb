// Copyright 2018 Kodebox, Inc.
// This file is part of CodeChain.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

extern crate codechain_crypto as ccrypto;
extern crate codechain_key as ckey;
#[macro_use]
extern crate codechain_logger as clogger;
extern crate codechain_vm as cvm;
extern crate rustc_hex;
extern crate toml;

mod config;
mod subcommand;

use clogger::{LevelFilter, LoggerConfig};

use self::subcommand::run_subcommand;

fn main() -> Result<(), String> {
    run()
}

fn run() -> Result<(), String> {
    let yaml = load_yaml!("cscript.yml");
    let matches = clap::App::from_yaml(yaml).get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    clogger::init(&LoggerConfig::new(level)).map_err(|e| format!("Logger initialization failed: {}", e))?;

    run_subcommand(&matches)
}
