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

mod key_command;
mod script_command;

use std::io::stdin;
use std::str::FromStr;

use ckey::Message;
use clap::ArgMatches;
use rustc_hex::FromHex;

use self::key_command::{run_keygen_command, run_public_command, run_sign_command};
use self::script_command::{
    run_decode_command, run_execute_command, run_hash_command, run_tokenize_command, run_trace_command,
};

pub fn run_subcommand(matches: &ArgMatches) -> Result<(), String> {
    match matches.subcommand() {
        ("tokenize", Some(matches)) => run_tokenize_command(matches),
        ("decode", Some(matches)) => run_decode_command(matches),
        ("execute", Some(matches)) => run_execute_command(matches),
        ("trace", Some(matches)) => run_trace_command(matches),
        ("hash", Some(matches)) => run_hash_command(matches),
        ("keygen", Some(matches)) => run_keygen_command(matches),
        ("public", Some(matches)) => run_public_command(matches),
        ("sign", Some(matches)) => run_sign_command(matches),
        _ => Err("Invalid subcommand".to_string()),
    }
}

fn remove_0x_prefix(s: &str) -> &str {
    if s.starts_with("0x") || s.starts_with("0X") {
        &s[2..]
    } else {
        s
    }
}

fn read_hex(input: &str) -> Result<Vec<u8>, String> {
    remove_0x_prefix(input.trim()).from_hex().map_err(|e| format!("Error on reading hex {:?}: {}", input.trim(), e))
}

/// Value of the positional argument `name`, or a line from stdin when it is absent.
fn hex_arg(matches: &ArgMatches, name: &str) -> Result<Vec<u8>, String> {
    match matches.value_of(name) {
        Some(value) => read_hex(value),
        None => {
            let mut input = String::new();
            stdin().read_line(&mut input).map_err(|e| e.to_string())?;
            read_hex(&input)
        }
    }
}

fn read_message(matches: &ArgMatches) -> Result<Message, String> {
    match matches.value_of("message") {
        Some(message) => get_message(message),
        None => Ok(Message::zero()),
    }
}

fn get_message(input: &str) -> Result<Message, String> {
    Message::from_str(remove_0x_prefix(input.trim())).map_err(|e| format!("Error on reading message: {}", e))
}
