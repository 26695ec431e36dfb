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

use std::str::FromStr;

use ckey::{sign, Generator, KeyPair, Private, Public, Random};
use clap::ArgMatches;
use rustc_hex::ToHex;

use super::{get_message, remove_0x_prefix};

pub fn run_keygen_command(_matches: &ArgMatches) -> Result<(), String> {
    let keypair = Random.generate().map_err(|e| format!("Fail to generate a key pair: {}", e))?;
    println!("{}", keypair);
    Ok(())
}

pub fn run_public_command(matches: &ArgMatches) -> Result<(), String> {
    let private = get_private(matches.value_of("PRIVATE").expect("Argument 'PRIVATE' is required"))?;
    println!("{}", private_to_public(private)?.as_bytes().to_hex());
    Ok(())
}

pub fn run_sign_command(matches: &ArgMatches) -> Result<(), String> {
    let private = get_private(matches.value_of("private").expect("Argument 'private' is required"))?;
    let message = get_message(matches.value_of("message").expect("Argument 'message' is required"))?;
    let signature = sign(&private, &message).map_err(|e| format!("Fail to sign: {}", e))?;
    println!("{}", signature);
    Ok(())
}

fn get_private(input: &str) -> Result<Private, String> {
    Private::from_str(remove_0x_prefix(input.trim())).map_err(|e| format!("Error on reading private key: {}", e))
}

fn private_to_public(private: Private) -> Result<Public, String> {
    let keypair =
        KeyPair::from_private(private).map_err(|e| format!("Error on converting private key to public key: {}", e))?;
    Ok(*keypair.public())
}
