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

use ccrypto::{blake256, keccak256, ripemd160, sha256};
use clap::ArgMatches;
use cvm::{decode, execute_unlock, tokenize, trace, Instruction, SigningContext, Step};
use rustc_hex::ToHex;

use super::{hex_arg, read_hex, read_message};
use crate::config::vm_config;

pub fn run_tokenize_command(matches: &ArgMatches) -> Result<(), String> {
    let script = hex_arg(matches, "SCRIPT")?;
    let tokens = tokenize(&script).map_err(|e| e.to_string())?;
    println!("{}", tokens.join(" "));
    Ok(())
}

pub fn run_decode_command(matches: &ArgMatches) -> Result<(), String> {
    let script = hex_arg(matches, "SCRIPT")?;
    let instructions = decode(&script).map_err(|e| e.to_string())?;
    for line in listing(&instructions) {
        println!("{}", line);
    }
    Ok(())
}

pub fn run_execute_command(matches: &ArgMatches) -> Result<(), String> {
    let lock = read_hex(matches.value_of("lock").expect("Argument 'lock' is required"))?;
    let lock = decode(&lock).map_err(|e| format!("Invalid lock script: {}", e))?;
    let unlock = match matches.value_of("unlock") {
        Some(unlock) => decode(&read_hex(unlock)?).map_err(|e| format!("Invalid unlock script: {}", e))?,
        None => Vec::new(),
    };
    let params = match matches.values_of("param") {
        Some(values) => values.map(read_hex).collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    let ctx = SigningContext::new(read_message(matches)?);
    let config = vm_config(matches)?;

    let result = execute_unlock(&unlock, &params, &lock, &ctx, &config);
    println!("{}", result);
    Ok(())
}

pub fn run_trace_command(matches: &ArgMatches) -> Result<(), String> {
    let script = hex_arg(matches, "SCRIPT")?;
    let instructions = decode(&script).map_err(|e| e.to_string())?;
    let ctx = SigningContext::new(read_message(matches)?);
    let config = vm_config(matches)?;

    let (result, steps) = trace(&instructions, &ctx, &config);
    for step in &steps {
        println!("{}", render_step(step));
    }
    println!("{}", result);
    Ok(())
}

pub fn run_hash_command(matches: &ArgMatches) -> Result<(), String> {
    let algorithm = matches.value_of("algorithm").unwrap_or("blake256");
    let value = hex_arg(matches, "VALUE")?;
    println!("{}", hash(algorithm, &value)?);
    Ok(())
}

fn listing(instructions: &[Instruction]) -> Vec<String> {
    let width = instructions.len().saturating_sub(1).to_string().len();
    instructions
        .iter()
        .enumerate()
        .map(|(index, instruction)| format!("{:>width$}: {}", index, instruction, width = width))
        .collect()
}

fn render_step(step: &Step) -> String {
    let stack: Vec<String> = step.stack.iter().map(|item| format!("0x{}", item.to_hex())).collect();
    format!("#{} {} [{}]", step.pc, step.instruction, stack.join(", "))
}

fn hash(algorithm: &str, value: &[u8]) -> Result<String, String> {
    let digest = match algorithm {
        "blake256" => blake256(value).as_bytes().to_hex(),
        "sha256" => sha256(value).as_bytes().to_hex(),
        "ripemd160" => ripemd160(value).as_bytes().to_hex(),
        "keccak256" => keccak256(value).as_bytes().to_hex(),
        _ => return Err(format!("Unknown hash algorithm: {}", algorithm)),
    };
    Ok(digest)
}
