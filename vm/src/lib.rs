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

//! Stack machine that decides whether the spender of an asset satisfied its lock script.
//!
//! Scripts are decoded into `Instruction`s first; malformed bytecode never reaches the
//! executor. Execution always ends in an `ExecutionResult`, hostile scripts included.

#[macro_use]
extern crate log;
#[macro_use]
extern crate codechain_logger as clogger;
extern crate codechain_crypto as ccrypto;
extern crate codechain_key as ckey;

mod decoder;
mod encoder;
mod executor;
mod instruction;
pub mod opcode;


pub use crate::decoder::{decode, tokenize, Decoder, DecoderError};
pub use crate::encoder::{encode, EncoderError};
pub use crate::executor::{
    execute, execute_unlock, trace, verify, Config, ExecutionResult, RejectReason, SigningContext, Step,
    DEFAULT_MAX_MEMORY, DEFAULT_MAX_STACK_DEPTH, DEFAULT_MAX_STEPS, DEFAULT_MAX_VALUE_SIZE,
};
pub use crate::instruction::{has_expensive_opcodes, is_valid_unlock_script, Instruction};
