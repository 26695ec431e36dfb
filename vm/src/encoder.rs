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

use std::fmt;

use crate::instruction::Instruction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EncoderError {
    /// `PUSHB` carries a one-byte length prefix.
    BlobTooLong(usize),
}

impl fmt::Display for EncoderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::BlobTooLong(len) => write!(f, "PUSHB cannot carry {} bytes", len),
        }
    }
}

impl std::error::Error for EncoderError {}

impl Instruction {
    pub fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), EncoderError> {
        out.push(self.opcode());
        match self {
            Instruction::Jmp(val)
            | Instruction::Jnz(val)
            | Instruction::Jz(val)
            | Instruction::Push(val)
            | Instruction::Copy(val)
            | Instruction::Drop(val) => out.push(*val),
            Instruction::PushB(blob) => {
                if blob.len() > u8::max_value() as usize {
                    return Err(EncoderError::BlobTooLong(blob.len()))
                }
                out.push(blob.len() as u8);
                out.extend_from_slice(blob);
            }
            _ => {}
        }
        Ok(())
    }
}

pub fn encode(instrs: &[Instruction]) -> Result<Vec<u8>, EncoderError> {
    let mut out = Vec::new();
    for instr in instrs {
        instr.encode_to(&mut out)?;
    }
    Ok(out)
}
