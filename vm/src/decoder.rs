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
use std::iter::FusedIterator;

use crate::instruction::Instruction;
use crate::opcode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecoderError {
    /// The script ended before an operand (or a `PUSHB` length or payload) was read.
    TruncatedOperand,
    UnknownOpcode(u8),
}

impl fmt::Display for DecoderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecoderError::TruncatedOperand => f.write_str("The parameter of an opcode is expected but not exists"),
            DecoderError::UnknownOpcode(byte) => write!(f, "Unknown opcode: 0x{:X}", byte),
        }
    }
}

impl std::error::Error for DecoderError {}

/// Lazily decodes a script one instruction at a time.
///
/// The iterator stops after the first error, so a malformed script yields its valid prefix
/// followed by exactly one `Err`.
pub struct Decoder<'a> {
    bytes: &'a [u8],
    cursor: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            cursor: 0,
            failed: false,
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn read_byte(&mut self) -> Result<u8, DecoderError> {
        let byte = *self.bytes.get(self.cursor).ok_or(DecoderError::TruncatedOperand)?;
        self.cursor += 1;
        Ok(byte)
    }

    fn read_blob(&mut self) -> Result<Vec<u8>, DecoderError> {
        let len = self.read_byte()? as usize;
        let blob = self.bytes.get(self.cursor..self.cursor + len).ok_or(DecoderError::TruncatedOperand)?;
        self.cursor += len;
        Ok(blob.to_vec())
    }

    fn read_instruction(&mut self, code: u8) -> Result<Instruction, DecoderError> {
        let instruction = match code {
            opcode::NOP => Instruction::Nop,
            opcode::BURN => Instruction::Burn,
            opcode::NOT => Instruction::Not,
            opcode::EQ => Instruction::Eq,
            opcode::JMP => Instruction::Jmp(self.read_byte()?),
            opcode::JNZ => Instruction::Jnz(self.read_byte()?),
            opcode::JZ => Instruction::Jz(self.read_byte()?),
            opcode::PUSH => Instruction::Push(self.read_byte()?),
            opcode::POP => Instruction::Pop,
            opcode::PUSHB => Instruction::PushB(self.read_blob()?),
            opcode::DUP => Instruction::Dup,
            opcode::SWAP => Instruction::Swap,
            opcode::COPY => Instruction::Copy(self.read_byte()?),
            opcode::DROP => Instruction::Drop(self.read_byte()?),
            opcode::CHKSIG => Instruction::ChkSig,
            opcode::BLAKE256 => Instruction::Blake256,
            opcode::SHA256 => Instruction::Sha256,
            opcode::RIPEMD160 => Instruction::Ripemd160,
            opcode::KECCAK256 => Instruction::Keccak256,
            invalid_opcode => return Err(DecoderError::UnknownOpcode(invalid_opcode)),
        };
        Ok(instruction)
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<Instruction, DecoderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.bytes.len() {
            return None
        }
        let code = self.bytes[self.cursor];
        self.cursor += 1;
        let result = self.read_instruction(code);
        self.failed = result.is_err();
        Some(result)
    }
}

impl<'a> FusedIterator for Decoder<'a> {}

pub fn decode(bytes: &[u8]) -> Result<Vec<Instruction>, DecoderError> {
    Decoder::new(bytes).collect()
}

/// Renders a script as mnemonic and hex literal tokens. For diagnostics only.
pub fn tokenize(bytes: &[u8]) -> Result<Vec<String>, DecoderError> {
    let mut tokens = Vec::new();
    for instruction in Decoder::new(bytes) {
        tokens.extend(instruction?.tokens());
    }
    Ok(tokens)
}
