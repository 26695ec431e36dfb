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

use crate::opcode;

#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Nop,
    Burn,
    Not,
    Eq,
    Jmp(u8),
    Jnz(u8),
    Jz(u8),
    Push(u8),
    Pop,
    PushB(Vec<u8>),
    Dup,
    Swap,
    Copy(u8),
    Drop(u8),
    ChkSig,
    Blake256,
    Sha256,
    Ripemd160,
    Keccak256,
}

impl Instruction {
    pub fn opcode(&self) -> u8 {
        match self {
            Instruction::Nop => opcode::NOP,
            Instruction::Burn => opcode::BURN,
            Instruction::Not => opcode::NOT,
            Instruction::Eq => opcode::EQ,
            Instruction::Jmp(_) => opcode::JMP,
            Instruction::Jnz(_) => opcode::JNZ,
            Instruction::Jz(_) => opcode::JZ,
            Instruction::Push(_) => opcode::PUSH,
            Instruction::Pop => opcode::POP,
            Instruction::PushB(_) => opcode::PUSHB,
            Instruction::Dup => opcode::DUP,
            Instruction::Swap => opcode::SWAP,
            Instruction::Copy(_) => opcode::COPY,
            Instruction::Drop(_) => opcode::DROP,
            Instruction::ChkSig => opcode::CHKSIG,
            Instruction::Blake256 => opcode::BLAKE256,
            Instruction::Sha256 => opcode::SHA256,
            Instruction::Ripemd160 => opcode::RIPEMD160,
            Instruction::Keccak256 => opcode::KECCAK256,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Nop => "NOP",
            Instruction::Burn => "BURN",
            Instruction::Not => "NOT",
            Instruction::Eq => "EQ",
            Instruction::Jmp(_) => "JMP",
            Instruction::Jnz(_) => "JNZ",
            Instruction::Jz(_) => "JZ",
            Instruction::Push(_) => "PUSH",
            Instruction::Pop => "POP",
            Instruction::PushB(_) => "PUSHB",
            Instruction::Dup => "DUP",
            Instruction::Swap => "SWAP",
            Instruction::Copy(_) => "COPY",
            Instruction::Drop(_) => "DROP",
            Instruction::ChkSig => "CHKSIG",
            Instruction::Blake256 => "BLAKE256",
            Instruction::Sha256 => "SHA256",
            Instruction::Ripemd160 => "RIPEMD160",
            Instruction::Keccak256 => "KECCAK256",
        }
    }

    /// Hex literal of the inline operand, if the instruction carries one.
    ///
    /// A one-byte immediate is printed without padding (`0x5`) while a blob keeps two digits
    /// per byte (`0x0A0B`).
    pub fn operand_token(&self) -> Option<String> {
        match self {
            Instruction::Jmp(val)
            | Instruction::Jnz(val)
            | Instruction::Jz(val)
            | Instruction::Push(val)
            | Instruction::Copy(val)
            | Instruction::Drop(val) => Some(format!("0x{:X}", val)),
            Instruction::PushB(blob) => {
                let hex: String = blob.iter().map(|b| format!("{:02X}", b)).collect();
                Some(format!("0x{}", hex))
            }
            _ => None,
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.mnemonic().to_string()];
        tokens.extend(self.operand_token());
        tokens
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.operand_token() {
            Some(operand) => write!(f, "{} {}", self.mnemonic(), operand),
            None => f.write_str(self.mnemonic()),
        }
    }
}

/// An unlock script may only push data; the logic lives in the lock script.
pub fn is_valid_unlock_script(instrs: &[Instruction]) -> bool {
    instrs.iter().all(|instr| match instr {
        Instruction::Push(_) => true,
        Instruction::PushB(_) => true,
        _ => false,
    })
}

pub fn has_expensive_opcodes(instrs: &[Instruction]) -> bool {
    let count = instrs.iter().filter(|instr| instr == &&Instruction::ChkSig).count();
    count >= 6
}

#[test]
fn script_with_more_than_six_chksig_opcodes() {
    let expensive_script = vec![
        Instruction::ChkSig,
        Instruction::ChkSig,
        Instruction::ChkSig,
        Instruction::ChkSig,
        Instruction::ChkSig,
        Instruction::ChkSig,
    ];
    assert_eq!(has_expensive_opcodes(&expensive_script), true);
}

#[test]
fn script_with_less_than_six_chksig_opcodes() {
    let unexpensive_script =
        vec![Instruction::ChkSig, Instruction::ChkSig, Instruction::ChkSig, Instruction::ChkSig, Instruction::ChkSig];
    assert_eq!(has_expensive_opcodes(&unexpensive_script), false);
}

#[test]
fn push_only_unlock_script() {
    assert!(is_valid_unlock_script(&[Instruction::Push(1), Instruction::PushB(vec![1, 2])]));
    assert!(is_valid_unlock_script(&[]));
    assert!(!is_valid_unlock_script(&[Instruction::Push(1), Instruction::Nop]));
}

#[test]
fn display_matches_tokens() {
    assert_eq!(Instruction::Push(5).to_string(), "PUSH 0x5");
    assert_eq!(Instruction::PushB(vec![0xab, 0x0c]).to_string(), "PUSHB 0xAB0C");
    assert_eq!(Instruction::PushB(vec![]).to_string(), "PUSHB 0x");
    assert_eq!(Instruction::Keccak256.to_string(), "KECCAK256");
}
