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

use ccrypto::{blake256, keccak256, ripemd160, sha256};
use ckey::{verify as verify_signature, Message, Public, Signature, PUBLIC_LENGTH, SIGNATURE_LENGTH};

use crate::decoder::{decode, DecoderError};
use crate::instruction::{has_expensive_opcodes, is_valid_unlock_script, Instruction};

pub const DEFAULT_MAX_MEMORY: usize = 1024;
pub const DEFAULT_MAX_STEPS: usize = 1000;
pub const DEFAULT_MAX_STACK_DEPTH: usize = 256;
pub const DEFAULT_MAX_VALUE_SIZE: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Sum of the sizes of all items on the stack.
    pub max_memory: usize,
    /// Number of instructions executed, counting every pass through a loop.
    pub max_steps: usize,
    pub max_stack_depth: usize,
    pub max_value_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_memory: DEFAULT_MAX_MEMORY,
            max_steps: DEFAULT_MAX_STEPS,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
        }
    }
}

/// Read-only data that `CHKSIG` verifies signatures against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SigningContext {
    pub message: Message,
}

impl SigningContext {
    pub fn new(message: Message) -> Self {
        Self {
            message,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExecutionResult {
    Accepted,
    Rejected(RejectReason),
    Burned,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RejectReason {
    StackUnderflow,
    StackOverflow,
    ValueTooLarge,
    OutOfMemory,
    IndexOutOfBound,
    InvalidJumpTarget,
    TypeMismatch,
    StepLimitExceeded,
    InvalidUnlockScript,
    TooManySignatureChecks,
    /// The script ran to the end leaving a single false value.
    FalseResult,
    /// The script ran to the end leaving more than one value.
    UncleanStack,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            RejectReason::StackUnderflow => "Stack underflow",
            RejectReason::StackOverflow => "Stack depth limit exceeded",
            RejectReason::ValueTooLarge => "Value size limit exceeded",
            RejectReason::OutOfMemory => "Stack memory limit exceeded",
            RejectReason::IndexOutOfBound => "Stack index out of bound",
            RejectReason::InvalidJumpTarget => "Invalid jump target",
            RejectReason::TypeMismatch => "Operand of unexpected length",
            RejectReason::StepLimitExceeded => "Step limit exceeded",
            RejectReason::InvalidUnlockScript => "Unlock script must only push values",
            RejectReason::TooManySignatureChecks => "Too many signature checks",
            RejectReason::FalseResult => "Script evaluated to false",
            RejectReason::UncleanStack => "Stack holds more than the result",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecutionResult::Accepted => f.write_str("Accepted"),
            ExecutionResult::Rejected(reason) => write!(f, "Rejected: {}", reason),
            ExecutionResult::Burned => f.write_str("Burned"),
        }
    }
}

/// State of the machine after one instruction ran.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub pc: usize,
    pub instruction: Instruction,
    /// Bottom first.
    pub stack: Vec<Vec<u8>>,
}

#[derive(Clone)]
struct Item(Vec<u8>);

impl Item {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn assert_len(self, len: usize) -> Result<Self, RejectReason> {
        if self.len() == len {
            Ok(self)
        } else {
            Err(RejectReason::TypeMismatch)
        }
    }
}

impl AsRef<[u8]> for Item {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<bool> for Item {
    fn from(val: bool) -> Item {
        if val {
            Item(vec![1])
        } else {
            Item(vec![])
        }
    }
}

impl From<Item> for bool {
    fn from(item: Item) -> Self {
        !item.as_ref().is_empty()
    }
}

struct Stack {
    stack: Vec<Item>,
    memory_usage: usize,
    config: Config,
}

impl Stack {
    fn new(config: Config) -> Self {
        Self {
            stack: Vec::new(),
            memory_usage: 0,
            config,
        }
    }

    fn push(&mut self, val: Item) -> Result<(), RejectReason> {
        if val.len() > self.config.max_value_size {
            Err(RejectReason::ValueTooLarge)
        } else if self.stack.len() >= self.config.max_stack_depth {
            Err(RejectReason::StackOverflow)
        } else if self.memory_usage + val.len() > self.config.max_memory {
            Err(RejectReason::OutOfMemory)
        } else {
            self.memory_usage += val.len();
            self.stack.push(val);
            Ok(())
        }
    }

    fn pop(&mut self) -> Result<Item, RejectReason> {
        let item = self.stack.pop().ok_or(RejectReason::StackUnderflow)?;
        self.memory_usage -= item.len();
        Ok(item)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    /// Position in the underlying vector of the item `depth` places below the top.
    fn index_of(&self, depth: usize) -> Result<usize, RejectReason> {
        if depth < self.stack.len() {
            Ok(self.stack.len() - 1 - depth)
        } else {
            Err(RejectReason::IndexOutOfBound)
        }
    }

    fn get(&self, depth: usize) -> Result<Item, RejectReason> {
        let index = self.index_of(depth)?;
        Ok(self.stack[index].clone())
    }

    fn remove(&mut self, depth: usize) -> Result<Item, RejectReason> {
        let index = self.index_of(depth)?;
        let item = self.stack.remove(index);
        self.memory_usage -= item.len();
        Ok(item)
    }

    fn snapshot(&self) -> Vec<Vec<u8>> {
        self.stack.iter().map(|item| item.0.clone()).collect()
    }
}

fn jump_target(target: u8, script_len: usize) -> Result<usize, RejectReason> {
    let target = target as usize;
    // Jumping to `script_len` ends the script.
    if target <= script_len {
        Ok(target)
    } else {
        Err(RejectReason::InvalidJumpTarget)
    }
}

fn run<F>(
    script: &[Instruction],
    mut stack: Stack,
    ctx: &SigningContext,
    config: &Config,
    mut observe: F,
) -> Result<ExecutionResult, RejectReason>
where
    F: FnMut(usize, &Instruction, &Stack),
{
    let mut pc = 0;
    let mut steps = 0;
    while pc < script.len() {
        if steps >= config.max_steps {
            return Err(RejectReason::StepLimitExceeded)
        }
        steps += 1;

        let mut next = pc + 1;
        match &script[pc] {
            Instruction::Nop => {}
            Instruction::Burn => return Ok(ExecutionResult::Burned),
            Instruction::Not => {
                let value: bool = stack.pop()?.into();
                stack.push(Item::from(!value))?;
            }
            Instruction::Eq => {
                let first = stack.pop()?;
                let second = stack.pop()?;
                stack.push(Item::from(first.as_ref() == second.as_ref()))?;
            }
            Instruction::Jmp(target) => {
                next = jump_target(*target, script.len())?;
            }
            Instruction::Jnz(target) => {
                if stack.pop()?.into() {
                    next = jump_target(*target, script.len())?;
                }
            }
            Instruction::Jz(target) => {
                let condition: bool = stack.pop()?.into();
                if !condition {
                    next = jump_target(*target, script.len())?;
                }
            }
            Instruction::Push(val) => stack.push(Item(vec![*val]))?,
            Instruction::Pop => {
                stack.pop()?;
            }
            Instruction::PushB(blob) => stack.push(Item(blob.clone()))?,
            Instruction::Dup => {
                let top = stack.pop()?;
                stack.push(top.clone())?;
                stack.push(top)?;
            }
            Instruction::Swap => {
                let first = stack.pop()?;
                let second = stack.pop()?;
                stack.push(first)?;
                stack.push(second)?;
            }
            Instruction::Copy(depth) => {
                let item = stack.get(*depth as usize)?;
                stack.push(item)?;
            }
            Instruction::Drop(depth) => {
                stack.remove(*depth as usize)?;
            }
            Instruction::ChkSig => {
                let pubkey = Public::from_slice(stack.pop()?.assert_len(PUBLIC_LENGTH)?.as_ref());
                let signature = Signature::from_slice(stack.pop()?.assert_len(SIGNATURE_LENGTH)?.as_ref())
                    .map_err(|_| RejectReason::TypeMismatch)?;
                let result = match verify_signature(&pubkey, &signature, &ctx.message) {
                    Ok(true) => true,
                    _ => false,
                };
                stack.push(Item::from(result))?;
            }
            Instruction::Blake256 => {
                let value = stack.pop()?;
                stack.push(Item(blake256(value).as_bytes().to_vec()))?;
            }
            Instruction::Sha256 => {
                let value = stack.pop()?;
                stack.push(Item(sha256(value).as_bytes().to_vec()))?;
            }
            Instruction::Ripemd160 => {
                let value = stack.pop()?;
                stack.push(Item(ripemd160(value).as_bytes().to_vec()))?;
            }
            Instruction::Keccak256 => {
                let value = stack.pop()?;
                stack.push(Item(keccak256(value).as_bytes().to_vec()))?;
            }
        }
        observe(pc, &script[pc], &stack);
        pc = next;
    }

    let result = stack.pop()?;
    if stack.len() != 0 {
        Err(RejectReason::UncleanStack)
    } else if result.into() {
        Ok(ExecutionResult::Accepted)
    } else {
        Err(RejectReason::FalseResult)
    }
}

fn conclude(result: Result<ExecutionResult, RejectReason>) -> ExecutionResult {
    match result {
        Ok(result) => result,
        Err(reason) => {
            cdebug!(VM, "Script rejected: {:?}", reason);
            ExecutionResult::Rejected(reason)
        }
    }
}

/// Runs `script` against `ctx`. Every failure, including a resource ceiling being hit, is
/// reported as `ExecutionResult::Rejected`.
pub fn execute(script: &[Instruction], ctx: &SigningContext, config: &Config) -> ExecutionResult {
    let stack = Stack::new(*config);
    conclude(run(script, stack, ctx, config, |pc, instruction, stack| {
        ctrace!(VM, "#{} {} depth={} memory={}", pc, instruction, stack.len(), stack.memory_usage);
    }))
}

/// Runs a lock script on top of the values pushed by a push-only unlock script and the
/// spender's parameters. `params[0]` ends up on the top of the stack.
///
/// Jump targets in `lock` are indices into `lock` itself.
pub fn execute_unlock(
    unlock: &[Instruction],
    params: &[Vec<u8>],
    lock: &[Instruction],
    ctx: &SigningContext,
    config: &Config,
) -> ExecutionResult {
    if has_expensive_opcodes(lock) {
        return ExecutionResult::Rejected(RejectReason::TooManySignatureChecks)
    }

    if !is_valid_unlock_script(unlock) {
        return conclude(Err(RejectReason::InvalidUnlockScript))
    }

    let mut stack = Stack::new(*config);
    let values = unlock.iter().filter_map(|instruction| match instruction {
        Instruction::Push(val) => Some(vec![*val]),
        Instruction::PushB(blob) => Some(blob.clone()),
        _ => None,
    });
    for value in values {
        if let Err(reason) = stack.push(Item(value)) {
            return conclude(Err(reason))
        }
    }
    for param in params.iter().rev() {
        if let Err(reason) = stack.push(Item(param.clone())) {
            return conclude(Err(reason))
        }
    }

    conclude(run(lock, stack, ctx, config, |pc, instruction, stack| {
        ctrace!(VM, "#{} {} depth={} memory={}", pc, instruction, stack.len(), stack.memory_usage);
    }))
}

/// Same as `execute`, also returning the stack after every executed instruction.
pub fn trace(script: &[Instruction], ctx: &SigningContext, config: &Config) -> (ExecutionResult, Vec<Step>) {
    let mut steps = Vec::new();
    let stack = Stack::new(*config);
    let result = conclude(run(script, stack, ctx, config, |pc, instruction, stack| {
        steps.push(Step {
            pc,
            instruction: instruction.clone(),
            stack: stack.snapshot(),
        });
    }));
    (result, steps)
}

/// Decodes and runs a script. Malformed bytecode is an error, not a rejection.
pub fn verify(script: &[u8], ctx: &SigningContext, config: &Config) -> Result<ExecutionResult, DecoderError> {
    let instructions = decode(script)?;
    Ok(execute(&instructions, ctx, config))
}
