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

use ccrypto::{blake256, BLAKE_EMPTY, KECCAK_EMPTY, RIPEMD160_EMPTY, SHA256_EMPTY};

use crate::executor::{execute, execute_unlock, trace, Config, ExecutionResult, RejectReason, SigningContext};
use crate::instruction::Instruction;

fn run(script: &[Instruction]) -> ExecutionResult {
    execute(script, &SigningContext::default(), &Config::default())
}

fn run_with_params(params: &[Vec<u8>], lock: &[Instruction]) -> ExecutionResult {
    execute_unlock(&[], params, lock, &SigningContext::default(), &Config::default())
}

fn rejected(reason: RejectReason) -> ExecutionResult {
    ExecutionResult::Rejected(reason)
}

#[test]
fn simple_success() {
    assert_eq!(run(&[Instruction::Push(1)]), ExecutionResult::Accepted);
    assert_eq!(run(&[Instruction::Push(1), Instruction::Push(1), Instruction::Eq]), ExecutionResult::Accepted);
}

#[test]
fn simple_failure() {
    assert_eq!(run(&[Instruction::PushB(vec![])]), rejected(RejectReason::FalseResult));
    assert_eq!(run(&[Instruction::Push(1), Instruction::Push(2), Instruction::Eq]), rejected(RejectReason::FalseResult));
}

#[test]
fn simple_burn() {
    assert_eq!(run(&[Instruction::Burn]), ExecutionResult::Burned);
}

#[test]
fn burn_ignores_the_stack() {
    assert_eq!(run(&[Instruction::Push(1), Instruction::Burn]), ExecutionResult::Burned);
    assert_eq!(run(&[Instruction::Push(0), Instruction::Push(0), Instruction::Burn]), ExecutionResult::Burned);
}

#[test]
fn burn_stops_execution() {
    assert_eq!(run(&[Instruction::Burn, Instruction::Pop]), ExecutionResult::Burned);
}

#[test]
fn empty_script_is_rejected() {
    assert_eq!(run(&[]), rejected(RejectReason::StackUnderflow));
}

#[test]
fn push_then_pop_leaves_nothing() {
    assert_eq!(run(&[Instruction::Push(5), Instruction::Pop]), rejected(RejectReason::StackUnderflow));
}

#[test]
fn non_empty_blob_is_true() {
    assert_eq!(run(&[Instruction::PushB(vec![0xab, 0xcd])]), ExecutionResult::Accepted);
    assert_eq!(run(&[Instruction::PushB(vec![])]), rejected(RejectReason::FalseResult));
    assert_eq!(run(&[Instruction::PushB(vec![0, 0])]), ExecutionResult::Accepted);
    assert_eq!(run(&[Instruction::Push(0)]), ExecutionResult::Accepted);
}

#[test]
fn unclean_stack() {
    assert_eq!(run(&[Instruction::Push(1), Instruction::Push(1)]), rejected(RejectReason::UncleanStack));
}

#[test]
fn underflow() {
    assert_eq!(run(&[Instruction::Pop]), rejected(RejectReason::StackUnderflow));
    assert_eq!(run(&[Instruction::Dup]), rejected(RejectReason::StackUnderflow));
    assert_eq!(run(&[Instruction::Not]), rejected(RejectReason::StackUnderflow));
    assert_eq!(run(&[Instruction::Push(1), Instruction::Eq]), rejected(RejectReason::StackUnderflow));
    assert_eq!(run(&[Instruction::Push(1), Instruction::Swap]), rejected(RejectReason::StackUnderflow));
    assert_eq!(run(&[Instruction::Jnz(0)]), rejected(RejectReason::StackUnderflow));
    assert_eq!(run(&[Instruction::Sha256]), rejected(RejectReason::StackUnderflow));
}

#[test]
fn out_of_memory() {
    let config = Config {
        max_memory: 2,
        ..Config::default()
    };
    assert_eq!(
        execute(
            &[Instruction::Push(0), Instruction::Push(1), Instruction::Push(2)],
            &SigningContext::default(),
            &config
        ),
        rejected(RejectReason::OutOfMemory)
    );
}

#[test]
fn stack_depth_ceiling() {
    let config = Config {
        max_stack_depth: 3,
        ..Config::default()
    };
    let script = vec![Instruction::Push(1); 4];
    assert_eq!(execute(&script, &SigningContext::default(), &config), rejected(RejectReason::StackOverflow));
}

#[test]
fn value_size_ceiling() {
    let config = Config {
        max_value_size: 16,
        ..Config::default()
    };
    let ctx = SigningContext::default();
    assert_eq!(execute(&[Instruction::PushB(vec![1; 17])], &ctx, &config), rejected(RejectReason::ValueTooLarge));
    // a 32-byte digest does not fit either
    assert_eq!(
        execute(&[Instruction::PushB(vec![1]), Instruction::Sha256], &ctx, &config),
        rejected(RejectReason::ValueTooLarge)
    );
}

#[test]
fn invalid_unlock_script() {
    assert_eq!(
        execute_unlock(&[Instruction::Nop], &[], &[], &SigningContext::default(), &Config::default()),
        rejected(RejectReason::InvalidUnlockScript)
    );
}

#[test]
fn unlock_script_pushes_below_params() {
    let lock = vec![
        Instruction::Push(3),
        Instruction::Eq,
        Instruction::Jz(6),
        Instruction::Push(2),
        Instruction::Eq,
        Instruction::Jmp(7),
        Instruction::Burn,
    ];
    let unlock = vec![Instruction::Push(2)];
    assert_eq!(
        execute_unlock(&unlock, &[vec![3]], &lock, &SigningContext::default(), &Config::default()),
        ExecutionResult::Accepted
    );
    assert_eq!(
        execute_unlock(&unlock, &[vec![4]], &lock, &SigningContext::default(), &Config::default()),
        ExecutionResult::Burned
    );
}

#[test]
fn first_param_is_on_top() {
    let lock = vec![Instruction::Push(1), Instruction::Eq, Instruction::Swap, Instruction::Pop];
    assert_eq!(run_with_params(&[vec![1], vec![2]], &lock), ExecutionResult::Accepted);
    assert_eq!(run_with_params(&[vec![2], vec![1]], &lock), rejected(RejectReason::FalseResult));
}

#[test]
fn too_many_signature_checks() {
    let lock = vec![Instruction::ChkSig; 6];
    assert_eq!(run_with_params(&[], &lock), rejected(RejectReason::TooManySignatureChecks));
}

#[test]
fn conditional_burn() {
    let lock_script = vec![Instruction::Eq, Instruction::Dup, Instruction::Jnz(4), Instruction::Burn];
    assert_eq!(
        execute_unlock(
            &[Instruction::Push(0)],
            &[vec![0]],
            &lock_script,
            &SigningContext::default(),
            &Config::default()
        ),
        ExecutionResult::Accepted
    );
    assert_eq!(
        execute_unlock(
            &[Instruction::Push(0)],
            &[vec![1]],
            &lock_script,
            &SigningContext::default(),
            &Config::default()
        ),
        ExecutionResult::Burned
    );
}

#[test]
fn not() {
    assert_eq!(run(&[Instruction::PushB(vec![]), Instruction::Not]), ExecutionResult::Accepted);
    assert_eq!(run(&[Instruction::Push(0), Instruction::Not]), rejected(RejectReason::FalseResult));
    assert_eq!(run(&[Instruction::Push(7), Instruction::Not]), rejected(RejectReason::FalseResult));
}

#[test]
fn eq_compares_bytes() {
    // false is the empty blob, not [0]
    let script = vec![Instruction::Push(1), Instruction::Not, Instruction::Push(0), Instruction::Eq];
    assert_eq!(run(&script), rejected(RejectReason::FalseResult));
    let script = vec![Instruction::Push(1), Instruction::PushB(vec![1]), Instruction::Eq];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn zero_byte_drives_branches_as_true() {
    // 0: PUSH 0, 1: JZ 4, 2: PUSH 1, 3: JMP 5, 4: BURN
    let script = vec![
        Instruction::Push(0),
        Instruction::Jz(4),
        Instruction::Push(1),
        Instruction::Jmp(5),
        Instruction::Burn,
    ];
    assert_eq!(run(&script), ExecutionResult::Accepted);
    let script = vec![Instruction::Push(1), Instruction::PushB(vec![0, 0]), Instruction::Jnz(4), Instruction::Burn];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn unlock_script_is_checked_before_anything_is_pushed() {
    let unlock = vec![Instruction::Push(1), Instruction::Dup];
    let lock = vec![Instruction::Pop];
    assert_eq!(
        execute_unlock(&unlock, &[], &lock, &SigningContext::default(), &Config::default()),
        rejected(RejectReason::InvalidUnlockScript)
    );
    let unlock = vec![Instruction::Push(1), Instruction::PushB(vec![2, 3])];
    assert_eq!(
        execute_unlock(&unlock, &[], &lock, &SigningContext::default(), &Config::default()),
        ExecutionResult::Accepted
    );
}

#[test]
fn dup_and_swap() {
    let script = vec![Instruction::Push(1), Instruction::Dup, Instruction::Eq];
    assert_eq!(run(&script), ExecutionResult::Accepted);
    let script = vec![Instruction::Push(0), Instruction::Push(1), Instruction::Swap, Instruction::Pop];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn copy_counts_from_the_top() {
    let script = vec![
        Instruction::Push(3),
        Instruction::Push(2),
        Instruction::Push(1),
        Instruction::Copy(2),
        Instruction::Push(3),
        Instruction::Eq,
        Instruction::Swap,
        Instruction::Pop,
        Instruction::Swap,
        Instruction::Pop,
        Instruction::Swap,
        Instruction::Pop,
    ];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn copy_out_of_bound() {
    assert_eq!(run(&[Instruction::Push(1), Instruction::Copy(1)]), rejected(RejectReason::IndexOutOfBound));
    assert_eq!(run(&[Instruction::Copy(0)]), rejected(RejectReason::IndexOutOfBound));
}

#[test]
fn drop_counts_from_the_top() {
    let script = vec![Instruction::Push(1), Instruction::Push(0), Instruction::Push(0), Instruction::Drop(1), Instruction::Drop(0)];
    assert_eq!(run(&script), ExecutionResult::Accepted);
    let script = vec![Instruction::Push(1), Instruction::PushB(vec![]), Instruction::Drop(1)];
    assert_eq!(run(&script), rejected(RejectReason::FalseResult));
}

#[test]
fn drop_out_of_bound() {
    assert_eq!(run(&[Instruction::Push(1), Instruction::Drop(1)]), rejected(RejectReason::IndexOutOfBound));
}

#[test]
fn jmp_is_absolute() {
    let script = vec![Instruction::Jmp(3), Instruction::Push(0), Instruction::Burn, Instruction::Push(1)];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn jmp_backwards() {
    // 0: PUSH 1, 1: JZ 5, 2: PUSHB [], 3: JMP 1, 4: BURN, 5: PUSH 1
    let script = vec![
        Instruction::Push(1),
        Instruction::Jz(5),
        Instruction::PushB(vec![]),
        Instruction::Jmp(1),
        Instruction::Burn,
        Instruction::Push(1),
    ];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn jmp_to_the_end() {
    let script = vec![Instruction::Push(1), Instruction::Jmp(3), Instruction::Burn];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn jmp_beyond_the_end() {
    let script = vec![Instruction::Push(1), Instruction::Jmp(4), Instruction::Burn];
    assert_eq!(run(&script), rejected(RejectReason::InvalidJumpTarget));
    assert_eq!(run(&[Instruction::Jmp(0xff)]), rejected(RejectReason::InvalidJumpTarget));
}

#[test]
fn untaken_branch_is_not_validated() {
    let script = vec![Instruction::Push(1), Instruction::PushB(vec![]), Instruction::Jnz(0xff)];
    assert_eq!(run(&script), ExecutionResult::Accepted);
    let script = vec![Instruction::Push(1), Instruction::Push(1), Instruction::Jz(0xff)];
    assert_eq!(run(&script), ExecutionResult::Accepted);
}

#[test]
fn taken_branch_is_validated() {
    let script = vec![Instruction::Push(1), Instruction::Push(1), Instruction::Jnz(0xff)];
    assert_eq!(run(&script), rejected(RejectReason::InvalidJumpTarget));
}

#[test]
fn infinite_loop_hits_the_step_limit() {
    assert_eq!(run(&[Instruction::Jmp(0)]), rejected(RejectReason::StepLimitExceeded));
    let script = vec![Instruction::Push(1), Instruction::Pop, Instruction::Jmp(0)];
    assert_eq!(run(&script), rejected(RejectReason::StepLimitExceeded));
}

#[test]
fn step_limit_counts_executed_instructions() {
    let config = Config {
        max_steps: 3,
        ..Config::default()
    };
    let ctx = SigningContext::default();
    let script = vec![Instruction::Nop, Instruction::Nop, Instruction::Push(1)];
    assert_eq!(execute(&script, &ctx, &config), ExecutionResult::Accepted);
    let script = vec![Instruction::Nop, Instruction::Nop, Instruction::Nop, Instruction::Push(1)];
    assert_eq!(execute(&script, &ctx, &config), rejected(RejectReason::StepLimitExceeded));
}

#[test]
fn trace_records_every_step() {
    let script = vec![Instruction::Push(1), Instruction::Dup, Instruction::Eq];
    let (result, steps) = trace(&script, &SigningContext::default(), &Config::default());
    assert_eq!(result, ExecutionResult::Accepted);
    let pcs: Vec<_> = steps.iter().map(|step| step.pc).collect();
    assert_eq!(pcs, vec![0, 1, 2]);
    assert_eq!(steps[0].stack, vec![vec![1]]);
    assert_eq!(steps[1].stack, vec![vec![1], vec![1]]);
    assert_eq!(steps[2].stack, vec![vec![1]]);
    assert_eq!(steps[2].instruction, Instruction::Eq);
}

#[test]
fn trace_follows_jumps() {
    let script = vec![Instruction::Jmp(2), Instruction::Burn, Instruction::Push(1)];
    let (result, steps) = trace(&script, &SigningContext::default(), &Config::default());
    assert_eq!(result, ExecutionResult::Accepted);
    assert_eq!(steps.iter().map(|step| step.pc).collect::<Vec<_>>(), vec![0, 2]);
}

#[test]
fn execution_is_deterministic() {
    let script = vec![
        Instruction::PushB(b"asset".to_vec()),
        Instruction::Blake256,
        Instruction::Dup,
        Instruction::Keccak256,
        Instruction::Swap,
        Instruction::Sha256,
        Instruction::Eq,
        Instruction::Not,
    ];
    let first = trace(&script, &SigningContext::default(), &Config::default());
    let second = trace(&script, &SigningContext::default(), &Config::default());
    assert_eq!(first, second);
    assert_eq!(first.0, ExecutionResult::Accepted);
}

#[test]
fn _blake256() {
    let lock_script = vec![Instruction::Blake256, Instruction::Eq];
    assert_eq!(run_with_params(&[vec![], BLAKE_EMPTY.as_bytes().to_vec()], &lock_script), ExecutionResult::Accepted);
    assert_eq!(
        run_with_params(&[vec![], blake256([0x80u8]).as_bytes().to_vec()], &lock_script),
        rejected(RejectReason::FalseResult)
    );
    assert_eq!(
        run_with_params(&[vec![0x80], blake256([0x80u8]).as_bytes().to_vec()], &lock_script),
        ExecutionResult::Accepted
    );
    assert_eq!(
        run_with_params(&[vec![0x80], BLAKE_EMPTY.as_bytes().to_vec()], &lock_script),
        rejected(RejectReason::FalseResult)
    );
}

#[test]
fn _ripemd160() {
    let lock_script = vec![Instruction::Ripemd160, Instruction::Eq];
    assert_eq!(
        run_with_params(&[vec![], RIPEMD160_EMPTY.as_bytes().to_vec()], &lock_script),
        ExecutionResult::Accepted
    );
    assert_eq!(run_with_params(&[vec![], vec![0; 20]], &lock_script), rejected(RejectReason::FalseResult));
}

#[test]
fn _sha256() {
    let lock_script = vec![Instruction::Sha256, Instruction::Eq];
    assert_eq!(run_with_params(&[vec![], SHA256_EMPTY.as_bytes().to_vec()], &lock_script), ExecutionResult::Accepted);
    assert_eq!(
        run_with_params(&[vec![0x80], SHA256_EMPTY.as_bytes().to_vec()], &lock_script),
        rejected(RejectReason::FalseResult)
    );
}

#[test]
fn _keccak256() {
    let lock_script = vec![Instruction::Keccak256, Instruction::Eq];
    assert_eq!(run_with_params(&[vec![], KECCAK_EMPTY.as_bytes().to_vec()], &lock_script), ExecutionResult::Accepted);
    assert_eq!(
        run_with_params(&[vec![0x80], KECCAK_EMPTY.as_bytes().to_vec()], &lock_script),
        rejected(RejectReason::FalseResult)
    );
}
