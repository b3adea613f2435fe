//! The fetch, decode, execute pipeline.
//!
//! [`step_one`] advances a machine by exactly one instruction and reports
//! what happened; [`Machine::run`] loops it. The semantic rules live in the
//! per-opcode functions here: operand arithmetic wraps in 16 bits, while
//! every computed effective address is range-checked before the access it
//! guards. A fault keeps each architectural write that preceded it and
//! performs none that would have followed.

#![allow(clippy::missing_const_for_fn)]

mod helpers;

use crate::api::{Machine, StepOutcome, HALT_WORD};
use crate::decoder::{DecodedInstruction, Decoder};
use crate::encoding::Opcode;
use crate::fault::Fault;
use crate::memory::{effective_address, WordMemory};
use crate::state::{ArchitecturalState, GeneralRegister, RunState};
use crate::timing::cycle_cost;
use crate::trap;

/// Executes the instruction at `PC`, or recognizes the halt word there.
///
/// The fetched word is compared against [`HALT_WORD`] before anything
/// else; on a match the machine latches [`RunState::Halted`] with `PC`
/// still pointing at the halt word and no cycles billed. Otherwise `PC`
/// moves past the fetched word first, so every PC-relative operand and
/// saved return address measures from the following location. A decode
/// or execute fault latches [`RunState::Faulted`] and leaves the rest of
/// the machine exactly where the failing instruction got to.
pub fn step_one(machine: &mut Machine) -> StepOutcome {
    let pc = machine.arch.pc();
    let word = machine.memory.read(pc);

    if word == HALT_WORD {
        machine.run_state = RunState::Halted;
        return StepOutcome::Halted;
    }

    machine.run_state = RunState::Running;
    machine.arch.set_pc(pc.wrapping_add(1));

    let decoded = match Decoder::decode(word) {
        Ok(decoded) => decoded,
        Err(cause) => {
            machine.run_state = RunState::Faulted(cause);
            tracing::warn!(pc, word, %cause, "decode faulted");
            return StepOutcome::Fault { cause };
        }
    };

    match execute_instruction(decoded, machine) {
        Ok(cycles) => {
            tracing::trace!(pc, opcode = decoded.opcode.mnemonic(), cycles, "retired");
            StepOutcome::Retired { cycles }
        }
        Err(cause) => {
            machine.run_state = RunState::Faulted(cause);
            tracing::warn!(pc, opcode = decoded.opcode.mnemonic(), %cause, "execute faulted");
            StepOutcome::Fault { cause }
        }
    }
}

/// Applies one decoded instruction to the machine and returns its cost.
///
/// `PC` must already point past the instruction word. The returned cost
/// is the opcode's table entry, plus the service cost for `TRAP`.
///
/// # Errors
///
/// Any [`Fault`] raised by the instruction's semantics. State mutation
/// is not rolled back: writes that architecturally precede the fault
/// remain applied.
pub fn execute_instruction(
    decoded: DecodedInstruction,
    machine: &mut Machine,
) -> Result<u64, Fault> {
    let base = cycle_cost(decoded.opcode);
    match decoded.opcode {
        Opcode::Br => execute_br(decoded, &mut machine.arch)?,
        Opcode::Add => execute_add(decoded, &mut machine.arch),
        Opcode::Ld => execute_ld(decoded, &mut machine.arch, &machine.memory)?,
        Opcode::St => execute_st(decoded, &machine.arch, &mut machine.memory)?,
        Opcode::Jsr => execute_jsr(decoded, &mut machine.arch)?,
        Opcode::And => execute_and(decoded, &mut machine.arch),
        Opcode::Ldr => execute_ldr(decoded, &mut machine.arch, &machine.memory)?,
        Opcode::Str => execute_str(decoded, &machine.arch, &mut machine.memory)?,
        Opcode::Rti => execute_rti(&mut machine.arch, &machine.memory)?,
        Opcode::Not => execute_not(decoded, &mut machine.arch),
        Opcode::Ldi => execute_ldi(decoded, &mut machine.arch, &machine.memory)?,
        Opcode::Sti => execute_sti(decoded, &machine.arch, &mut machine.memory)?,
        Opcode::Jmp => execute_jmp(decoded, &mut machine.arch),
        Opcode::Lea => execute_lea(decoded, &mut machine.arch)?,
        Opcode::Trap => return Ok(base + execute_trap(decoded, machine)?),
    }
    Ok(base)
}

fn execute_add(decoded: DecodedInstruction, arch: &mut ArchitecturalState) {
    let lhs = arch.gpr(decoded.sr1);
    let rhs = if helpers::immediate_mode(decoded.raw) {
        helpers::imm5_operand(decoded.raw)
    } else {
        arch.gpr(decoded.sr2)
    };
    let result = lhs.wrapping_add(rhs);
    arch.set_gpr(decoded.dr, result);
    arch.set_condition_codes(result);
}

fn execute_and(decoded: DecodedInstruction, arch: &mut ArchitecturalState) {
    let lhs = arch.gpr(decoded.sr1);
    let rhs = if helpers::immediate_mode(decoded.raw) {
        helpers::imm5_operand(decoded.raw)
    } else {
        arch.gpr(decoded.sr2)
    };
    let result = lhs & rhs;
    arch.set_gpr(decoded.dr, result);
    arch.set_condition_codes(result);
}

fn execute_not(decoded: DecodedInstruction, arch: &mut ArchitecturalState) {
    let result = !arch.gpr(decoded.sr1);
    arch.set_gpr(decoded.dr, result);
    arch.set_condition_codes(result);
}

/// An all-zero condition mask never matches, so `0x0000` is a costed no-op.
fn execute_br(decoded: DecodedInstruction, arch: &mut ArchitecturalState) -> Result<(), Fault> {
    if arch.condition_met(helpers::nzp_mask(decoded.raw)) {
        let target = effective_address(arch.pc(), helpers::pc_offset9(decoded.raw))?;
        arch.set_pc(target);
    }
    Ok(())
}

fn execute_jmp(decoded: DecodedInstruction, arch: &mut ArchitecturalState) {
    arch.set_pc(arch.gpr(decoded.sr1));
}

/// The return address lands in `R7` before the target is read, so
/// `JSRR R7` jumps to the instruction after itself.
fn execute_jsr(decoded: DecodedInstruction, arch: &mut ArchitecturalState) -> Result<(), Fault> {
    let return_address = arch.pc();
    arch.set_gpr(GeneralRegister::RETURN_ADDRESS, return_address);
    let target = if helpers::offset_call_mode(decoded.raw) {
        effective_address(return_address, helpers::pc_offset11(decoded.raw))?
    } else {
        arch.gpr(decoded.sr1)
    };
    arch.set_pc(target);
    Ok(())
}

/// Pops `PC` then `PSR` from the stack at `R6`, leaving `R6` two higher.
///
/// The second pop's address is range-checked before either write, so a
/// stack ending at the top of memory faults with `PC`, `PSR`, and `R6`
/// untouched.
fn execute_rti(arch: &mut ArchitecturalState, memory: &WordMemory) -> Result<(), Fault> {
    if arch.mode_bit_set() {
        return Err(Fault::Privilege);
    }
    let stack = arch.gpr(GeneralRegister::STACK_POINTER);
    let second = effective_address(stack, 1)?;
    arch.set_pc(memory.read(stack));
    arch.set_psr(memory.read(second));
    arch.set_gpr(GeneralRegister::STACK_POINTER, second.wrapping_add(1));
    Ok(())
}

fn execute_ld(
    decoded: DecodedInstruction,
    arch: &mut ArchitecturalState,
    memory: &WordMemory,
) -> Result<(), Fault> {
    let address = effective_address(arch.pc(), helpers::pc_offset9(decoded.raw))?;
    let value = memory.read(address);
    arch.set_gpr(decoded.dr, value);
    arch.set_condition_codes(value);
    Ok(())
}

fn execute_ldi(
    decoded: DecodedInstruction,
    arch: &mut ArchitecturalState,
    memory: &WordMemory,
) -> Result<(), Fault> {
    let address = effective_address(arch.pc(), helpers::pc_offset9(decoded.raw))?;
    let pointer = memory.read(address);
    let value = memory.read(pointer);
    arch.set_gpr(decoded.dr, value);
    arch.set_condition_codes(value);
    Ok(())
}

fn execute_ldr(
    decoded: DecodedInstruction,
    arch: &mut ArchitecturalState,
    memory: &WordMemory,
) -> Result<(), Fault> {
    let address = effective_address(arch.gpr(decoded.sr1), helpers::offset6(decoded.raw))?;
    let value = memory.read(address);
    arch.set_gpr(decoded.dr, value);
    arch.set_condition_codes(value);
    Ok(())
}

fn execute_st(
    decoded: DecodedInstruction,
    arch: &ArchitecturalState,
    memory: &mut WordMemory,
) -> Result<(), Fault> {
    let address = effective_address(arch.pc(), helpers::pc_offset9(decoded.raw))?;
    memory.write(address, arch.gpr(decoded.dr));
    Ok(())
}

fn execute_sti(
    decoded: DecodedInstruction,
    arch: &ArchitecturalState,
    memory: &mut WordMemory,
) -> Result<(), Fault> {
    let address = effective_address(arch.pc(), helpers::pc_offset9(decoded.raw))?;
    let pointer = memory.read(address);
    memory.write(pointer, arch.gpr(decoded.dr));
    Ok(())
}

fn execute_str(
    decoded: DecodedInstruction,
    arch: &ArchitecturalState,
    memory: &mut WordMemory,
) -> Result<(), Fault> {
    let address = effective_address(arch.gpr(decoded.sr1), helpers::offset6(decoded.raw))?;
    memory.write(address, arch.gpr(decoded.dr));
    Ok(())
}

/// The computed address itself is the result, and it sets the flags.
fn execute_lea(decoded: DecodedInstruction, arch: &mut ArchitecturalState) -> Result<(), Fault> {
    let address = effective_address(arch.pc(), helpers::pc_offset9(decoded.raw))?;
    arch.set_gpr(decoded.dr, address);
    arch.set_condition_codes(address);
    Ok(())
}

/// `R7` takes the return address before the vector is validated, so an
/// unsupported vector still clobbers it.
fn execute_trap(decoded: DecodedInstruction, machine: &mut Machine) -> Result<u64, Fault> {
    machine
        .arch
        .set_gpr(GeneralRegister::RETURN_ADDRESS, machine.arch.pc());
    trap::service(
        helpers::trap_vector(decoded.raw),
        &mut machine.arch,
        &machine.memory,
        &mut machine.console,
    )
}
