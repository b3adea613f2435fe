//! Deterministic emulator core for the LC-3 teaching computer.
//!
//! One [`Machine`] value owns the whole execution environment: the register
//! file, 65536 words of memory, the console buffers, the breakpoint set,
//! and the latched [`RunState`]. Instructions carry a fixed cycle cost, so
//! a program given the same image and input always reports the same total,
//! and every fault is an ordinary value that leaves the machine
//! inspectable and resumable.
//!
//! ```
//! use lc3_core::{GeneralRegister, Machine, RunState};
//!
//! // ADD R0, R0, #7 ; HALT
//! let mut machine = Machine::new();
//! machine.initialize(0x3000, &[0x1027, 0xF025])?;
//!
//! let outcome = machine.run(0x3000);
//! assert_eq!(outcome.stop, RunState::Halted);
//! assert_eq!(outcome.cycles, 1);
//! assert_eq!(machine.arch.gpr(GeneralRegister::R0), 7);
//! # Ok::<(), lc3_core::LoadError>(())
//! ```

/// Host-facing machine object and run control.
pub mod api;
/// Console input and output buffers.
pub mod console;
/// Instruction decode and register-field extraction.
pub mod decoder;
/// The opcode space and its fixed encodings.
pub mod encoding;
/// The fetch, decode, execute pipeline.
pub mod execute;
/// Fault kinds that stop a run.
pub mod fault;
/// Word-addressed memory model and image loading.
pub mod memory;
/// Architectural CPU state model primitives.
pub mod state;
/// The deterministic cycle-cost model.
pub mod timing;
/// Trap vectors and their service routines.
pub mod trap;

pub use api::{Machine, RunOutcome, StepOutcome, HALT_WORD};
pub use console::Console;
pub use decoder::{DecodedInstruction, Decoder};
pub use encoding::{Opcode, OPCODE_COUNT};
pub use execute::{execute_instruction, step_one};
pub use fault::Fault;
pub use memory::{effective_address, LoadError, WordMemory, MEMORY_WORDS};
pub use state::{
    ArchitecturalState, GeneralRegister, RunState, GENERAL_REGISTER_COUNT, PSR_CONDITION_MASK,
    PSR_MODE, PSR_N, PSR_P, PSR_Z, RESET_PC,
};
pub use timing::{cycle_cost, puts_cycles, CYCLE_COST_TABLE};
pub use trap::TrapVector;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tracing_subscriber as _;
