//! Host-facing machine object and run control.
//!
//! [`Machine`] bundles everything an embedder needs: architectural
//! state, memory, console buffers, breakpoints, and the latched run
//! state. It is a plain value with no interior mutability and no
//! global state, so two machines never interfere and a host that
//! wants shared access wraps one in its own lock.

use std::collections::BTreeSet;

use crate::console::Console;
use crate::execute;
use crate::fault::Fault;
use crate::memory::{LoadError, WordMemory};
use crate::state::{ArchitecturalState, RunState};

/// The designated halt encoding: `TRAP x25` with clear operand bits.
///
/// Both [`Machine::run`] and [`Machine::step`] compare the full fetched
/// word against this constant before executing it, so the halt check
/// costs nothing and the word never reaches the trap service. A word
/// with vector `x25` but junk in bits 11..=8 is not a halt; it decodes
/// as an ordinary `TRAP` and faults as an unsupported vector.
pub const HALT_WORD: u16 = 0xF025;

/// Outcome of a single fetch, decode, execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction completed, costing `cycles`.
    Retired {
        /// Cycle cost of the retired instruction, service cost included.
        cycles: u64,
    },
    /// The word at `PC` was the halt sentinel; nothing executed.
    Halted,
    /// The step faulted; the cause is also latched in the run state.
    Fault {
        /// What went wrong.
        cause: Fault,
    },
}

/// Result of a [`Machine::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Summed cycle cost of every instruction retired during the run.
    pub cycles: u64,
    /// The terminal state that ended the run.
    pub stop: RunState,
}

/// One emulated machine.
///
/// Every field is public: hosts inspect and patch state directly
/// between steps, the same way a front panel would. All mutation
/// during execution goes through [`Machine::run`] and
/// [`Machine::step`], which leave the machine resumable after any
/// stop, including a fault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Machine {
    /// Register file, program counter, and processor status register.
    pub arch: ArchitecturalState,
    /// The 65536-word address space.
    pub memory: WordMemory,
    /// Input cursor and output buffer.
    pub console: Console,
    /// Addresses where a run stops before executing.
    pub breakpoints: BTreeSet<u16>,
    /// Why the last run or step stopped, if it did.
    pub run_state: RunState,
}

impl Machine {
    /// A machine with zeroed memory, default registers, and no input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `image` at `origin` and prepares a fresh execution.
    ///
    /// The program counter moves to `origin`, the input cursor rewinds
    /// to the start of whatever input is set, the output buffer clears,
    /// and any latched stop state resets. Registers and the rest of
    /// memory keep their values.
    ///
    /// # Errors
    ///
    /// [`LoadError::ImageOverflow`] if the image does not fit between
    /// `origin` and the top of memory; memory is untouched in that case.
    pub fn initialize(&mut self, origin: u16, image: &[u16]) -> Result<(), LoadError> {
        self.memory.load_image(origin, image)?;
        self.arch.set_pc(origin);
        self.console.rewind_input();
        self.console.clear_output();
        self.run_state = RunState::Running;
        Ok(())
    }

    /// Runs from `start` until a halt word, a breakpoint, or a fault.
    ///
    /// Before each fetch the loop first checks `PC` against the
    /// breakpoint set, then against [`HALT_WORD`]; either stop leaves
    /// the pending instruction unexecuted and unbilled. The output
    /// buffer is cleared on entry so the returned text covers exactly
    /// this run. The stop reason is both returned and latched in
    /// [`Machine::run_state`].
    pub fn run(&mut self, start: u16) -> RunOutcome {
        self.arch.set_pc(start);
        self.console.clear_output();
        self.run_state = RunState::Running;
        tracing::debug!(start, "run entered");

        let mut cycles: u64 = 0;
        loop {
            if self.breakpoints.contains(&self.arch.pc()) {
                self.run_state = RunState::Breakpointed;
                break;
            }
            match execute::step_one(self) {
                StepOutcome::Retired { cycles: cost } => cycles += cost,
                StepOutcome::Halted | StepOutcome::Fault { .. } => break,
            }
        }

        let stop = self.run_state;
        if let Some(fault) = stop.latched_fault() {
            tracing::warn!(pc = self.arch.pc(), %fault, cycles, "run faulted");
        } else {
            tracing::debug!(pc = self.arch.pc(), ?stop, cycles, "run stopped");
        }
        RunOutcome { cycles, stop }
    }

    /// Executes one instruction at the current `PC`.
    ///
    /// The halt check applies, breakpoints do not: stepping is how a
    /// host moves past a breakpoint it just stopped on.
    pub fn step(&mut self) -> StepOutcome {
        execute::step_one(self)
    }

    /// Adds a breakpoint. Inserting an existing address is a no-op.
    pub fn add_breakpoint(&mut self, address: u16) {
        self.breakpoints.insert(address);
    }

    /// Removes a breakpoint, returning whether it was set.
    pub fn remove_breakpoint(&mut self, address: u16) -> bool {
        self.breakpoints.remove(&address)
    }

    /// Replaces the pending input text and rewinds the cursor.
    pub fn set_input(&mut self, text: &str) {
        self.console.set_input(text);
    }

    /// The output accumulated since the last run or initialize.
    #[must_use]
    pub fn output(&self) -> String {
        self.console.output_text()
    }
}
