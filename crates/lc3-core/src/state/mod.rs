//! Architectural CPU state model primitives.

/// Architectural register file types and storage model.
pub mod registers;
/// Host-observable execution-state machine.
pub mod run_state;

pub use registers::{
    ArchitecturalState, GeneralRegister, GENERAL_REGISTER_COUNT, PSR_CONDITION_MASK, PSR_MODE,
    PSR_N, PSR_P, PSR_Z, RESET_PC,
};
pub use run_state::RunState;
