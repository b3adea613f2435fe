use thiserror::Error;

/// Run-level fault kinds that end the current run with [`RunState::Faulted`].
///
/// Faults are ordinary result values: the engine reports them through
/// [`StepOutcome`] and the run loop latches them as the terminal state. The
/// machine is left exactly as it stood when the fault was detected, so a
/// caller can inspect registers and memory, correct the cause, and start a
/// fresh run against the same state.
///
/// [`RunState::Faulted`]: crate::RunState::Faulted
/// [`StepOutcome`]: crate::StepOutcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// `RTI` executed while `PSR` bit 15 is set.
    ///
    /// The pop-from-stack path is taken when bit 15 is clear; a set bit
    /// faults. The polarity is deliberate and pinned by tests in both
    /// directions.
    #[error("privilege violation: RTI executed with PSR bit 15 set")]
    Privilege,
    /// `TRAP` issued with a vector outside the implemented set.
    ///
    /// Only vectors `0x20`, `0x21`, and `0x22` have service routines.
    #[error("unsupported trap vector 0x{vector:02X}")]
    UnsupportedTrap {
        /// The 8-bit vector taken from the instruction's low byte.
        vector: u8,
    },
    /// Console-input trap issued with the input cursor past the end.
    #[error("console input exhausted")]
    InputExhausted,
    /// Address arithmetic landed outside the 16-bit address space.
    ///
    /// Base-plus-offset computations are evaluated widened; a result below
    /// 0 or above 0xFFFF is rejected here instead of wrapping.
    #[error("effective address {address} is outside the address space")]
    AddressOutOfRange {
        /// The out-of-range result of the widened address computation.
        address: i32,
    },
    /// Fetched word uses the reserved opcode `0b1101`.
    #[error("reserved opcode encoding")]
    ReservedOpcode,
}
