use crate::Fault;

/// Execution-state machine observable by the host between run calls.
///
/// A run call enters [`RunState::Running`]; the other three states are
/// terminal for that call. None of them is terminal for the machine: a fresh
/// run call resumes from the same register and memory state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Ready to execute the next instruction.
    #[default]
    Running,
    /// The word at `PC` was the halt sentinel; nothing was executed.
    Halted,
    /// `PC` hit a breakpoint before the instruction there was executed.
    Breakpointed,
    /// A fault ended the run; the machine is untouched past the fault point.
    Faulted(Fault),
}

impl RunState {
    /// Returns the latched fault, if this state is faulted.
    #[must_use]
    pub const fn latched_fault(self) -> Option<Fault> {
        match self {
            Self::Faulted(cause) => Some(cause),
            Self::Running | Self::Halted | Self::Breakpointed => None,
        }
    }

    /// States that end a run call.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}
