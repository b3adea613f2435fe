//! Trap vectors and their service routines.
//!
//! The three supported services run atomically inside the `TRAP`
//! instruction that invoked them. The run loop never observes a
//! half-finished service: breakpoints and the halt check apply only
//! between instructions, and a faulting service reports through the
//! same channel as any other instruction fault.

use crate::console::Console;
use crate::fault::Fault;
use crate::memory::{effective_address, WordMemory};
use crate::state::{ArchitecturalState, GeneralRegister};
use crate::timing::{puts_cycles, TRAP_GETC_CYCLES, TRAP_OUT_CYCLES};

/// Service routines reachable through `TRAP`.
///
/// Discriminants are the architectural vector numbers. Any other
/// eight-bit vector raises [`Fault::UnsupportedTrap`] at service time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TrapVector {
    /// Read one input code unit into `R0`.
    Getc = 0x20,
    /// Append the code unit in `R0` to the output.
    Out = 0x21,
    /// Append the zero-terminated string starting at `M[R0]` to the output.
    Puts = 0x22,
}

impl TrapVector {
    /// Maps an eight-bit vector number to its service, if one exists.
    #[must_use]
    pub const fn from_u8(vector: u8) -> Option<Self> {
        match vector {
            0x20 => Some(Self::Getc),
            0x21 => Some(Self::Out),
            0x22 => Some(Self::Puts),
            _ => None,
        }
    }

    /// The architectural vector number of this service.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Runs the service for `vector` and returns its cycle cost.
///
/// The caller has already saved the return address into `R7`; that write
/// stands even when the vector turns out to be unsupported.
pub(crate) fn service(
    vector: u8,
    arch: &mut ArchitecturalState,
    memory: &WordMemory,
    console: &mut Console,
) -> Result<u64, Fault> {
    let Some(service) = TrapVector::from_u8(vector) else {
        return Err(Fault::UnsupportedTrap { vector });
    };
    match service {
        TrapVector::Getc => {
            let unit = console.read_input()?;
            arch.set_gpr(GeneralRegister::R0, unit);
            Ok(TRAP_GETC_CYCLES)
        }
        TrapVector::Out => {
            console.push_output(arch.gpr(GeneralRegister::R0));
            Ok(TRAP_OUT_CYCLES)
        }
        TrapVector::Puts => {
            let mut address = arch.gpr(GeneralRegister::R0);
            let mut written: u64 = 0;
            loop {
                let unit = memory.read(address);
                if unit == 0 {
                    break;
                }
                console.push_output(unit);
                written += 1;
                address = effective_address(address, 1)?;
            }
            Ok(puts_cycles(written))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TRAP_PUTS_BASE_CYCLES;

    fn fresh() -> (ArchitecturalState, WordMemory, Console) {
        (
            ArchitecturalState::default(),
            WordMemory::new(),
            Console::new(),
        )
    }

    #[test]
    fn vector_numbers_round_trip() {
        for service in [TrapVector::Getc, TrapVector::Out, TrapVector::Puts] {
            assert_eq!(TrapVector::from_u8(service.as_u8()), Some(service));
        }
        assert_eq!(TrapVector::from_u8(0x23), None);
        assert_eq!(TrapVector::from_u8(0x00), None);
    }

    #[test]
    fn getc_consumes_one_unit_into_r0() {
        let (mut arch, memory, mut console) = fresh();
        console.set_input("ab");
        arch.set_psr(crate::state::PSR_Z);

        let cost = service(0x20, &mut arch, &memory, &mut console);

        assert_eq!(cost, Ok(TRAP_GETC_CYCLES));
        assert_eq!(arch.gpr(GeneralRegister::R0), u16::from(b'a'));
        assert_eq!(console.remaining_input(), 1);
        // Console input never touches the condition codes.
        assert_eq!(arch.psr(), crate::state::PSR_Z);
    }

    #[test]
    fn getc_on_empty_input_faults_without_writing_r0() {
        let (mut arch, memory, mut console) = fresh();
        arch.set_gpr(GeneralRegister::R0, 0x1234);

        let cost = service(0x20, &mut arch, &memory, &mut console);

        assert_eq!(cost, Err(Fault::InputExhausted));
        assert_eq!(arch.gpr(GeneralRegister::R0), 0x1234);
    }

    #[test]
    fn out_emits_full_register_width() {
        let (mut arch, memory, mut console) = fresh();
        arch.set_gpr(GeneralRegister::R0, 0x266B);

        let cost = service(0x21, &mut arch, &memory, &mut console);

        assert_eq!(cost, Ok(TRAP_OUT_CYCLES));
        assert_eq!(console.output_text(), "\u{266B}");
    }

    #[test]
    fn puts_walks_to_the_terminator() {
        let (mut arch, mut memory, mut console) = fresh();
        memory.write(0x4000, u16::from(b'H'));
        memory.write(0x4001, u16::from(b'I'));
        memory.write(0x4002, 0);
        arch.set_gpr(GeneralRegister::R0, 0x4000);

        let cost = service(0x22, &mut arch, &memory, &mut console);

        assert_eq!(cost, Ok(94));
        assert_eq!(console.output_text(), "HI");
    }

    #[test]
    fn puts_on_empty_string_costs_only_the_base() {
        let (mut arch, memory, mut console) = fresh();
        arch.set_gpr(GeneralRegister::R0, 0x4000);

        let cost = service(0x22, &mut arch, &memory, &mut console);

        assert_eq!(cost, Ok(TRAP_PUTS_BASE_CYCLES));
        assert_eq!(console.output_text(), "");
    }

    #[test]
    fn puts_running_off_the_top_of_memory_faults() {
        let (mut arch, mut memory, mut console) = fresh();
        memory.write(0xFFFF, u16::from(b'x'));
        arch.set_gpr(GeneralRegister::R0, 0xFFFF);

        let cost = service(0x22, &mut arch, &memory, &mut console);

        assert_eq!(cost, Err(Fault::AddressOutOfRange { address: 0x10000 }));
        // The units written before the fault stay in the output buffer.
        assert_eq!(console.output_text(), "x");
    }

    #[test]
    fn unknown_vector_reports_its_number() {
        let (mut arch, memory, mut console) = fresh();

        let cost = service(0x99, &mut arch, &memory, &mut console);

        assert_eq!(cost, Err(Fault::UnsupportedTrap { vector: 0x99 }));
    }
}
