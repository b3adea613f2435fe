/// Number of architecturally visible general-purpose registers (`R0..R7`).
pub const GENERAL_REGISTER_COUNT: usize = 8;
/// `PSR` bit for a positive result.
pub const PSR_P: u16 = 1 << 0;
/// `PSR` bit for a zero result.
pub const PSR_Z: u16 = 1 << 1;
/// `PSR` bit for a negative result.
pub const PSR_N: u16 = 1 << 2;
/// Mask of the three condition-code bits.
pub const PSR_CONDITION_MASK: u16 = PSR_N | PSR_Z | PSR_P;
/// `PSR` mode bit, consulted only by `RTI`.
///
/// `RTI` pops when this bit is clear and faults when it is set.
pub const PSR_MODE: u16 = 1 << 15;
/// Power-on program counter, the customary user-space origin.
pub const RESET_PC: u16 = 0x3000;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum GeneralRegister {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl GeneralRegister {
    /// Ordered list of all architectural general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    /// Register used by convention as the `RTI` stack pointer.
    pub const STACK_POINTER: Self = Self::R6;
    /// Register that receives the return address on `JSR`/`JSRR`/`TRAP`.
    pub const RETURN_ADDRESS: Self = Self::R7;

    /// Returns the array index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 3-bit register field into an architectural register.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            4 => Some(Self::R4),
            5 => Some(Self::R5),
            6 => Some(Self::R6),
            7 => Some(Self::R7),
            _ => None,
        }
    }
}

/// Full architectural register state: general registers, `PC`, and `PSR`.
///
/// Every stored value is a 16-bit word; arithmetic performed on the way in
/// wraps modulo 2^16, and condition codes read the sign from bit 15.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArchitecturalState {
    gpr: [u16; GENERAL_REGISTER_COUNT],
    pc: u16,
    psr: u16,
}

impl Default for ArchitecturalState {
    fn default() -> Self {
        Self {
            gpr: [0; GENERAL_REGISTER_COUNT],
            pc: RESET_PC,
            psr: 0,
        }
    }
}

impl ArchitecturalState {
    /// Reads a general-purpose register.
    #[must_use]
    pub const fn gpr(&self, reg: GeneralRegister) -> u16 {
        self.gpr[reg.index()]
    }

    /// Writes a general-purpose register.
    pub const fn set_gpr(&mut self, reg: GeneralRegister, value: u16) {
        self.gpr[reg.index()] = value;
    }

    /// Reads the `PC` register.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the `PC` register.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Reads the `PSR` register.
    #[must_use]
    pub const fn psr(&self) -> u16 {
        self.psr
    }

    /// Replaces the whole `PSR`, reserved bits included.
    ///
    /// Only `RTI`'s wholesale restore and host tooling call this; everything
    /// else goes through [`Self::set_condition_codes`].
    pub const fn set_psr(&mut self, value: u16) {
        self.psr = value;
    }

    /// Reads the three condition-code bits.
    #[must_use]
    pub const fn condition_codes(&self) -> u16 {
        self.psr & PSR_CONDITION_MASK
    }

    /// Applies the condition-code update rule for a written 16-bit result.
    ///
    /// Clears the three code bits and sets exactly one of them from the sign
    /// of `result` (bit 15 set is negative, zero is zero, anything else is
    /// positive). All other `PSR` bits are preserved.
    pub const fn set_condition_codes(&mut self, result: u16) {
        let code = if result == 0 {
            PSR_Z
        } else if result & 0x8000 != 0 {
            PSR_N
        } else {
            PSR_P
        };
        self.psr = (self.psr & !PSR_CONDITION_MASK) | code;
    }

    /// Returns `true` when any condition code named in `nzp_mask` is set.
    #[must_use]
    pub const fn condition_met(&self, nzp_mask: u16) -> bool {
        self.condition_codes() & nzp_mask != 0
    }

    /// Returns `true` when the `PSR` mode bit (bit 15) is set.
    #[must_use]
    pub const fn mode_bit_set(&self) -> bool {
        self.psr & PSR_MODE != 0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ArchitecturalState, GeneralRegister, GENERAL_REGISTER_COUNT, PSR_CONDITION_MASK, PSR_MODE,
        PSR_N, PSR_P, PSR_Z, RESET_PC,
    };

    #[test]
    fn register_count_and_decode_match_architecture() {
        assert_eq!(GENERAL_REGISTER_COUNT, 8);

        for bits in 0_u8..=7 {
            let reg = GeneralRegister::from_u3(bits).expect("valid 3-bit register encoding");
            assert_eq!(reg.index(), usize::from(bits));
        }

        assert!(GeneralRegister::from_u3(8).is_none());
    }

    #[test]
    fn general_register_file_tracks_each_register_independently() {
        let mut state = ArchitecturalState::default();

        for (offset, reg) in (0_u16..).zip(GeneralRegister::ALL.iter().copied()) {
            state.set_gpr(reg, 0x1000 + offset);
        }

        for (offset, reg) in (0_u16..).zip(GeneralRegister::ALL.iter().copied()) {
            assert_eq!(state.gpr(reg), 0x1000 + offset);
        }
    }

    #[test]
    fn fresh_state_starts_at_the_reset_origin_with_no_codes_set() {
        let state = ArchitecturalState::default();
        assert_eq!(state.pc(), RESET_PC);
        assert_eq!(state.psr(), 0);
        assert_eq!(state.condition_codes(), 0);
        assert!(!state.mode_bit_set());
    }

    #[test]
    fn condition_codes_set_exactly_one_bit_by_sign() {
        let mut state = ArchitecturalState::default();

        state.set_condition_codes(0x0001);
        assert_eq!(state.condition_codes(), PSR_P);
        state.set_condition_codes(0x0000);
        assert_eq!(state.condition_codes(), PSR_Z);
        state.set_condition_codes(0x8000);
        assert_eq!(state.condition_codes(), PSR_N);
        state.set_condition_codes(0xFFFF);
        assert_eq!(state.condition_codes(), PSR_N);
        state.set_condition_codes(0x7FFF);
        assert_eq!(state.condition_codes(), PSR_P);
    }

    #[test]
    fn condition_code_update_preserves_reserved_psr_bits() {
        let mut state = ArchitecturalState::default();
        state.set_psr(PSR_MODE | 0x0700 | PSR_Z);

        state.set_condition_codes(0x8000);

        assert_eq!(state.condition_codes(), PSR_N);
        assert_eq!(state.psr() & !PSR_CONDITION_MASK, PSR_MODE | 0x0700);
    }

    #[test]
    fn condition_met_checks_only_the_named_bits() {
        let mut state = ArchitecturalState::default();
        state.set_condition_codes(0x8000);

        assert!(state.condition_met(PSR_N));
        assert!(state.condition_met(PSR_N | PSR_Z));
        assert!(!state.condition_met(PSR_Z | PSR_P));
        assert!(!state.condition_met(0));
    }

    #[test]
    fn mode_bit_reads_bit_fifteen_only() {
        let mut state = ArchitecturalState::default();
        state.set_psr(0x7FFF);
        assert!(!state.mode_bit_set());
        state.set_psr(PSR_MODE);
        assert!(state.mode_bit_set());
    }
}
