/// Number of assigned opcode classes (the 4-bit space minus the reserved slot).
pub const OPCODE_COUNT: usize = 15;

/// Opcode classes with their assigned 4-bit encodings (bits 15..=12).
///
/// Value `0b1101` is reserved by the architecture and deliberately absent;
/// [`Opcode::from_u4`] rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    Br = 0x0,
    Add = 0x1,
    Ld = 0x2,
    St = 0x3,
    Jsr = 0x4,
    And = 0x5,
    Ldr = 0x6,
    Str = 0x7,
    Rti = 0x8,
    Not = 0x9,
    Ldi = 0xA,
    Sti = 0xB,
    Jmp = 0xC,
    Lea = 0xE,
    Trap = 0xF,
}

impl Opcode {
    /// Every assigned opcode, in encoding order.
    pub const ALL: [Self; OPCODE_COUNT] = [
        Self::Br,
        Self::Add,
        Self::Ld,
        Self::St,
        Self::Jsr,
        Self::And,
        Self::Ldr,
        Self::Str,
        Self::Rti,
        Self::Not,
        Self::Ldi,
        Self::Sti,
        Self::Jmp,
        Self::Lea,
        Self::Trap,
    ];

    /// Converts a 4-bit opcode field into an assigned opcode class.
    ///
    /// Returns `None` for the reserved value `0b1101` and for anything
    /// wider than four bits.
    #[must_use]
    pub const fn from_u4(op: u8) -> Option<Self> {
        match op {
            0x0 => Some(Self::Br),
            0x1 => Some(Self::Add),
            0x2 => Some(Self::Ld),
            0x3 => Some(Self::St),
            0x4 => Some(Self::Jsr),
            0x5 => Some(Self::And),
            0x6 => Some(Self::Ldr),
            0x7 => Some(Self::Str),
            0x8 => Some(Self::Rti),
            0x9 => Some(Self::Not),
            0xA => Some(Self::Ldi),
            0xB => Some(Self::Sti),
            0xC => Some(Self::Jmp),
            0xE => Some(Self::Lea),
            0xF => Some(Self::Trap),
            _ => None,
        }
    }

    /// Returns the 4-bit encoding of this opcode.
    #[must_use]
    pub const fn as_u4(self) -> u8 {
        self as u8
    }

    /// Returns the assembler mnemonic for this opcode.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Br => "BR",
            Self::Add => "ADD",
            Self::Ld => "LD",
            Self::St => "ST",
            Self::Jsr => "JSR",
            Self::And => "AND",
            Self::Ldr => "LDR",
            Self::Str => "STR",
            Self::Rti => "RTI",
            Self::Not => "NOT",
            Self::Ldi => "LDI",
            Self::Sti => "STI",
            Self::Jmp => "JMP",
            Self::Lea => "LEA",
            Self::Trap => "TRAP",
        }
    }

    /// Opcodes whose result writes the condition codes.
    ///
    /// RTI is not listed: it replaces the whole `PSR` wholesale rather than
    /// deriving codes from a result.
    #[must_use]
    pub const fn updates_condition_codes(self) -> bool {
        matches!(
            self,
            Self::Add | Self::And | Self::Not | Self::Ld | Self::Ldi | Self::Ldr | Self::Lea
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Opcode, OPCODE_COUNT};

    #[test]
    fn every_four_bit_value_except_reserved_decodes() {
        for op in 0x0_u8..=0xF {
            let decoded = Opcode::from_u4(op);
            if op == 0xD {
                assert!(decoded.is_none());
            } else {
                let opcode = decoded.expect("assigned opcode value");
                assert_eq!(opcode.as_u4(), op);
            }
        }
        assert!(Opcode::from_u4(0x10).is_none());
    }

    #[test]
    fn all_lists_each_opcode_exactly_once() {
        let encodings: HashSet<_> = Opcode::ALL.iter().map(|op| op.as_u4()).collect();
        assert_eq!(encodings.len(), OPCODE_COUNT);
    }

    #[test]
    fn mnemonics_are_unique() {
        let mnemonics: HashSet<_> = Opcode::ALL.iter().map(|op| op.mnemonic()).collect();
        assert_eq!(mnemonics.len(), OPCODE_COUNT);
    }

    #[test]
    fn flag_setting_opcodes_match_documented_list() {
        let setters: Vec<_> = Opcode::ALL
            .iter()
            .copied()
            .filter(|op| op.updates_condition_codes())
            .collect();
        assert_eq!(
            setters,
            [
                Opcode::Add,
                Opcode::Ld,
                Opcode::And,
                Opcode::Ldr,
                Opcode::Not,
                Opcode::Ldi,
                Opcode::Lea
            ]
        );
    }
}
