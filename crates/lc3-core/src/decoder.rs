//! Instruction decoder: opcode classification and register-field extraction.
//!
//! Offset and immediate fields vary per opcode and are pulled out of the
//! retained raw word by the execution stage, so decode itself only has to
//! classify the opcode and name the three possible register fields.

use crate::encoding::Opcode;
use crate::state::GeneralRegister;
use crate::Fault;

/// Decoded instruction: opcode class, register fields, and the raw word.
///
/// The three register fields are extracted unconditionally from their fixed
/// bit positions; opcodes that do not use a field simply ignore it. `dr`
/// doubles as the condition mask field for `BR` and the source register for
/// the store opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Opcode class from bits 15..=12.
    pub opcode: Opcode,
    /// Destination/source register field, bits 11..=9.
    pub dr: GeneralRegister,
    /// First source or base register field, bits 8..=6.
    pub sr1: GeneralRegister,
    /// Second source register field, bits 2..=0.
    pub sr2: GeneralRegister,
    /// The fetched word, kept for per-opcode offset extraction.
    pub raw: u16,
}

/// Instruction decoder for the 16-bit teaching ISA.
pub struct Decoder;

const fn register_field(word: u16, shift: u32) -> GeneralRegister {
    match GeneralRegister::from_u3(((word >> shift) & 0x7) as u8) {
        Some(register) => register,
        // A masked 3-bit field always decodes.
        None => GeneralRegister::R7,
    }
}

impl Decoder {
    /// Decodes a 16-bit instruction word.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::ReservedOpcode`] when bits 15..=12 hold the
    /// architecture's reserved value `0b1101`.
    pub const fn decode(word: u16) -> Result<DecodedInstruction, Fault> {
        let op_bits = ((word >> 12) & 0xF) as u8;
        let Some(opcode) = Opcode::from_u4(op_bits) else {
            return Err(Fault::ReservedOpcode);
        };

        Ok(DecodedInstruction {
            opcode,
            dr: register_field(word, 9),
            sr1: register_field(word, 6),
            sr2: register_field(word, 0),
            raw: word,
        })
    }
}
