//! Field extraction and sign-extension helpers for the execute stage.
//!
//! Two sign-extension forms exist on purpose: ALU operands stay in the
//! 16-bit two's-complement domain and wrap, while address offsets widen to
//! `i32` so out-of-range effective addresses can be rejected instead of
//! wrapped.

/// Sign-extends an N-bit field to a full 16-bit two's-complement word.
pub(crate) const fn sign_extend(field: u16, width: u32) -> u16 {
    let field = field & ((1 << width) - 1);
    if field & (1 << (width - 1)) != 0 {
        field | (0xFFFF << width)
    } else {
        field
    }
}

/// Signed value of an N-bit field, widened for address arithmetic.
///
/// A field with its top bit set is its unsigned value plus (-1 << width);
/// anything else is the unsigned value unchanged.
pub(crate) fn signed_offset(field: u16, width: u32) -> i32 {
    let field = field & ((1 << width) - 1);
    let value = i32::from(field);
    if field & (1 << (width - 1)) != 0 {
        value + ((-1) << width)
    } else {
        value
    }
}

/// 5-bit immediate operand for ADD/AND, already sign-extended to 16 bits.
pub(crate) const fn imm5_operand(word: u16) -> u16 {
    sign_extend(word & 0x1F, 5)
}

/// 9-bit PC-relative offset (LD/LDI/ST/STI/LEA/BR).
pub(crate) fn pc_offset9(word: u16) -> i32 {
    signed_offset(word & 0x1FF, 9)
}

/// 11-bit PC-relative offset (JSR).
pub(crate) fn pc_offset11(word: u16) -> i32 {
    signed_offset(word & 0x7FF, 11)
}

/// 6-bit base-register offset (LDR/STR).
pub(crate) fn offset6(word: u16) -> i32 {
    signed_offset(word & 0x3F, 6)
}

/// 8-bit trap vector from the low byte.
pub(crate) const fn trap_vector(word: u16) -> u8 {
    (word & 0xFF) as u8
}

/// Condition mask from bits 11..=9, aligned with the PSR code bits.
pub(crate) const fn nzp_mask(word: u16) -> u16 {
    (word >> 9) & 0x7
}

/// Bit 5, selecting the immediate second operand for ADD/AND.
pub(crate) const fn immediate_mode(word: u16) -> bool {
    word & 0x0020 != 0
}

/// Bit 11, selecting the PC-relative form of JSR over JSRR.
pub(crate) const fn offset_call_mode(word: u16) -> bool {
    word & 0x0800 != 0
}

#[cfg(test)]
mod tests {
    use super::{
        imm5_operand, immediate_mode, nzp_mask, offset6, offset_call_mode, pc_offset9,
        pc_offset11, sign_extend, signed_offset, trap_vector,
    };

    #[test]
    fn five_bit_all_ones_extends_to_minus_one() {
        assert_eq!(sign_extend(0b11111, 5), 0xFFFF);
        assert_eq!(signed_offset(0b11111, 5), -1);
    }

    #[test]
    fn nine_bit_top_bit_extends_to_minus_256() {
        assert_eq!(sign_extend(0b1_0000_0000, 9), 0xFF00);
        assert_eq!(signed_offset(0b1_0000_0000, 9), -256);
    }

    #[test]
    fn fields_without_the_top_bit_pass_through_unchanged() {
        assert_eq!(sign_extend(0b01111, 5), 15);
        assert_eq!(signed_offset(0b0_1111_1111, 9), 255);
        assert_eq!(signed_offset(0, 9), 0);
    }

    #[test]
    fn widths_used_by_the_instruction_set_cover_their_ranges() {
        assert_eq!(offset6(0x0020), -32);
        assert_eq!(offset6(0x001F), 31);
        assert_eq!(pc_offset9(0x01FF), -1);
        assert_eq!(pc_offset11(0x0400), -1024);
        assert_eq!(pc_offset11(0x03FF), 1023);
    }

    #[test]
    fn extraction_ignores_bits_outside_the_field() {
        assert_eq!(imm5_operand(0xFFE1), 1);
        assert_eq!(pc_offset9(0xFE01), 1);
        assert_eq!(trap_vector(0xF025), 0x25);
        assert_eq!(nzp_mask(0x0E00), 0b111);
        assert_eq!(nzp_mask(0x0200), 0b001);
    }

    #[test]
    fn mode_bits_read_their_assigned_positions() {
        assert!(immediate_mode(0x0020));
        assert!(!immediate_mode(0xFFDF));
        assert!(offset_call_mode(0x0800));
        assert!(!offset_call_mode(0xF7FF));
    }
}
