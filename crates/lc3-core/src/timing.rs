use crate::Opcode;

/// Cycle cost of the console-input trap service (vector 0x20).
pub const TRAP_GETC_CYCLES: u64 = 28;
/// Cycle cost of the console-output trap service (vector 0x21).
pub const TRAP_OUT_CYCLES: u64 = 36;
/// Fixed portion of the string-output trap service cost (vector 0x22).
pub const TRAP_PUTS_BASE_CYCLES: u64 = 40;
/// Per-character portion of the string-output trap service cost.
pub const TRAP_PUTS_CHAR_CYCLES: u64 = 27;

/// Single source-of-truth base cycle-cost table, keyed by opcode.
///
/// TRAP's entry is the dispatch cost only; the vector's service cost is
/// added on top by the trap service.
pub const CYCLE_COST_TABLE: &[(Opcode, u64)] = &[
    (Opcode::Br, 2),
    (Opcode::Add, 1),
    (Opcode::Ld, 4),
    (Opcode::St, 4),
    (Opcode::Jsr, 2),
    (Opcode::And, 1),
    (Opcode::Ldr, 4),
    (Opcode::Str, 4),
    (Opcode::Rti, 8),
    (Opcode::Not, 1),
    (Opcode::Ldi, 8),
    (Opcode::Sti, 8),
    (Opcode::Jmp, 2),
    (Opcode::Lea, 1),
    (Opcode::Trap, 2),
];

/// Looks up the base cycle cost for an opcode.
///
/// The table covers every assigned opcode, so the zero fallback is
/// unreachable for values produced by the decoder.
#[must_use]
pub fn cycle_cost(opcode: Opcode) -> u64 {
    CYCLE_COST_TABLE
        .iter()
        .find_map(|(entry, cycles)| (*entry == opcode).then_some(*cycles))
        .unwrap_or(0)
}

/// Total string-output trap service cost for `characters` written.
#[must_use]
pub const fn puts_cycles(characters: u64) -> u64 {
    TRAP_PUTS_BASE_CYCLES + TRAP_PUTS_CHAR_CYCLES * characters
}
