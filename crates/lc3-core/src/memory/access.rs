//! Range-checked effective-address computation.
//!
//! Register and memory words are `u16`, so a value used directly as an
//! address is always inside the space. Base-plus-offset arithmetic is the
//! one place an address can escape; every such computation in the core goes
//! through [`effective_address`] so the overrun surfaces as a fault instead
//! of wrapping.

use crate::Fault;

/// Computes `base + offset`, rejecting results outside the address space.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] carrying the widened result when it
/// falls below 0x0000 or above 0xFFFF.
pub fn effective_address(base: u16, offset: i32) -> Result<u16, Fault> {
    let target = i32::from(base) + offset;
    u16::try_from(target).map_err(|_| Fault::AddressOutOfRange { address: target })
}
