//! Loads a small hand-assembled program, runs it to the halt word, and
//! reports the console transcript plus the deterministic cycle bill.
//!
//! Raise the subscriber level to `TRACE` to watch every retired instruction.

use lc3_core::{LoadError, Machine, HALT_WORD};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing::Level;

fn main() -> Result<(), LoadError> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    // LEA R0, #4   ; point R0 at the prompt text
    // TRAP x22     ; print it
    // TRAP x20     ; read one character
    // TRAP x21     ; echo it back
    // HALT
    let mut image: Vec<u16> = vec![0xE004, 0xF022, 0xF020, 0xF021, HALT_WORD];
    image.extend("OK> ".encode_utf16());
    image.push(0);

    let mut machine = Machine::new();
    machine.initialize(0x3000, &image)?;
    machine.set_input("y");

    let outcome = machine.run(0x3000);
    tracing::info!(cycles = outcome.cycles, stop = ?outcome.stop, "run finished");

    println!("transcript: {:?}", machine.output());
    println!("cycles:     {}", outcome.cycles);
    println!("stopped:    {:?}", outcome.stop);
    Ok(())
}
