//! Word-addressed memory model and image loading.

/// Range-checked effective-address policy helpers.
pub mod access;

pub use access::effective_address;

use thiserror::Error;

/// Number of addressable 16-bit words (the full `u16` address space).
pub const MEMORY_WORDS: usize = u16::MAX as usize + 1;

/// Errors from copying a program image into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The image extends past the top of the address space.
    #[error("image of {words} words does not fit at origin 0x{origin:04X}")]
    ImageOverflow {
        /// First address the image was to occupy.
        origin: u16,
        /// Length of the rejected image in words.
        words: usize,
    },
}

/// Flat 65536-word addressable store, the machine's whole address space.
///
/// Every `u16` is a valid address, so plain reads and writes cannot fail;
/// range checking happens where addresses are computed, in [`access`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct WordMemory {
    words: Box<[u16]>,
}

impl Default for WordMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl WordMemory {
    /// Allocates a zeroed address space.
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: vec![0; MEMORY_WORDS].into_boxed_slice(),
        }
    }

    /// Reads the word at `addr`.
    #[must_use]
    pub fn read(&self, addr: u16) -> u16 {
        self.words[usize::from(addr)]
    }

    /// Writes the word at `addr`.
    pub fn write(&mut self, addr: u16, value: u16) {
        self.words[usize::from(addr)] = value;
    }

    /// Copies `image` into memory starting at `origin`.
    ///
    /// The image is the object file's payload with its origin header already
    /// stripped by the loader. Memory outside the copied range is untouched;
    /// on error nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ImageOverflow`] when the image would extend past
    /// address 0xFFFF.
    pub fn load_image(&mut self, origin: u16, image: &[u16]) -> Result<(), LoadError> {
        let start = usize::from(origin);
        let end = start.checked_add(image.len()).filter(|end| *end <= MEMORY_WORDS);
        let Some(end) = end else {
            return Err(LoadError::ImageOverflow {
                origin,
                words: image.len(),
            });
        };
        self.words[start..end].copy_from_slice(image);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadError, WordMemory, MEMORY_WORDS};

    #[test]
    fn fresh_memory_is_zeroed_and_covers_the_address_space() {
        let memory = WordMemory::new();
        assert_eq!(MEMORY_WORDS, 65536);
        assert_eq!(memory.read(0x0000), 0);
        assert_eq!(memory.read(0xFFFF), 0);
    }

    #[test]
    fn writes_round_trip_at_both_ends_of_the_space() {
        let mut memory = WordMemory::new();
        memory.write(0x0000, 0xBEEF);
        memory.write(0xFFFF, 0x1234);
        assert_eq!(memory.read(0x0000), 0xBEEF);
        assert_eq!(memory.read(0xFFFF), 0x1234);
    }

    #[test]
    fn image_loads_at_origin_and_leaves_neighbors_alone() {
        let mut memory = WordMemory::new();
        memory.write(0x2FFF, 0xAAAA);
        memory.write(0x3003, 0xBBBB);

        memory
            .load_image(0x3000, &[0x1111, 0x2222, 0x3333])
            .expect("image fits");

        assert_eq!(memory.read(0x3000), 0x1111);
        assert_eq!(memory.read(0x3002), 0x3333);
        assert_eq!(memory.read(0x2FFF), 0xAAAA);
        assert_eq!(memory.read(0x3003), 0xBBBB);
    }

    #[test]
    fn image_may_end_exactly_at_the_top_of_memory() {
        let mut memory = WordMemory::new();
        memory.load_image(0xFFFE, &[0x0001, 0x0002]).expect("image fits");
        assert_eq!(memory.read(0xFFFE), 0x0001);
        assert_eq!(memory.read(0xFFFF), 0x0002);
    }

    #[test]
    fn overflowing_image_is_rejected_without_writing() {
        let mut memory = WordMemory::new();
        let result = memory.load_image(0xFFFF, &[0x0001, 0x0002]);
        assert_eq!(
            result,
            Err(LoadError::ImageOverflow {
                origin: 0xFFFF,
                words: 2
            })
        );
        assert_eq!(memory.read(0xFFFF), 0);
    }

    #[test]
    fn empty_image_is_a_no_op_anywhere() {
        let mut memory = WordMemory::new();
        memory.load_image(0xFFFF, &[]).expect("empty image loads");
        assert_eq!(memory.read(0xFFFF), 0);
    }
}
