use crate::Fault;

/// Console device state: a cursored input sequence and an output buffer.
///
/// Host text is held as UTF-16 code units so one register word carries
/// exactly one unit: GETC consumes one unit per call and OUT/PUTS append one
/// unit per character word. Output renders back to host text on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Console {
    input: Vec<u16>,
    cursor: usize,
    output: Vec<u16>,
}

impl Console {
    /// Creates a console with no input and empty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the input sequence and rewinds the cursor.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.encode_utf16().collect();
        self.cursor = 0;
    }

    /// Rewinds the input cursor without touching the sequence itself.
    pub const fn rewind_input(&mut self) {
        self.cursor = 0;
    }

    /// Number of input units left ahead of the cursor.
    #[must_use]
    pub fn remaining_input(&self) -> usize {
        self.input.len().saturating_sub(self.cursor)
    }

    /// Consumes and returns the next input unit.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InputExhausted`] when the cursor is past the end.
    pub fn read_input(&mut self) -> Result<u16, Fault> {
        let unit = self.input.get(self.cursor).copied().ok_or(Fault::InputExhausted)?;
        self.cursor += 1;
        Ok(unit)
    }

    /// Appends one output unit.
    pub fn push_output(&mut self, unit: u16) {
        self.output.push(unit);
    }

    /// Renders the accumulated output as host text.
    #[must_use]
    pub fn output_text(&self) -> String {
        String::from_utf16_lossy(&self.output)
    }

    /// Discards the accumulated output.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}
