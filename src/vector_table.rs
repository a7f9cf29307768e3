//! Interrupt vector table reader.
//!
//! The source is line-oriented text: blank lines and `#` comments are
//! skipped, `@<hex-offset>` jumps the implicit offset, `-` consumes a slot
//! without naming a handler, and any other line names the handler at the
//! current offset. Every non-directive line advances the offset by the slot
//! width (4 bytes). The parsed table covers every aligned slot between the
//! lowest and highest offset seen.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Width of one vector slot in bytes.
pub const VECTOR_STEP: u32 = 4;

#[derive(Debug, Error)]
pub enum VectorTableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid offset directive '{directive}' on line {line}: expected a hex offset")]
    InvalidOffset { line: usize, directive: String },

    #[error("vector offset 0x{offset:x} on line {line} exceeds the 32-bit range")]
    OffsetOverflow { offset: u64, line: usize },
}

/// Ordered list of interrupt/exception handler names at fixed offsets.
#[derive(Debug, Clone, Default)]
pub struct VectorTable {
    bounds: Option<(u32, u32)>,
    vectors: BTreeMap<u32, String>,
}

impl VectorTable {
    /// Parse a vector table description from text.
    pub fn parse(text: &str) -> Result<Self, VectorTableError> {
        let mut vectors = BTreeMap::new();
        let mut bounds: Option<(u32, u32)> = None;
        // Runs in u64 so only a slot actually placed beyond the 32-bit
        // range is an error, not the increment after the last line.
        let mut offset: u64 = 0;

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(hex) = line.strip_prefix('@') {
                offset = u32::from_str_radix(hex, 16).map_err(|_| {
                    VectorTableError::InvalidOffset {
                        line: index + 1,
                        directive: line.to_string(),
                    }
                })? as u64;
                continue;
            }

            let slot = u32::try_from(offset).map_err(|_| VectorTableError::OffsetOverflow {
                offset,
                line: index + 1,
            })?;
            if line != "-" {
                vectors.insert(slot, line.to_string());
            }
            bounds = Some(match bounds {
                None => (slot, slot),
                Some((min, max)) => (min.min(slot), max.max(slot)),
            });
            offset += u64::from(VECTOR_STEP);
        }

        Ok(VectorTable { bounds, vectors })
    }

    /// Read and parse a vector table description from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VectorTableError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Lowest offset seen, if any line defined a slot.
    pub fn min_offset(&self) -> Option<u32> {
        self.bounds.map(|(min, _)| min)
    }

    /// Highest offset seen, if any line defined a slot.
    pub fn max_offset(&self) -> Option<u32> {
        self.bounds.map(|(_, max)| max)
    }

    /// Handler name at an exact offset, if one was defined there.
    pub fn handler_at(&self, offset: u32) -> Option<&str> {
        self.vectors.get(&offset).map(String::as_str)
    }

    /// Every aligned slot from the lowest to the highest offset seen, as
    /// `(offset, handler)`; slots consumed by `-` or skipped over by an `@`
    /// jump yield `None`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Option<&str>)> + '_ {
        let (min, max) = self.bounds.unwrap_or((VECTOR_STEP, 0));
        (min..=max)
            .step_by(VECTOR_STEP as usize)
            .map(|offset| (offset, self.handler_at(offset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_lines_advance_by_the_slot_width() {
        let table = VectorTable::parse("estack\nreset\nnmi\n").unwrap();
        let slots: Vec<(u32, Option<&str>)> = table.iter().collect();
        assert_eq!(
            slots,
            [(0, Some("estack")), (4, Some("reset")), (8, Some("nmi"))]
        );
    }

    #[test]
    fn offset_directives_jump_and_leave_gaps() {
        let table = VectorTable::parse("reset\n@10\ntim2\n").unwrap();
        assert_eq!(table.min_offset(), Some(0));
        assert_eq!(table.max_offset(), Some(0x10));
        let slots: Vec<(u32, Option<&str>)> = table.iter().collect();
        assert_eq!(slots.len(), 5);
        assert_eq!(slots[0], (0, Some("reset")));
        assert_eq!(slots[1], (4, None));
        assert_eq!(slots[4], (0x10, Some("tim2")));
    }

    #[test]
    fn offsets_may_jump_backwards() {
        let table = VectorTable::parse("@10\ntim2\n@0\nreset\n").unwrap();
        assert_eq!(table.min_offset(), Some(0));
        assert_eq!(table.max_offset(), Some(0x10));
        assert_eq!(table.handler_at(0), Some("reset"));
        assert_eq!(table.handler_at(0x10), Some("tim2"));
    }

    #[test]
    fn dash_consumes_a_slot_without_a_handler() {
        let table = VectorTable::parse("reset\n-\nhardfault\n").unwrap();
        let slots: Vec<(u32, Option<&str>)> = table.iter().collect();
        assert_eq!(
            slots,
            [(0, Some("reset")), (4, None), (8, Some("hardfault"))]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# cortex-m core vectors\n\nestack\n   \nreset\n  # indented comment\nnmi\n";
        let table = VectorTable::parse(text).unwrap();
        let slots: Vec<(u32, Option<&str>)> = table.iter().collect();
        assert_eq!(
            slots,
            [(0, Some("estack")), (4, Some("reset")), (8, Some("nmi"))]
        );
    }

    #[test]
    fn handler_names_are_trimmed() {
        let table = VectorTable::parse("  reset  \n").unwrap();
        assert_eq!(table.handler_at(0), Some("reset"));
    }

    #[test]
    fn bad_offset_directive_is_an_error() {
        let err = VectorTable::parse("reset\n@zz\n").unwrap_err();
        match err {
            VectorTableError::InvalidOffset { line, directive } => {
                assert_eq!(line, 2);
                assert_eq!(directive, "@zz");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn slot_beyond_the_32_bit_range_is_an_error() {
        // The slot at 0xfffffffc itself is still addressable.
        let table = VectorTable::parse("@fffffffc\nlast\n").unwrap();
        assert_eq!(table.handler_at(0xffff_fffc), Some("last"));

        let err = VectorTable::parse("@fffffffc\nlast\nbeyond\n").unwrap_err();
        assert!(matches!(err, VectorTableError::OffsetOverflow { line: 3, .. }));
    }

    #[test]
    fn empty_source_yields_an_empty_table() {
        let table = VectorTable::parse("# only comments\n\n").unwrap();
        assert_eq!(table.min_offset(), None);
        assert_eq!(table.iter().count(), 0);
    }
}
