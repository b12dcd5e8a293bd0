//! Code point allocation
//!
//! Pinned code points come from the override table and are reserved before
//! any glyph is created. Unpinned glyphs take the next free value at or
//! after a moving cursor, skipping reserved and already used values.

use crate::core::config::params::MAX_CODEPOINT;
use crate::core::errors::ConfigError;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct CodepointAllocator {
    start: u32,
    cursor: u32,
    reserved: HashSet<u32>,
    consumed: HashSet<u32>,
}

impl CodepointAllocator {
    pub fn new(start: u32, reserved: HashSet<u32>) -> Self {
        Self {
            start,
            cursor: start,
            reserved,
            consumed: HashSet::new(),
        }
    }

    /// Assign a code point to the next glyph in name order.
    ///
    /// A pin is used as is and does not move the cursor.
    pub fn assign(&mut self, pin: Option<u32>) -> Result<u32, ConfigError> {
        if let Some(pin) = pin {
            self.consumed.insert(pin);
            return Ok(pin);
        }

        let mut candidate = self.cursor;
        while self.reserved.contains(&candidate) || self.consumed.contains(&candidate) {
            candidate += 1;
        }
        if candidate > MAX_CODEPOINT {
            return Err(ConfigError::CodepointExhausted(self.start));
        }

        self.consumed.insert(candidate);
        self.cursor = candidate + 1;
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_without_pins() {
        let mut allocator = CodepointAllocator::new(0xEA01, HashSet::new());
        let assigned: Vec<u32> = (0..4).map(|_| allocator.assign(None).unwrap()).collect();
        assert_eq!(assigned, vec![0xEA01, 0xEA02, 0xEA03, 0xEA04]);
    }

    #[test]
    fn test_reserved_values_are_skipped() {
        let reserved: HashSet<u32> = [0xEA02, 0xEA03].into_iter().collect();
        let mut allocator = CodepointAllocator::new(0xEA01, reserved);

        assert_eq!(allocator.assign(None).unwrap(), 0xEA01);
        // The pinned glyph may come before its turn in name order
        assert_eq!(allocator.assign(Some(0xEA03)).unwrap(), 0xEA03);
        assert_eq!(allocator.assign(None).unwrap(), 0xEA04);
        assert_eq!(allocator.assign(Some(0xEA02)).unwrap(), 0xEA02);
        assert_eq!(allocator.assign(None).unwrap(), 0xEA05);
    }

    #[test]
    fn test_pin_behind_cursor_is_not_checked() {
        let reserved: HashSet<u32> = [0x41].into_iter().collect();
        let mut allocator = CodepointAllocator::new(0xEA01, reserved);
        assert_eq!(allocator.assign(None).unwrap(), 0xEA01);
        assert_eq!(allocator.assign(Some(0x41)).unwrap(), 0x41);
        assert_eq!(allocator.assign(None).unwrap(), 0xEA02);
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let mut allocator = CodepointAllocator::new(MAX_CODEPOINT, HashSet::new());
        assert_eq!(allocator.assign(None).unwrap(), MAX_CODEPOINT);
        assert!(matches!(
            allocator.assign(None),
            Err(ConfigError::CodepointExhausted(_))
        ));
    }
}
