//! # Offset Ledger
//!
//! Applies edits computed against the *original* buffer to a buffer that is
//! being mutated in place.
//!
//! A single cumulative shift is enough as long as edits arrive in ascending
//! order of their original start; the ledger rejects anything else.

use crate::error::{AppError, AppResult};

/// Cumulative shift between original and current buffer positions.
#[derive(Debug, Default, Clone)]
pub struct OffsetLedger {
    shift: isize,
    last_start: Option<usize>,
}

impl OffsetLedger {
    /// Creates a ledger with a zero shift.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current adjustment added to original positions.
    pub fn shift(&self) -> isize {
        self.shift
    }

    /// Replaces `original_start..original_end` (original coordinates) with
    /// `new_text` in `buffer`.
    ///
    /// Two insertions at the same position are rejected as well, since their
    /// relative order would be ambiguous.
    pub fn apply(
        &mut self,
        original_start: usize,
        original_end: usize,
        new_text: &str,
        buffer: &mut String,
    ) -> AppResult<()> {
        if let Some(previous) = self.last_start {
            if original_start <= previous {
                return Err(AppError::EditOrder {
                    previous,
                    next: original_start,
                });
            }
        }
        if original_end < original_start {
            return Err(AppError::General(format!(
                "Invalid edit range {}..{}",
                original_start, original_end
            )));
        }

        let start = self.translate(original_start)?;
        let end = self.translate(original_end)?;
        if end > buffer.len() || !buffer.is_char_boundary(start) || !buffer.is_char_boundary(end) {
            return Err(AppError::General(format!(
                "Edit range {}..{} does not fit the buffer",
                start, end
            )));
        }

        buffer.replace_range(start..end, new_text);
        self.shift += new_text.len() as isize - (end - start) as isize;
        self.last_start = Some(original_start);
        Ok(())
    }

    fn translate(&self, position: usize) -> AppResult<usize> {
        let shifted = position as isize + self.shift;
        usize::try_from(shifted)
            .map_err(|_| AppError::General(format!("Edit position {} shifted below zero", position)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_inserts() {
        let mut buf = String::from("A B C");
        let mut ledger = OffsetLedger::new();
        ledger.apply(1, 1, "x", &mut buf).unwrap();
        ledger.apply(3, 3, "yy", &mut buf).unwrap();
        ledger.apply(5, 5, "z", &mut buf).unwrap();
        assert_eq!(buf, "Ax Byy Cz");
        assert_eq!(ledger.shift(), 4);
    }

    #[test]
    fn test_replace_shrinks_and_grows() {
        let mut buf = String::from("one two three");
        let mut ledger = OffsetLedger::new();
        ledger.apply(0, 3, "1", &mut buf).unwrap();
        ledger.apply(4, 7, "deux", &mut buf).unwrap();
        ledger.apply(8, 13, "3", &mut buf).unwrap();
        assert_eq!(buf, "1 deux 3");
        assert_eq!(ledger.shift(), -5);
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let mut buf = String::from("abcdef");
        let mut ledger = OffsetLedger::new();
        ledger.apply(4, 4, "X", &mut buf).unwrap();
        let err = ledger.apply(2, 2, "Y", &mut buf).unwrap_err();
        assert!(matches!(err, AppError::EditOrder { previous: 4, next: 2 }));
        assert_eq!(buf, "abcdXef");
    }

    #[test]
    fn test_range_outside_buffer() {
        let mut buf = String::from("abc");
        let mut ledger = OffsetLedger::new();
        assert!(ledger.apply(2, 10, "", &mut buf).is_err());
    }
}
