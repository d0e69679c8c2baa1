/// The environment's pointer into the newest-first aligned history.
///
/// Index `len - 1` is the oldest usable session and index 0 the most recent
/// one. An episode starts at the oldest index and every step decrements the
/// position by exactly one, so the cursor is monotonically decreasing and
/// calendar time moves forward as it shrinks. Position 0 is the terminal
/// state.
///
/// Direction matters: "next day" always means `position - 1` (one step closer
/// to the present), never the calendar-next of the underlying storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseCursor {
    position: usize,
    len: usize,
}

impl ReverseCursor {
    /// Creates a cursor over `len` aligned rows, positioned at the oldest.
    /// Callers are responsible for ensuring `len >= 1`.
    pub fn new(len: usize) -> Self {
        Self {
            position: len.saturating_sub(1),
            len,
        }
    }

    /// Moves back to the oldest usable index.
    pub fn rewind(&mut self) {
        self.position = self.len.saturating_sub(1);
    }

    /// The index of "today" within the aligned history.
    pub fn current(&self) -> usize {
        self.position
    }

    /// Advances one session toward the present. A no-op at the terminal
    /// position; the environment's status gate keeps us from ever stepping
    /// there.
    pub fn step(&mut self) {
        debug_assert!(self.position > 0, "stepped an exhausted cursor");
        self.position = self.position.saturating_sub(1);
    }

    /// True once the cursor has reached the most recent session.
    pub fn is_exhausted(&self) -> bool {
        self.position == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cursor_starts_at_oldest_index() {
        let cursor = ReverseCursor::new(5);
        assert_eq!(cursor.current(), 4);
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn test_cursor_is_monotonically_decreasing() {
        let mut cursor = ReverseCursor::new(4);
        let mut seen = vec![cursor.current()];

        while !cursor.is_exhausted() {
            cursor.step();
            seen.push(cursor.current());
        }

        assert_eq!(seen, vec![3, 2, 1, 0], "strictly toward the present");
    }

    #[test]
    fn test_cursor_exhausts_after_len_minus_one_steps() {
        let mut cursor = ReverseCursor::new(2);
        cursor.step();
        assert!(cursor.is_exhausted(), "2 rows allow exactly one step");
    }

    #[test]
    fn test_cursor_rewind() {
        let mut cursor = ReverseCursor::new(3);
        cursor.step();
        cursor.step();
        assert!(cursor.is_exhausted());

        cursor.rewind();
        assert_eq!(cursor.current(), 2);
    }
}
