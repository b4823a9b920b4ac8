/// Monotonic identity counter.
///
/// Each call to [`SequenceCounter::next_id`] hands out the current value and advances by one,
/// so values are never reused within a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceCounter {
    next: u64,
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl SequenceCounter {
    /// Creates a counter whose first issued value is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Issues the next identifier.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The value the next call to [`SequenceCounter::next_id`] will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counter_starts_at_one() {
        let mut counter = SequenceCounter::default();
        assert_eq!(counter.next_id(), 1);
        assert_eq!(counter.next_id(), 2);
        assert_eq!(counter.peek(), 3);
    }

    #[test]
    fn custom_start_is_respected() {
        let mut counter = SequenceCounter::starting_at(100);
        assert_eq!(counter.next_id(), 100);
    }
}
