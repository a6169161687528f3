/// One-shot token that swallows the move event caused by a programmatic
/// view change.
///
/// Armed right before the map is re-centered from data; the next move-end is
/// then consumed instead of being reported as a user pan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoveSuppression {
    armed: bool,
}

impl MoveSuppression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` (and disarms) if the token was armed.
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

#[cfg(test)]
mod tests {
    use super::MoveSuppression;

    #[test]
    fn consumed_exactly_once() {
        let mut s = MoveSuppression::new();
        assert!(!s.consume());
        s.arm();
        assert!(s.is_armed());
        assert!(s.consume());
        assert!(!s.consume());
    }

    #[test]
    fn arming_twice_still_swallows_one_event() {
        let mut s = MoveSuppression::new();
        s.arm();
        s.arm();
        assert!(s.consume());
        assert!(!s.is_armed());
    }
}
