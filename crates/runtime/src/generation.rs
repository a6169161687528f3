/// Ticket handed out for one asynchronous request.
///
/// A ticket is only honoured while it is the most recent one issued by its
/// [`RequestGeneration`]; anything older is stale and its result is dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Monotonic request counter for stale-response suppression.
///
/// There is no network cancellation here: a superseded request still runs to
/// completion, its result is just ignored when it arrives.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, invalidating every earlier one.
    pub fn advance(&mut self) -> Generation {
        self.current = self.current.wrapping_add(1);
        Generation(self.current)
    }

    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }
}
