/// Identifies one fetch request; later requests carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Caller-side ordering guard for fetch completions.
///
/// A completion is applied only if no newer request has already been applied, so a
/// slow, stale response can never overwrite the result of a fresher one.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    issued: u64,
    applied: u64,
}

impl RefreshSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Returns `true` and records the ticket when it is newer than the last applied one.
    pub fn accept(&mut self, ticket: FetchTicket) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        true
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }
}
