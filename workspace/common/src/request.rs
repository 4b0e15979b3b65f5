/// Identifies one outstanding remote call.
///
/// Tokens are handed out by a [`RequestTracker`]; a response is only applied
/// when its token is still the tracker's current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Generation counter for a single kind of request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    generation: u64,
    current: Option<RequestToken>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding any outstanding one.
    pub fn issue(&mut self) -> RequestToken {
        self.generation += 1;
        let token = RequestToken(self.generation);
        self.current = Some(token);
        token
    }

    /// Drops the outstanding request so its response will be ignored.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token)
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Consumes `token` if it is current. Returns false for stale tokens.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.settle(first));
        assert!(tracker.is_pending());
        assert!(tracker.settle(second));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn test_invalidate_discards_outstanding() {
        let mut tracker = RequestTracker::new();
        let token = tracker.issue();
        tracker.invalidate();

        assert!(!tracker.settle(token));
    }

    #[test]
    fn test_token_settles_once() {
        let mut tracker = RequestTracker::new();
        let token = tracker.issue();

        assert!(tracker.settle(token));
        assert!(!tracker.settle(token));
    }
}
