//! Last-request-wins sequencing for availability fetches.
//!
//! Every date or service change issues a new token. A response is accepted only
//! if it carries the most recent token; anything older is stale and dropped,
//! so a slow earlier response can never overwrite a newer one.

use serde::Serialize;

/// Identifies one outstanding availability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Monotonic token issuer.
#[derive(Debug, Default, Clone)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest > 0).then_some(RequestToken(self.latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let mut seq = RequestSequencer::new();
        assert_eq!(seq.latest(), None);
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(seq.latest(), Some(b));
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
