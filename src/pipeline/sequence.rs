/// Identifies one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Issues request tokens so only the most recent invocation gets rendered.
///
/// Every new invocation takes a fresh token; when results arrive, anything
/// that is not the latest token is stale and must be dropped, regardless of
/// the order in which the background loads finish.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the token for a new invocation, superseding all earlier ones.
    pub fn issue(&mut self) -> RequestToken {
        self.latest = self.latest.wrapping_add(1);
        RequestToken(self.latest)
    }

    /// True if `token` belongs to the most recently issued invocation.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest != 0 && token.0 == self.latest
    }
}
